//! Visual asset resolution.

use std::path::{Path, PathBuf};

use reel_models::Category;
use tracing::debug;

/// Image extensions checked per directory, in priority order.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Music files checked under the assets root, in priority order.
const MUSIC_CANDIDATES: &[&str] = &["music/background.mp3", "music/background.wav"];

/// Relative logo path under the assets root.
const LOGO_PATH: &str = "logos/logo.png";

/// Resolves visual assets from a directory tree.
///
/// Lookup never fails: a missing asset is `None`, a normal input for the
/// fallback renderer.
#[derive(Debug, Clone)]
pub struct AssetLibrary {
    root: PathBuf,
}

impl AssetLibrary {
    /// Create a library rooted at `root` (typically `assets/`).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The assets root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find a background image for a category.
    ///
    /// Searches the category directory, then the generic fallback directory,
    /// then the images root, checking extensions in `IMAGE_EXTENSIONS` order
    /// within each. Directory-then-extension priority; lexicographically
    /// first file within a bucket.
    pub fn find_image(&self, category: Category) -> Option<PathBuf> {
        let images = self.root.join("images");
        let dirs = [
            images.join(category.as_dir_name()),
            images.join(Category::default().as_dir_name()),
            images,
        ];

        for dir in &dirs {
            for ext in IMAGE_EXTENSIONS {
                if let Some(found) = first_file_with_extension(dir, ext) {
                    debug!(category = %category, path = %found.display(), "Resolved background image");
                    return Some(found);
                }
            }
        }

        debug!(category = %category, "No background image found");
        None
    }

    /// The logo overlay image, if present.
    pub fn find_logo(&self) -> Option<PathBuf> {
        let path = self.root.join(LOGO_PATH);
        path.exists().then_some(path)
    }

    /// Background music, if present. First existing candidate wins.
    pub fn find_music(&self) -> Option<PathBuf> {
        MUSIC_CANDIDATES
            .iter()
            .map(|rel| self.root.join(rel))
            .find(|path| path.exists())
    }
}

/// Lexicographically first regular file in `dir` with the given extension.
fn first_file_with_extension(dir: &Path, ext: &str) -> Option<PathBuf> {
    let entries = std::fs::read_dir(dir).ok()?;

    let mut matches: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|e| e.eq_ignore_ascii_case(ext))
        })
        .collect();

    matches.sort();
    matches.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_category_dir_wins() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(&root.join("images/ai/brain.png"));
        touch(&root.join("images/generic.jpg"));

        let lib = AssetLibrary::new(root);
        let found = lib.find_image(Category::Ai).unwrap();
        assert!(found.ends_with("images/ai/brain.png"));
    }

    #[test]
    fn test_extension_priority_within_directory() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(&root.join("images/tools/zz.jpg"));
        touch(&root.join("images/tools/aa.png"));

        let lib = AssetLibrary::new(root);
        // jpg outranks png even though aa.png sorts first by name
        let found = lib.find_image(Category::Tools).unwrap();
        assert!(found.ends_with("zz.jpg"));
    }

    #[test]
    fn test_falls_through_to_images_root() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        // No ai/ subfolder and no tech/ fallback; only the root has files
        touch(&root.join("images/city.jpg"));

        let lib = AssetLibrary::new(root);
        let found = lib.find_image(Category::Ai).unwrap();
        assert!(found.ends_with("images/city.jpg"));
    }

    #[test]
    fn test_generic_fallback_before_root() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(&root.join("images/tech/circuit.jpg"));
        touch(&root.join("images/anything.jpg"));

        let lib = AssetLibrary::new(root);
        let found = lib.find_image(Category::Tools).unwrap();
        assert!(found.ends_with("tech/circuit.jpg"));
    }

    #[test]
    fn test_no_match_returns_none() {
        let dir = TempDir::new().unwrap();
        let lib = AssetLibrary::new(dir.path());
        assert!(lib.find_image(Category::Ai).is_none());
    }

    #[test]
    fn test_non_image_files_ignored() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(&root.join("images/notes.txt"));
        touch(&root.join("images/clip.mp4"));

        let lib = AssetLibrary::new(root);
        assert!(lib.find_image(Category::Tech).is_none());
    }

    #[test]
    fn test_logo_and_music_lookup() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        let lib = AssetLibrary::new(root);
        assert!(lib.find_logo().is_none());
        assert!(lib.find_music().is_none());

        touch(&root.join("logos/logo.png"));
        touch(&root.join("music/background.wav"));
        touch(&root.join("music/background.mp3"));
        assert!(lib.find_logo().is_some());
        // mp3 candidate outranks wav
        assert!(lib.find_music().unwrap().ends_with("background.mp3"));
    }
}
