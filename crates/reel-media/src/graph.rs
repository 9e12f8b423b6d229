//! Typed filter-graph builder.
//!
//! A `FilterGraph` composes named stages into FFmpeg `-filter_complex`
//! syntax. Pins are validated as chains are added: an output pin may be
//! defined once, a named input pin must already be defined and may be
//! consumed once. Validation happens before serialization, so a malformed
//! graph surfaces as an error instead of an encoder diagnostic.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::command::FfmpegCommand;
use crate::error::{MediaError, MediaResult};

/// One filter chain: named input pins, filter text, named output pins.
#[derive(Debug, Clone)]
struct Chain {
    inputs: Vec<String>,
    filter: String,
    outputs: Vec<String>,
}

/// A validated filter graph under construction.
#[derive(Debug, Clone, Default)]
pub struct FilterGraph {
    chains: Vec<Chain>,
    defined: HashSet<String>,
    consumed: HashSet<String>,
}

/// Input stream specifiers like `0:v` or `2:a` refer to command inputs and
/// need no prior definition.
fn is_stream_specifier(pin: &str) -> bool {
    pin.chars().next().is_some_and(|c| c.is_ascii_digit())
}

impl FilterGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chain consuming `inputs` and producing `outputs`.
    pub fn chain(
        &mut self,
        inputs: &[&str],
        filter: impl Into<String>,
        outputs: &[&str],
    ) -> MediaResult<&mut Self> {
        for pin in inputs {
            if is_stream_specifier(pin) {
                continue;
            }
            if !self.defined.contains(*pin) {
                return Err(MediaError::invalid_graph(format!(
                    "input pin [{pin}] is not defined"
                )));
            }
            if !self.consumed.insert((*pin).to_string()) {
                return Err(MediaError::invalid_graph(format!(
                    "input pin [{pin}] consumed twice"
                )));
            }
        }

        for pin in outputs {
            if is_stream_specifier(pin) {
                return Err(MediaError::invalid_graph(format!(
                    "output pin [{pin}] collides with a stream specifier"
                )));
            }
            if !self.defined.insert((*pin).to_string()) {
                return Err(MediaError::invalid_graph(format!(
                    "output pin [{pin}] defined twice"
                )));
            }
        }

        self.chains.push(Chain {
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            filter: filter.into(),
            outputs: outputs.iter().map(|s| s.to_string()).collect(),
        });
        Ok(self)
    }

    /// True if no chains were added.
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Pins defined by some chain but not consumed by any.
    ///
    /// These must all be mapped to the output by the enclosing `RenderSpec`.
    pub fn dangling_pins(&self) -> Vec<String> {
        let mut pins: Vec<String> = self
            .defined
            .difference(&self.consumed)
            .cloned()
            .collect();
        pins.sort();
        pins
    }

    /// Serialize to FFmpeg `-filter_complex` text.
    pub fn serialize(&self) -> String {
        self.chains
            .iter()
            .map(|chain| {
                let ins: String = chain.inputs.iter().map(|p| format!("[{p}]")).collect();
                let outs: String = chain.outputs.iter().map(|p| format!("[{p}]")).collect();
                format!("{ins}{}{outs}", chain.filter)
            })
            .collect::<Vec<_>>()
            .join(";")
    }
}

/// Escape a path for use inside a filter argument (e.g. `subtitles=`).
pub fn escape_filter_path(path: &Path) -> String {
    path.to_string_lossy()
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace(':', "\\:")
}

/// One input of a render invocation.
#[derive(Debug, Clone)]
pub struct InputFile {
    /// Arguments placed before this input's `-i`
    pub args: Vec<String>,
    /// File path
    pub path: PathBuf,
}

impl InputFile {
    /// A plain file input.
    pub fn plain(path: impl Into<PathBuf>) -> Self {
        Self {
            args: Vec::new(),
            path: path.into(),
        }
    }
}

/// An assembled description of one media-encoding invocation: ordered
/// inputs, the filter graph, pin-to-output mappings, codec parameters, and
/// trailing flags. Built fresh per invocation and handed to the runner as-is.
#[derive(Debug, Clone)]
pub struct RenderSpec {
    /// Ordered input list
    pub inputs: Vec<InputFile>,
    /// Filter graph
    pub graph: FilterGraph,
    /// Named pins mapped to the output, in order
    pub maps: Vec<String>,
    /// Codec/container output arguments
    pub codec_args: Vec<String>,
    /// End output at the shortest input
    pub shortest: bool,
    /// Output file
    pub output: PathBuf,
}

impl RenderSpec {
    /// Lower to an `FfmpegCommand`, validating that every dangling graph pin
    /// is mapped.
    pub fn to_command(&self) -> MediaResult<FfmpegCommand> {
        let dangling = self.graph.dangling_pins();
        for pin in &dangling {
            if !self.maps.contains(pin) {
                return Err(MediaError::invalid_graph(format!(
                    "pin [{pin}] is neither consumed nor mapped"
                )));
            }
        }
        for pin in &self.maps {
            if !dangling.contains(pin) {
                return Err(MediaError::invalid_graph(format!(
                    "mapped pin [{pin}] is not a dangling graph output"
                )));
            }
        }

        let mut cmd = FfmpegCommand::new(&self.output);
        for input in &self.inputs {
            cmd = cmd.input_with_args(input.args.clone(), input.path.to_string_lossy());
        }
        if !self.graph.is_empty() {
            cmd = cmd.filter_complex(self.graph.serialize());
        }
        for pin in &self.maps {
            cmd = cmd.map_pin(pin);
        }
        cmd = cmd.output_args(self.codec_args.clone());
        if self.shortest {
            cmd = cmd.shortest();
        }
        Ok(cmd)
    }
}
