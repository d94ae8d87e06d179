use std::path::PathBuf;

/// Cells kept free at the right edge when wrapping pasted text.
pub const DEFAULT_MARGIN: u16 = 2;

/// Runtime settings resolved from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Subtracted from the editor width to get the wrap budget.
    pub margin: u16,
    /// Directory the suggested `base64.<ext>` file name is placed in.
    pub output_dir: PathBuf,
    /// Base64 text preloaded into the editor.
    pub initial_text: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            output_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            initial_text: None,
        }
    }
}

/// Where tracing output goes when `--log-file` is not given.
pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join("b64file.log")
}
