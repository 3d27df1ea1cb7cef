use std::io::IsTerminal;

use crate::cli::Cli;

/// Which report the renderer produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    /// License frequency table.
    Summary,
    /// One line per package.
    List,
}

/// Formatting configuration handed to the renderer.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub mode: ReportMode,
    /// Emit ANSI colors. Off for anything that is not a terminal.
    pub color: bool,
    /// Width of the `<id> <dots>` column in list mode.
    pub list_width: usize,
    /// Width of the `<license> <dots>` column in summary mode.
    pub summary_width: usize,
    /// Labels at least this long are cut down to `max_len - 1` chars plus `…`.
    pub list_max_len: usize,
    pub summary_max_len: usize,
}

impl Default for RenderConfig {
    /// Plain summary output.
    fn default() -> Self {
        RenderConfig {
            mode: ReportMode::Summary,
            color: false,
            list_width: 43,
            summary_width: 23,
            list_max_len: 39,
            summary_max_len: 19,
        }
    }
}

impl RenderConfig {
    /// Resolve the configuration for this run from the command line and the
    /// attached terminal.
    pub fn from_cli(cli: &Cli) -> Self {
        RenderConfig {
            mode: if cli.list {
                ReportMode::List
            } else {
                ReportMode::Summary
            },
            color: std::io::stdout().is_terminal(),
            ..RenderConfig::default()
        }
    }
}
