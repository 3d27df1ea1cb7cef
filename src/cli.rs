use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "license-tally",
    about = "Summarize the licenses of a Node project's installed dependencies",
    version
)]
pub struct Cli {
    /// Project path to scan
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// List every package with its licenses instead of the summary
    #[arg(short, long)]
    pub list: bool,
}
