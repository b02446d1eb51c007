use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "todo", about = "Tasks as plain text files, one per task", version)]
pub struct Cli {
    /// Directory holding the task files [default: $TODO_DIR, then the
    /// platform data directory]
    #[arg(short = 'd', long = "dir")]
    pub dir: Option<PathBuf>,
}
