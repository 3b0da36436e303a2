use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "regexmatch",
    about = "Grade answers against a regexmatch answer specification",
    version
)]
pub struct Cli {
    /// Specification file, or "-" to read it from stdin
    pub spec: PathBuf,

    /// Submission files, or directories searched recursively for *.txt files
    pub submissions: Vec<PathBuf>,

    /// Grade TEXT as a submitted answer (repeatable)
    #[arg(short, long = "answer", value_name = "TEXT")]
    pub answers: Vec<String>,

    /// Grade against the N-th weighted block (0-based)
    #[arg(short, long, value_name = "N", default_value_t = 0)]
    pub group: usize,

    /// Print the parsed specification and exit
    #[arg(short, long)]
    pub list: bool,

    /// Print one JSON object per graded answer
    #[arg(short, long)]
    pub json: bool,

    /// Raise log verbosity (repeat for more)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Grade submissions sequentially instead of in parallel
    #[arg(short, long)]
    pub sequential: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
