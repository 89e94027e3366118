use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory (or file) to search
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Optional YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Report whether each given path is a text file, before listing
    #[arg(long, num_args = 1.., value_name = "PATH")]
    pub check: Vec<PathBuf>,

    /// Output results in JSON format
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Only print the number of text files found
    #[arg(long, default_value_t = false, conflicts_with = "json")]
    pub count: bool,
}
