use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "monday", version, about = "A grumpy task tracker")]
pub struct Cli {
    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Directory holding the task file, config.json and cheer.txt
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Task file name inside the data directory (overrides config)
    #[arg(long = "file", value_name = "NAME")]
    pub file: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a single command line, e.g. `monday exec todo buy milk`
    #[command(alias = "x")]
    Exec {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
