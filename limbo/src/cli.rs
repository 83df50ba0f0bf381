use clap::Parser;
use std::path::PathBuf;

/// Compiles `fun`/`def` function files into game command files.
#[derive(Debug, Parser)]
pub struct CommandLine {
    /// Source file containing `fun` and `def` function declarations.
    pub input: PathBuf,

    /// Mapping-table version to resolve calls against.
    #[clap(long, default_value = "1.20.1")]
    pub target: String,

    /// Directory to write one `<function>.mcfunction` file per compiled unit.
    #[clap(long, short)]
    pub out: Option<PathBuf>,

    /// Print the parsed tree of every limbo function to stderr.
    #[clap(long, action)]
    pub dump_ast: bool,
}
