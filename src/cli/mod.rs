pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;

/// Materialize environment-specific config files from their templates.
///
/// For each known base name, copies `<name>.yaml` to `<name><env>.yaml`
/// unless the template is missing or the target already exists.
#[derive(Parser, Debug)]
#[command(
    name = "createconfig",
    version,
    about,
    long_about = None,
    args_override_self = true,
    infer_long_args = true
)]
pub struct Cli {
    /// Environment name appended to each file name (e.g. prod)
    #[arg(short, long, value_name = "environment name", allow_hyphen_values = true)]
    pub env: Option<String>,

    /// Directory holding the templates (default: current directory)
    #[arg(short = 'C', long, value_name = "path", default_value = ".")]
    pub dir: PathBuf,

    /// Path to a manifest overriding the base-name list
    #[arg(long, value_name = "path")]
    pub config: Option<PathBuf>,

    /// Report what would be copied without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Verbose output: also list skipped files
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Quiet mode: only show errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Operands after the options; option parsing stops at the first one.
    #[arg(hide = true, trailing_var_arg = true)]
    pub operands: Vec<String>,
}

impl Cli {
    /// The environment name, if one was given and is non-empty.
    pub fn env_name(&self) -> Option<&str> {
        self.env.as_deref().filter(|e| !e.is_empty())
    }
}
