//! CLI command definitions.

use clap::{Parser, ValueEnum};

pub mod recommend;

/// rolescope - access-control role recommendations for Bicep deployments
#[derive(Parser, Debug)]
#[command(name = "rolescope")]
#[command(
    version,
    about = "A command-line tool to get roles from Bicep files or a Git repository."
)]
#[command(long_about = r#"
rolescope scans Bicep files for resource declarations, asks a language-model
endpoint which access-control roles the deployment needs, and checks the answer
against a local catalog of known roles.

CONFIGURATION:
  cred.json                    PROMPT_FLOW_API_URL and PROMPT_FLOW_API_KEY
  roles-with-permissions.json  array of role records with a roleName field

EXIT CODES:
  0   - Success
  1   - General error
  2   - Invalid arguments or source
  3   - Configuration missing or malformed
  4   - Clone failure
  5   - Recommendation service error
  6   - Malformed recommendation response
  7   - Request timed out or could not be sent
  130 - Interrupted
"#)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress progress output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(flatten)]
    pub recommend: recommend::RecommendArgs,
}

/// Result output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
