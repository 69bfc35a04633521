//! Recommend command - scan, ask for roles, validate.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::{ArgGroup, Args};
use tracing::{debug, info};

use rolescope_core::{
    load_credentials, CoreError, EventSink, Pipeline, PipelineOptions, RoleCatalog, TracingSink,
    DEFAULT_CATALOG_FILE, DEFAULT_CREDENTIALS_FILE,
};
use rolescope_llm::RecommendationClient;
use rolescope_source::{CloneOptions, SourceSpec};

use super::OutputFormat;
use crate::output::{self, ConsoleSink};

#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(["directory", "git"])
))]
pub struct RecommendArgs {
    /// The local directory containing Bicep files
    #[arg(short, long, value_name = "DIR")]
    pub directory: Option<String>,

    /// The git repo link containing Bicep files
    #[arg(short, long, value_name = "URL")]
    pub git: Option<String>,

    /// Branch or tag to clone
    #[arg(long, requires = "git")]
    pub branch: Option<String>,

    /// Clone depth for git sources (0 clones the full history)
    #[arg(long, default_value_t = 1)]
    pub depth: u32,

    /// Credential file with the endpoint URL and key
    #[arg(long, env = "ROLESCOPE_CREDENTIALS", default_value = DEFAULT_CREDENTIALS_FILE)]
    pub credentials: PathBuf,

    /// Catalog of known roles
    #[arg(long, env = "ROLESCOPE_CATALOG", default_value = DEFAULT_CATALOG_FILE)]
    pub catalog: PathBuf,

    /// Recommendation request timeout in seconds
    #[arg(
        long,
        env = "ROLESCOPE_TIMEOUT",
        default_value_t = 120,
        value_name = "SECS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl RecommendArgs {
    pub fn source(&self) -> Result<SourceSpec> {
        match (&self.git, &self.directory) {
            (Some(url), _) => Ok(SourceSpec::new(url.as_str(), true)),
            (None, Some(dir)) => Ok(SourceSpec::new(dir.as_str(), false)),
            (None, None) => bail!("Either --directory or --git is required"),
        }
    }

    pub fn options(&self) -> PipelineOptions {
        let mut clone = CloneOptions::default().with_depth((self.depth > 0).then_some(self.depth));
        if let Some(branch) = &self.branch {
            clone = clone.with_branch(branch);
        }

        PipelineOptions::default()
            .with_timeout(Duration::from_secs(self.timeout))
            .with_clone(clone)
    }
}

pub async fn execute(args: &RecommendArgs, quiet: bool) -> Result<()> {
    let source = args.source()?;

    // Configuration is loaded up front so a missing file fails before any
    // clone or network traffic.
    let credentials = load_credentials(&args.credentials)?;
    let catalog = RoleCatalog::load(&args.catalog)?;
    let options = args.options();
    debug!("Pipeline options: {:?}", options);

    let client = RecommendationClient::new(&credentials, options.timeout).map_err(CoreError::from)?;

    let sink: Arc<dyn EventSink> = if quiet || args.format == OutputFormat::Json {
        Arc::new(TracingSink)
    } else {
        Arc::new(ConsoleSink::new())
    };

    let pipeline = Pipeline::new(Arc::new(client), catalog, options.clone)?.with_sink(sink);

    info!("Recommending roles for {}", source);
    let report = pipeline.run(&source).await?;

    match args.format {
        OutputFormat::Text => output::print_text(&report),
        OutputFormat::Json => output::print_json(&report)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Cli;
    use clap::Parser;

    fn parse(args: &[&str]) -> RecommendArgs {
        let mut argv = vec!["rolescope"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().recommend
    }

    #[test]
    fn test_local_source_is_normalized() {
        let args = parse(&["-d", r"infra\bicep"]);
        assert_eq!(args.source().unwrap(), SourceSpec::Local(PathBuf::from("infra/bicep")));
    }

    #[test]
    fn test_git_options() {
        let args = parse(&["-g", "https://example.com/repo.git", "--branch", "dev", "--depth", "0"]);
        assert_eq!(args.source().unwrap(), SourceSpec::Git("https://example.com/repo.git".to_string()));

        let options = args.options();
        assert_eq!(options.clone.depth, None);
        assert_eq!(options.clone.branch.as_deref(), Some("dev"));
    }

    #[test]
    fn test_source_requires_a_location() {
        let args = RecommendArgs {
            directory: None,
            git: None,
            branch: None,
            depth: 1,
            credentials: PathBuf::from(DEFAULT_CREDENTIALS_FILE),
            catalog: PathBuf::from(DEFAULT_CATALOG_FILE),
            timeout: 120,
            format: OutputFormat::Text,
        };
        assert!(args.source().is_err());
    }

    #[test]
    fn test_timeout_option() {
        let args = parse(&["-d", "infra", "--timeout", "15"]);
        assert_eq!(args.options().timeout, Duration::from_secs(15));
    }

    #[tokio::test]
    async fn test_missing_credentials_fail_first() {
        let dir = tempfile::tempdir().unwrap();
        let args = parse(&[
            "-d",
            dir.path().to_str().unwrap(),
            "--credentials",
            dir.path().join("cred.json").to_str().unwrap(),
            "--catalog",
            dir.path().join("roles.json").to_str().unwrap(),
        ]);

        let error = execute(&args, true).await.unwrap_err();
        let core = error.downcast_ref::<CoreError>().unwrap();
        assert_eq!(core.kind(), rolescope_core::ErrorKind::ConfigMissing);
        assert!(error.to_string().contains("cred.json"));
    }
}
