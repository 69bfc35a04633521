//! Console presentation: progress lines on stderr, results on stdout.

use anyhow::Result;

use rolescope_core::{CoreError, EventKind, EventSink, PipelineEvent, PipelineReport};
use rolescope_llm::LlmError;

/// Prints pipeline progress to stderr.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for ConsoleSink {
    fn emit(&self, event: &PipelineEvent) {
        eprintln!("{}", progress_line(event));
    }
}

fn progress_line(event: &PipelineEvent) -> String {
    match event.kind {
        EventKind::Started => format!("⏳ {}...", event.message),
        EventKind::Succeeded => format!("✅ {}", event.message),
        EventKind::Failed => format!("❌ {}", event.message),
        EventKind::Warning => format!("⚠️  {}", event.message),
    }
}

fn sorted(roles: &[String]) -> Vec<&str> {
    let mut roles: Vec<&str> = roles.iter().map(String::as_str).collect();
    roles.sort_unstable();
    roles
}

/// Render the human-readable result.
pub fn render_text(report: &PipelineReport) -> String {
    let mut out = String::new();

    if report.resource_types.is_empty() {
        out.push_str("\nNo resource declarations found.\n");
        return out;
    }

    out.push_str("\nRecommended roles provided by LLM:\n\n");
    for role in sorted(&report.recommendation.roles) {
        out.push_str(role);
        out.push('\n');
    }

    if report.partition.has_invalid() {
        out.push_str("\nOut of these, the following are invalid roles:\n\n");
        for role in sorted(&report.partition.invalid) {
            out.push_str(role);
            out.push('\n');
        }
    }

    out
}

pub fn print_text(report: &PipelineReport) {
    print!("{}", render_text(report));
}

pub fn print_json(report: &PipelineReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Print a fatal error with whatever diagnostics it carries.
pub fn report_error(error: &anyhow::Error) {
    eprintln!("❌ Error: {:#}", error);

    if let Some(CoreError::Recommendation(LlmError::Service {
        request_id: Some(id),
        ..
    })) = error.downcast_ref::<CoreError>()
    {
        eprintln!("   Request id: {}", id);
    }
}
