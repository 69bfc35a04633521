//! The acquire → extract → recommend → validate pipeline.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use rolescope_iac::{ParseWarning, ResourceTypeExtractor};
use rolescope_llm::{RecommendationService, RoleRecommendation};
use rolescope_source::{CloneOptions, SourceAcquirer, SourceSpec};

use crate::config::RoleCatalog;
use crate::error::{CoreError, CoreResult};
use crate::events::{EventSink, PipelineEvent, PipelineStep, TracingSink};
use crate::validator::{validate_roles, RolePartition};

/// Everything a run produced, ready for presentation.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    /// The source as given on the command line.
    pub source: String,
    pub files_scanned: usize,
    pub resource_types: BTreeSet<String>,
    pub warnings: Vec<ParseWarning>,
    pub recommendation: RoleRecommendation,
    pub partition: RolePartition,
}

/// Single-pass role recommendation pipeline.
///
/// Steps run strictly in order. A scratch clone is removed as soon as
/// extraction is done, before the recommendation request goes out.
pub struct Pipeline {
    acquirer: SourceAcquirer,
    extractor: ResourceTypeExtractor,
    service: Arc<dyn RecommendationService>,
    catalog: RoleCatalog,
    sink: Arc<dyn EventSink>,
}

impl Pipeline {
    /// The request timeout belongs to the `service`; only clone settings
    /// are needed here.
    pub fn new(
        service: Arc<dyn RecommendationService>,
        catalog: RoleCatalog,
        clone: CloneOptions,
    ) -> CoreResult<Self> {
        Ok(Self {
            acquirer: SourceAcquirer::new(clone),
            extractor: ResourceTypeExtractor::new()?,
            service,
            catalog,
            sink: Arc::new(TracingSink),
        })
    }

    /// Replace the default tracing sink.
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    pub async fn run(&self, source: &SourceSpec) -> CoreResult<PipelineReport> {
        // Acquire
        self.emit(PipelineEvent::started(
            PipelineStep::Acquire,
            if source.is_git() {
                format!("Cloning {}", source)
            } else {
                format!("Reading {}", source)
            },
        ));
        let acquired = self.observe(PipelineStep::Acquire, self.acquirer.acquire(source).await)?;
        self.emit(PipelineEvent::succeeded(
            PipelineStep::Acquire,
            if acquired.is_scratch() {
                "Cloning done".to_string()
            } else {
                format!("Using {}", acquired.path().display())
            },
        ));

        // Extract, then drop the scratch clone whatever the outcome
        self.emit(PipelineEvent::started(
            PipelineStep::Extract,
            "Scanning declaration files",
        ));
        let extracted = self.extractor.extract(acquired.path());
        if let Err(e) = acquired.release() {
            warn!("{}", e);
            self.emit(PipelineEvent::warning(PipelineStep::Acquire, e.to_string()));
        }
        let extraction = self.observe(PipelineStep::Extract, extracted)?;

        for warning in &extraction.warnings {
            self.emit(PipelineEvent::warning(PipelineStep::Extract, warning.to_string()));
        }
        self.emit(PipelineEvent::succeeded(
            PipelineStep::Extract,
            format!(
                "Found {} resource types in {} files",
                extraction.resource_types.len(),
                extraction.files_scanned
            ),
        ));

        // Recommend
        let recommendation = if extraction.is_empty() {
            self.emit(PipelineEvent::warning(
                PipelineStep::Recommend,
                "No resource types found, skipping recommendation request",
            ));
            RoleRecommendation::default()
        } else {
            self.emit(PipelineEvent::started(
                PipelineStep::Recommend,
                "Figuring out the roles",
            ));
            let recommendation = self.observe(
                PipelineStep::Recommend,
                self.service.recommend(&extraction.resource_types).await,
            )?;
            self.emit(PipelineEvent::succeeded(
                PipelineStep::Recommend,
                format!("Roles found: {}", recommendation.roles.len()),
            ));
            recommendation
        };

        // Validate
        self.emit(PipelineEvent::started(
            PipelineStep::Validate,
            format!("Checking roles against {} catalog entries", self.catalog.len()),
        ));
        let partition = validate_roles(&recommendation.roles, &self.catalog);
        self.emit(PipelineEvent::succeeded(
            PipelineStep::Validate,
            format!(
                "{} valid, {} invalid",
                partition.valid.len(),
                partition.invalid.len()
            ),
        ));

        Ok(PipelineReport {
            source: source.to_string(),
            files_scanned: extraction.files_scanned,
            resource_types: extraction.resource_types,
            warnings: extraction.warnings,
            recommendation,
            partition,
        })
    }

    fn emit(&self, event: PipelineEvent) {
        self.sink.emit(&event);
    }

    /// Emit a `failed` event for `step` on error.
    fn observe<T, E: Into<CoreError>>(
        &self,
        step: PipelineStep,
        result: Result<T, E>,
    ) -> CoreResult<T> {
        result.map_err(|e| {
            let error = e.into();
            self.emit(PipelineEvent::failed(step, error.to_string()));
            error
        })
    }
}
