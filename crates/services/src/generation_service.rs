//! Drives one paper-generation run against the gateway, reporting
//! milestone progress along the way.

use std::sync::Arc;

use tracing::{info, warn};

use exam_core::model::ExamDocument;
use exam_core::template::TemplateFile;

use crate::error::{GatewayError, GenerationError};
use crate::gateway::{GeneratedPapers, GenerationGateway, GenerationRequest, PaperOutcome};
use crate::progress::{GenerationPhase, GenerationProgress};

/// Orchestrates generation: builds the request, walks the milestone
/// phases, and hands the document off to the gateway exactly once.
///
/// There is no automatic retry; a failed run surfaces its error and the
/// caller decides whether to go back and try again.
#[derive(Clone)]
pub struct GenerationService {
    gateway: Arc<dyn GenerationGateway>,
}

impl GenerationService {
    #[must_use]
    pub fn new(gateway: Arc<dyn GenerationGateway>) -> Self {
        Self { gateway }
    }

    /// Runs one generation call.
    ///
    /// `on_progress` fires once per milestone in order. The first three
    /// milestones precede the gateway call; the last two fire only after
    /// it succeeds, so a failed run stops at the phase it reached.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be serialized or the
    /// gateway call fails.
    pub async fn generate(
        &self,
        template: &TemplateFile,
        snapshot: &ExamDocument,
        mut on_progress: impl FnMut(GenerationProgress),
    ) -> Result<GeneratedPapers, GenerationError> {
        let request = GenerationRequest::new(template, snapshot)?;
        info!(
            request = %request.id(),
            template = request.template_name(),
            sections = snapshot.number_of_sections(),
            "submitting generation request"
        );

        on_progress(GenerationPhase::ProcessingTemplate.into());
        on_progress(GenerationPhase::FormattingQuestions.into());
        on_progress(GenerationPhase::GeneratingWord.into());

        let papers = match self.gateway.generate(&request).await {
            Ok(papers) => papers,
            Err(err) => {
                warn!(request = %request.id(), error = %err, "generation request failed");
                return Err(err.into());
            }
        };
        // A success answer with neither artifact is a failure, not a quiet win.
        if papers.outcome() == PaperOutcome::Empty {
            warn!(request = %request.id(), "generation backend delivered no artifacts");
            return Err(GatewayError::NoArtifacts.into());
        }

        on_progress(GenerationPhase::CreatingPdf.into());
        on_progress(GenerationPhase::Finalizing.into());

        info!(
            request = %request.id(),
            outcome = ?papers.outcome(),
            "generation request completed"
        );
        Ok(papers)
    }
}
