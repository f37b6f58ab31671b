/// Discrete milestones of one generation call.
///
/// Phases are ordered; a run either walks them to `Finalizing` or stops
/// where the failure happened. Percentages are advisory, not wall-clock
/// proportional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum GenerationPhase {
    ProcessingTemplate,
    FormattingQuestions,
    GeneratingWord,
    CreatingPdf,
    Finalizing,
}

impl GenerationPhase {
    pub const ALL: [GenerationPhase; 5] = [
        GenerationPhase::ProcessingTemplate,
        GenerationPhase::FormattingQuestions,
        GenerationPhase::GeneratingWord,
        GenerationPhase::CreatingPdf,
        GenerationPhase::Finalizing,
    ];

    #[must_use]
    pub fn percent(&self) -> u8 {
        match self {
            GenerationPhase::ProcessingTemplate => 20,
            GenerationPhase::FormattingQuestions => 40,
            GenerationPhase::GeneratingWord => 60,
            GenerationPhase::CreatingPdf => 80,
            GenerationPhase::Finalizing => 100,
        }
    }

    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            GenerationPhase::ProcessingTemplate => "Processing template...",
            GenerationPhase::FormattingQuestions => "Formatting questions...",
            GenerationPhase::GeneratingWord => "Generating Word document...",
            GenerationPhase::CreatingPdf => "Creating PDF version...",
            GenerationPhase::Finalizing => "Finalizing documents...",
        }
    }
}

/// Aggregated view of generation progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationProgress {
    pub phase: GenerationPhase,
    pub percent: u8,
}

impl From<GenerationPhase> for GenerationProgress {
    fn from(phase: GenerationPhase) -> Self {
        Self {
            phase,
            percent: phase.percent(),
        }
    }
}
