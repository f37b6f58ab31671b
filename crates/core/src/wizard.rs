use thiserror::Error;

use crate::model::{DocumentError, ExamDocument, IdAllocator, QuestionId, SectionId};
use crate::template::TemplateFile;
use crate::validation::{BuildGate, details_complete};

//
// ─── STEPS ─────────────────────────────────────────────────────────────────────
//

/// One ordinal stage of the linear authoring flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    Upload,
    Details,
    Build,
    Review,
    Generate,
}

impl WizardStep {
    /// Every step in wizard order.
    pub const ALL: [WizardStep; 5] = [
        WizardStep::Upload,
        WizardStep::Details,
        WizardStep::Build,
        WizardStep::Review,
        WizardStep::Generate,
    ];

    /// 1-based ordinal shown in the progress tracker.
    #[must_use]
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::Upload => 1,
            WizardStep::Details => 2,
            WizardStep::Build => 3,
            WizardStep::Review => 4,
            WizardStep::Generate => 5,
        }
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Upload => "Upload Template",
            WizardStep::Details => "Exam Details",
            WizardStep::Build => "Add Questions",
            WizardStep::Review => "Review",
            WizardStep::Generate => "Generate",
        }
    }

    #[must_use]
    fn next(&self) -> Option<WizardStep> {
        match self {
            WizardStep::Upload => Some(WizardStep::Details),
            WizardStep::Details => Some(WizardStep::Build),
            WizardStep::Build => Some(WizardStep::Review),
            WizardStep::Review => Some(WizardStep::Generate),
            WizardStep::Generate => None,
        }
    }

    #[must_use]
    fn previous(&self) -> Option<WizardStep> {
        match self {
            WizardStep::Upload => None,
            WizardStep::Details => Some(WizardStep::Upload),
            WizardStep::Build => Some(WizardStep::Details),
            WizardStep::Review => Some(WizardStep::Build),
            WizardStep::Generate => Some(WizardStep::Review),
        }
    }
}

//
// ─── TRANSITION SIGNALS ────────────────────────────────────────────────────────
//

/// Why a step transition was refused.
///
/// These are first-class validation signals, not faults: the wizard
/// stays put and the unmet condition is rendered to the user.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StepBlocked {
    #[error("upload a .docx template before continuing")]
    NoTemplate,

    #[error("fill in every exam detail before continuing")]
    DetailsIncomplete,

    #[error("every section needs at least one question")]
    MissingQuestions,

    #[error("assigned marks ({actual}) do not match the declared total ({expected})")]
    MarksMismatch { expected: u32, actual: u32 },

    #[error("generation is in progress")]
    GenerationInFlight,
}

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// Owns the single document instance, the id allocator, the uploaded
/// template, and the current step.
///
/// Step views receive the controller by reference and mutate the
/// document exclusively through the typed model operations; transitions
/// only happen through `advance`/`retreat`, which consult the
/// validation predicates.
#[derive(Debug, Clone, PartialEq)]
pub struct WizardController {
    step: WizardStep,
    document: ExamDocument,
    ids: IdAllocator,
    template: Option<TemplateFile>,
    generating: bool,
}

impl Default for WizardController {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardController {
    /// Starts a fresh session at the upload step with an empty document.
    #[must_use]
    pub fn new() -> Self {
        let mut ids = IdAllocator::new();
        let document = ExamDocument::new(&mut ids);
        Self {
            step: WizardStep::Upload,
            document,
            ids,
            template: None,
            generating: false,
        }
    }

    // ─── State ─────────────────────────────────────────────────────────────────

    #[must_use]
    pub fn step(&self) -> WizardStep {
        self.step
    }

    #[must_use]
    pub fn document(&self) -> &ExamDocument {
        &self.document
    }

    /// Mutable access for the typed model operations that do not
    /// allocate ids. Allocation goes through the wrappers below.
    pub fn document_mut(&mut self) -> &mut ExamDocument {
        &mut self.document
    }

    #[must_use]
    pub fn template(&self) -> Option<&TemplateFile> {
        self.template.as_ref()
    }

    #[must_use]
    pub fn is_generating(&self) -> bool {
        self.generating
    }

    /// Read-only snapshot handed to the generation gateway.
    #[must_use]
    pub fn snapshot(&self) -> ExamDocument {
        self.document.clone()
    }

    // ─── Template ──────────────────────────────────────────────────────────────

    pub fn attach_template(&mut self, template: TemplateFile) {
        self.template = Some(template);
    }

    pub fn clear_template(&mut self) {
        self.template = None;
    }

    // ─── Allocating mutators ───────────────────────────────────────────────────

    /// Appends a default section; silent no-op at the cap.
    pub fn add_section(&mut self) -> Option<SectionId> {
        self.document.add_section(&mut self.ids)
    }

    /// Reconciles the section list to length `n`.
    pub fn set_section_count(&mut self, n: usize) {
        self.document.set_section_count(n, &mut self.ids);
    }

    /// Appends a question to the target section.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::UnknownSection` when the section id does
    /// not resolve.
    pub fn add_question(&mut self, section_id: &SectionId) -> Result<QuestionId, DocumentError> {
        self.document.add_question(section_id, &mut self.ids)
    }

    // ─── Transitions ───────────────────────────────────────────────────────────

    /// Moves forward one step if the current step's gate passes.
    ///
    /// Advancing from the terminal step is a clamped no-op.
    ///
    /// # Errors
    ///
    /// Returns the specific unmet condition; the wizard stays put.
    pub fn advance(&mut self) -> Result<WizardStep, StepBlocked> {
        match self.step {
            WizardStep::Upload => {
                if self.template.is_none() {
                    return Err(StepBlocked::NoTemplate);
                }
            }
            WizardStep::Details => {
                if !details_complete(&self.document) {
                    return Err(StepBlocked::DetailsIncomplete);
                }
            }
            WizardStep::Build => match BuildGate::check(&self.document) {
                BuildGate::Ready => {}
                BuildGate::MissingQuestions => return Err(StepBlocked::MissingQuestions),
                BuildGate::MarksMismatch(mismatch) => {
                    return Err(StepBlocked::MarksMismatch {
                        expected: mismatch.expected,
                        actual: mismatch.actual,
                    });
                }
            },
            // Review is advisory only.
            WizardStep::Review | WizardStep::Generate => {}
        }
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(self.step)
    }

    /// Moves back one step; never validates. Clamped at the first step
    /// and refused only while generation is in flight.
    ///
    /// # Errors
    ///
    /// Returns `StepBlocked::GenerationInFlight` during generation.
    pub fn retreat(&mut self) -> Result<WizardStep, StepBlocked> {
        if self.generating {
            return Err(StepBlocked::GenerationInFlight);
        }
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        Ok(self.step)
    }

    // ─── Generation handshake ──────────────────────────────────────────────────

    /// Marks a generation call as in flight, disabling backward
    /// navigation until it settles.
    ///
    /// # Errors
    ///
    /// Returns `NoTemplate` without an attached template and
    /// `GenerationInFlight` when a call is already running.
    pub fn begin_generation(&mut self) -> Result<(), StepBlocked> {
        if self.generating {
            return Err(StepBlocked::GenerationInFlight);
        }
        if self.template.is_none() {
            return Err(StepBlocked::NoTemplate);
        }
        self.generating = true;
        Ok(())
    }

    /// Clears the in-flight flag after the gateway call settles.
    pub fn finish_generation(&mut self) {
        self.generating = false;
    }

    /// Failure path: clears the in-flight flag and returns the user to
    /// the review step, leaving the document untouched.
    pub fn return_to_review(&mut self) {
        self.generating = false;
        if self.step == WizardStep::Generate {
            self.step = WizardStep::Review;
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::DOCX_MEDIA_TYPE;
    use chrono::NaiveDate;

    fn docx() -> TemplateFile {
        TemplateFile::new("template.docx", DOCX_MEDIA_TYPE, vec![1, 2, 3]).unwrap()
    }

    fn controller_at_build() -> WizardController {
        let mut wizard = WizardController::new();
        wizard.attach_template(docx());
        wizard.advance().unwrap();

        let doc = wizard.document_mut();
        doc.set_grade("Grade X");
        doc.set_subject("Mathematics");
        doc.set_exam_year("2025-26");
        doc.set_exam_date(NaiveDate::from_ymd_opt(2026, 3, 1));
        doc.set_duration("2 Hours");
        doc.set_total_marks(50);
        wizard.advance().unwrap();
        assert_eq!(wizard.step(), WizardStep::Build);
        wizard
    }

    #[test]
    fn upload_blocks_until_template_attached() {
        let mut wizard = WizardController::new();
        assert_eq!(wizard.advance().unwrap_err(), StepBlocked::NoTemplate);
        assert_eq!(wizard.step(), WizardStep::Upload);

        wizard.attach_template(docx());
        assert_eq!(wizard.advance().unwrap(), WizardStep::Details);
    }

    #[test]
    fn details_block_until_complete() {
        let mut wizard = WizardController::new();
        wizard.attach_template(docx());
        wizard.advance().unwrap();
        assert_eq!(
            wizard.advance().unwrap_err(),
            StepBlocked::DetailsIncomplete
        );
        assert_eq!(wizard.step(), WizardStep::Details);
    }

    #[test]
    fn reconciled_build_step_advances() {
        let mut wizard = controller_at_build();
        let section = wizard.document().sections()[0].id().clone();
        let q = wizard.add_question(&section).unwrap();
        wizard
            .document_mut()
            .set_question_marks(&section, &q, 50)
            .unwrap();

        assert_eq!(wizard.advance().unwrap(), WizardStep::Review);
    }

    #[test]
    fn marks_mismatch_surfaces_expected_and_actual() {
        let mut wizard = controller_at_build();
        let section = wizard.document().sections()[0].id().clone();
        let q = wizard.add_question(&section).unwrap();
        wizard
            .document_mut()
            .set_question_marks(&section, &q, 40)
            .unwrap();

        assert_eq!(
            wizard.advance().unwrap_err(),
            StepBlocked::MarksMismatch {
                expected: 50,
                actual: 40,
            }
        );
        assert_eq!(wizard.step(), WizardStep::Build);
    }

    #[test]
    fn empty_section_blocks_build_regardless_of_marks() {
        let mut wizard = controller_at_build();
        assert_eq!(wizard.advance().unwrap_err(), StepBlocked::MissingQuestions);
    }

    #[test]
    fn review_advances_unconditionally_and_generate_is_terminal() {
        let mut wizard = controller_at_build();
        let section = wizard.document().sections()[0].id().clone();
        let q = wizard.add_question(&section).unwrap();
        wizard
            .document_mut()
            .set_question_marks(&section, &q, 50)
            .unwrap();
        wizard.advance().unwrap();
        assert_eq!(wizard.advance().unwrap(), WizardStep::Generate);
        // Clamped no-op at the end of the flow.
        assert_eq!(wizard.advance().unwrap(), WizardStep::Generate);
    }

    #[test]
    fn retreat_never_validates_and_clamps_at_upload() {
        let mut wizard = WizardController::new();
        wizard.attach_template(docx());
        wizard.advance().unwrap();
        assert_eq!(wizard.retreat().unwrap(), WizardStep::Upload);
        assert_eq!(wizard.retreat().unwrap(), WizardStep::Upload);
    }

    #[test]
    fn generation_blocks_retreat_until_settled() {
        let mut wizard = controller_at_build();
        let section = wizard.document().sections()[0].id().clone();
        let q = wizard.add_question(&section).unwrap();
        wizard
            .document_mut()
            .set_question_marks(&section, &q, 50)
            .unwrap();
        wizard.advance().unwrap();
        wizard.advance().unwrap();

        wizard.begin_generation().unwrap();
        assert_eq!(
            wizard.retreat().unwrap_err(),
            StepBlocked::GenerationInFlight
        );
        assert_eq!(
            wizard.begin_generation().unwrap_err(),
            StepBlocked::GenerationInFlight
        );

        wizard.finish_generation();
        assert_eq!(wizard.retreat().unwrap(), WizardStep::Review);
    }

    #[test]
    fn failed_generation_returns_to_review_with_document_intact() {
        let mut wizard = controller_at_build();
        let section = wizard.document().sections()[0].id().clone();
        let q = wizard.add_question(&section).unwrap();
        wizard
            .document_mut()
            .set_question_marks(&section, &q, 50)
            .unwrap();
        wizard.advance().unwrap();
        wizard.advance().unwrap();
        let snapshot = wizard.snapshot();

        wizard.begin_generation().unwrap();
        wizard.return_to_review();
        assert_eq!(wizard.step(), WizardStep::Review);
        assert!(!wizard.is_generating());
        assert_eq!(wizard.document(), &snapshot);
    }

    #[test]
    fn begin_generation_requires_a_template() {
        let mut wizard = WizardController::new();
        assert_eq!(
            wizard.begin_generation().unwrap_err(),
            StepBlocked::NoTemplate
        );
    }
}
