//! Pure step-completion predicates over the exam document.

use crate::model::ExamDocument;

/// True iff every exam-level detail is filled in and the declared mark
/// budget is positive.
#[must_use]
pub fn details_complete(doc: &ExamDocument) -> bool {
    !doc.grade().trim().is_empty()
        && !doc.subject().trim().is_empty()
        && !doc.exam_year().trim().is_empty()
        && doc.exam_date().is_some()
        && !doc.duration().trim().is_empty()
        && doc.total_marks() > 0
}

/// True iff every section has at least one question.
#[must_use]
pub fn questions_complete(doc: &ExamDocument) -> bool {
    doc.sections().iter().all(|s| !s.questions().is_empty())
}

/// True iff assigned marks add up to the declared total.
#[must_use]
pub fn marks_reconciled(doc: &ExamDocument) -> bool {
    doc.total_assigned_marks() == doc.total_marks()
}

/// The declared/assigned totals behind a failed reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarksMismatch {
    pub expected: u32,
    pub actual: u32,
}

impl MarksMismatch {
    /// Absolute gap shown alongside the two totals.
    #[must_use]
    pub fn difference(&self) -> u32 {
        self.expected.abs_diff(self.actual)
    }
}

/// Outcome of the question-building step's gate.
///
/// A marks mismatch is a distinct signal, not a generic block: it
/// carries both totals so the caller can present the discrepancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildGate {
    Ready,
    MissingQuestions,
    MarksMismatch(MarksMismatch),
}

impl BuildGate {
    /// Evaluates the gate for advancing past the build step.
    ///
    /// An empty section blocks regardless of mark totals.
    #[must_use]
    pub fn check(doc: &ExamDocument) -> Self {
        if !questions_complete(doc) {
            return BuildGate::MissingQuestions;
        }
        if !marks_reconciled(doc) {
            return BuildGate::MarksMismatch(MarksMismatch {
                expected: doc.total_marks(),
                actual: doc.total_assigned_marks(),
            });
        }
        BuildGate::Ready
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, BuildGate::Ready)
    }
}
