use exam_core::model::ExamDocument;
use exam_core::{BuildGate, MarksMismatch};

/// One question row on the review step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewQuestionVm {
    pub number: usize,
    pub text: String,
    pub marks: u32,
    pub type_label: &'static str,
    /// Flagged in the rendering; empty text never blocks review.
    pub needs_text: bool,
    pub correct_option: Option<String>,
    pub has_image: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewSectionVm {
    pub title: String,
    pub type_label: &'static str,
    pub question_count: usize,
    pub assigned_marks: u32,
    pub questions: Vec<ReviewQuestionVm>,
}

/// Everything the review step shows, precomputed off the document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewVm {
    pub grade: String,
    pub subject: String,
    pub exam_year: String,
    pub exam_date: String,
    pub duration: String,
    pub declared_marks: u32,
    pub assigned_marks: u32,
    pub total_questions: usize,
    pub sections: Vec<ReviewSectionVm>,
    pub mismatch: Option<MarksMismatch>,
    pub missing_questions: bool,
    pub questions_needing_text: usize,
}

#[must_use]
pub fn map_review(doc: &ExamDocument) -> ReviewVm {
    let sections = doc
        .sections()
        .iter()
        .map(|section| {
            let questions = section
                .questions()
                .iter()
                .enumerate()
                .map(|(i, question)| ReviewQuestionVm {
                    number: i + 1,
                    text: question.text().to_string(),
                    marks: question.marks(),
                    type_label: question.question_type().label(),
                    needs_text: question.text().trim().is_empty(),
                    correct_option: question
                        .mcq()
                        .map(|answer| answer.correct().letter().to_string()),
                    has_image: question.image().is_some(),
                })
                .collect::<Vec<_>>();
            ReviewSectionVm {
                title: section.title().to_string(),
                type_label: section.section_type().label(),
                question_count: section.questions().len(),
                assigned_marks: section.assigned_marks(),
                questions,
            }
        })
        .collect::<Vec<_>>();

    let (mismatch, missing_questions) = match BuildGate::check(doc) {
        BuildGate::Ready => (None, false),
        BuildGate::MissingQuestions => (None, true),
        BuildGate::MarksMismatch(mismatch) => (Some(mismatch), false),
    };

    ReviewVm {
        grade: doc.grade().to_string(),
        subject: doc.subject().to_string(),
        exam_year: doc.exam_year().to_string(),
        exam_date: doc
            .exam_date()
            .map(|d| d.format("%d %B %Y").to_string())
            .unwrap_or_default(),
        duration: doc.duration().to_string(),
        declared_marks: doc.total_marks(),
        assigned_marks: doc.total_assigned_marks(),
        total_questions: doc.total_questions(),
        questions_needing_text: sections
            .iter()
            .flat_map(|s| s.questions.iter())
            .filter(|q| q.needs_text)
            .count(),
        sections,
        mismatch,
        missing_questions,
    }
}
