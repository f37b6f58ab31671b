use serde::{Deserialize, Serialize};

use crate::model::ids::{QuestionId, SectionId};
use crate::model::question::{Question, QuestionType};

/// A named, typed grouping of questions — one part of the exam paper.
///
/// Questions are owned exclusively by their section and keep their
/// display order; removing the section discards them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    id: SectionId,
    title: String,
    #[serde(rename = "type")]
    section_type: QuestionType,
    questions: Vec<Question>,
}

impl Section {
    /// Creates an empty MCQ section titled by its creation ordinal.
    ///
    /// The title is fixed at creation time; it is not renumbered when
    /// sibling sections are removed or reordered.
    #[must_use]
    pub fn with_ordinal(id: SectionId, ordinal: u64) -> Self {
        Self {
            id,
            title: format!("Section {ordinal}"),
            section_type: QuestionType::Mcq,
            questions: Vec::new(),
        }
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> &SectionId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn section_type(&self) -> QuestionType {
        self.section_type
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }

    pub(crate) fn question_mut(&mut self, id: &QuestionId) -> Option<&mut Question> {
        self.questions.iter_mut().find(|q| q.id() == id)
    }

    /// Sum of marks across this section's questions.
    #[must_use]
    pub fn assigned_marks(&self) -> u32 {
        self.questions.iter().map(Question::marks).sum()
    }

    // Mutators
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Changes the type newly added questions are seeded from.
    ///
    /// Existing questions keep their original kind; there is no
    /// retroactive migration.
    pub fn set_type(&mut self, section_type: QuestionType) {
        self.section_type = section_type;
    }

    /// Appends a question seeded from this section's current type.
    pub(crate) fn push_question(&mut self, id: QuestionId) {
        self.questions.push(Question::new(id, self.section_type));
    }

    /// Removes a question by id. Unknown ids are a safe no-op.
    pub(crate) fn remove_question(&mut self, id: &QuestionId) {
        self.questions.retain(|q| q.id() != id);
    }
}
