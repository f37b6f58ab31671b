use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::allocator::IdAllocator;
use crate::model::ids::{QuestionId, SectionId};
use crate::model::question::{McqChoice, QuestionError, QuestionImage, QuestionType};
use crate::model::section::Section;

/// A document always holds at least one section.
pub const MIN_SECTIONS: usize = 1;
/// Hard cap on sections per exam paper.
pub const MAX_SECTIONS: usize = 15;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DocumentError {
    #[error("no section with id {0}")]
    UnknownSection(SectionId),

    #[error(transparent)]
    Question(#[from] QuestionError),
}

//
// ─── EXAM DOCUMENT ─────────────────────────────────────────────────────────────
//

/// The single live exam-data tree: metadata plus ordered sections.
///
/// All mutation goes through the typed operations below; structural
/// boundary conditions (section cap, section floor, unknown ids on
/// delete) are silent no-ops, since they are benign outcomes of
/// direct-manipulation UI actions. `numberOfSections` is recomputed on
/// every section add/remove and never set independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamDocument {
    grade: String,
    subject: String,
    exam_year: String,
    #[serde(with = "exam_date_wire")]
    exam_date: Option<NaiveDate>,
    total_marks: u32,
    duration: String,
    number_of_sections: usize,
    sections: Vec<Section>,
}

impl ExamDocument {
    /// Creates the empty document the wizard starts with: no metadata,
    /// one default section.
    #[must_use]
    pub fn new(ids: &mut IdAllocator) -> Self {
        let (id, ordinal) = ids.next_section();
        Self {
            grade: String::new(),
            subject: String::new(),
            exam_year: String::new(),
            exam_date: None,
            total_marks: 0,
            duration: String::new(),
            number_of_sections: 1,
            sections: vec![Section::with_ordinal(id, ordinal)],
        }
    }

    // ─── Accessors ─────────────────────────────────────────────────────────────

    #[must_use]
    pub fn grade(&self) -> &str {
        &self.grade
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn exam_year(&self) -> &str {
        &self.exam_year
    }

    #[must_use]
    pub fn exam_date(&self) -> Option<NaiveDate> {
        self.exam_date
    }

    /// The declared mark budget, checked against assigned marks at the
    /// build step.
    #[must_use]
    pub fn total_marks(&self) -> u32 {
        self.total_marks
    }

    #[must_use]
    pub fn duration(&self) -> &str {
        &self.duration
    }

    /// Always equals `sections().len()`.
    #[must_use]
    pub fn number_of_sections(&self) -> usize {
        self.number_of_sections
    }

    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    pub fn section(&self, id: &SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| s.id() == id)
    }

    /// Sum of `marks` across every question in every section.
    #[must_use]
    pub fn total_assigned_marks(&self) -> u32 {
        self.sections.iter().map(Section::assigned_marks).sum()
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.sections.iter().map(|s| s.questions().len()).sum()
    }

    // ─── Exam-level setters ────────────────────────────────────────────────────

    pub fn set_grade(&mut self, grade: impl Into<String>) {
        self.grade = grade.into();
    }

    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.subject = subject.into();
    }

    pub fn set_exam_year(&mut self, exam_year: impl Into<String>) {
        self.exam_year = exam_year.into();
    }

    pub fn set_exam_date(&mut self, exam_date: Option<NaiveDate>) {
        self.exam_date = exam_date;
    }

    pub fn set_total_marks(&mut self, total_marks: u32) {
        self.total_marks = total_marks;
    }

    pub fn set_duration(&mut self, duration: impl Into<String>) {
        self.duration = duration.into();
    }

    // ─── Section operations ────────────────────────────────────────────────────

    /// Appends a default section. Silent no-op at the cap of 15.
    ///
    /// Returns the new section's id, or `None` when the cap was hit.
    pub fn add_section(&mut self, ids: &mut IdAllocator) -> Option<SectionId> {
        if self.sections.len() >= MAX_SECTIONS {
            return None;
        }
        let (id, ordinal) = ids.next_section();
        self.sections.push(Section::with_ordinal(id.clone(), ordinal));
        self.sync_section_count();
        Some(id)
    }

    /// Removes a section and its questions irrevocably.
    ///
    /// Silent no-op when the id is unknown or when removal would leave
    /// the document without a section.
    pub fn remove_section(&mut self, id: &SectionId) {
        if self.sections.len() <= MIN_SECTIONS {
            return;
        }
        self.sections.retain(|s| s.id() != id);
        self.sync_section_count();
    }

    /// Reconciles the section list to length `n` (clamped to 1..=15):
    /// grows by appending default sections, shrinks by truncating from
    /// the tail. Surviving sections are never reordered.
    pub fn set_section_count(&mut self, n: usize, ids: &mut IdAllocator) {
        let target = n.clamp(MIN_SECTIONS, MAX_SECTIONS);
        while self.sections.len() > target {
            self.sections.pop();
        }
        while self.sections.len() < target {
            let (id, ordinal) = ids.next_section();
            self.sections.push(Section::with_ordinal(id, ordinal));
        }
        self.sync_section_count();
    }

    /// Silent no-op when the id is unknown.
    pub fn set_section_title(&mut self, id: &SectionId, title: impl Into<String>) {
        if let Some(section) = self.section_mut(id) {
            section.set_title(title);
        }
    }

    /// Changes the type newly added questions are seeded from. Existing
    /// questions keep their original kind; there is no retroactive
    /// migration. Silent no-op when the id is unknown.
    pub fn set_section_type(&mut self, id: &SectionId, section_type: QuestionType) {
        if let Some(section) = self.section_mut(id) {
            section.set_type(section_type);
        }
    }

    // ─── Question operations ───────────────────────────────────────────────────

    /// Appends a question to the target section, seeded from the
    /// section's current type.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::UnknownSection` when `section_id` does
    /// not resolve.
    pub fn add_question(
        &mut self,
        section_id: &SectionId,
        ids: &mut IdAllocator,
    ) -> Result<QuestionId, DocumentError> {
        let question_id = ids.next_question(section_id);
        let section = self
            .section_mut(section_id)
            .ok_or_else(|| DocumentError::UnknownSection(section_id.clone()))?;
        section.push_question(question_id.clone());
        Ok(question_id)
    }

    /// Removes a question by id. Unknown section or question ids are a
    /// safe no-op; there is no minimum question count.
    pub fn delete_question(&mut self, section_id: &SectionId, question_id: &QuestionId) {
        if let Some(section) = self.section_mut(section_id) {
            section.remove_question(question_id);
        }
    }

    /// Unknown ids are a safe no-op.
    pub fn set_question_text(
        &mut self,
        section_id: &SectionId,
        question_id: &QuestionId,
        text: impl Into<String>,
    ) {
        if let Some(question) = self.question_mut(section_id, question_id) {
            question.set_text(text);
        }
    }

    /// Unknown ids are a safe no-op.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::ZeroMarks` when `marks == 0`.
    pub fn set_question_marks(
        &mut self,
        section_id: &SectionId,
        question_id: &QuestionId,
        marks: u32,
    ) -> Result<(), DocumentError> {
        if let Some(question) = self.question_mut(section_id, question_id) {
            question.set_marks(marks)?;
        }
        Ok(())
    }

    /// Unknown ids are a safe no-op.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::NotMultipleChoice` for non-MCQ questions.
    pub fn set_question_option(
        &mut self,
        section_id: &SectionId,
        question_id: &QuestionId,
        choice: McqChoice,
        text: impl Into<String>,
    ) -> Result<(), DocumentError> {
        if let Some(question) = self.question_mut(section_id, question_id) {
            question.set_option(choice, text)?;
        }
        Ok(())
    }

    /// Unknown ids are a safe no-op.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::NotMultipleChoice` for non-MCQ questions.
    pub fn set_correct_answer(
        &mut self,
        section_id: &SectionId,
        question_id: &QuestionId,
        choice: McqChoice,
    ) -> Result<(), DocumentError> {
        if let Some(question) = self.question_mut(section_id, question_id) {
            question.set_correct(choice)?;
        }
        Ok(())
    }

    /// Unknown ids are a safe no-op.
    pub fn attach_question_image(
        &mut self,
        section_id: &SectionId,
        question_id: &QuestionId,
        image: QuestionImage,
    ) {
        if let Some(question) = self.question_mut(section_id, question_id) {
            question.attach_image(image);
        }
    }

    /// Unknown ids are a safe no-op.
    pub fn remove_question_image(&mut self, section_id: &SectionId, question_id: &QuestionId) {
        if let Some(question) = self.question_mut(section_id, question_id) {
            question.remove_image();
        }
    }

    // ─── Internals ─────────────────────────────────────────────────────────────

    fn section_mut(&mut self, id: &SectionId) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id() == id)
    }

    fn question_mut(
        &mut self,
        section_id: &SectionId,
        question_id: &QuestionId,
    ) -> Option<&mut crate::model::question::Question> {
        self.section_mut(section_id)
            .and_then(|s| s.question_mut(question_id))
    }

    fn sync_section_count(&mut self) {
        self.number_of_sections = self.sections.len();
    }
}

//
// ─── WIRE HELPERS ──────────────────────────────────────────────────────────────
//

/// `examDate` travels as `YYYY-MM-DD`, or the empty string until set.
mod exam_date_wire {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => serializer.serialize_str(&d.format(FORMAT).to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(&raw, FORMAT)
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_doc() -> (ExamDocument, IdAllocator) {
        let mut ids = IdAllocator::new();
        let doc = ExamDocument::new(&mut ids);
        (doc, ids)
    }

    fn assert_invariants(doc: &ExamDocument) {
        assert_eq!(doc.number_of_sections(), doc.sections().len());
        assert!((MIN_SECTIONS..=MAX_SECTIONS).contains(&doc.sections().len()));
    }

    #[test]
    fn new_document_starts_with_one_default_section() {
        let (doc, _) = empty_doc();
        assert_eq!(doc.sections().len(), 1);
        assert_eq!(doc.sections()[0].title(), "Section 1");
        assert_eq!(doc.total_marks(), 0);
        assert!(doc.exam_date().is_none());
        assert_invariants(&doc);
    }

    #[test]
    fn section_count_tracks_adds_and_removes() {
        let (mut doc, mut ids) = empty_doc();
        let second = doc.add_section(&mut ids).unwrap();
        doc.add_section(&mut ids).unwrap();
        assert_invariants(&doc);
        assert_eq!(doc.number_of_sections(), 3);

        doc.remove_section(&second);
        assert_invariants(&doc);
        assert_eq!(doc.number_of_sections(), 2);
        assert!(doc.section(&second).is_none());
    }

    #[test]
    fn add_section_at_cap_is_a_noop() {
        let (mut doc, mut ids) = empty_doc();
        doc.set_section_count(MAX_SECTIONS, &mut ids);
        let before = doc.clone();
        assert!(doc.add_section(&mut ids).is_none());
        assert_eq!(doc.sections(), before.sections());
        assert_invariants(&doc);
    }

    #[test]
    fn remove_last_section_is_a_noop() {
        let (mut doc, _) = empty_doc();
        let only = doc.sections()[0].id().clone();
        let before = doc.clone();
        doc.remove_section(&only);
        assert_eq!(doc, before);
        assert_invariants(&doc);
    }

    #[test]
    fn set_section_count_grows_with_fresh_ordinals() {
        let (mut doc, mut ids) = empty_doc();
        doc.add_section(&mut ids).unwrap();
        let first_two: Vec<_> = doc.sections().to_vec();

        doc.set_section_count(5, &mut ids);
        assert_eq!(doc.sections().len(), 5);
        assert_eq!(&doc.sections()[..2], first_two.as_slice());
        assert_eq!(doc.sections()[2].title(), "Section 3");
        assert_eq!(doc.sections()[4].title(), "Section 5");
        for fresh in &doc.sections()[2..] {
            assert_eq!(fresh.section_type(), QuestionType::Mcq);
            assert!(fresh.questions().is_empty());
        }
        assert_invariants(&doc);
    }

    #[test]
    fn set_section_count_shrinks_from_the_tail() {
        let (mut doc, mut ids) = empty_doc();
        doc.set_section_count(5, &mut ids);
        for section in doc.sections().to_vec() {
            doc.add_question(section.id(), &mut ids).unwrap();
        }

        doc.set_section_count(1, &mut ids);
        assert_eq!(doc.sections().len(), 1);
        assert_eq!(doc.sections()[0].id().as_str(), "section-1");
        assert_eq!(doc.sections()[0].questions().len(), 1);
        assert_invariants(&doc);
    }

    #[test]
    fn set_section_count_clamps_out_of_range_targets() {
        let (mut doc, mut ids) = empty_doc();
        doc.set_section_count(0, &mut ids);
        assert_eq!(doc.sections().len(), MIN_SECTIONS);
        doc.set_section_count(40, &mut ids);
        assert_eq!(doc.sections().len(), MAX_SECTIONS);
        assert_invariants(&doc);
    }

    #[test]
    fn assigned_marks_follow_question_lifecycle() {
        let (mut doc, mut ids) = empty_doc();
        let section = doc.sections()[0].id().clone();
        assert_eq!(doc.total_assigned_marks(), 0);

        let q = doc.add_question(&section, &mut ids).unwrap();
        doc.set_question_marks(&section, &q, 7).unwrap();
        assert_eq!(doc.total_assigned_marks(), 7);

        let other = doc.add_question(&section, &mut ids).unwrap();
        doc.set_question_marks(&section, &other, 3).unwrap();
        assert_eq!(doc.total_assigned_marks(), 10);

        doc.delete_question(&section, &q);
        assert_eq!(doc.total_assigned_marks(), 3);
        assert_eq!(doc.total_questions(), 1);
    }

    #[test]
    fn add_question_to_unknown_section_reports_error() {
        let (mut doc, mut ids) = empty_doc();
        let phantom: SectionId = "section-99".parse().unwrap();
        let err = doc.add_question(&phantom, &mut ids).unwrap_err();
        assert_eq!(err, DocumentError::UnknownSection(phantom));
        assert_eq!(doc.total_questions(), 0);
    }

    #[test]
    fn question_mutations_on_unknown_ids_are_noops() {
        let (mut doc, mut ids) = empty_doc();
        let section = doc.sections()[0].id().clone();
        let phantom = ids.next_question(&section);
        let before = doc.clone();

        doc.set_question_text(&section, &phantom, "ghost");
        doc.set_question_marks(&section, &phantom, 4).unwrap();
        doc.delete_question(&section, &phantom);
        assert_eq!(doc, before);
    }

    #[test]
    fn mcq_mutators_reject_open_questions() {
        let (mut doc, mut ids) = empty_doc();
        let section = doc.sections()[0].id().clone();
        doc.set_section_type(&section, QuestionType::TrueFalse);
        let q = doc.add_question(&section, &mut ids).unwrap();

        let choice = McqChoice::new(0).unwrap();
        let err = doc.set_correct_answer(&section, &q, choice).unwrap_err();
        assert_eq!(
            err,
            DocumentError::Question(QuestionError::NotMultipleChoice)
        );
    }

    #[test]
    fn image_attach_and_remove() {
        let (mut doc, mut ids) = empty_doc();
        let section = doc.sections()[0].id().clone();
        doc.set_section_type(&section, QuestionType::DiagramBased);
        let q = doc.add_question(&section, &mut ids).unwrap();

        let image = QuestionImage::new("cell.png", "image/png", vec![9, 9]);
        doc.attach_question_image(&section, &q, image.clone());
        assert_eq!(
            doc.section(&section).unwrap().question(&q).unwrap().image(),
            Some(&image)
        );

        doc.remove_question_image(&section, &q);
        assert!(doc.section(&section).unwrap().question(&q).unwrap().image().is_none());
    }

    #[test]
    fn document_wire_roundtrip() {
        let (mut doc, mut ids) = empty_doc();
        doc.set_grade("Grade VII");
        doc.set_subject("Science");
        doc.set_exam_year("2025-26");
        doc.set_exam_date(NaiveDate::from_ymd_opt(2026, 3, 14));
        doc.set_total_marks(50);
        doc.set_duration("2 Hours");

        let section = doc.sections()[0].id().clone();
        let q = doc.add_question(&section, &mut ids).unwrap();
        doc.set_question_text(&section, &q, "Pick one.");
        doc.set_question_marks(&section, &q, 50).unwrap();
        doc.set_question_option(&section, &q, McqChoice::new(1).unwrap(), "Option B")
            .unwrap();
        doc.set_correct_answer(&section, &q, McqChoice::new(1).unwrap())
            .unwrap();
        doc.attach_question_image(
            &section,
            &q,
            QuestionImage::new("fig.png", "image/png", vec![0, 1, 2]),
        );

        let json = serde_json::to_string(&doc).unwrap();
        let back: ExamDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["examDate"], "2026-03-14");
        assert_eq!(value["totalMarks"], 50);
        assert_eq!(value["numberOfSections"], 1);
        assert_eq!(value["sections"][0]["questions"][0]["correctAnswer"], 1);
    }

    #[test]
    fn unset_exam_date_serializes_as_empty_string() {
        let (doc, _) = empty_doc();
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["examDate"], "");
        let back: ExamDocument = serde_json::from_value(value).unwrap();
        assert!(back.exam_date().is_none());
    }
}
