use crate::model::ids::{QuestionId, SectionId};

/// Hands out section and question identifiers for one wizard session.
///
/// Both counters only ever move forward, so an id is never reissued
/// after its entity is removed. Question ids combine the owning section
/// id with a session-wide sequence number, which keeps them unique even
/// when several questions are created in the same instant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdAllocator {
    next_section_ordinal: u64,
    next_question_seq: u64,
}

impl IdAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next section id and its 1-based creation ordinal.
    ///
    /// The ordinal also seeds the default section title (`Section N`).
    pub fn next_section(&mut self) -> (SectionId, u64) {
        self.next_section_ordinal += 1;
        (
            SectionId::from_ordinal(self.next_section_ordinal),
            self.next_section_ordinal,
        )
    }

    /// Returns the next question id for the given section.
    pub fn next_question(&mut self, section: &SectionId) -> QuestionId {
        self.next_question_seq += 1;
        QuestionId::from_parts(section, self.next_question_seq)
    }
}
