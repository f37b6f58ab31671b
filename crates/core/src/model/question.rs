use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("marks must be at least 1")]
    ZeroMarks,

    #[error("question is not multiple choice")]
    NotMultipleChoice,

    #[error("MCQ option index must be between 0 and 3, got {0}")]
    InvalidChoice(u32),

    #[error("MCQ questions carry exactly {expected} options, got {actual}")]
    WrongOptionCount { expected: usize, actual: usize },

    #[error("MCQ question is missing its options")]
    MissingOptions,

    #[error("options and correct answer are only valid on MCQ questions")]
    StrayMcqFields,
}

//
// ─── QUESTION TYPE ─────────────────────────────────────────────────────────────
//

/// The fixed set of question kinds a section can hold.
///
/// Serialized labels match the wire format exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(rename = "MCQ")]
    Mcq,
    #[serde(rename = "Fill in the Blanks")]
    FillInTheBlanks,
    #[serde(rename = "True/False")]
    TrueFalse,
    #[serde(rename = "Match the Following")]
    MatchTheFollowing,
    #[serde(rename = "Short Answer")]
    ShortAnswer,
    #[serde(rename = "Definitions")]
    Definitions,
    #[serde(rename = "Full Form")]
    FullForm,
    #[serde(rename = "Unscramble")]
    Unscramble,
    #[serde(rename = "Diagram-based")]
    DiagramBased,
    #[serde(rename = "Odd One Out")]
    OddOneOut,
}

impl QuestionType {
    /// Every type, in the order the selector presents them.
    pub const ALL: [QuestionType; 10] = [
        QuestionType::Mcq,
        QuestionType::FillInTheBlanks,
        QuestionType::TrueFalse,
        QuestionType::MatchTheFollowing,
        QuestionType::ShortAnswer,
        QuestionType::Definitions,
        QuestionType::FullForm,
        QuestionType::Unscramble,
        QuestionType::DiagramBased,
        QuestionType::OddOneOut,
    ];

    /// Human-readable label, identical to the serialized form.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            QuestionType::Mcq => "MCQ",
            QuestionType::FillInTheBlanks => "Fill in the Blanks",
            QuestionType::TrueFalse => "True/False",
            QuestionType::MatchTheFollowing => "Match the Following",
            QuestionType::ShortAnswer => "Short Answer",
            QuestionType::Definitions => "Definitions",
            QuestionType::FullForm => "Full Form",
            QuestionType::Unscramble => "Unscramble",
            QuestionType::DiagramBased => "Diagram-based",
            QuestionType::OddOneOut => "Odd One Out",
        }
    }

    /// True when a diagram image is expected alongside the question.
    #[must_use]
    pub fn expects_image(&self) -> bool {
        matches!(self, QuestionType::DiagramBased)
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseQuestionTypeError(String);

impl fmt::Display for ParseQuestionTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown question type: {}", self.0)
    }
}

impl std::error::Error for ParseQuestionTypeError {}

impl FromStr for QuestionType {
    type Err = ParseQuestionTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.label() == s)
            .ok_or_else(|| ParseQuestionTypeError(s.to_string()))
    }
}

//
// ─── MCQ ANSWER DATA ───────────────────────────────────────────────────────────
//

/// Number of answer options every MCQ question carries.
pub const MCQ_OPTION_COUNT: usize = 4;

/// A validated index into an MCQ question's options (0 through 3).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct McqChoice(u8);

impl McqChoice {
    /// Creates a choice, rejecting indices outside the option range.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::InvalidChoice` when `index >= 4`.
    pub fn new(index: u32) -> Result<Self, QuestionError> {
        if index as usize >= MCQ_OPTION_COUNT {
            return Err(QuestionError::InvalidChoice(index));
        }
        #[allow(clippy::cast_possible_truncation)]
        Ok(Self(index as u8))
    }

    #[must_use]
    pub fn index(&self) -> usize {
        usize::from(self.0)
    }

    /// Option letter shown in the review step (A through D).
    #[must_use]
    pub fn letter(&self) -> char {
        char::from(b'A' + self.0)
    }

    /// All four choices in order.
    #[must_use]
    pub fn all() -> [McqChoice; MCQ_OPTION_COUNT] {
        [Self(0), Self(1), Self(2), Self(3)]
    }
}

/// Options and the marked correct answer for an MCQ question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McqAnswer {
    options: [String; MCQ_OPTION_COUNT],
    correct: McqChoice,
}

impl Default for McqAnswer {
    fn default() -> Self {
        Self {
            options: Default::default(),
            correct: McqChoice::default(),
        }
    }
}

impl McqAnswer {
    /// Builds answer data from already-collected options.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::WrongOptionCount` unless exactly four
    /// options are supplied.
    pub fn from_options(options: Vec<String>, correct: McqChoice) -> Result<Self, QuestionError> {
        let actual = options.len();
        let options: [String; MCQ_OPTION_COUNT] =
            options
                .try_into()
                .map_err(|_| QuestionError::WrongOptionCount {
                    expected: MCQ_OPTION_COUNT,
                    actual,
                })?;
        Ok(Self { options, correct })
    }

    #[must_use]
    pub fn options(&self) -> &[String; MCQ_OPTION_COUNT] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, choice: McqChoice) -> &str {
        &self.options[choice.index()]
    }

    pub fn set_option(&mut self, choice: McqChoice, text: impl Into<String>) {
        self.options[choice.index()] = text.into();
    }

    #[must_use]
    pub fn correct(&self) -> McqChoice {
        self.correct
    }

    pub fn set_correct(&mut self, choice: McqChoice) {
        self.correct = choice;
    }
}

//
// ─── IMAGE ATTACHMENT ──────────────────────────────────────────────────────────
//

/// Opaque binary attachment, keyed by name, media type, and bytes.
///
/// Equality is byte equality; the payload is never inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionImage {
    name: String,
    media_type: String,
    bytes: Vec<u8>,
}

impl QuestionImage {
    #[must_use]
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// Answer shape, keyed by question type.
///
/// Only the MCQ variant carries options and a correct answer; every
/// other type is an open question with free-form answering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    Mcq(McqAnswer),
    Open(QuestionType),
}

impl QuestionKind {
    /// Seeds the kind for a freshly created question of the given type.
    #[must_use]
    pub fn for_type(question_type: QuestionType) -> Self {
        match question_type {
            QuestionType::Mcq => QuestionKind::Mcq(McqAnswer::default()),
            other => QuestionKind::Open(other),
        }
    }

    #[must_use]
    pub fn question_type(&self) -> QuestionType {
        match self {
            QuestionKind::Mcq(_) => QuestionType::Mcq,
            QuestionKind::Open(t) => *t,
        }
    }
}

/// A single gradable item within a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireQuestion", into = "WireQuestion")]
pub struct Question {
    id: QuestionId,
    text: String,
    marks: u32,
    kind: QuestionKind,
    image: Option<QuestionImage>,
}

impl Question {
    /// Creates an empty question seeded from the owning section's type.
    #[must_use]
    pub fn new(id: QuestionId, section_type: QuestionType) -> Self {
        Self {
            id,
            text: String::new(),
            marks: 1,
            kind: QuestionKind::for_type(section_type),
            image: None,
        }
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    /// May be empty; flagged at review, never blocked.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn marks(&self) -> u32 {
        self.marks
    }

    #[must_use]
    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    #[must_use]
    pub fn question_type(&self) -> QuestionType {
        self.kind.question_type()
    }

    #[must_use]
    pub fn image(&self) -> Option<&QuestionImage> {
        self.image.as_ref()
    }

    #[must_use]
    pub fn mcq(&self) -> Option<&McqAnswer> {
        match &self.kind {
            QuestionKind::Mcq(answer) => Some(answer),
            QuestionKind::Open(_) => None,
        }
    }

    // Mutators
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// # Errors
    ///
    /// Returns `QuestionError::ZeroMarks` when `marks == 0`.
    pub fn set_marks(&mut self, marks: u32) -> Result<(), QuestionError> {
        if marks == 0 {
            return Err(QuestionError::ZeroMarks);
        }
        self.marks = marks;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `QuestionError::NotMultipleChoice` for non-MCQ questions.
    pub fn set_option(
        &mut self,
        choice: McqChoice,
        text: impl Into<String>,
    ) -> Result<(), QuestionError> {
        match &mut self.kind {
            QuestionKind::Mcq(answer) => {
                answer.set_option(choice, text);
                Ok(())
            }
            QuestionKind::Open(_) => Err(QuestionError::NotMultipleChoice),
        }
    }

    /// # Errors
    ///
    /// Returns `QuestionError::NotMultipleChoice` for non-MCQ questions.
    pub fn set_correct(&mut self, choice: McqChoice) -> Result<(), QuestionError> {
        match &mut self.kind {
            QuestionKind::Mcq(answer) => {
                answer.set_correct(choice);
                Ok(())
            }
            QuestionKind::Open(_) => Err(QuestionError::NotMultipleChoice),
        }
    }

    pub fn attach_image(&mut self, image: QuestionImage) {
        self.image = Some(image);
    }

    pub fn remove_image(&mut self) -> Option<QuestionImage> {
        self.image.take()
    }
}

//
// ─── WIRE FORMAT ───────────────────────────────────────────────────────────────
//

/// Flat serialized shape: `options`/`correctAnswer` appear only for MCQ.
#[derive(Serialize, Deserialize)]
struct WireQuestion {
    id: QuestionId,
    text: String,
    marks: u32,
    #[serde(rename = "type")]
    question_type: QuestionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<Vec<String>>,
    #[serde(
        rename = "correctAnswer",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    correct_answer: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<QuestionImage>,
}

impl From<Question> for WireQuestion {
    fn from(question: Question) -> Self {
        let question_type = question.question_type();
        let (options, correct_answer) = match question.kind {
            QuestionKind::Mcq(answer) => {
                let correct = answer.correct.index() as u32;
                (Some(answer.options.to_vec()), Some(correct))
            }
            QuestionKind::Open(_) => (None, None),
        };
        Self {
            id: question.id,
            text: question.text,
            marks: question.marks,
            question_type,
            options,
            correct_answer,
            image: question.image,
        }
    }
}

impl TryFrom<WireQuestion> for Question {
    type Error = QuestionError;

    fn try_from(wire: WireQuestion) -> Result<Self, Self::Error> {
        if wire.marks == 0 {
            return Err(QuestionError::ZeroMarks);
        }
        let kind = match wire.question_type {
            QuestionType::Mcq => {
                let options = wire.options.ok_or(QuestionError::MissingOptions)?;
                let correct = McqChoice::new(wire.correct_answer.unwrap_or(0))?;
                QuestionKind::Mcq(McqAnswer::from_options(options, correct)?)
            }
            other => {
                if wire.options.is_some() || wire.correct_answer.is_some() {
                    return Err(QuestionError::StrayMcqFields);
                }
                QuestionKind::Open(other)
            }
        };
        Ok(Self {
            id: wire.id,
            text: wire.text,
            marks: wire.marks,
            kind,
            image: wire.image,
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
