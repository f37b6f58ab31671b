mod allocator;
mod exam;
mod ids;
mod question;
mod section;

pub use allocator::IdAllocator;
pub use exam::{DocumentError, ExamDocument, MAX_SECTIONS, MIN_SECTIONS};
pub use ids::{ParseIdError, QuestionId, SectionId};
pub use question::{
    MCQ_OPTION_COUNT, McqAnswer, McqChoice, Question, QuestionError, QuestionImage, QuestionKind,
    QuestionType,
};
pub use section::Section;
