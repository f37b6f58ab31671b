#![forbid(unsafe_code)]

pub mod model;
pub mod template;
pub mod validation;
pub mod wizard;

pub use template::{DOCX_MEDIA_TYPE, TemplateError, TemplateFile};
pub use validation::{
    BuildGate, MarksMismatch, details_complete, marks_reconciled, questions_complete,
};
pub use wizard::{StepBlocked, WizardController, WizardStep};
