mod review_vm;

pub use review_vm::{ReviewQuestionVm, ReviewSectionVm, ReviewVm, map_review};
