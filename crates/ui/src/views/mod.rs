mod build;
mod details;
mod generate;
mod review;
mod state;
mod upload;
mod wizard;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use build::BuildStep;
pub use details::DetailsStep;
pub use generate::GenerateStep;
pub use review::ReviewStep;
pub use state::{Notice, NoticeKind};
pub use upload::UploadStep;
pub use wizard::{ProgressTracker, WizardView};
