#![forbid(unsafe_code)]

pub mod error;
pub mod gateway;
pub mod generation_service;
pub mod progress;

pub use error::{GatewayError, GenerationError};
pub use gateway::{
    GeneratedPapers, GenerationGateway, GenerationRequest, GenerationRequestId, HttpGateway,
    PaperOutcome,
};
pub use generation_service::GenerationService;
pub use progress::{GenerationPhase, GenerationProgress};
