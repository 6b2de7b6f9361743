pub mod config;
pub mod entities;
pub mod error;
pub mod pipeline;
pub mod types;

pub use config::{ConfigLoader, ConfigValidator, RelayConfig};
pub use entities::{ArticleSubmission, CanonicalPayload, DispatchOutcome, ProcessingResult};
pub use error::AppError;
pub use pipeline::{SubmissionPipeline, ValidationError};
pub use types::*;
