//! trustwatch-common: Shared entities, backend operations and errors used across
//! all Trustwatch crates.

pub mod entities;
pub mod error;
pub mod operation;

// Re-export commonly used types
pub use entities::{Claim, Influencer, ResearchConfig, SourceFilters, Stats, VerificationStatus};
pub use error::{ApiError, ApiResult};
pub use operation::{Operation, Verb};
