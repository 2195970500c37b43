//! trustwatch-api: Gateway client for the trust-analysis backend.
//! Covers:
//! - the `Backend` trait, one method per remote capability
//! - `ApiClient`, its reqwest implementation against the fixed origin
//! - concurrent per-influencer claim fan-out

pub mod backend;
pub mod client;
pub mod fanout;

pub use backend::Backend;
pub use client::{ApiClient, API_BASE_URL};
