//! trustwatch-analytics: Client-side aggregation over fetched claims.

pub mod derive;
pub mod pipeline;

pub use pipeline::{summarise, AnalyticsSummary, CategoryFilter, DateWindow};
