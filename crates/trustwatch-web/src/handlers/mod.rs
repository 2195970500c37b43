//! HTTP handlers, one module per page.

pub mod analytics;
pub mod claims;
pub mod dashboard;
pub mod influencer_detail;
pub mod influencers;
pub mod research;
pub mod system;
