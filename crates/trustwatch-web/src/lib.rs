//! trustwatch-web: server-rendered dashboard for tracking health influencers
//! and the claims they make.
//!
//! Pages:
//!   - Dashboard with aggregate stats
//!   - Influencer list, detail and content scan
//!   - Claims across all influencers
//!   - Category analytics with date and category filters
//!   - Research configuration and analysis tools

pub mod config;
pub mod handlers;
pub mod render;
pub mod router;
pub mod scope;
pub mod state;
pub mod view;
