//! Application layer: Use cases and orchestration
//!
//! Contains:
//! - **agents**: Retail, whale and influencer cohorts plus the exchange pool
//! - **pricing**: Correlated multi-asset price process
//! - **simulation**: The time-stepped runner and summary reducer

pub mod agents;
pub mod pricing;
pub mod simulation;
