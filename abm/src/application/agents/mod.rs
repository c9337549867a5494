//! Agent Cohorts
//!
//! Each cohort is a small mutable state record advanced once per period from
//! the current panic intensity. Cohorts never see each other; the driver
//! combines their outputs.
//!
//! - **Retail**: panic builds with intensity and fades slowly; drives selling
//! - **Whale**: coordinated directional pushes while panic is high
//! - **Influencer**: random social-media impulses on the meme asset
//! - **ExchangePool**: reserve drain and freezes under withdrawal pressure

mod cohort;
pub mod exchange_pool;
pub mod influencer;
pub mod retail;
pub mod whale;

pub use cohort::{Cohort, clamp_intensity};
pub use exchange_pool::{ExchangePool, PoolSnapshot};
pub use influencer::{InfluencerConfig, InfluencerOutput, InfluencerPool};
pub use retail::{RetailCohort, RetailConfig, RetailOutput};
pub use whale::{WhaleCohort, WhaleConfig, WhaleOutput};
