//! Price formation

mod correlated;

pub use correlated::{CorrelatedPriceProcess, PriceStep};
