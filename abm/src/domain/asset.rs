//! Traded assets and their static market profile
//!
//! The simulator prices a fixed basket in anchor-then-satellite order:
//! BTC first, then ETH, then DOGE. Index order matters to the price process.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Asset {
    Btc,
    Eth,
    Doge,
}

impl Asset {
    /// Pricing order; the first entry is the anchor
    pub const ALL: [Asset; 3] = [Asset::Btc, Asset::Eth, Asset::Doge];

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Btc => "btc",
            Self::Eth => "eth",
            Self::Doge => "doge",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Btc => 0,
            Self::Eth => 1,
            Self::Doge => 2,
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol().to_uppercase())
    }
}

/// How strongly each pressure channel moves an asset's return
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PressureSensitivity {
    pub retail: f64,
    pub whale: f64,
    pub liquidity: f64,
    /// Whether influencer impulses hit this asset
    pub social: bool,
}

impl PressureSensitivity {
    pub fn neutral() -> Self {
        Self {
            retail: 1.0,
            whale: 1.0,
            liquidity: 1.0,
            social: false,
        }
    }
}

/// Static description of one asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetProfile {
    pub asset: Asset,
    pub initial_price: f64,
    /// Circulating supply (for market cap)
    pub supply: f64,
    /// Base daily turnover as a fraction of market cap
    pub daily_turnover: f64,
    /// Multiplier on the base volatility in calm markets
    pub volatility_multiplier: f64,
    /// Extra volatility per unit of panic intensity
    pub panic_volatility: f64,
    /// Smallest fraction of the previous price a single period can keep
    pub floor_fraction: f64,
    pub sensitivity: PressureSensitivity,
}

impl AssetProfile {
    pub fn market_cap(&self, price: f64) -> f64 {
        price * self.supply
    }

    /// Idiosyncratic volatility at a given panic intensity
    pub fn volatility(&self, base: f64, intensity: f64) -> f64 {
        base * self.volatility_multiplier * (1.0 + self.panic_volatility * intensity)
    }
}
