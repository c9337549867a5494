//! Jinn Bank Panic Model
//!
//! Simulates a run on a banking system:
//!
//! - **Deposit Flight**: withdrawals scale with panic intensity
//! - **Liquidity**: reserves drain, central bank support tops them up
//! - **Central Bank**: lends against shortfalls after a response delay
//! - **Failures**: illiquid banks fail, with contagion to healthy ones
//! - **Economy**: credit contracts and GDP takes the hit
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      Bank Run Simulation                     │
//! │                                                              │
//! │  Panic ───► Withdrawal Rate ───► Deposits / Reserves         │
//! │                                        │                     │
//! │                                        ▼                     │
//! │                               Liquidity Ratio                │
//! │                          ┌─────────┴─────────┐               │
//! │                          ▼                   ▼               │
//! │                   Central Bank          Bank Failures        │
//! │                 (support at t+1)        (with contagion)     │
//! │                                              │               │
//! │                                              ▼               │
//! │                                     Credit ───► GDP          │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`assess_liquidity`] gives the same picture for a single bank in closed
//! form, without running the simulation.

pub mod assessment;
pub mod banking;
pub mod model;
pub mod parameters;
pub mod simulation;
pub mod summary;

pub use assessment::{LiquidityAssessment, assess_liquidity};
pub use banking::{BankPool, CentralBank};
pub use model::{BankPanicModel, BankPanicRun};
pub use parameters::{BankPanicConfig, BankRunShock, CentralBankPolicy, default_parameters};
pub use simulation::{BankPanicSeries, BankRunSimulation};
pub use summary::BankPanicSummary;
