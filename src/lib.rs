//! Adaptive opponent-modeling decision engine for the iterated
//! prisoner's dilemma.
//!
//! This crate provides:
//! - A per-match [`Engine`] inferring an unknown opponent's behavioral
//!   policy from noisy move history and choosing actions that balance
//!   exploitation against retaliation risk
//! - Structure detectors (repeating cycles, modular defection schedules)
//!   and an online logistic predictor of the opponent's next move
//! - A behavioral classifier over a catalogue of recurring archetypes
//! - A match pipeline with baseline opponents, composable observers,
//!   trace analysis and CSV export

pub mod adapters;
pub mod analysis;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod detectors;
pub mod engine;
pub mod error;
pub mod export;
pub mod history;
pub mod model;
pub mod pipeline;
pub mod policy;
pub mod ports;
pub mod types;

pub use config::EngineConfig;
pub use engine::{Engine, EngineBuilder};
pub use error::{Error, Result};
pub use history::{OutcomeHistory, TransitionCounts};
pub use model::OpponentModel;
pub use types::{ClassificationTag, Move, RawRound, RoundOutcome};
