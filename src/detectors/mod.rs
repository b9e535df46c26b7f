//! Opponent-structure detectors.
//!
//! Each detector keeps its own small state, re-evaluates once per recorded
//! round, and exposes bounded confidence scores the classifier and policy
//! consume.

pub mod pattern;
pub mod periodic;
pub mod predictor;

pub use pattern::{PatternDetector, PatternState};
pub use periodic::{PeriodicCalibratorDetector, PeriodicState};
pub use predictor::{FEATURE_COUNT, OnlinePredictor};
