//! CLI infrastructure for the dilemma engine.
//!
//! This module provides the command-line interface for running matches
//! against the built-in opponent archetypes and inspecting the results.

pub mod commands;
pub mod output;
