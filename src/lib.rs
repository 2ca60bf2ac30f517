//! Hecker Client library.
//!
//! This module re-exports the core components for testing and extension.

pub mod app;
pub mod backend;
pub mod config;
pub mod engagement;
pub mod logging;
pub mod protocol;
pub mod render;
pub mod state;
pub mod transcript;
pub mod ui;
pub mod validation;

#[cfg(test)]
mod backend_tests;
#[cfg(test)]
mod integration_tests;
