//! Panel rendering for HeckerApp

mod input;
mod panels;
