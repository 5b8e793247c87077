//! # pbuild - CMake Preset Front-End
//!
//! pbuild discovers the configure presets of the CMake project in the current
//! directory, picks one (the first by default) and drives
//! `cmake --preset`, `cmake --build` and optionally `cmake --install`,
//! timing every step.
//!
//! ## Module Organization
//!
//! - [`preset`] - Preset discovery and selection
//! - [`cmake`] - External command construction and execution
//! - [`options`] - Run configuration built from the command line
//! - [`driver`] - Step orchestration and error reporting

/// CMake invocations and the `Tool` abstraction that runs them.
pub mod cmake;

/// Step orchestration.
pub mod driver;

/// Hints after a failed configure step.
pub mod feedback;

/// Immutable run configuration.
pub mod options;

/// Preset discovery and selection.
pub mod preset;

/// Scoped timing of steps.
pub mod stopwatch;

/// Terminal output helpers.
pub mod ui;
