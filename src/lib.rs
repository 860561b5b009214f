//! Kiln generates a minimal runnable server application skeleton.
//! It provides destination inspection, an overwrite confirmation gate,
//! template rendering and filesystem materialization of the generated project.

/// Bundled templates and static sources
pub mod assets;

/// Command-line interface module for the Kiln application
pub mod cli;

/// Error types and handling for the Kiln application
pub mod error;

/// Logger initialization
pub mod logger;

/// Generation Manifest and package descriptor
pub mod manifest;

/// Application name derivation
pub mod name;

/// Destination directory inspection
pub mod preflight;

/// Core generation orchestration
/// Combines all components to generate the final output
pub mod processor;

/// Operator confirmation handling
pub mod prompt;

/// Template rendering
pub mod renderer;

/// Output draining before process exit
pub mod shutdown;

/// Directory and file creation
pub mod writer;
