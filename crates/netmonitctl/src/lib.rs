//! netmonitctl library - exposes modules for testing

pub mod cli;
pub mod commands;
pub mod logging;
pub mod render;
pub mod snapshot;
