//! Testing infrastructure for lexeme integration tests.
//!
//! This crate provides utilities for writing robust integration tests:
//! - `WorkbookBuilder`: writes small but valid xlsx files
//! - `fixtures`: the reference dictionary and poems used across tests
//! - `TestWorld`: isolated temp directory for running the CLI

pub mod fixtures;
pub mod workbook;
pub mod world;

pub use workbook::{FixtureCell, WorkbookBuilder};
pub use world::{CliResult, TestWorld};
