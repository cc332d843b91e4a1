// file: src/cli/mod.rs
// version: 1.0.0
// guid: 5f8d2c61-9b3e-4a74-8105-7e2c4f9a6d38

//! Command line interface module

pub mod args;
pub mod commands;
