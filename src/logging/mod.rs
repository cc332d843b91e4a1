// file: src/logging/mod.rs
// version: 1.0.0
// guid: 1a8c4e62-9d3f-4b07-8e51-6f2a9c7d4b18

//! Logging module for the fleet configuration agent

pub mod logger;

pub use logger::init_logger;
