//! Application layer containing the core business logic orchestration.
//!
//! This module defines the `RegistryEngine`, the single entry point for
//! applying registry operations. Each operation is awaited to completion
//! before the next, so state transitions never interleave.

pub mod engine;
