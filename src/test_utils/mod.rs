//! Shared fixtures for unit and integration tests.

pub mod fixtures;
