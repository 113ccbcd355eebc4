//! End-to-end tests against a mock backend.

mod backend_tests;
mod fixture;
