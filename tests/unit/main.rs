//! API-level tests for the library modules.

mod drafts_tests;
mod review_tests;
