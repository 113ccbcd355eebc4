//! Snapshot tests for user-facing messages.

mod error_messages;
