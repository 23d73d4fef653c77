//! Core types and error definitions for mapchat.
//!
//! This crate provides the foundational types shared across all mapchat crates:
//! the unified error type, role-tagged chat messages and token usage accounting.
//!
//! # Main types
//!
//! - [`MapchatError`]: Unified error enum for all mapchat subsystems.
//! - [`MapchatResult`]: Convenience alias for `Result<T, MapchatError>`.
//! - [`Role`]: Message role (system, user, assistant).
//! - [`Message`]: A single message within a conversation transcript.
//! - [`UsageAccumulator`]: Running token counters for one session.

/// Error types shared by every mapchat crate.
pub mod error;
/// Role-tagged conversation messages.
pub mod message;
/// Token usage accounting.
pub mod usage;

pub use error::{MapchatError, MapchatResult};
pub use message::{Message, Role};
pub use usage::{UsageAccumulator, DEFAULT_USD_PER_1K_TOKENS};
