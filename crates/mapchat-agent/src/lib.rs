//! Chat-turn execution and session lifecycle for mapchat.
//!
//! [`TurnExecutor`] runs one request/response cycle against a chat-completion
//! backend; [`SessionManager`] watches the selected map id, fetches the map
//! through a [`MapSource`] and resets the conversation when the id changes.

pub mod backends;
pub mod config;
pub mod lifecycle;
pub mod llm;
pub mod registry;
pub mod runner;
pub mod source;

pub use config::{LlmProvider, ModelConfig};
pub use lifecycle::{ObserveOutcome, SessionManager};
pub use llm::{Completion, LlmClient};
pub use registry::SessionRegistry;
pub use runner::{TurnExecutor, TurnOutcome};
pub use source::{HttpMapSource, MapSource};
