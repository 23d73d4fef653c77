//! Conversation state for one loaded map.
//!
//! A [`ChatSession`] owns the [`Transcript`] sent to the model, the token
//! [`UsageAccumulator`](mapchat_core::UsageAccumulator) and the ordered list of
//! answered [`Exchange`]s shown to the user.

pub mod export;
pub mod map;
pub mod prompts;
pub mod session;
pub mod transcript;

pub use export::{export_chat, export_replies};
pub use map::{extract_title, follow_up_questions};
pub use session::{ChatSession, Exchange};
pub use transcript::Transcript;
