//! Plain-text exports of a conversation.

use crate::session::Exchange;

/// Every reply, oldest first, joined by `\n`.
pub fn export_replies(exchanges: &[Exchange]) -> String {
    exchanges
        .iter()
        .map(|e| e.reply.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// The chat log as displayed: newest exchange first, each contributing its
/// reply and then its query, joined by `\n`.
pub fn export_chat(exchanges: &[Exchange]) -> String {
    exchanges
        .iter()
        .rev()
        .flat_map(|e| [e.reply.as_str(), e.query.as_str()])
        .collect::<Vec<_>>()
        .join("\n")
}
