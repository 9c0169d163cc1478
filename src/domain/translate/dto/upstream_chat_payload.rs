use serde::Serialize;

use super::chat_message::ChatMessage;

/// Body sent to the chat-completion endpoint. Streaming is always off.
#[derive(Debug, Serialize)]
pub struct UpstreamChatPayload<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub temperature: f64,
    pub max_tokens: u32,
    pub stream: bool,
}
