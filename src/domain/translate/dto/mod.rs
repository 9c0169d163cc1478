pub mod chat_message;
pub mod translation_request;
pub mod upstream_chat_payload;
