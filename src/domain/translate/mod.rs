//! Relay of translation requests to chat-completion endpoints.

pub mod dto;
pub mod service;
