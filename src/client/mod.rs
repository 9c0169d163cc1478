//! Builds translation requests from form state and submits them to the relay.

pub mod error;
pub mod formality;
pub mod language;
pub mod prompt;
pub mod response;
pub mod session;
pub mod settings;
pub mod transport;
