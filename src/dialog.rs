//! Conversation flow for the score bot
//!
//! A five-state dialog per chat: registration (first name, last name),
//! subject selection, and score entry, with `/start` always resetting to
//! the idle menu. The flow talks to the score store through the injected
//! [`crate::client::ScoreApi`] and stays transport-agnostic; replies carry
//! abstract [`Keyboard`] tags that the transport layer renders.

mod event;
mod handler;
mod keyboards;
mod state;

#[cfg(test)]
mod proptests;
#[cfg(test)]
mod testing;

pub use event::{parse_score, Command};
pub use handler::DialogHandler;
pub use keyboards::{Keyboard, SUBJECTS};
pub use state::{DialogState, Reply, Session, SessionStore};
