//! Per-chat dialog state
//!
//! Sessions are keyed by the sender's Telegram id and live only in memory.
//! A restart drops every chat back to [`DialogState::Idle`].

use super::keyboards::Keyboard;
use std::collections::HashMap;
use std::sync::Mutex;

/// Where a chat currently is in the conversation flow
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DialogState {
    /// No flow in progress
    #[default]
    Idle,

    /// Registration: waiting for the user to type their first name
    AwaitingFirstName,

    /// Registration: first name captured, waiting for the last name
    AwaitingLastName { first_name: String },

    /// Score submission: waiting for a subject button press
    AwaitingSubjectSelection { user_id: i64 },

    /// Score submission: subject chosen, waiting for the numeric score
    AwaitingScoreValue { user_id: i64, subject: String },
}

/// Everything remembered about one chat
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    /// Store id of the registered user, once known for this chat
    pub user_id: Option<i64>,
    pub state: DialogState,
}

/// An outgoing message produced by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Option<Keyboard>,
}

impl Reply {
    pub fn new(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }

    /// Reply that leaves the chat's current keyboard in place.
    pub fn bare(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }
}

/// In-memory session map, one entry per chat
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current session for a chat, or a fresh idle one.
    pub fn load(&self, chat_id: &str) -> Session {
        self.sessions
            .lock()
            .unwrap()
            .get(chat_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn save(&self, chat_id: &str, session: Session) {
        self.sessions
            .lock()
            .unwrap()
            .insert(chat_id.to_string(), session);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_unknown_chat_is_idle() {
        let store = SessionStore::new();
        let session = store.load("12345");
        assert_eq!(session.state, DialogState::Idle);
        assert_eq!(session.user_id, None);
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let store = SessionStore::new();
        store.save(
            "12345",
            Session {
                user_id: Some(7),
                state: DialogState::AwaitingSubjectSelection { user_id: 7 },
            },
        );

        let session = store.load("12345");
        assert_eq!(session.user_id, Some(7));
        assert_eq!(
            session.state,
            DialogState::AwaitingSubjectSelection { user_id: 7 }
        );

        // Other chats are unaffected
        assert_eq!(store.load("99999"), Session::default());
    }
}
