//! Per-visitor state: the visitor's lists plus the two flash message slots.
//!
//! Sessions live in a [`SessionStore`] keyed by a random id that travels in a
//! cookie; [`cookie::attach`] resolves it for every request.

use crate::models::TodoList;

pub mod cookie;
mod store;

pub use cookie::ActiveSession;
pub use store::{SessionStore, SharedSession};

#[derive(Debug, Default, Clone)]
pub struct Session {
    pub lists: Vec<TodoList>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Messages shown once by the next rendered page.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Flash {
    pub error: Option<String>,
    pub success: Option<String>,
}

impl Session {
    pub fn flash_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn flash_success(&mut self, message: impl Into<String>) {
        self.success = Some(message.into());
    }

    pub fn take_flash(&mut self) -> Flash {
        Flash {
            error: self.error.take(),
            success: self.success.take(),
        }
    }
}
