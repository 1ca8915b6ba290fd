//! Preferred chat model, shared across every request in the process.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

/// Which configured model a call should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ChatModel {
    Primary = 0,
    Fallback = 1,
}

impl ChatModel {
    /// Next model to try after a transport failure, if any.
    pub fn fallback(self) -> Option<ChatModel> {
        match self {
            ChatModel::Primary => Some(ChatModel::Fallback),
            ChatModel::Fallback => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChatModel::Primary => "primary",
            ChatModel::Fallback => "fallback",
        }
    }

    fn from_u8(value: u8) -> Self {
        if value == ChatModel::Fallback as u8 {
            ChatModel::Fallback
        } else {
            ChatModel::Primary
        }
    }
}

impl fmt::Display for ChatModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Starts on [`ChatModel::Primary`]; once downgraded it stays on
/// [`ChatModel::Fallback`] for the life of the process.
#[derive(Debug, Default)]
pub struct ModelState {
    current: AtomicU8,
}

impl ModelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> ChatModel {
        ChatModel::from_u8(self.current.load(Ordering::Acquire))
    }

    /// Switch to the fallback model.
    ///
    /// Returns `true` only for the call that performed the switch.
    pub fn downgrade(&self) -> bool {
        self.current
            .compare_exchange(
                ChatModel::Primary as u8,
                ChatModel::Fallback as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    pub fn is_degraded(&self) -> bool {
        self.current() == ChatModel::Fallback
    }
}
