/// Camera session state machine.
///
/// State transitions:
/// ```text
/// uninitialized → initializing → active ↔ switching
///       ↑               │           │         │
///       └───────────────┴─ dispose / failure ─┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Initializing,
    Active,
    Switching,
}

impl SessionState {
    pub fn is_uninitialized(&self) -> bool {
        matches!(self, Self::Uninitialized)
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// True between a successful acquisition and disposal.
    pub fn is_initialized(&self) -> bool {
        matches!(self, Self::Active | Self::Switching)
    }

    /// Whether an asynchronous acquisition is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Initializing | Self::Switching)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Initializing => "initializing",
            Self::Active => "active",
            Self::Switching => "switching",
        }
    }
}
