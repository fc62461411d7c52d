//! Fetch lifecycle shared by the views.

/// State of a view that loads one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    /// User-facing message; the underlying error is logged, not shown.
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Tag handed out when a fetch starts; only the latest tag may commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Debug, Default)]
pub struct FetchGeneration {
    current: u64,
}

impl FetchGeneration {
    /// Start a new fetch, superseding every earlier ticket.
    pub fn next(&mut self) -> FetchTicket {
        self.current = self.current.wrapping_add(1);
        FetchTicket(self.current)
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.current
    }
}
