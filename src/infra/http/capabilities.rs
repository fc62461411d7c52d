//! Request-scoped implementations of the interactive ports.
//!
//! A browser cannot be asked a question mid-request, so the answers are
//! collected up front (the confirm page posts `confirm=yes`) and the effects
//! are replayed into the response afterwards: alerts become banners and
//! navigation becomes a redirect.

use std::sync::{Mutex, PoisonError};

use axum::response::Redirect;

use crate::application::{
    ports::{Confirmation, Navigator, Notification},
    routes::Route,
};

pub const CONFIRM_ANSWER: &str = "yes";

#[derive(Debug, Clone, Copy)]
pub struct FormConfirmation {
    answer: bool,
}

impl FormConfirmation {
    pub fn from_answer(raw: Option<&str>) -> Self {
        Self {
            answer: raw.map(str::trim) == Some(CONFIRM_ANSWER),
        }
    }
}

impl Confirmation for FormConfirmation {
    fn confirm(&self, _prompt: &str) -> bool {
        self.answer
    }
}

#[derive(Debug, Default)]
pub struct FlashNotification {
    alerts: Mutex<Vec<String>>,
}

impl FlashNotification {
    /// Drain the alerts raised so far.
    pub fn take(&self) -> Vec<String> {
        let mut alerts = self.alerts.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *alerts)
    }
}

impl Notification for FlashNotification {
    fn alert(&self, message: &str) {
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}

/// Records where the view wants to go.
#[derive(Debug, Default)]
pub struct RedirectNavigator {
    target: Mutex<Option<String>>,
}

impl RedirectNavigator {
    pub fn target(&self) -> Option<String> {
        self.target
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn redirect(&self) -> Option<Redirect> {
        self.target().map(|path| Redirect::to(&path))
    }

    fn set(&self, path: String) {
        *self.target.lock().unwrap_or_else(PoisonError::into_inner) = Some(path);
    }
}

impl Navigator for RedirectNavigator {
    fn navigate(&self, route: Route) {
        self.set(route.path());
    }

    // Without client history the best server-side "back" is the list.
    fn back(&self) {
        self.set(Route::List.path());
    }
}
