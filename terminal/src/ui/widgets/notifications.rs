//! # Notifications Widget
//!
//! Toast notification system using egui-notify. Toasts queued on
//! [`crate::app::AppState`] by event handling are drained once per frame and
//! shown here.

use std::time::Duration;

use egui_notify::Toasts;

use crate::app::{Toast, ToastLevel};

/// How long a toast stays on screen.
const TOAST_DURATION: Duration = Duration::from_secs(4);

/// Notification manager for the application
pub struct NotificationManager {
    pub toasts: Toasts,
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self {
            toasts: Toasts::default().with_anchor(egui_notify::Anchor::TopRight),
        }
    }
}

impl NotificationManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, message: String) {
        self.toasts.success(message).duration(Some(TOAST_DURATION));
    }

    pub fn error(&mut self, message: String) {
        self.toasts.error(message).duration(Some(TOAST_DURATION));
    }

    pub fn warning(&mut self, message: String) {
        self.toasts.warning(message).duration(Some(TOAST_DURATION));
    }

    pub fn info(&mut self, message: String) {
        self.toasts.info(message).duration(Some(TOAST_DURATION));
    }

    /// Show a toast queued by the application.
    pub fn show_toast(&mut self, toast: Toast) {
        match toast.level {
            ToastLevel::Success => self.success(toast.message),
            ToastLevel::Info => self.info(toast.message),
            ToastLevel::Warning => self.warning(toast.message),
            ToastLevel::Error => self.error(toast.message),
        }
    }

    /// Render notifications in the UI context
    pub fn show(&mut self, ctx: &egui::Context) {
        self.toasts.show(ctx);
    }
}
