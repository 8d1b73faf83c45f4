//! User-facing toast notifications.
//!
//! The cart reports the outcome of each operation as a short, fixed
//! Portuguese message. Front ends decide how to render them by providing a
//! [`Notifier`].

use std::sync::{Mutex, PoisonError};

use serde::Serialize;

/// Fixed toast messages shown to shoppers.
pub mod messages {
    /// A new product was added to the cart.
    pub const PRODUCT_ADDED: &str = "Produto adicionado com sucesso";
    /// Adding a product failed.
    pub const ADD_FAILED: &str = "Erro na adição do produto";
    /// Removing a product failed.
    pub const REMOVE_FAILED: &str = "Erro na remoção do produto";
    /// Requested quantity is not available.
    pub const OUT_OF_STOCK: &str = "Quantidade solicitada fora de estoque";
    /// Changing a quantity failed.
    pub const UPDATE_FAILED: &str = "Erro na alteração de quantidade do produto";
}

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Success,
    Error,
}

/// A single notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }
}

/// Sink for toasts.
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// Emits toasts as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, toast: Toast) {
        match toast.kind {
            ToastKind::Success => tracing::info!(toast = %toast.message, "Cart notification"),
            ToastKind::Error => tracing::warn!(toast = %toast.message, "Cart notification"),
        }
    }
}

/// Keeps every toast in arrival order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the toasts received so far.
    #[must_use]
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Remove and return the toasts received so far.
    pub fn drain(&self) -> Vec<Toast> {
        std::mem::take(&mut *self.toasts.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Most recent toast, if any.
    #[must_use]
    pub fn last(&self) -> Option<Toast> {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, toast: Toast) {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(toast);
    }
}
