//! Backend-to-UI events and error modeling for the grid view.

use client_core::LoadTicket;
use shared::{
    domain::{Product, ProductId},
    error::{CatalogError, ErrorCode},
};

use crate::media::PreviewImage;

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    Error(UiError),
    CatalogLoaded {
        ticket: LoadTicket,
        products: Vec<Product>,
    },
    CatalogFailed {
        ticket: LoadTicket,
        error: UiError,
    },
    ProductImageLoaded {
        ticket: LoadTicket,
        product_id: ProductId,
        image: PreviewImage,
    },
    ProductImageFailed {
        ticket: LoadTicket,
        product_id: ProductId,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Decode,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    CatalogLoad,
    ImageLoad,
    DragDrop,
    General,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("decode")
            || message_lower.contains("malformed")
            || message_lower.contains("format")
            || message_lower.contains("expected")
        {
            UiErrorCategory::Decode
        } else if message_lower.contains("invalid")
            || message_lower.contains("out of range")
            || message_lower.contains("not a slot")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("dns")
            || message_lower.contains("unavailable")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_catalog(context: UiErrorContext, err: &CatalogError) -> Self {
        let category = match err.code {
            ErrorCode::Transport | ErrorCode::Status => UiErrorCategory::Transport,
            ErrorCode::Decode => UiErrorCategory::Decode,
        };
        Self {
            category,
            context,
            message: err.message.clone(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for UiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}/{:?}: {}", self.context, self.category, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::{UiError, UiErrorCategory, UiErrorContext};
    use shared::error::{CatalogError, ErrorCode};

    #[test]
    fn classifies_backend_command_processor_disconnect_as_transport_error() {
        let err = UiError::from_message(
            UiErrorContext::General,
            "Backend command processor disconnected (possible startup/runtime failure)",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
    }

    #[test]
    fn classifies_bad_drag_payload_as_validation_error() {
        let err = UiError::from_message(
            UiErrorContext::DragDrop,
            "drag payload \"abc\" is not a slot number",
        );
        assert_eq!(err.category(), UiErrorCategory::Validation);
        assert_eq!(err.context(), UiErrorContext::DragDrop);
    }

    #[test]
    fn catalog_codes_map_to_categories() {
        let status = CatalogError::new(ErrorCode::Status, "HTTP status server error (503)");
        let decode = CatalogError::new(ErrorCode::Decode, "malformed catalog response");
        assert_eq!(
            UiError::from_catalog(UiErrorContext::CatalogLoad, &status).category(),
            UiErrorCategory::Transport
        );
        let err = UiError::from_catalog(UiErrorContext::CatalogLoad, &decode);
        assert_eq!(err.category(), UiErrorCategory::Decode);
        assert_eq!(err.message(), "malformed catalog response");
    }
}
