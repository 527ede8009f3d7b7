//! Backend commands queued from UI to backend worker.

use client_core::LoadTicket;
use shared::domain::ProductId;

#[derive(Debug, Clone)]
pub enum BackendCommand {
    LoadCatalog {
        ticket: LoadTicket,
    },
    CancelLoad {
        ticket: LoadTicket,
    },
    FetchProductImage {
        ticket: LoadTicket,
        product_id: ProductId,
        image_url: String,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::LoadCatalog { .. } => "load_catalog",
            BackendCommand::CancelLoad { .. } => "cancel_load",
            BackendCommand::FetchProductImage { .. } => "fetch_product_image",
        }
    }
}
