//! The mounted grid view: controller state plus its catalog/image lifecycle.

use std::collections::HashMap;

use client_core::{GridState, LoadTicket, MountState};
use crossbeam_channel::Sender;
use shared::domain::ProductId;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::controller::input::{apply_input, GridInput, InputEffect};
use crate::controller::orchestration::dispatch_backend_command;
use crate::media::PreviewImage;
use crate::ui::cell::CellImage;

enum ProductImageState {
    Requested,
    Decoded(PreviewImage),
    Ready(egui::TextureHandle),
    Failed,
}

pub struct ProductGridView {
    grid: GridState,
    mount: MountState,
    images: HashMap<ProductId, ProductImageState>,
    status: String,
    last_error: Option<UiError>,
}

impl Default for ProductGridView {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductGridView {
    pub fn new() -> Self {
        Self {
            grid: GridState::new(),
            mount: MountState::default(),
            images: HashMap::new(),
            status: String::new(),
            last_error: None,
        }
    }

    /// Starts a fresh mount with an empty grid and asks the backend for the catalog.
    pub fn mount(&mut self, cmd_tx: &Sender<BackendCommand>) -> LoadTicket {
        if self.mount.current().is_some() {
            self.unmount(cmd_tx);
        }
        let ticket = self.mount.mount();
        self.grid = GridState::new();
        self.images.clear();
        self.last_error = None;
        tracing::info!(ticket = ticket.value(), "grid view mounted");
        self.dispatch(cmd_tx, BackendCommand::LoadCatalog { ticket });
        ticket
    }

    pub fn unmount(&mut self, cmd_tx: &Sender<BackendCommand>) {
        if let Some(ticket) = self.mount.unmount() {
            tracing::info!(ticket = ticket.value(), "grid view unmounted");
            self.dispatch(cmd_tx, BackendCommand::CancelLoad { ticket });
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mount.current().is_some()
    }

    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn last_error(&self) -> Option<&UiError> {
        self.last_error.as_ref()
    }

    fn dispatch(&mut self, cmd_tx: &Sender<BackendCommand>, cmd: BackendCommand) {
        if !dispatch_backend_command(cmd_tx, cmd, &mut self.status) {
            self.last_error = Some(UiError::from_message(
                UiErrorContext::General,
                self.status.clone(),
            ));
        }
    }

    pub fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => {
                self.status = message;
            }
            UiEvent::Error(err) => {
                tracing::error!("{err}");
                self.status = err.message().to_string();
                self.last_error = Some(err);
            }
            UiEvent::CatalogLoaded { ticket, products } => {
                if !self.mount.accept_outcome(ticket) {
                    tracing::warn!(ticket = ticket.value(), "discarding stale catalog");
                    return;
                }
                let placed = self.grid.populate(products);
                tracing::info!(ticket = ticket.value(), placed, "catalog applied to grid");
                self.status = format!("Loaded {placed} products");
            }
            UiEvent::CatalogFailed { ticket, error } => {
                if !self.mount.accept_outcome(ticket) {
                    tracing::warn!(ticket = ticket.value(), "discarding stale catalog failure");
                    return;
                }
                // The grid stays empty and keeps showing its loading placeholder.
                tracing::error!(ticket = ticket.value(), "error fetching products: {error}");
                self.last_error = Some(error);
            }
            UiEvent::ProductImageLoaded {
                ticket,
                product_id,
                image,
            } => {
                if self.mount.is_current(ticket) {
                    self.images
                        .insert(product_id, ProductImageState::Decoded(image));
                }
            }
            UiEvent::ProductImageFailed {
                ticket,
                product_id,
                reason,
            } => {
                if self.mount.is_current(ticket) {
                    self.last_error = Some(UiError::from_message(UiErrorContext::ImageLoad, reason));
                    self.images.insert(product_id, ProductImageState::Failed);
                }
            }
        }
    }

    pub fn handle_input(&mut self, input: GridInput, cmd_tx: &Sender<BackendCommand>) -> InputEffect {
        let effect = apply_input(&mut self.grid, input);
        match &effect {
            InputEffect::Revealed(_) | InputEffect::Reordered(_) => {
                self.request_visible_images(cmd_tx);
            }
            InputEffect::Rejected(err) => {
                self.last_error = Some(UiError::from_message(
                    UiErrorContext::DragDrop,
                    err.to_string(),
                ));
            }
            InputEffect::FocusMoved(_) | InputEffect::Unchanged => {}
        }
        effect
    }

    /// Requests the image of every product currently shown in a revealed slot, once.
    fn request_visible_images(&mut self, cmd_tx: &Sender<BackendCommand>) {
        let Some(ticket) = self.mount.current() else {
            return;
        };
        let wanted: Vec<(ProductId, String)> = self
            .grid
            .cells()
            .filter_map(|cell| cell.visible_product())
            .filter(|product| !self.images.contains_key(&product.id))
            .map(|product| (product.id, product.image_url.clone()))
            .collect();
        for (product_id, image_url) in wanted {
            self.images.insert(product_id, ProductImageState::Requested);
            self.dispatch(
                cmd_tx,
                BackendCommand::FetchProductImage {
                    ticket,
                    product_id,
                    image_url,
                },
            );
        }
    }

    /// Image for a cell, uploading decoded pixels to a texture on first use.
    pub fn cell_image(&mut self, ctx: &egui::Context, product_id: ProductId) -> CellImage {
        let Some(state) = self.images.get_mut(&product_id) else {
            return CellImage::Pending;
        };
        if let ProductImageState::Decoded(image) = state {
            let texture = ctx.load_texture(
                format!("product_image_{}", product_id.0),
                image.to_color_image(),
                egui::TextureOptions::LINEAR,
            );
            *state = ProductImageState::Ready(texture);
        }
        match state {
            ProductImageState::Ready(texture) => CellImage::Texture(texture.clone()),
            ProductImageState::Failed => CellImage::Unavailable,
            ProductImageState::Requested | ProductImageState::Decoded(_) => CellImage::Pending,
        }
    }

    #[cfg(test)]
    fn image_requested(&self, product_id: ProductId) -> bool {
        self.images.contains_key(&product_id)
    }
}

#[cfg(test)]
#[path = "../tests/view_tests.rs"]
mod tests;
