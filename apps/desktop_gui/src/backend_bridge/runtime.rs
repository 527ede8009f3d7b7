//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{CatalogLoader, CatalogSource, LoadTicket};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use shared::domain::ProductId;
use tokio::task::JoinHandle;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::media::decode_preview_image;

/// Image downloads keyed by the mount that asked for them.
#[derive(Default)]
struct ImageFetches {
    tasks: Vec<(LoadTicket, JoinHandle<()>)>,
}

impl ImageFetches {
    fn push(&mut self, ticket: LoadTicket, handle: JoinHandle<()>) {
        self.tasks.retain(|(_, task)| !task.is_finished());
        self.tasks.push((ticket, handle));
    }

    fn cancel(&mut self, ticket: LoadTicket) -> usize {
        let mut cancelled = 0;
        self.tasks.retain(|(owner, task)| {
            if *owner == ticket {
                if !task.is_finished() {
                    task.abort();
                    cancelled += 1;
                }
                false
            } else {
                true
            }
        });
        cancelled
    }
}

impl Drop for ImageFetches {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain(..) {
            task.abort();
        }
    }
}

fn send_ui_event(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    match ui_tx.try_send(event) {
        Ok(()) => {}
        Err(TrySendError::Full(_)) => tracing::warn!("ui event queue full; dropping backend event"),
        Err(TrySendError::Disconnected(_)) => {
            tracing::debug!("ui event receiver gone; dropping backend event")
        }
    }
}

async fn fetch_product_image(
    source: Arc<dyn CatalogSource>,
    ticket: LoadTicket,
    product_id: ProductId,
    image_url: String,
) -> UiEvent {
    let failed = |reason: String| {
        tracing::warn!(product_id = product_id.0, %image_url, "backend: product image failed: {reason}");
        UiEvent::ProductImageFailed {
            ticket,
            product_id,
            reason,
        }
    };

    let bytes = match source.fetch_image(&image_url).await {
        Ok(bytes) => bytes,
        Err(err) => return failed(err.to_string()),
    };
    match tokio::task::spawn_blocking(move || decode_preview_image(&bytes)).await {
        Ok(Ok(image)) => UiEvent::ProductImageLoaded {
            ticket,
            product_id,
            image,
        },
        Ok(Err(err)) => failed(format!("image decode failed: {err}")),
        Err(err) => failed(format!("image decode task failed: {err}")),
    }
}

/// Starts the backend worker thread. It exits once every command sender is dropped.
pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    source: Arc<dyn CatalogSource>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        send_ui_event(&ui_tx, UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                send_ui_event(
                    &ui_tx,
                    UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!("backend worker startup failure: failed to build runtime: {err}"),
                    )),
                );
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let mut loader = CatalogLoader::new();
            let mut images = ImageFetches::default();
            send_ui_event(&ui_tx, UiEvent::Info("Backend worker ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::LoadCatalog { ticket } => {
                        tracing::info!(ticket = ticket.value(), "backend: load_catalog");
                        let ui_tx = ui_tx.clone();
                        loader.start(ticket, source.clone(), move |outcome| {
                            let event = match outcome.result {
                                Ok(products) => UiEvent::CatalogLoaded {
                                    ticket: outcome.ticket,
                                    products,
                                },
                                Err(err) => UiEvent::CatalogFailed {
                                    ticket: outcome.ticket,
                                    error: UiError::from_catalog(UiErrorContext::CatalogLoad, &err),
                                },
                            };
                            send_ui_event(&ui_tx, event);
                        });
                    }
                    BackendCommand::CancelLoad { ticket } => {
                        let catalog = loader.cancel(ticket);
                        let image_tasks = images.cancel(ticket);
                        tracing::info!(
                            ticket = ticket.value(),
                            catalog,
                            image_tasks,
                            "backend: cancel_load"
                        );
                    }
                    BackendCommand::FetchProductImage {
                        ticket,
                        product_id,
                        image_url,
                    } => {
                        tracing::debug!(product_id = product_id.0, "backend: fetch_product_image");
                        let ui_tx = ui_tx.clone();
                        let source = source.clone();
                        let handle = tokio::spawn(async move {
                            let event =
                                fetch_product_image(source, ticket, product_id, image_url).await;
                            send_ui_event(&ui_tx, event);
                        });
                        images.push(ticket, handle);
                    }
                }
            }
            tracing::info!("backend worker stopping: command channel closed");
        });
    })
}

#[cfg(test)]
#[path = "../tests/runtime_tests.rs"]
mod tests;
