use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{SlotIndex, GRID_COLUMNS, GRID_ROWS, GRID_SLOTS};

use crate::backend_bridge::commands::BackendCommand;
use crate::config::StartupConfig;
use crate::controller::events::UiEvent;
use crate::controller::input::{take_arrow_presses, GridInput};
use crate::ui::cell::{show_cell, CellImage, CELL_HEIGHT};
use crate::ui::theme::{visuals_for_palette, GridPalette};
use crate::ui::view::ProductGridView;

const CELL_SPACING: f32 = 16.0;
const GRID_MAX_WIDTH: f32 = 1440.0;
const MIN_CELL_WIDTH: f32 = 120.0;

pub struct ProductGridApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    view: ProductGridView,
    palette: GridPalette,
    title: String,
    visuals_applied: bool,
}

impl ProductGridApp {
    /// Builds the app and mounts the grid view, which starts the catalog load.
    pub fn bootstrap(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: &StartupConfig,
    ) -> Self {
        let mut view = ProductGridView::new();
        view.mount(&cmd_tx);
        Self {
            cmd_tx,
            ui_rx,
            view,
            palette: GridPalette::default(),
            title: startup.title.clone(),
            visuals_applied: false,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.view.apply_event(event);
        }
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        if !self.visuals_applied {
            ctx.set_visuals(visuals_for_palette(&self.palette));
            self.visuals_applied = true;
        }
    }

    fn show_header(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("grid_header").show(ctx, |ui| {
            ui.add_space(12.0);
            ui.vertical_centered(|ui| {
                ui.heading(egui::RichText::new(&self.title).size(32.0).strong());
            });
            ui.horizontal(|ui| {
                ui.label(format!(
                    "Revealed {} / {}",
                    self.view.grid().revealed_count(),
                    GRID_SLOTS
                ));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let status = ui.label(egui::RichText::new(self.view.status()).small().weak());
                    if let Some(err) = self.view.last_error() {
                        status.on_hover_text(err.to_string());
                    }
                });
            });
            ui.add_space(6.0);
        });
    }

    /// Draws the cells and returns the pointer input gathered this frame.
    fn show_grid(&mut self, ui: &mut egui::Ui) -> Vec<GridInput> {
        let mut inputs = Vec::new();
        let width = ui.available_width().min(GRID_MAX_WIDTH);
        let cell_width = ((width - CELL_SPACING * (GRID_COLUMNS as f32 - 1.0))
            / GRID_COLUMNS as f32)
            .max(MIN_CELL_WIDTH);
        let cell_size = egui::vec2(cell_width, CELL_HEIGHT);
        let ctx = ui.ctx().clone();

        ui.spacing_mut().item_spacing = egui::vec2(CELL_SPACING, CELL_SPACING);
        for row in 0..GRID_ROWS {
            ui.horizontal(|ui| {
                for col in 0..GRID_COLUMNS {
                    let Ok(slot) = SlotIndex::new(row * GRID_COLUMNS + col) else {
                        continue;
                    };
                    let shown = self
                        .view
                        .grid()
                        .query(slot)
                        .visible_product()
                        .map(|product| product.id);
                    let image = match shown {
                        Some(product_id) => self.view.cell_image(&ctx, product_id),
                        None => CellImage::Pending,
                    };
                    let cell = self.view.grid().query(slot);
                    let response = show_cell(ui, &cell, &image, &self.palette, cell_size);
                    if response.clicked {
                        inputs.push(GridInput::Reveal(slot));
                    }
                    if let Some(payload) = response.dropped {
                        inputs.push(GridInput::Drop {
                            payload,
                            target: slot,
                        });
                    }
                }
            });
        }
        inputs
    }

    fn apply_inputs(&mut self, inputs: Vec<GridInput>) {
        for input in inputs {
            let effect = self.view.handle_input(input, &self.cmd_tx);
            tracing::debug!(?effect, "grid input applied");
        }
    }
}

impl eframe::App for ProductGridApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.apply_theme_if_needed(ctx);

        // Arrow keys belong to the grid for as long as it is mounted.
        let mut inputs: Vec<GridInput> = if self.view.is_mounted() {
            take_arrow_presses(ctx)
                .into_iter()
                .map(GridInput::Navigate)
                .collect()
        } else {
            Vec::new()
        };

        self.show_header(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.view.grid().is_loaded() {
                let pointer = egui::ScrollArea::both()
                    .show(ui, |ui| self.show_grid(ui))
                    .inner;
                inputs.extend(pointer);
            } else {
                ui.centered_and_justified(|ui| {
                    ui.label(egui::RichText::new("Loading...").size(18.0));
                });
            }
        });
        self.apply_inputs(inputs);

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

impl Drop for ProductGridApp {
    fn drop(&mut self) {
        self.view.unmount(&self.cmd_tx);
    }
}
