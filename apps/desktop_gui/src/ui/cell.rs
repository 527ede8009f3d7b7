//! Presentation unit for a single grid cell.

use client_core::{CellView, DragPayload};
use eframe::egui;

use crate::ui::theme::GridPalette;

pub const CELL_HEIGHT: f32 = 200.0;
pub const CELL_ROUNDING: u8 = 6;
const IMAGE_MAX_HEIGHT: f32 = 100.0;
const PLACEHOLDER_TEXT: &str = "Click to reveal";

/// What a revealed cell can show for its product image.
#[derive(Clone)]
pub enum CellImage {
    Pending,
    Texture(egui::TextureHandle),
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlineKind {
    KeyboardFocus,
    DropTarget,
    PointerHover,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellStyle {
    pub fill: egui::Color32,
    pub text: egui::Color32,
    pub outline: Option<(OutlineKind, egui::Stroke)>,
}

impl CellStyle {
    /// Keyboard focus outranks a drop highlight, which outranks hover.
    pub fn for_cell(
        cell: &CellView<'_>,
        hovered: bool,
        drop_target: bool,
        palette: &GridPalette,
    ) -> Self {
        let (fill, text) = if cell.revealed {
            (palette.revealed_fill, palette.revealed_text)
        } else {
            (palette.hidden_fill, palette.hidden_text)
        };
        let outline = if cell.focused {
            Some((
                OutlineKind::KeyboardFocus,
                egui::Stroke::new(3.0, palette.keyboard_focus),
            ))
        } else if drop_target {
            Some((
                OutlineKind::DropTarget,
                egui::Stroke::new(2.0, palette.drop_target),
            ))
        } else if hovered {
            Some((
                OutlineKind::PointerHover,
                egui::Stroke::new(1.5, palette.pointer_hover),
            ))
        } else {
            None
        };
        Self {
            fill,
            text,
            outline,
        }
    }
}

#[derive(Debug, Default)]
pub struct CellResponse {
    pub clicked: bool,
    pub dropped: Option<DragPayload>,
}

fn ui_in_rect(ui: &mut egui::Ui, rect: egui::Rect, add: impl FnOnce(&mut egui::Ui)) {
    let mut child = ui.new_child(
        egui::UiBuilder::new()
            .max_rect(rect)
            .layout(egui::Layout::top_down(egui::Align::Center)),
    );
    child.set_clip_rect(rect);
    add(&mut child);
}

pub fn show_cell(
    ui: &mut egui::Ui,
    cell: &CellView<'_>,
    image: &CellImage,
    palette: &GridPalette,
    size: egui::Vec2,
) -> CellResponse {
    let id = ui.id().with(("product_cell", cell.slot.get()));
    let (_, rect) = ui.allocate_space(size);
    let response = ui.interact(rect, id, egui::Sense::click_and_drag());

    if response.drag_started() {
        egui::DragAndDrop::set_payload(ui.ctx(), DragPayload::from_slot(cell.slot));
    }
    let drop_target = response.dnd_hover_payload::<DragPayload>().is_some();
    let dropped = response
        .dnd_release_payload::<DragPayload>()
        .map(|payload| (*payload).clone());

    let style = CellStyle::for_cell(cell, response.hovered(), drop_target, palette);
    let painter = ui.painter();
    painter.rect_filled(rect, CELL_ROUNDING, style.fill);
    if let Some((_, stroke)) = style.outline {
        painter.rect_stroke(rect, CELL_ROUNDING, stroke, egui::StrokeKind::Inside);
    }

    ui_in_rect(ui, rect.shrink(10.0), |ui| match cell.visible_product() {
        Some(product) => {
            let image_height = IMAGE_MAX_HEIGHT.min(ui.available_height() - 28.0).max(0.0);
            ui.add_space(6.0);
            ui.allocate_ui(egui::vec2(ui.available_width(), image_height), |ui| {
                ui.centered_and_justified(|ui| match image {
                    CellImage::Texture(texture) => {
                        ui.add(
                            egui::Image::new(texture)
                                .max_size(egui::vec2(ui.available_width(), image_height))
                                .maintain_aspect_ratio(true),
                        );
                    }
                    CellImage::Pending => {
                        ui.spinner();
                    }
                    CellImage::Unavailable => {
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new("image unavailable")
                                    .small()
                                    .color(style.text.gamma_multiply(0.6)),
                            )
                            .selectable(false),
                        );
                    }
                });
            });
            ui.add_space(8.0);
            ui.add(
                egui::Label::new(egui::RichText::new(&product.title).color(style.text))
                    .truncate()
                    .selectable(false),
            )
            .on_hover_text(&product.title);
        }
        None => {
            ui.centered_and_justified(|ui| {
                ui.add(
                    egui::Label::new(egui::RichText::new(PLACEHOLDER_TEXT).color(style.text))
                        .selectable(false),
                );
            });
        }
    });

    if response.dragged() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
    } else if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }

    CellResponse {
        clicked: response.clicked(),
        dropped,
    }
}
