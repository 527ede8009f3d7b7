//! Colors for the grid and its cells.

use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPalette {
    pub hidden_fill: egui::Color32,
    pub hidden_text: egui::Color32,
    pub revealed_fill: egui::Color32,
    pub revealed_text: egui::Color32,
    pub keyboard_focus: egui::Color32,
    pub pointer_hover: egui::Color32,
    pub drop_target: egui::Color32,
    pub app_background: egui::Color32,
}

impl Default for GridPalette {
    fn default() -> Self {
        Self {
            hidden_fill: egui::Color32::BLACK,
            hidden_text: egui::Color32::WHITE,
            revealed_fill: egui::Color32::WHITE,
            revealed_text: egui::Color32::BLACK,
            keyboard_focus: egui::Color32::from_rgb(88, 101, 242),
            pointer_hover: egui::Color32::from_gray(150),
            drop_target: egui::Color32::from_rgb(67, 181, 129),
            app_background: egui::Color32::from_rgb(43, 45, 49),
        }
    }
}

pub fn visuals_for_palette(palette: &GridPalette) -> egui::Visuals {
    let mut visuals = egui::Visuals::dark();
    visuals.window_fill = palette.app_background;
    visuals.panel_fill = palette.app_background;
    visuals.selection.bg_fill = palette.keyboard_focus;
    visuals
}
