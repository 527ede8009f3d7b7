//! Input port: raw pointer/keyboard input is turned into [`GridInput`] values
//! and applied to the grid here, so the transitions run without an event loop.

use client_core::{DragPayload, GridState, ReorderRequest};
use shared::{
    domain::{Direction, SlotIndex},
    error::DragPayloadError,
};

pub const ARROW_KEYS: [(egui::Key, Direction); 4] = [
    (egui::Key::ArrowUp, Direction::Up),
    (egui::Key::ArrowDown, Direction::Down),
    (egui::Key::ArrowLeft, Direction::Left),
    (egui::Key::ArrowRight, Direction::Right),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridInput {
    Reveal(SlotIndex),
    Navigate(Direction),
    Drop {
        payload: DragPayload,
        target: SlotIndex,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEffect {
    Revealed(SlotIndex),
    FocusMoved(SlotIndex),
    Reordered(ReorderRequest),
    Unchanged,
    Rejected(DragPayloadError),
}

/// Drains every arrow key event from this frame, whatever the modifiers, so no
/// other widget acts on them. Each press (including auto-repeat) yields one
/// direction; releases are consumed silently.
pub fn take_arrow_presses(ctx: &egui::Context) -> Vec<Direction> {
    ctx.input_mut(|input| {
        let mut directions = Vec::new();
        input.events.retain(|event| {
            let egui::Event::Key { key, pressed, .. } = event else {
                return true;
            };
            let Some((_, direction)) = ARROW_KEYS.iter().find(|(arrow, _)| arrow == key) else {
                return true;
            };
            if *pressed {
                directions.push(*direction);
            }
            false
        });
        directions
    })
}

pub fn apply_input(grid: &mut GridState, input: GridInput) -> InputEffect {
    match input {
        GridInput::Reveal(slot) => {
            grid.reveal(slot);
            InputEffect::Revealed(slot)
        }
        GridInput::Navigate(direction) => match (grid.navigate(direction), grid.focused()) {
            (true, Some(focused)) => InputEffect::FocusMoved(focused),
            _ => InputEffect::Unchanged,
        },
        GridInput::Drop { payload, target } => {
            match ReorderRequest::from_drop(&payload, target) {
                Ok(request) if grid.reorder(request) => InputEffect::Reordered(request),
                Ok(_) => InputEffect::Unchanged,
                Err(err) => {
                    tracing::warn!(payload = payload.as_str(), "ignoring drop: {err}");
                    InputEffect::Rejected(err)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::{Product, ProductId};

    fn slot(index: usize) -> SlotIndex {
        SlotIndex::new(index).expect("valid slot")
    }

    fn grid() -> GridState {
        let mut grid = GridState::new();
        grid.populate(
            (0..20)
                .map(|n| Product {
                    id: ProductId(n),
                    title: format!("product {n}"),
                    image_url: String::new(),
                })
                .collect(),
        );
        grid
    }

    fn key_event(key: egui::Key, pressed: bool, modifiers: egui::Modifiers) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key: None,
            pressed,
            repeat: false,
            modifiers,
        }
    }

    #[test]
    fn arrow_presses_are_taken_and_consumed_from_frame_input() {
        let ctx = egui::Context::default();
        let raw = egui::RawInput {
            events: vec![
                key_event(egui::Key::ArrowDown, true, egui::Modifiers::NONE),
                key_event(egui::Key::ArrowDown, false, egui::Modifiers::NONE),
                key_event(egui::Key::Enter, true, egui::Modifiers::NONE),
                key_event(egui::Key::ArrowLeft, true, egui::Modifiers::CTRL),
            ],
            ..Default::default()
        };

        let mut directions = Vec::new();
        let mut remaining = Vec::new();
        let _ = ctx.run(raw, |ctx| {
            directions = take_arrow_presses(ctx);
            remaining = ctx.input(|input| input.events.clone());
        });

        assert_eq!(directions, vec![Direction::Down, Direction::Left]);
        assert!(!remaining.iter().any(|event| matches!(
            event,
            egui::Event::Key { key, .. } if ARROW_KEYS.iter().any(|(arrow, _)| arrow == key)
        )));
        assert!(remaining.iter().any(|event| matches!(
            event,
            egui::Event::Key { key: egui::Key::Enter, pressed: true, .. }
        )));
    }

    #[test]
    fn frame_without_arrows_yields_nothing() {
        let ctx = egui::Context::default();
        let raw = egui::RawInput {
            events: vec![egui::Event::Text("w".to_string())],
            ..Default::default()
        };

        let mut directions = vec![Direction::Up];
        let _ = ctx.run(raw, |ctx| directions = take_arrow_presses(ctx));

        assert!(directions.is_empty());
    }

    #[test]
    fn navigation_before_any_click_is_unchanged() {
        let mut grid = grid();
        assert_eq!(
            apply_input(&mut grid, GridInput::Navigate(Direction::Right)),
            InputEffect::Unchanged
        );
        assert_eq!(grid.focused(), None);
    }

    #[test]
    fn click_then_arrows_moves_focus() {
        let mut grid = grid();
        assert_eq!(
            apply_input(&mut grid, GridInput::Reveal(slot(2))),
            InputEffect::Revealed(slot(2))
        );
        assert_eq!(
            apply_input(&mut grid, GridInput::Navigate(Direction::Up)),
            InputEffect::Unchanged
        );
        assert_eq!(
            apply_input(&mut grid, GridInput::Navigate(Direction::Down)),
            InputEffect::FocusMoved(slot(7))
        );
    }

    #[test]
    fn drop_with_numeric_payload_reorders() {
        let mut grid = grid();
        let effect = apply_input(
            &mut grid,
            GridInput::Drop {
                payload: DragPayload::from_slot(slot(5)),
                target: slot(0),
            },
        );
        assert_eq!(
            effect,
            InputEffect::Reordered(ReorderRequest::new(slot(5), slot(0)))
        );
        assert_eq!(grid.query(slot(0)).product.map(|p| p.id), Some(ProductId(5)));
    }

    #[test]
    fn drop_with_garbage_payload_is_noop() {
        let mut grid = grid();
        let before = grid.clone();
        let effect = apply_input(
            &mut grid,
            GridInput::Drop {
                payload: DragPayload::from_text("not-a-number"),
                target: slot(3),
            },
        );
        assert!(matches!(
            effect,
            InputEffect::Rejected(DragPayloadError::NotANumber { .. })
        ));
        assert_eq!(grid, before);
    }

    #[test]
    fn drop_on_same_slot_is_unchanged() {
        let mut grid = grid();
        let effect = apply_input(
            &mut grid,
            GridInput::Drop {
                payload: DragPayload::from_slot(slot(8)),
                target: slot(8),
            },
        );
        assert_eq!(effect, InputEffect::Unchanged);
    }
}
