//! Grid interaction controller: reveal, keyboard focus, and drag reordering.
//!
//! Reveal flags and focus belong to slot positions. Reordering only moves
//! products between slots, so a revealed slot keeps showing whatever product
//! lands in it.

use shared::domain::{Direction, Product, SlotIndex, GRID_SLOTS};

use crate::reorder::ReorderRequest;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slot {
    product: Option<Product>,
    revealed: bool,
}

impl Slot {
    pub fn product(&self) -> Option<&Product> {
        self.product.as_ref()
    }

    pub fn revealed(&self) -> bool {
        self.revealed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellPhase {
    Hidden,
    Revealed,
}

/// Read-only snapshot of one cell for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView<'a> {
    pub slot: SlotIndex,
    pub product: Option<&'a Product>,
    pub revealed: bool,
    pub focused: bool,
}

impl<'a> CellView<'a> {
    pub fn phase(&self) -> CellPhase {
        if self.revealed {
            CellPhase::Revealed
        } else {
            CellPhase::Hidden
        }
    }

    /// Product content is shown only for revealed slots that hold a product.
    pub fn visible_product(&self) -> Option<&'a Product> {
        self.product.filter(|_| self.revealed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridState {
    slots: [Slot; GRID_SLOTS],
    focused: Option<SlotIndex>,
}

impl Default for GridState {
    fn default() -> Self {
        Self {
            slots: std::array::from_fn(|_| Slot::default()),
            focused: None,
        }
    }
}

impl GridState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places products into slots in order; extra products beyond the grid are dropped.
    pub fn populate(&mut self, products: Vec<Product>) -> usize {
        let mut placed = 0;
        let mut products = products.into_iter();
        for slot in self.slots.iter_mut() {
            slot.product = products.next();
            if slot.product.is_some() {
                placed += 1;
            }
        }
        tracing::debug!(placed, "grid populated");
        placed
    }

    pub fn is_loaded(&self) -> bool {
        self.slots.iter().any(|slot| slot.product.is_some())
    }

    pub fn focused(&self) -> Option<SlotIndex> {
        self.focused
    }

    pub fn revealed_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.revealed).count()
    }

    pub fn reveal(&mut self, index: SlotIndex) {
        self.slots[index.get()].revealed = true;
        self.focused = Some(index);
    }

    /// Moves focus one cell; returns whether it moved.
    pub fn navigate(&mut self, direction: Direction) -> bool {
        let Some(current) = self.focused else {
            return false;
        };
        match current.step(direction) {
            Some(next) => {
                self.focused = Some(next);
                true
            }
            None => false,
        }
    }

    /// Swaps the products of two slots; returns whether anything moved.
    pub fn reorder(&mut self, request: ReorderRequest) -> bool {
        if request.is_noop() {
            return false;
        }
        let (a, b) = (request.source.get(), request.target.get());
        let taken = self.slots[a].product.take();
        self.slots[a].product = std::mem::replace(&mut self.slots[b].product, taken);
        true
    }

    pub fn query(&self, index: SlotIndex) -> CellView<'_> {
        let slot = &self.slots[index.get()];
        CellView {
            slot: index,
            product: slot.product.as_ref(),
            revealed: slot.revealed,
            focused: self.focused == Some(index),
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = CellView<'_>> + '_ {
        SlotIndex::all().map(|index| self.query(index))
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }
}
