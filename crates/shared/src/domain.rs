use serde::{Deserialize, Serialize};

use crate::error::SlotIndexError;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(ProductId);

/// Columns in the logical grid.
pub const GRID_COLUMNS: usize = 5;
/// Rows in the logical grid.
pub const GRID_ROWS: usize = 4;
/// Total number of slots; the catalog is truncated to this many products.
pub const GRID_SLOTS: usize = GRID_COLUMNS * GRID_ROWS;

/// Position of a cell in the fixed 5x4 grid, always in `0..GRID_SLOTS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotIndex(usize);

impl SlotIndex {
    pub fn new(index: usize) -> Result<Self, SlotIndexError> {
        if index < GRID_SLOTS {
            Ok(Self(index))
        } else {
            Err(SlotIndexError::OutOfRange {
                index,
                slots: GRID_SLOTS,
            })
        }
    }

    pub fn get(self) -> usize {
        self.0
    }

    pub fn row(self) -> usize {
        self.0 / GRID_COLUMNS
    }

    pub fn col(self) -> usize {
        self.0 % GRID_COLUMNS
    }

    /// Neighbouring slot in `direction`, or `None` at the grid edge (no wraparound).
    pub fn step(self, direction: Direction) -> Option<Self> {
        let next = match direction {
            Direction::Up if self.row() > 0 => self.0 - GRID_COLUMNS,
            Direction::Down if self.row() < GRID_ROWS - 1 => self.0 + GRID_COLUMNS,
            Direction::Left if self.col() > 0 => self.0 - 1,
            Direction::Right if self.col() < GRID_COLUMNS - 1 => self.0 + 1,
            _ => return None,
        };
        Some(Self(next))
    }

    pub fn all() -> impl Iterator<Item = SlotIndex> {
        (0..GRID_SLOTS).map(SlotIndex)
    }
}

impl TryFrom<usize> for SlotIndex {
    type Error = SlotIndexError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl std::fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A product as shown in a grid slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub image_url: String,
}
