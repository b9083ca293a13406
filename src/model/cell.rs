//! Schedule cell codes.

use crate::error::ShiftError;
use serde::{Deserialize, Serialize};

/// The state of one employee on one day.
///
/// Serialized as its integer code:
///
/// | Code | Variant | Written by the GA? |
/// |---|---|---|
/// | 0 | [`Work`](Cell::Work) | yes |
/// | 1 | [`Rest`](Cell::Rest) | yes |
/// | 2 | [`Requested`](Cell::Requested) | never |
/// | 3 | [`Unavailable`](Cell::Unavailable) | never |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Cell {
    /// Scheduled to work.
    #[default]
    Work = 0,
    /// Rest day assigned by the optimizer.
    Rest = 1,
    /// Employee-requested fixed day off.
    Requested = 2,
    /// Fixed unavailable day (non-working weekday, leave, ...).
    Unavailable = 3,
}

impl Cell {
    /// Integer code of this cell.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Whether the cell was fixed before optimization.
    pub fn is_fixed(self) -> bool {
        matches!(self, Cell::Requested | Cell::Unavailable)
    }

    /// Whether the cell counts against the rest-day quota.
    pub fn is_off(self) -> bool {
        self != Cell::Work
    }

    /// The opposite mutable state, or `None` for fixed cells.
    pub fn flipped(self) -> Option<Cell> {
        match self {
            Cell::Work => Some(Cell::Rest),
            Cell::Rest => Some(Cell::Work),
            Cell::Requested | Cell::Unavailable => None,
        }
    }

    /// Folds a requested day off into the generic rest state.
    ///
    /// Used by rules that do not distinguish fixed from assigned rest.
    /// Unavailable days keep their own state.
    pub fn binary(self) -> Cell {
        match self {
            Cell::Requested => Cell::Rest,
            other => other,
        }
    }
}

impl TryFrom<u8> for Cell {
    type Error = ShiftError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Cell::Work),
            1 => Ok(Cell::Rest),
            2 => Ok(Cell::Requested),
            3 => Ok(Cell::Unavailable),
            other => Err(ShiftError::InvalidCellCode(other)),
        }
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> u8 {
        cell.code()
    }
}
