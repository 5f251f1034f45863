use std::ops::{Add, Div, Mul, Sub};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Address {pos:?} is outside of the grid of size {size:?}")]
    OutOfBounds { pos: Dims, size: Dims },
    #[error("Address {0:?} is an outline cell")]
    OutlineAddress(Dims),
    #[error("Frontier is empty, generator is already done")]
    EmptyFrontier,
    #[error("Invalid grid size {0:?}")]
    InvalidSize(Dims),
    #[error("Settings error; {0}")]
    Settings(#[from] ron::error::SpannedError),
    #[error("Settings serialization error; {0}")]
    SettingsSer(#[from] ron::Error),
    #[error("IO error; {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Grid coordinate as `(row, col)`.
///
/// Signed, so that offsets can be computed and stepped past the grid edge before
/// they are validated against the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dims(pub i32, pub i32);

impl Dims {
    pub const ZERO: Dims = Dims(0, 0);

    pub const NORTH: Dims = Dims(-1, 0);
    pub const EAST: Dims = Dims(0, 1);
    pub const SOUTH: Dims = Dims(1, 0);
    pub const WEST: Dims = Dims(0, -1);

    /// Orthogonal unit offsets, clockwise from north.
    pub const ORTHOGONAL: [Dims; 4] = [Dims::NORTH, Dims::EAST, Dims::SOUTH, Dims::WEST];

    pub fn abs_sum(self) -> i32 {
        self.0.abs() + self.1.abs()
    }

    /// Iterates over all positions of `from..to` in row-major order.
    pub fn iter_fill(from: Dims, to: Dims) -> impl Iterator<Item = Dims> {
        (from.0..to.0).flat_map(move |r| (from.1..to.1).map(move |c| Dims(r, c)))
    }
}

impl Add for Dims {
    type Output = Dims;

    fn add(self, other: Dims) -> Dims {
        Dims(self.0 + other.0, self.1 + other.1)
    }
}

impl Sub for Dims {
    type Output = Dims;

    fn sub(self, other: Dims) -> Dims {
        Dims(self.0 - other.0, self.1 - other.1)
    }
}

impl Mul<i32> for Dims {
    type Output = Dims;

    fn mul(self, other: i32) -> Dims {
        Dims(self.0 * other, self.1 * other)
    }
}

impl Div<i32> for Dims {
    type Output = Dims;

    fn div(self, other: i32) -> Dims {
        Dims(self.0 / other, self.1 / other)
    }
}
