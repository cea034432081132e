//! Axis-aligned claim rectangles.

use serde::{Deserialize, Serialize};

use crate::pos::{ColumnPos, Position};

/// Largest area a single claim may cover, measured as `width * depth`
/// on the coordinate differences.
pub const MAX_CLAIM_AREA: i64 = 2500;

/// Closed rectangle on the X/Z plane.
///
/// Serialized with the `minX`/`maxX`/`minZ`/`maxZ` field names used by
/// the stored claim document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_z: i32,
    pub max_z: i32,
}

impl Bounds {
    /// Degenerate bounds covering a single column.
    const fn around(column: ColumnPos) -> Self {
        Self {
            min_x: column.x,
            max_x: column.x,
            min_z: column.z,
            max_z: column.z,
        }
    }

    /// Pointwise min/max over a set of columns. `None` if `points` is empty.
    ///
    /// The result does not depend on the order of `points`.
    #[must_use]
    pub fn enclosing(points: &[ColumnPos]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        Some(rest.iter().fold(Self::around(*first), |acc, p| acc.including(*p)))
    }

    /// Smallest bounds covering both `self` and `column`.
    #[must_use]
    pub const fn including(self, column: ColumnPos) -> Self {
        Self {
            min_x: if column.x < self.min_x { column.x } else { self.min_x },
            max_x: if column.x > self.max_x { column.x } else { self.max_x },
            min_z: if column.z < self.min_z { column.z } else { self.min_z },
            max_z: if column.z > self.max_z { column.z } else { self.max_z },
        }
    }

    /// `(maxX - minX) * (maxZ - minZ)`. Degenerate rectangles have area 0.
    #[must_use]
    pub fn area(&self) -> i64 {
        let width = i64::from(self.max_x) - i64::from(self.min_x);
        let depth = i64::from(self.max_z) - i64::from(self.min_z);
        width * depth
    }

    /// Whether the minimum of each axis is not above its maximum.
    #[must_use]
    pub const fn is_ordered(&self) -> bool {
        self.min_x <= self.max_x && self.min_z <= self.max_z
    }

    /// Whether a column lies inside, edges included.
    #[must_use]
    pub const fn contains(&self, column: ColumnPos) -> bool {
        column.x >= self.min_x
            && column.x <= self.max_x
            && column.z >= self.min_z
            && column.z <= self.max_z
    }

    /// Whether a continuous position lies inside the bounds grown by
    /// `margin` blocks on every side. Height is ignored.
    #[must_use]
    pub fn contains_within(&self, pos: &Position, margin: f64) -> bool {
        pos.x >= f64::from(self.min_x) - margin
            && pos.x <= f64::from(self.max_x) + margin
            && pos.z >= f64::from(self.min_z) - margin
            && pos.z <= f64::from(self.max_z) + margin
    }
}

impl core::fmt::Display for Bounds {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "x {}..={}, z {}..={}",
            self.min_x, self.max_x, self.min_z, self.max_z
        )
    }
}
