//! Axial hex coordinates and the packed integer key used by every map.
//!
//! `HexPoint` is the value type callers work with.  `HexKey` packs the same
//! two `i32`s into one `u64` (`q` in the high half, `r` in the low half) so
//! hash maps and the Dijkstra frontier never allocate or format strings on
//! the hot path.  The packing is a bijection: `HexKey::from(p).point() == p`.

use std::fmt;

use crate::{CoreError, CoreResult};

/// Largest absolute axial coordinate accepted from callers.
///
/// Keeps `neighbor` arithmetic and cube-distance sums far from `i32`
/// overflow for any accepted point.
pub const COORD_LIMIT: i64 = 1 << 20;

// ── HexPoint ──────────────────────────────────────────────────────────────────

/// An axial `(q, r)` hex coordinate.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexPoint {
    pub q: i32,
    pub r: i32,
}

impl HexPoint {
    #[inline]
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Validate wire coordinates and convert them to a `HexPoint`.
    ///
    /// `field` names the caller-visible field in the error.
    pub fn from_wire(field: &'static str, q: i64, r: i64) -> CoreResult<Self> {
        if q.abs() > COORD_LIMIT || r.abs() > COORD_LIMIT {
            return Err(CoreError::CoordinateOutOfRange { field, q, r, limit: COORD_LIMIT });
        }
        Ok(Self { q: q as i32, r: r as i32 })
    }

    #[inline]
    pub fn key(self) -> HexKey {
        HexKey::from(self)
    }

    /// The adjacent cell in direction `dir`.
    #[inline]
    pub fn neighbor(self, dir: HexDirection) -> HexPoint {
        let (dq, dr) = dir.delta();
        HexPoint { q: self.q + dq, r: self.r + dr }
    }

    /// All six neighbours in [`HexDirection::ALL`] order.
    #[inline]
    pub fn neighbors(self) -> impl Iterator<Item = (HexDirection, HexPoint)> {
        HexDirection::ALL.into_iter().map(move |d| (d, self.neighbor(d)))
    }

    /// Hex (cube) distance in cells.
    pub fn distance(self, other: HexPoint) -> u32 {
        let dq = i64::from(self.q) - i64::from(other.q);
        let dr = i64::from(self.r) - i64::from(other.r);
        ((dq.abs() + dr.abs() + (dq + dr).abs()) / 2) as u32
    }

    /// The direction whose offset leads from `self` to `other`, if adjacent.
    pub fn direction_to(self, other: HexPoint) -> Option<HexDirection> {
        HexDirection::ALL
            .into_iter()
            .find(|&d| self.neighbor(d) == other)
    }
}

impl fmt::Display for HexPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

// ── HexKey ────────────────────────────────────────────────────────────────────

/// A `HexPoint` packed into a single `u64` for use as a map key.
///
/// Ordering is total and deterministic, which the distance field relies on
/// to break equal-cost ties the same way on every run.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexKey(pub u64);

impl HexKey {
    /// Unpack back into axial coordinates.
    #[inline]
    pub fn point(self) -> HexPoint {
        HexPoint {
            q: (self.0 >> 32) as u32 as i32,
            r: self.0 as u32 as i32,
        }
    }
}

impl From<HexPoint> for HexKey {
    #[inline]
    fn from(p: HexPoint) -> Self {
        HexKey((u64::from(p.q as u32) << 32) | u64::from(p.r as u32))
    }
}

impl From<HexKey> for HexPoint {
    #[inline]
    fn from(k: HexKey) -> Self {
        k.point()
    }
}

impl fmt::Display for HexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.point().fmt(f)
    }
}

// ── HexDirection ──────────────────────────────────────────────────────────────

/// One of the six axial neighbour offsets.
///
/// | Variant     | `(dq, dr)` |
/// |-------------|------------|
/// | `East`      | `(1, 0)`   |
/// | `NorthEast` | `(1, -1)`  |
/// | `NorthWest` | `(0, -1)`  |
/// | `West`      | `(-1, 0)`  |
/// | `SouthWest` | `(-1, 1)`  |
/// | `SouthEast` | `(0, 1)`   |
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HexDirection {
    East,
    NorthEast,
    NorthWest,
    West,
    SouthWest,
    SouthEast,
}

impl HexDirection {
    /// Iteration order used everywhere ties are broken by "first found".
    pub const ALL: [HexDirection; 6] = [
        HexDirection::East,
        HexDirection::NorthEast,
        HexDirection::NorthWest,
        HexDirection::West,
        HexDirection::SouthWest,
        HexDirection::SouthEast,
    ];

    #[inline]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            HexDirection::East      => (1, 0),
            HexDirection::NorthEast => (1, -1),
            HexDirection::NorthWest => (0, -1),
            HexDirection::West      => (-1, 0),
            HexDirection::SouthWest => (-1, 1),
            HexDirection::SouthEast => (0, 1),
        }
    }

    /// The offset as a `HexPoint`, the shape the transport layer expects.
    #[inline]
    pub const fn offset(self) -> HexPoint {
        let (q, r) = self.delta();
        HexPoint { q, r }
    }

    pub const fn opposite(self) -> HexDirection {
        match self {
            HexDirection::East      => HexDirection::West,
            HexDirection::NorthEast => HexDirection::SouthWest,
            HexDirection::NorthWest => HexDirection::SouthEast,
            HexDirection::West      => HexDirection::East,
            HexDirection::SouthWest => HexDirection::NorthEast,
            HexDirection::SouthEast => HexDirection::NorthWest,
        }
    }
}
