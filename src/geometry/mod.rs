//! Stateless rectangle math used by every rect-changing window operation.

pub mod floating;
pub mod snap;

pub use floating::*;
pub use snap::*;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Window geometry in logical units. Origin is the container's top-left.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn size(&self) -> Size {
        Size {
            w: self.w,
            h: self.h,
        }
    }
}

/// Pointer position in container coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height pair, used for effective drag footprints.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub w: f64,
    pub h: f64,
}

impl Size {
    pub const fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }
}

/// Size of the container windows live in.
///
/// A non-positive width or height marks the container as unconstrained:
/// clamping is skipped entirely rather than run against an inverted range.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub w: f64,
    pub h: f64,
}

impl Bounds {
    pub const fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }

    pub const fn unbounded() -> Self {
        Self { w: 0.0, h: 0.0 }
    }

    pub fn is_constrained(&self) -> bool {
        self.w > 0.0 && self.h > 0.0
    }
}

/// Compass edges grabbed by a resize gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeDirection {
    N,
    E,
    S,
    W,
    NE,
    NW,
    SE,
    SW,
}

impl ResizeDirection {
    pub fn moves_north(self) -> bool {
        matches!(self, Self::N | Self::NE | Self::NW)
    }

    pub fn moves_south(self) -> bool {
        matches!(self, Self::S | Self::SE | Self::SW)
    }

    pub fn moves_east(self) -> bool {
        matches!(self, Self::E | Self::NE | Self::SE)
    }

    pub fn moves_west(self) -> bool {
        matches!(self, Self::W | Self::NW | Self::SW)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::N => "n",
            Self::E => "e",
            Self::S => "s",
            Self::W => "w",
            Self::NE => "ne",
            Self::NW => "nw",
            Self::SE => "se",
            Self::SW => "sw",
        }
    }
}

impl fmt::Display for ResizeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseDirectionError {
    #[error("resize direction is empty")]
    Empty,
    #[error("unknown resize edge {0:?}")]
    UnknownEdge(char),
    #[error("resize direction {0:?} names opposing edges")]
    Opposing(String),
}

impl FromStr for ResizeDirection {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (mut n, mut e, mut south, mut w) = (false, false, false, false);
        for c in s.trim().chars() {
            match c.to_ascii_lowercase() {
                'n' => n = true,
                'e' => e = true,
                's' => south = true,
                'w' => w = true,
                other => return Err(ParseDirectionError::UnknownEdge(other)),
            }
        }
        if (n && south) || (e && w) {
            return Err(ParseDirectionError::Opposing(s.to_string()));
        }
        match (n, e, south, w) {
            (true, true, _, _) => Ok(Self::NE),
            (true, _, _, true) => Ok(Self::NW),
            (_, true, true, _) => Ok(Self::SE),
            (_, _, true, true) => Ok(Self::SW),
            (true, _, _, _) => Ok(Self::N),
            (_, true, _, _) => Ok(Self::E),
            (_, _, true, _) => Ok(Self::S),
            (_, _, _, true) => Ok(Self::W),
            _ => Err(ParseDirectionError::Empty),
        }
    }
}

/// Target coordinates that produced an accepted snap, for drawing alignment
/// guides. `None` on an axis means nothing snapped there.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SnapGuides {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl SnapGuides {
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none()
    }
}

/// Round `value` to the nearest multiple of `grid_size`. Grid sizes of 1 or
/// less leave the value untouched.
pub fn snap_to_grid(value: f64, grid_size: f64) -> f64 {
    if grid_size <= 1.0 {
        return value;
    }
    // halves round toward positive infinity on both sides of zero
    (value / grid_size + 0.5).floor() * grid_size
}
