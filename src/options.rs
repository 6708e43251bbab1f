//! Presentation options shared by the drag helpers and the host surface.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::constants::{
    EDGE_SNAP_PX, GRID_SIZE_PX, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH, TITLE_BAR_HEIGHT,
    WINDOW_SNAP_PX,
};
use crate::geometry::{MoveOptions, ResizeOptions, Size};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseOptionError {
    #[error("unknown theme {0:?}")]
    Theme(String),
    #[error("unknown density {0:?}")]
    Density(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl FromStr for Theme {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(ParseOptionError::Theme(other.to_string())),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Density {
    #[default]
    Comfortable,
    Compact,
}

impl FromStr for Density {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "comfortable" => Ok(Density::Comfortable),
            "compact" => Ok(Density::Compact),
            other => Err(ParseOptionError::Density(other.to_string())),
        }
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Density::Comfortable => "comfortable",
            Density::Compact => "compact",
        })
    }
}

/// Options for a windowing surface.
///
/// The snapping and size fields drive [`crate::window::drag`]; the visual
/// fields are carried for the presentation layer and never read by the core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WmOptions {
    pub density: Density,
    pub theme: Theme,
    pub grid_size: f64,
    pub show_guides: bool,
    pub show_title_bar: bool,
    pub show_window_controls: bool,
    pub window_snap_px: f64,
    pub edge_snap_px: f64,
    pub snap_to_grid: bool,
    pub snap_to_edges: bool,
    pub snap_to_windows: bool,
    /// Refuse every drag while set.
    pub locked: bool,
    pub min_width: f64,
    pub min_height: f64,
    pub title_bar_height: f64,
}

impl Default for WmOptions {
    fn default() -> Self {
        Self {
            density: Density::Comfortable,
            theme: Theme::Dark,
            grid_size: GRID_SIZE_PX,
            show_guides: false,
            show_title_bar: true,
            show_window_controls: true,
            window_snap_px: WINDOW_SNAP_PX,
            edge_snap_px: EDGE_SNAP_PX,
            snap_to_grid: false,
            snap_to_edges: true,
            snap_to_windows: false,
            locked: false,
            min_width: MIN_WINDOW_WIDTH,
            min_height: MIN_WINDOW_HEIGHT,
            title_bar_height: TITLE_BAR_HEIGHT,
        }
    }
}

impl WmOptions {
    pub fn with_grid(mut self, enabled: bool, size: f64) -> Self {
        self.snap_to_grid = enabled;
        self.grid_size = size;
        self
    }

    pub fn with_edge_snap(mut self, enabled: bool) -> Self {
        self.snap_to_edges = enabled;
        self
    }

    pub fn with_window_snap(mut self, enabled: bool) -> Self {
        self.snap_to_windows = enabled;
        self
    }

    pub fn with_guides(mut self, show: bool) -> Self {
        self.show_guides = show;
        self
    }

    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    pub fn with_min_size(mut self, width: f64, height: f64) -> Self {
        self.min_width = width;
        self.min_height = height;
        self
    }

    pub(crate) fn move_options(&self, effective_size: Option<Size>) -> MoveOptions {
        MoveOptions {
            edge_snap_px: self.edge_snap_px,
            effective_size,
            grid_size: self.grid_size,
            enable_edge_snap: self.snap_to_edges,
            enable_grid_snap: self.snap_to_grid,
        }
    }

    pub(crate) fn resize_options(&self) -> ResizeOptions {
        ResizeOptions {
            min_width: self.min_width,
            min_height: self.min_height,
            grid_size: self.grid_size,
            enable_grid_snap: self.snap_to_grid,
        }
    }
}
