//! Deterministic placement of container children.
//!
//! Widgets live in the X/Z plane: X runs across, Z runs up, Y is depth. Every
//! placement below therefore has `y == 0`.
use std::ops::Range;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub const DEFAULT_GRID_COLUMNS: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LayoutMode {
    RowCentered,
    #[default]
    ColumnDown,
    ColumnUp,
    Grid,
    Free,
}

/// Inputs a layout pass reads from the current settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutMetrics {
    pub cell_scale: f32,
    pub invert_grid_x: bool,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            cell_scale: 1.0,
            invert_grid_x: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ContainerState {
    pub layout: LayoutMode,
    pub spacing: f32,
    pub columns: usize,
    page_size: usize,
    current_page: usize,
}

impl ContainerState {
    pub fn new(layout: LayoutMode, spacing: f32) -> Self {
        Self {
            layout,
            spacing,
            columns: DEFAULT_GRID_COLUMNS,
            page_size: 0,
            current_page: 0,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Zero disables pagination. Always returns to the first page.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size;
        self.current_page = 0;
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self, child_count: usize) -> usize {
        if self.page_size == 0 || child_count == 0 {
            1
        } else {
            child_count.div_ceil(self.page_size)
        }
    }

    /// Clamps into `[0, total_pages - 1]` and returns the page actually selected.
    pub fn set_page(&mut self, page: usize, child_count: usize) -> usize {
        self.current_page = page.min(self.total_pages(child_count) - 1);
        self.current_page
    }

    pub fn next_page(&mut self, child_count: usize) -> usize {
        let total = self.total_pages(child_count);
        self.current_page = (self.current_page + 1) % total;
        self.current_page
    }

    pub fn prev_page(&mut self, child_count: usize) -> usize {
        let total = self.total_pages(child_count);
        self.current_page = (self.current_page + total - 1) % total;
        self.current_page
    }

    /// Children shown on the current page. A page that starts past the end falls back
    /// to the first page.
    pub fn page_range(&mut self, child_count: usize) -> Range<usize> {
        if self.page_size == 0 {
            return 0..child_count;
        }
        let mut start = self.current_page * self.page_size;
        if start >= child_count && self.current_page > 0 {
            self.current_page = 0;
            start = 0;
        }
        let end = (start + self.page_size).min(child_count);
        start.min(end)..end
    }
}

/// Side by side along X, centered on the origin.
pub fn row_centered(sizes: &[Vec2], spacing: f32) -> Vec<Vec3> {
    let total = sizes.iter().map(|size| size.x).sum::<f32>()
        + spacing * sizes.len().saturating_sub(1) as f32;
    let mut cursor = -total / 2.0;
    sizes
        .iter()
        .map(|size| {
            let x = cursor + size.x / 2.0;
            cursor += size.x + spacing;
            Vec3::new(x, 0.0, 0.0)
        })
        .collect()
}

/// Stacked along Z starting at zero, downwards or upwards.
pub fn column(sizes: &[Vec2], spacing: f32, downward: bool) -> Vec<Vec3> {
    let direction = if downward { -1.0 } else { 1.0 };
    let mut cursor = 0.0;
    sizes
        .iter()
        .map(|size| {
            let z = cursor + direction * size.y / 2.0;
            cursor += direction * (size.y + spacing);
            Vec3::new(0.0, 0.0, z)
        })
        .collect()
}

/// Row-major grid centered on the origin. Rows grow downwards.
pub fn grid(count: usize, cell: Vec2, spacing: f32, columns: usize, invert_x: bool) -> Vec<Vec3> {
    if count == 0 {
        return Vec::new();
    }
    let columns = columns.max(1);
    let cols = count.min(columns);
    let rows = count.div_ceil(columns);
    let total_width = cols as f32 * cell.x + (cols - 1) as f32 * spacing;
    let total_height = rows as f32 * cell.y + (rows - 1) as f32 * spacing;
    let start_x = -total_width / 2.0 + cell.x / 2.0;
    let start_z = total_height / 2.0 - cell.y / 2.0;

    (0..count)
        .map(|index| {
            let row = index / columns;
            let mut col = index % columns;
            if invert_x {
                col = (cols - 1).saturating_sub(col);
            }
            Vec3::new(
                start_x + col as f32 * (cell.x + spacing),
                0.0,
                start_z - row as f32 * (cell.y + spacing),
            )
        })
        .collect()
}

/// Extent of the placed children, each spanning half its size around its position.
pub fn bounding_size(placements: impl IntoIterator<Item = (Vec3, Vec2)>) -> Vec2 {
    let mut bounds: Option<(Vec2, Vec2)> = None;
    for (position, size) in placements {
        let center = Vec2::new(position.x, position.z);
        let half = size / 2.0;
        let (low, high) = (center - half, center + half);
        bounds = Some(match bounds {
            Some((min, max)) => (min.min(low), max.max(high)),
            None => (low, high),
        });
    }
    bounds.map_or(Vec2::ZERO, |(min, max)| max - min)
}
