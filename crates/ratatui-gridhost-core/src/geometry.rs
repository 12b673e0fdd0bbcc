/// A point in the grid's local coordinate space (terminal cells, origin at the grid's top-left).
///
/// Coordinates are signed: drag gestures may leave the grid area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A box descriptor in the grid's local space.
///
/// `width` and `height` may be negative; see [`crate::selection::SelectionOverlay`]. Fields are
/// wider than [`Point`]'s so the difference of any two points is exact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectorRect {
    pub left: i64,
    pub top: i64,
    pub width: i64,
    pub height: i64,
}

impl SelectorRect {
    pub fn has_area(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// A grid cell address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}
