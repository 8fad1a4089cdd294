//! Following a column down through a board.
//!
//! The tracer walks one row at a time and crosses at most one rung per row.
//! A rung on the left of the current column is taken before one on the
//! right; the no-adjacent-rungs invariant means both can never be present,
//! but the order is fixed regardless.

use crate::layout::Layout;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Pixel geometry used to place waypoints. Routing never depends on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub cell_width: f64,
    pub cell_height: f64,
    /// Vertical offset of the top of the board.
    pub start_y: f64,
}

impl Geometry {
    /// Unit cells starting at the origin.
    pub const UNIT: Geometry = Geometry {
        cell_width: 1.0,
        cell_height: 1.0,
        start_y: 0.0,
    };

    /// Horizontal centre of `column`.
    pub fn column_x(&self, column: usize) -> f64 {
        (column as f64 + 0.5) * self.cell_width
    }

    /// Vertical centre of `row`, where rungs are drawn.
    pub fn row_y(&self, row: usize) -> f64 {
        self.start_y + (row as f64 + 0.5) * self.cell_height
    }

    /// Bottom edge of a board with `row_count` rows.
    pub fn bottom_y(&self, row_count: usize) -> f64 {
        self.start_y + row_count as f64 * self.cell_height
    }

    /// Returns true if both cell sizes are finite and positive and the
    /// offset is finite, so no two waypoints of a trace can coincide.
    pub fn is_valid(&self) -> bool {
        self.cell_width.is_finite()
            && self.cell_width > 0.0
            && self.cell_height.is_finite()
            && self.cell_height > 0.0
            && self.start_y.is_finite()
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::UNIT
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The route one column takes through a board.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Trace {
    /// Waypoints from the top of the start column to the bottom of the
    /// final column. Consecutive points share either x or y, never both.
    ///
    /// Every row gets a point, so a row without a crossing continues a
    /// vertical run and moves do not strictly alternate. Use
    /// [`Trace::simplified`] for the alternating form.
    pub path: Vec<Point>,
    pub final_column: usize,
}

impl Trace {
    /// Returns the path with runs of vertical waypoints merged, so moves
    /// strictly alternate between vertical and horizontal.
    pub fn simplified(&self) -> Vec<Point> {
        let mut out: Vec<Point> = Vec::with_capacity(self.path.len());
        for &p in &self.path {
            let n = out.len();
            if n >= 2 && out[n - 2].x == out[n - 1].x && out[n - 1].x == p.x {
                out.pop();
            }
            out.push(p);
        }
        out
    }
}

/// Column reached after passing through one row of rung slots.
pub(crate) fn cross(row: &[bool], column: usize) -> usize {
    if column > 0 && row[column - 1] {
        column - 1
    } else if column < row.len() && row[column] {
        column + 1
    } else {
        column
    }
}

/// Column reached after passing through every row in order.
pub(crate) fn follow<'a>(rows: impl IntoIterator<Item = &'a [bool]>, start: usize) -> usize {
    rows.into_iter().fold(start, |column, row| cross(row, column))
}

/// Traces `start_column` from the top of `layout` to the bottom.
///
/// The path has a point at the top of the start column, one at each row
/// (plus a second one on the far side when a rung is crossed) and one at
/// the bottom of the final column.
///
/// # Panics
/// Panics if `start_column >= layout.column_count()` or the geometry is
/// not valid (see [`Geometry::is_valid`]).
pub fn trace(layout: &Layout, start_column: usize, geometry: &Geometry) -> Trace {
    assert!(geometry.is_valid(), "invalid geometry: {:?}", geometry);
    assert!(
        start_column < layout.column_count(),
        "start column {} out of range for {} columns",
        start_column,
        layout.column_count()
    );

    let mut column = start_column;
    let mut path = Vec::with_capacity(2 * layout.row_count() + 2);
    path.push(Point::new(geometry.column_x(column), geometry.start_y));

    for (r, row) in layout.rows().enumerate() {
        let y = geometry.row_y(r);
        path.push(Point::new(geometry.column_x(column), y));
        let next = cross(row, column);
        if next != column {
            column = next;
            path.push(Point::new(geometry.column_x(column), y));
        }
    }

    path.push(Point::new(
        geometry.column_x(column),
        geometry.bottom_y(layout.row_count()),
    ));

    Trace {
        path,
        final_column: column,
    }
}

/// Returns where every column ends up: `result[start] == final column`.
pub fn compute_all_results(layout: &Layout) -> Vec<usize> {
    (0..layout.column_count())
        .map(|start| trace(layout, start, &Geometry::UNIT).final_column)
        .collect()
}
