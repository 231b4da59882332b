//! Glyph grid with an optional status row

use super::glyph::{Attrs, Glyph};

/// Semigraphic font codes used by [`ScreenBuffer::draw_box`]
pub mod box_glyph {
    pub const UPPER_LEFT: u8 = 0x1C;
    pub const UPPER_RIGHT: u8 = 0x19;
    pub const LOWER_LEFT: u8 = 0x16;
    pub const LOWER_RIGHT: u8 = 0x13;
    pub const HORIZONTAL: u8 = 0x15;
    pub const VERTICAL: u8 = 0x1A;
}

/// Fixed `COLS` x `ROWS` grid of glyphs
///
/// When the status line is enabled the last row is excluded from the
/// addressable region: clearing, erasing and scrolling never touch it.
/// Every accessor is bounds-checked; out-of-range coordinates are ignored.
pub struct ScreenBuffer<const COLS: usize, const ROWS: usize> {
    cells: [[Glyph; COLS]; ROWS],
    status_line: bool,
}

impl<const COLS: usize, const ROWS: usize> ScreenBuffer<COLS, ROWS> {
    /// Create a screen filled with blanks in the given colors
    pub const fn new(attrs: Attrs) -> Self {
        Self {
            cells: [[Glyph::blank(attrs); COLS]; ROWS],
            status_line: false,
        }
    }

    pub const fn columns(&self) -> usize {
        COLS
    }

    /// Number of addressable rows
    pub const fn lines(&self) -> usize {
        if self.status_line && ROWS > 1 {
            ROWS - 1
        } else {
            ROWS
        }
    }

    pub const fn status_line(&self) -> bool {
        self.status_line
    }

    /// Reserve or release the last row
    ///
    /// A released row joins the addressable region and is blanked with
    /// `attrs`. A grid with a single row cannot reserve it.
    pub fn set_status_line(&mut self, enabled: bool, attrs: Attrs) {
        let enabled = enabled && ROWS > 1;
        if self.status_line && !enabled {
            self.fill_rows(ROWS - 1, ROWS, attrs);
        }
        self.status_line = enabled;
    }

    /// Glyph at a cell
    pub fn glyph(&self, x: usize, y: usize) -> Option<Glyph> {
        self.cells.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Replace a whole cell
    pub fn put(&mut self, x: usize, y: usize, glyph: Glyph) {
        if let Some(cell) = self.cell_mut(x, y) {
            *cell = glyph;
        }
    }

    /// Replace a cell's code, keeping its colors
    pub fn set_code(&mut self, x: usize, y: usize, code: u8) {
        if let Some(cell) = self.cell_mut(x, y) {
            cell.code = code;
        }
    }

    /// One row of cells
    pub fn row(&self, y: usize) -> Option<&[Glyph; COLS]> {
        self.cells.get(y)
    }

    /// Entire backing store, status row included
    pub fn cells(&self) -> &[[Glyph; COLS]; ROWS] {
        &self.cells
    }

    /// Blank the addressable region
    pub fn clear(&mut self, attrs: Attrs) {
        self.fill_rows(0, self.lines(), attrs);
    }

    /// Blank from column `x` to the end of row `y`
    pub fn erase_line_from(&mut self, x: usize, y: usize, attrs: Attrs) {
        if let Some(row) = self.cells.get_mut(y) {
            if x < COLS {
                row[x..].fill(Glyph::blank(attrs));
            }
        }
    }

    /// Blank from the start of row `y` to column `x` inclusive
    pub fn erase_line_to(&mut self, x: usize, y: usize, attrs: Attrs) {
        if let Some(row) = self.cells.get_mut(y) {
            let end = (x + 1).min(COLS);
            row[..end].fill(Glyph::blank(attrs));
        }
    }

    /// Blank all of row `y`
    pub fn erase_line(&mut self, y: usize, attrs: Attrs) {
        if y < ROWS {
            self.fill_rows(y, y + 1, attrs);
        }
    }

    /// Blank from (x, y) to the end of the addressable region
    pub fn erase_below(&mut self, x: usize, y: usize, attrs: Attrs) {
        let lines = self.lines();
        if y >= lines {
            return;
        }
        self.erase_line_from(x, y, attrs);
        self.fill_rows(y + 1, lines, attrs);
    }

    /// Blank from the top of the screen to (x, y) inclusive
    pub fn erase_above(&mut self, x: usize, y: usize, attrs: Attrs) {
        let y = y.min(self.lines().saturating_sub(1));
        self.fill_rows(0, y, attrs);
        self.erase_line_to(x, y, attrs);
    }

    /// Shift the addressable rows up by `n`
    ///
    /// The top `n` rows are discarded and the bottom `n` rows blanked with
    /// `attrs`. Scrolling by the row count or more is a clear.
    pub fn scroll_up(&mut self, n: usize, attrs: Attrs) {
        let lines = self.lines();
        if n == 0 {
            return;
        }
        if n >= lines {
            self.clear(attrs);
            return;
        }
        self.cells[..lines].rotate_left(n);
        self.fill_rows(lines - n, lines, attrs);
    }

    /// Write text at (col, row) keeping the cell colors
    ///
    /// Text running past the right edge is cut off.
    pub fn write_str(&mut self, row: usize, col: usize, text: &str) {
        for (x, byte) in (col..COLS).zip(text.bytes()) {
            self.set_code(x, row, byte);
        }
    }

    /// Write text at (col, row) in explicit colors
    pub fn write_str_attr(&mut self, row: usize, col: usize, text: &str, attrs: Attrs) {
        for (x, byte) in (col..COLS).zip(text.bytes()) {
            self.put(x, row, Glyph::new(byte, attrs));
        }
    }

    /// Draw a frame with the font's box glyphs
    ///
    /// `width` and `height` include the border. Boxes smaller than 2x2
    /// are not drawn.
    pub fn draw_box(&mut self, row: usize, col: usize, width: usize, height: usize, attrs: Attrs) {
        if width < 2 || height < 2 {
            return;
        }
        let right = col + width - 1;
        let bottom = row + height - 1;

        for x in col + 1..right {
            self.put(x, row, Glyph::new(box_glyph::HORIZONTAL, attrs));
            self.put(x, bottom, Glyph::new(box_glyph::HORIZONTAL, attrs));
        }
        for y in row + 1..bottom {
            self.put(col, y, Glyph::new(box_glyph::VERTICAL, attrs));
            self.put(right, y, Glyph::new(box_glyph::VERTICAL, attrs));
        }
        self.put(col, row, Glyph::new(box_glyph::UPPER_LEFT, attrs));
        self.put(right, row, Glyph::new(box_glyph::UPPER_RIGHT, attrs));
        self.put(col, bottom, Glyph::new(box_glyph::LOWER_LEFT, attrs));
        self.put(right, bottom, Glyph::new(box_glyph::LOWER_RIGHT, attrs));
    }

    /// Replace the status row with `left` at column 0 and `right`
    /// right-aligned
    ///
    /// Does nothing while the status line is disabled.
    pub fn write_status(&mut self, left: &str, right: &str, attrs: Attrs) {
        if !self.status_line {
            return;
        }
        let y = ROWS - 1;
        self.fill_rows(y, ROWS, attrs);
        self.write_str(y, 0, left);
        let start = COLS.saturating_sub(right.len());
        self.write_str(y, start, right);
    }

    fn cell_mut(&mut self, x: usize, y: usize) -> Option<&mut Glyph> {
        self.cells.get_mut(y).and_then(|row| row.get_mut(x))
    }

    fn fill_rows(&mut self, from: usize, to: usize, attrs: Attrs) {
        let to = to.min(ROWS);
        if from < to {
            for row in &mut self.cells[from..to] {
                row.fill(Glyph::blank(attrs));
            }
        }
    }
}
