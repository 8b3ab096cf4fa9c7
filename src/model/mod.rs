pub mod report;

/// Identifier of a vulnerability record, shared by register rows and report
/// records. Kept as the plain trimmed string so it round-trips through Excel.
pub type Identity = String;

/// RGB fill color applied to highlighted cells, e.g. `0xFFFF00` for yellow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Highlight(pub u32);

impl Highlight {
    /// Solid yellow, the marker used for freshly inserted entries.
    pub const YELLOW: Highlight = Highlight(0xFF_FF_00);

    /// Parses a `RRGGBB` hex string, with or without a leading `#`.
    pub fn parse_hex(raw: &str) -> Option<Self> {
        let digits = raw.trim().trim_start_matches('#');
        if digits.len() != 6 {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Highlight)
    }

    /// The color as an opaque `AARRGGBB` string, the form stored in
    /// spreadsheet fills.
    pub fn argb(&self) -> String {
        format!("FF{:06X}", self.0 & 0xFF_FF_FF)
    }
}

impl Default for Highlight {
    fn default() -> Self {
        Self::YELLOW
    }
}

/// Typed value held by a single cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// No value.
    #[default]
    Empty,
    /// Shared or inline string.
    String(String),
    /// Numeric value, dates included.
    Number(f64),
    /// Boolean value.
    Boolean(bool),
    /// Anything that is not a plain literal (formulas, error values), carried
    /// as its display text.
    Other(String),
}

impl CellValue {
    /// Returns the string payload when the cell is string-typed.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(value) => Some(value),
            _ => None,
        }
    }

    /// Whether the cell holds no value at all.
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

/// A cell: its value plus an optional solid fill.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    pub value: CellValue,
    pub highlight: Option<Highlight>,
}

impl Cell {
    /// Creates an unstyled cell.
    pub fn new(value: CellValue) -> Self {
        Self {
            value,
            highlight: None,
        }
    }

    /// Creates an unstyled string cell.
    pub fn string(value: impl Into<String>) -> Self {
        Self::new(CellValue::String(value.into()))
    }

    /// Returns the cell with a solid fill in the given color.
    pub fn highlighted(mut self, highlight: Highlight) -> Self {
        self.highlight = Some(highlight);
        self
    }
}

/// A register row: cells in column order, starting at column 0.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    pub cells: Vec<Cell>,
}

impl Row {
    /// Creates a row without cells.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a row of unstyled cells from the given values.
    pub fn from_values(values: impl IntoIterator<Item = CellValue>) -> Self {
        Self {
            cells: values.into_iter().map(Cell::new).collect(),
        }
    }

    /// A row is empty when none of its cells holds a value.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.value.is_empty())
    }

    /// Returns the cell at `column`, if the row reaches that far.
    pub fn get(&self, column: usize) -> Option<&Cell> {
        self.cells.get(column)
    }

    /// Places `cell` at `column`, padding with empty cells as needed.
    pub fn set(&mut self, column: usize, cell: Cell) {
        if self.cells.len() <= column {
            self.cells.resize_with(column + 1, Cell::default);
        }
        self.cells[column] = cell;
    }
}

/// Row-addressable view of a register sheet.
///
/// Rows are zero-based and dense: after [`Grid::remove_row`] every following
/// row moves up by one. Implemented by the in-memory [`Sheet`] and by the
/// workbook-backed sheet in [`crate::io::xlsx`].
pub trait Grid {
    /// Number of rows up to and including the last used one.
    fn row_count(&self) -> usize;

    /// Snapshot of the typed values of the row at `index`.
    fn row(&self, index: usize) -> Row;

    /// Removes the row at `index` and shifts every following row up by one.
    /// Returns `false` when the index is past the last row.
    fn remove_row(&mut self, index: usize) -> bool;

    /// Writes `cell` at (`row`, `column`), creating the row when needed.
    fn set_cell(&mut self, row: usize, column: usize, cell: Cell);
}

/// An owned, in-memory sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Row>,
}

impl Sheet {
    /// Creates an empty sheet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }
}

impl Grid for Sheet {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn row(&self, index: usize) -> Row {
        self.rows.get(index).cloned().unwrap_or_default()
    }

    fn remove_row(&mut self, index: usize) -> bool {
        if index >= self.rows.len() {
            return false;
        }
        self.rows.remove(index);
        true
    }

    fn set_cell(&mut self, row: usize, column: usize, cell: Cell) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Row::new);
        }
        self.rows[row].set(column, cell);
    }
}
