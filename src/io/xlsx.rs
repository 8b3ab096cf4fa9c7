use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;
use umya_spreadsheet::{Spreadsheet, Worksheet};

use crate::error::{Result, ToolError};
use crate::model::{Cell, CellValue, Grid, Row};

/// Loads the whole workbook, styles, formulas and layout included.
pub fn read_workbook(path: &Path) -> Result<Spreadsheet> {
    let book = umya_spreadsheet::reader::xlsx::read(path)?;
    debug!(sheet_count = book.get_sheet_count(), "loaded workbook");
    Ok(book)
}

/// Resolves the register sheet: the named sheet when given, otherwise the
/// first sheet of the workbook.
pub fn register_sheet<'a>(
    book: &'a mut Spreadsheet,
    name: Option<&str>,
) -> Result<RegisterSheet<'a>> {
    let sheet = match name {
        Some(name) => book
            .get_sheet_by_name_mut(name)
            .ok_or_else(|| ToolError::InvalidWorkbook(format!("missing sheet '{name}'")))?,
        None => book
            .get_sheet_mut(&0)
            .ok_or_else(|| ToolError::InvalidWorkbook("workbook has no sheets".into()))?,
    };
    Ok(RegisterSheet { sheet })
}

/// Writes the workbook to `path`, replacing any existing file.
///
/// The workbook is written next to the destination first and moved into
/// place by a rename, so a failed run never leaves a truncated file behind.
pub fn write_workbook(path: &Path, book: &Spreadsheet) -> Result<()> {
    let directory = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let staged = NamedTempFile::new_in(directory)?;
    umya_spreadsheet::writer::xlsx::write(book, staged.path())?;
    staged.persist(path).map_err(|err| err.error)?;
    Ok(())
}

/// A worksheet of a loaded workbook seen through [`Grid`].
///
/// Row removal goes through the workbook's own row shifting, so formulas,
/// merges and styles of the surviving rows move with them.
pub struct RegisterSheet<'a> {
    sheet: &'a mut Worksheet,
}

impl RegisterSheet<'_> {
    /// Name of the underlying worksheet.
    pub fn name(&self) -> &str {
        self.sheet.get_name()
    }
}

impl Grid for RegisterSheet<'_> {
    fn row_count(&self) -> usize {
        self.sheet.get_highest_row() as usize
    }

    fn row(&self, index: usize) -> Row {
        let row = index as u32 + 1;
        let mut cells: Vec<Cell> = (1..=self.sheet.get_highest_column())
            .map(|col| {
                let value = self
                    .sheet
                    .get_cell((col, row))
                    .map(cell_value)
                    .unwrap_or_default();
                Cell::new(value)
            })
            .collect();
        while cells.last().is_some_and(|cell| cell.value.is_empty()) {
            cells.pop();
        }
        Row { cells }
    }

    fn remove_row(&mut self, index: usize) -> bool {
        if index >= self.row_count() {
            return false;
        }
        self.sheet.remove_row(&(index as u32 + 1), &1);
        true
    }

    fn set_cell(&mut self, row: usize, column: usize, cell: Cell) {
        let blank = match &cell.value {
            CellValue::String(text) => text.is_empty(),
            value => value.is_empty(),
        };
        if blank && cell.highlight.is_none() {
            return;
        }
        let target = self
            .sheet
            .get_cell_mut((column as u32 + 1, row as u32 + 1));
        match cell.value {
            CellValue::Empty => {}
            CellValue::String(value) | CellValue::Other(value) => {
                target.set_value_string(value);
            }
            CellValue::Number(value) => {
                target.set_value_number(value);
            }
            CellValue::Boolean(value) => {
                target.set_value_bool(value);
            }
        }
        if let Some(highlight) = cell.highlight {
            target.get_style_mut().set_background_color(highlight.argb());
        }
    }
}

fn cell_value(cell: &umya_spreadsheet::Cell) -> CellValue {
    let text = cell.get_value();
    if !cell.get_formula().is_empty() {
        return CellValue::Other(text.into_owned());
    }
    if text.is_empty() {
        return CellValue::Empty;
    }
    match cell.get_data_type() {
        "s" | "str" | "inlineStr" => CellValue::String(text.into_owned()),
        "n" => match text.parse::<f64>() {
            Ok(number) => CellValue::Number(number),
            Err(_) => CellValue::Other(text.into_owned()),
        },
        "b" => CellValue::Boolean(text.eq_ignore_ascii_case("true") || text == "1"),
        _ => CellValue::Other(text.into_owned()),
    }
}
