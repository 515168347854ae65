use std::path::Path;

use calamine::{Data, Reader, Xlsx, open_workbook};
use indexmap::IndexMap;
use log::trace;
use rust_xlsxwriter::Workbook;

use super::{Error, Grid};

/// Reads every sheet of the workbook at `path` as text cells.
///
/// Grids are anchored at cell `A1` whatever the used range of the sheet, so
/// row 0 is always the header row. Empty cells read as empty text; numbers
/// and booleans read as their display form.
pub fn read(path: &Path) -> Result<IndexMap<String, Grid>, Error> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let mut sheets = IndexMap::new();

    for name in workbook.sheet_names() {
        let range = workbook.worksheet_range(&name)?;
        let mut grid = Grid::new();

        if let Some((first_row, first_col)) = range.start() {
            grid.resize(first_row as usize, Vec::new());
            for cells in range.rows() {
                let mut row = vec![String::new(); first_col as usize];
                row.extend(cells.iter().map(cell_text));
                grid.push(row);
            }
        }

        trace!(sheet = name.as_str(), rows = grid.len(); "Sheet read");
        sheets.insert(name, grid);
    }

    Ok(sheets)
}

/// Writes `sheets` as a new workbook at `path`, in map order.
///
/// Empty cells are left unwritten.
pub fn write(path: &Path, sheets: &IndexMap<String, Grid>) -> Result<(), Error> {
    let mut workbook = Workbook::new();

    for (name, grid) in sheets {
        let worksheet = workbook.add_worksheet().set_name(name)?;
        for (index, cells) in grid.iter().enumerate() {
            let row = u32::try_from(index).map_err(|_| Error::TooManyRows {
                sheet: name.clone(),
            })?;
            for (col, text) in (0u16..).zip(cells) {
                if !text.is_empty() {
                    worksheet.write_string(row, col, text)?;
                }
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

fn cell_text(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        Data::String(text) => text.clone(),
        other => other.to_string(),
    }
}
