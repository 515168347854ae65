//! Persistence of normalized tables as a five-sheet workbook.
//!
//! Each table maps to one sheet with a fixed header row:
//!
//! | Sheet            | Columns                                      |
//! |------------------|----------------------------------------------|
//! | `enum`           | `enum`, `properties`                         |
//! | `classes`        | `Class`, `Attribute`, `Type`, `Enum`         |
//! | `interfaces`     | `Interface`, `Attribute`, `Type`             |
//! | `generalization` | `sourceGeneralization`, `targetGeneralization` |
//! | `realisation`    | `sourceRealisation`, `targetRealisation`     |
//!
//! Enumerations are stored one literal per row; realization edges one
//! `(interface, class)` pair per row. Sheets the tool does not know are kept
//! when a workbook is rewritten.
//!
//! [`encode`] and [`decode`] convert between tables and cell grids; the
//! [`xlsx`] module reads and writes those grids.

/// Reading and writing `.xlsx` cell grids.
pub mod xlsx;

use std::{io, path::Path};

use indexmap::IndexMap;
use log::{debug, info, warn};
use thiserror::Error;

use umlsheet_core::{
    enums::EnumTable,
    row::{
        AttributeKind, ClassAttributeRow, GeneralizationEdge, InterfaceAttributeRow,
    },
    tables::{ModelTables, group_realizations},
};

/// Rows of one sheet, header row included.
pub type Grid = Vec<Vec<String>>;

/// Name and header row of one table sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    name: &'static str,
    headers: &'static [&'static str],
}

impl SheetLayout {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn headers(&self) -> &'static [&'static str] {
        self.headers
    }

    fn grid(&self, rows: impl IntoIterator<Item = Vec<String>>) -> Grid {
        let header = self.headers.iter().map(|h| (*h).to_string()).collect();
        std::iter::once(header).chain(rows).collect()
    }
}

pub const ENUM_SHEET: SheetLayout = SheetLayout {
    name: "enum",
    headers: &["enum", "properties"],
};

pub const CLASSES_SHEET: SheetLayout = SheetLayout {
    name: "classes",
    headers: &["Class", "Attribute", "Type", "Enum"],
};

pub const INTERFACES_SHEET: SheetLayout = SheetLayout {
    name: "interfaces",
    headers: &["Interface", "Attribute", "Type"],
};

pub const GENERALIZATION_SHEET: SheetLayout = SheetLayout {
    name: "generalization",
    headers: &["sourceGeneralization", "targetGeneralization"],
};

pub const REALISATION_SHEET: SheetLayout = SheetLayout {
    name: "realisation",
    headers: &["sourceRealisation", "targetRealisation"],
};

/// Table sheets in workbook order.
pub const SHEETS: [SheetLayout; 5] = [
    ENUM_SHEET,
    CLASSES_SHEET,
    INTERFACES_SHEET,
    GENERALIZATION_SHEET,
    REALISATION_SHEET,
];

/// Errors raised while reading or writing a workbook.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("cannot read workbook: {0}")]
    Read(#[from] calamine::XlsxError),

    #[error("cannot write workbook: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    #[error("sheet `{sheet}` has more rows than a workbook can hold")]
    TooManyRows { sheet: String },
}

/// Converts tables into one grid per table sheet, in workbook order.
pub fn encode(tables: &ModelTables) -> IndexMap<String, Grid> {
    let mut sheets = IndexMap::with_capacity(SHEETS.len());

    sheets.insert(
        ENUM_SHEET.name.to_string(),
        ENUM_SHEET.grid(tables.enums().iter().flat_map(|(name, values)| {
            values.iter().map(move |value| vec![name.clone(), value.clone()])
        })),
    );
    sheets.insert(
        CLASSES_SHEET.name.to_string(),
        CLASSES_SHEET.grid(tables.classes().iter().map(|row| {
            vec![
                row.class().to_string(),
                row.attribute().to_string(),
                row.type_label().to_string(),
                row.kind().map(|kind| kind.to_string()).unwrap_or_default(),
            ]
        })),
    );
    sheets.insert(
        INTERFACES_SHEET.name.to_string(),
        INTERFACES_SHEET.grid(tables.interfaces().iter().map(|row| {
            vec![
                row.interface().to_string(),
                row.attribute().to_string(),
                row.type_label().to_string(),
            ]
        })),
    );
    sheets.insert(
        GENERALIZATION_SHEET.name.to_string(),
        GENERALIZATION_SHEET.grid(
            tables
                .generalizations()
                .iter()
                .map(|edge| vec![edge.child().to_string(), edge.parent().to_string()]),
        ),
    );
    sheets.insert(
        REALISATION_SHEET.name.to_string(),
        REALISATION_SHEET.grid(
            tables
                .realization_pairs()
                .map(|(interface, class)| vec![interface.to_string(), class.to_string()]),
        ),
    );

    sheets
}

/// Rebuilds tables from workbook grids.
///
/// The first row of every table sheet is the header and is skipped, as are
/// rows whose cells are all blank. A missing sheet yields an empty table.
/// Missing cells read as empty text. An unrecognized `Enum` marker is logged
/// and read as blank. Realization rows without a class are dropped.
pub fn decode(sheets: &IndexMap<String, Grid>) -> ModelTables {
    let rows = |layout: SheetLayout| {
        sheets
            .get(layout.name)
            .map(|grid| grid.as_slice())
            .unwrap_or_default()
            .iter()
            .skip(1)
            .filter(|row| row.iter().any(|cell| !cell.is_empty()))
    };

    let mut enums = EnumTable::new();
    for row in rows(ENUM_SHEET) {
        enums.push_value(cell(row, 0), cell(row, 1));
    }

    let classes = rows(CLASSES_SHEET)
        .map(|row| {
            let marker = cell(row, 3);
            let kind = AttributeKind::from_cell(marker).unwrap_or_else(|err| {
                warn!(class = cell(row, 0), attribute = cell(row, 1); "{err}, reading it as blank");
                None
            });
            ClassAttributeRow::new(cell(row, 0), cell(row, 1), cell(row, 2), kind)
        })
        .collect();

    let interfaces = rows(INTERFACES_SHEET)
        .map(|row| InterfaceAttributeRow::new(cell(row, 0), cell(row, 1), cell(row, 2)))
        .collect();

    let generalizations = rows(GENERALIZATION_SHEET)
        .map(|row| GeneralizationEdge::new(cell(row, 0), cell(row, 1)))
        .collect();

    let realizations = group_realizations(rows(REALISATION_SHEET).filter_map(|row| {
        if cell(row, 1).is_empty() {
            debug!(interface = cell(row, 0); "Realization row without class dropped");
            None
        } else {
            Some((cell(row, 0), cell(row, 1)))
        }
    }));

    ModelTables::new(enums, classes, interfaces, generalizations, realizations)
}

fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or_default()
}

/// A table workbook on disk.
///
/// # Examples
///
/// ```no_run
/// # use umlsheet::store::WorkbookStore;
/// let store = WorkbookStore::new("model.xlsx");
/// let tables = store.load().expect("readable workbook");
/// println!("{} class rows", tables.classes().len());
/// ```
#[derive(Debug, Clone)]
pub struct WorkbookStore {
    path: std::path::PathBuf,
}

impl WorkbookStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Reads the tables of the workbook.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Read`] if the file is missing or not a workbook.
    pub fn load(&self) -> Result<ModelTables, Error> {
        let sheets = xlsx::read(&self.path)?;
        let tables = decode(&sheets);
        debug!(
            path = self.path.display().to_string(),
            class_rows = tables.classes().len();
            "Workbook loaded"
        );
        Ok(tables)
    }

    /// Writes `tables` to the workbook, replacing any previous file.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] if the file cannot be written.
    pub fn save(&self, tables: &ModelTables) -> Result<(), Error> {
        xlsx::write(&self.path, &encode(tables))?;
        info!(path = self.path.display().to_string(); "Workbook written");
        Ok(())
    }

    /// Unions `tables` into the workbook without removing any row.
    ///
    /// A missing workbook is created. Sheets other than the five table
    /// sheets are written back unchanged. Returns the merged tables.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] if the existing workbook cannot be read or the
    /// result cannot be written.
    pub fn merge(&self, tables: ModelTables) -> Result<ModelTables, Error> {
        self.update(|existing| existing.merge(tables))
    }

    /// Appends class rows to the `classes` sheet, skipping rows already
    /// present. A missing workbook is created. Returns the number of rows
    /// added.
    ///
    /// # Errors
    ///
    /// See [`merge`](Self::merge).
    pub fn append_classes(
        &self,
        rows: impl IntoIterator<Item = ClassAttributeRow>,
    ) -> Result<usize, Error> {
        let mut added = 0;
        self.update(|existing| {
            let before = existing.classes().len();
            existing.extend_classes(rows);
            added = existing.classes().len() - before;
        })?;
        Ok(added)
    }

    fn update(&self, apply: impl FnOnce(&mut ModelTables)) -> Result<ModelTables, Error> {
        let mut sheets = if self.exists() {
            xlsx::read(&self.path)?
        } else {
            debug!(path = self.path.display().to_string(); "Workbook missing, creating it");
            IndexMap::new()
        };

        let mut tables = decode(&sheets);
        apply(&mut tables);

        for (name, grid) in encode(&tables) {
            sheets.insert(name, grid);
        }
        xlsx::write(&self.path, &sheets)?;
        info!(path = self.path.display().to_string(); "Workbook updated");

        Ok(tables)
    }
}
