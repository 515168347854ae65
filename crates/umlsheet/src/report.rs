//! Interfaces that no class realizes.

use std::{
    collections::{BTreeSet, HashSet},
    io,
    path::Path,
};

use log::debug;
use thiserror::Error;

use umlsheet_core::tables::ModelTables;

/// Header of the single report column.
pub const REPORT_HEADER: &str = "Interface";

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("cannot write report: {0}")]
    Csv(#[from] csv::Error),
}

/// Returns the names of interfaces with no realizing class, sorted.
///
/// An interface counts as realized when at least one realization pair names
/// it with a non-blank class. Realizations of interfaces that have no row in
/// the `interfaces` table are ignored.
///
/// # Examples
///
/// ```
/// # use umlsheet::{report::unused_interfaces, row::{InterfaceAttributeRow, RealizationEdge}, tables::ModelTables};
/// let tables = ModelTables::new(
///     Default::default(),
///     vec![],
///     vec![
///         InterfaceAttributeRow::placeholder("I2"),
///         InterfaceAttributeRow::placeholder("I1"),
///     ],
///     vec![],
///     vec![RealizationEdge::new("I2", ["Car"])],
/// );
///
/// assert_eq!(unused_interfaces(&tables).into_iter().collect::<Vec<_>>(), ["I1"]);
/// ```
pub fn unused_interfaces(tables: &ModelTables) -> BTreeSet<&str> {
    let realized: HashSet<&str> = tables
        .realization_pairs()
        .filter(|(_, class)| !class.is_empty())
        .map(|(interface, _)| interface)
        .collect();

    let unused: BTreeSet<&str> = tables
        .interface_names()
        .into_iter()
        .filter(|name| !realized.contains(name))
        .collect();

    debug!(realized = realized.len(), unused = unused.len(); "Interface usage computed");
    unused
}

/// Writes `interfaces` as a one-column CSV with a header row.
///
/// # Errors
///
/// Returns [`Error::Csv`] if a record cannot be written.
pub fn write_csv<'a, W: io::Write>(
    writer: W,
    interfaces: impl IntoIterator<Item = &'a str>,
) -> Result<(), Error> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record([REPORT_HEADER])?;
    for interface in interfaces {
        writer.write_record([interface])?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the report to a file at `path`, replacing any previous file.
///
/// # Errors
///
/// See [`write_csv`].
pub fn write_csv_file<'a>(
    path: &Path,
    interfaces: impl IntoIterator<Item = &'a str>,
) -> Result<(), Error> {
    let file = std::fs::File::create(path)?;
    write_csv(file, interfaces)
}
