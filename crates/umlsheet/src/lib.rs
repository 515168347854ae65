//! umlsheet - round-trip type models between JSON, spreadsheets, and
//! PlantUML class diagrams.
//!
//! A JSON type model is flattened into five tables (enumerations, class
//! attributes, interface attributes, generalizations, realizations) that are
//! stored as an `.xlsx` workbook. From the workbook, one PlantUML class
//! diagram per class is generated and optionally rendered by a PlantUML
//! server, and interfaces without any realizing class can be reported.

pub mod config;
pub mod export;
pub mod render;
pub mod report;
pub mod store;

mod error;

pub use umlsheet_core::{enums, model, row, tables};
pub use umlsheet_parser::ExtensionAttribute;

pub use error::UmlSheetError;

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use log::{debug, error, info, trace};

use config::AppConfig;
use export::plantuml::{ClassDiagramAssembler, FileStems};
use render::DiagramRenderer;
use store::WorkbookStore;
use tables::ModelTables;

/// Outcome of generating the diagrams of every class.
#[derive(Debug, Default)]
pub struct DiagramBatch {
    sources: Vec<PathBuf>,
    images: Vec<PathBuf>,
    failures: Vec<(String, UmlSheetError)>,
}

impl DiagramBatch {
    /// Paths of the written `.puml` files.
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Paths of the written images.
    pub fn images(&self) -> &[PathBuf] {
        &self.images
    }

    /// Classes whose diagram could not be produced, with the cause.
    pub fn failures(&self) -> &[(String, UmlSheetError)] {
        &self.failures
    }
}

/// Builder for processing type models.
///
/// Provides the pipeline stages as separate calls: parsing a JSON model,
/// persisting tables, generating diagrams, and reporting.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
/// use umlsheet::{ModelBuilder, config::AppConfig};
///
/// let source = r#"{"Types":{"Car":{"Attributes":{"wheels":{"Type":"int"}}}}}"#;
/// let builder = ModelBuilder::new(AppConfig::default());
///
/// let tables = builder.parse(source).expect("Failed to parse");
/// builder
///     .save_tables(&tables, Path::new("model.xlsx"), false)
///     .expect("Failed to save");
///
/// let batch = builder
///     .write_diagrams(&tables, Path::new("diagrams"), None)
///     .expect("Failed to write diagrams");
/// assert_eq!(batch.sources().len(), 1);
/// ```
#[derive(Default)]
pub struct ModelBuilder {
    config: AppConfig,
}

impl ModelBuilder {
    /// Create a new builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a JSON model document into normalized tables.
    ///
    /// # Errors
    ///
    /// Returns [`UmlSheetError::Parse`] if the document is not JSON or holds
    /// malformed definitions.
    pub fn parse(&self, source: &str) -> Result<ModelTables, UmlSheetError> {
        info!("Parsing model document");

        let tables = umlsheet_parser::parse(source)
            .map_err(|err| UmlSheetError::new_parse_error(err, source))?;

        debug!(
            classes = tables.class_names().len(),
            interfaces = tables.interface_names().len();
            "Model parsed successfully"
        );
        trace!(tables:?; "Parsed tables");

        Ok(tables)
    }

    /// Parse an XML configuration list into extension attribute records.
    ///
    /// # Errors
    ///
    /// Returns [`UmlSheetError::Parse`] if the document is not XML.
    pub fn parse_extensions(&self, source: &str) -> Result<Vec<ExtensionAttribute>, UmlSheetError> {
        info!("Parsing extension records");

        let records = umlsheet_parser::parse_extensions(source)
            .map_err(|err| UmlSheetError::new_parse_error(err, source))?;

        debug!(records = records.len(); "Extension records parsed");
        Ok(records)
    }

    /// Resolves the workbook path of an output location.
    ///
    /// A path ending in `.xlsx` is used as is; anything else is treated as
    /// a directory holding the configured workbook name.
    pub fn workbook_path(&self, output: &Path) -> PathBuf {
        let is_workbook = output
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"));
        if is_workbook {
            output.to_path_buf()
        } else {
            output.join(self.config.store().workbook_name())
        }
    }

    /// Writes `tables` to the workbook at `path`.
    ///
    /// With `merge`, rows are unioned into an existing workbook instead of
    /// replacing it. Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns [`UmlSheetError::Store`] if the workbook cannot be read or
    /// written.
    pub fn save_tables(
        &self,
        tables: &ModelTables,
        path: &Path,
        merge: bool,
    ) -> Result<(), UmlSheetError> {
        create_parent(path)?;
        let store = WorkbookStore::new(path);

        if merge {
            let merged = store.merge(tables.clone())?;
            info!(class_rows = merged.classes().len(); "Tables merged into workbook");
        } else {
            store.save(tables)?;
        }
        Ok(())
    }

    /// Reads the tables of the workbook at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`UmlSheetError::Store`] if the workbook cannot be read.
    pub fn load_tables(&self, path: &Path) -> Result<ModelTables, UmlSheetError> {
        info!(path = path.display().to_string(); "Loading workbook");
        Ok(WorkbookStore::new(path).load()?)
    }

    /// Appends extension records to the `classes` sheet of the workbook at
    /// `path`, creating the workbook if needed. Returns the number of rows
    /// added.
    ///
    /// # Errors
    ///
    /// Returns [`UmlSheetError::Store`] if the workbook cannot be read or
    /// written.
    pub fn append_extensions(
        &self,
        records: &[ExtensionAttribute],
        path: &Path,
    ) -> Result<usize, UmlSheetError> {
        create_parent(path)?;
        let added = WorkbookStore::new(path)
            .append_classes(records.iter().map(ExtensionAttribute::to_class_row))?;

        info!(added, skipped = records.len() - added; "Extension records appended");
        Ok(added)
    }

    /// Returns the PlantUML source of the diagram of `class_name`.
    ///
    /// # Errors
    ///
    /// Returns [`UmlSheetError::Export`] if the class has no rows.
    pub fn class_diagram(
        &self,
        tables: &ModelTables,
        class_name: &str,
    ) -> Result<String, UmlSheetError> {
        Ok(ClassDiagramAssembler::new(tables).assemble(class_name)?)
    }

    /// Writes one diagram source per class into `output_dir` and, with a
    /// renderer, the rendered image next to each source.
    ///
    /// A class whose diagram fails is logged and recorded in the returned
    /// [`DiagramBatch`]; the remaining classes are still processed.
    ///
    /// # Errors
    ///
    /// Returns [`UmlSheetError::Io`] only if `output_dir` cannot be created.
    pub fn write_diagrams(
        &self,
        tables: &ModelTables,
        output_dir: &Path,
        renderer: Option<&dyn DiagramRenderer>,
    ) -> Result<DiagramBatch, UmlSheetError> {
        fs::create_dir_all(output_dir)?;

        let assembler = ClassDiagramAssembler::new(tables);
        let mut batch = DiagramBatch::default();
        let mut stems = FileStems::new();

        info!(
            dir = output_dir.display().to_string(),
            render = renderer.is_some();
            "Writing class diagrams"
        );

        for class_name in assembler.class_names() {
            let stem = stems.claim(class_name, self.config.diagram().file_suffix());
            if let Err(err) =
                self.write_diagram(&assembler, class_name, &stem, output_dir, renderer, &mut batch)
            {
                error!(class = class_name, err:%; "Diagram failed, continuing with next class");
                batch.failures.push((class_name.to_string(), err));
            }
        }

        info!(
            sources = batch.sources.len(),
            images = batch.images.len(),
            failures = batch.failures.len();
            "Class diagrams written"
        );
        Ok(batch)
    }

    fn write_diagram(
        &self,
        assembler: &ClassDiagramAssembler<'_>,
        class_name: &str,
        stem: &str,
        output_dir: &Path,
        renderer: Option<&dyn DiagramRenderer>,
        batch: &mut DiagramBatch,
    ) -> Result<(), UmlSheetError> {
        let source = assembler.assemble(class_name)?;

        let source_path = output_dir.join(format!("{stem}.puml"));
        fs::write(&source_path, &source)?;
        debug!(class = class_name, path = source_path.display().to_string(); "Diagram source written");
        batch.sources.push(source_path);

        if let Some(renderer) = renderer {
            let image = renderer.render(&source)?;
            let image_path = output_dir.join(format!("{stem}.{}", renderer.format().extension()));
            fs::write(&image_path, image)?;
            debug!(class = class_name, path = image_path.display().to_string(); "Diagram image written");
            batch.images.push(image_path);
        }

        Ok(())
    }

    /// Returns the interfaces no class realizes, sorted.
    pub fn unused_interfaces<'a>(&self, tables: &'a ModelTables) -> BTreeSet<&'a str> {
        report::unused_interfaces(tables)
    }

    /// Writes the unused-interface report to `path` as CSV.
    ///
    /// # Errors
    ///
    /// Returns [`UmlSheetError::Report`] if the file cannot be written.
    pub fn write_report(
        &self,
        interfaces: &BTreeSet<&str>,
        path: &Path,
    ) -> Result<(), UmlSheetError> {
        create_parent(path)?;
        report::write_csv_file(path, interfaces.iter().copied())?;
        info!(path = path.display().to_string(), interfaces = interfaces.len(); "Report written");
        Ok(())
    }
}

fn create_parent(path: &Path) -> Result<(), UmlSheetError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
