//! CLI logic for the umlsheet tool.
//!
//! Each subcommand maps onto one [`ModelBuilder`] stage. Inputs that yield
//! nothing to process (no model block, no extension records, no classes)
//! end the command with a notice instead of an error.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command};

use std::{fs, path::Path};

use log::{info, warn};

use umlsheet::{
    ModelBuilder, UmlSheetError,
    render::{DiagramRenderer, PlantUmlServer},
};

/// Run the umlsheet CLI application
///
/// # Errors
///
/// Returns `UmlSheetError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Workbook read/write errors
/// - Report write errors
///
/// Per-class diagram failures are logged and do not fail the command.
pub fn run(args: &Args) -> Result<(), UmlSheetError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let builder = ModelBuilder::new(app_config);

    match &args.command {
        Command::Tabulate {
            input,
            output,
            merge,
        } => tabulate(&builder, input, output, *merge),
        Command::Extend { input, workbook } => extend(&builder, input, workbook),
        Command::Diagrams {
            workbook,
            output,
            no_render,
        } => diagrams(&builder, workbook, output, *no_render),
        Command::Report { workbook, output } => report(&builder, workbook, output),
    }
}

fn tabulate(
    builder: &ModelBuilder,
    input: &str,
    output: &str,
    merge: bool,
) -> Result<(), UmlSheetError> {
    info!(input_path = input, output_path = output, merge; "Tabulating model");

    let source = fs::read_to_string(input)?;
    let tables = builder.parse(&source)?;
    if tables.is_empty() {
        info!(input_path = input; "No Types or Interfaces found, nothing to write");
        return Ok(());
    }

    let path = builder.workbook_path(Path::new(output));
    builder.save_tables(&tables, &path, merge)?;

    info!(workbook = path.display().to_string(); "Workbook exported successfully");
    Ok(())
}

fn extend(builder: &ModelBuilder, input: &str, workbook: &str) -> Result<(), UmlSheetError> {
    info!(input_path = input, workbook; "Extending workbook");

    let source = fs::read_to_string(input)?;
    let records = builder.parse_extensions(&source)?;
    if records.is_empty() {
        info!(input_path = input; "No attribute definitions found, nothing to append");
        return Ok(());
    }

    let added = builder.append_extensions(&records, Path::new(workbook))?;
    info!(workbook, added; "Workbook extended successfully");
    Ok(())
}

fn diagrams(
    builder: &ModelBuilder,
    workbook: &str,
    output: &str,
    no_render: bool,
) -> Result<(), UmlSheetError> {
    info!(workbook, output_dir = output; "Generating class diagrams");

    let tables = builder.load_tables(Path::new(workbook))?;
    if tables.classes().is_empty() {
        info!(workbook; "Workbook has no classes, nothing to draw");
        return Ok(());
    }

    let render_config = builder.config().render();
    let server = (render_config.enabled() && !no_render)
        .then(|| PlantUmlServer::from_config(render_config));
    let renderer = server.as_ref().map(|server| server as &dyn DiagramRenderer);

    let batch = builder.write_diagrams(&tables, Path::new(output), renderer)?;

    if batch.failures().is_empty() {
        info!(
            sources = batch.sources().len(),
            images = batch.images().len();
            "Diagrams generated successfully"
        );
    } else {
        warn!(
            sources = batch.sources().len(),
            images = batch.images().len(),
            failures = batch.failures().len();
            "Some class diagrams failed"
        );
    }
    Ok(())
}

fn report(builder: &ModelBuilder, workbook: &str, output: &str) -> Result<(), UmlSheetError> {
    info!(workbook, output_path = output; "Reporting unused interfaces");

    let tables = builder.load_tables(Path::new(workbook))?;
    let unused = builder.unused_interfaces(&tables);
    if unused.is_empty() {
        info!("All interfaces have realizations");
        return Ok(());
    }

    for interface in &unused {
        info!(interface; "Interface without realization");
    }
    builder.write_report(&unused, Path::new(output))?;

    info!(output_path = output, interfaces = unused.len(); "Report saved");
    Ok(())
}
