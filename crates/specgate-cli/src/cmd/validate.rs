use super::{load_setup, Options};
use crate::input::InputArgs;
use anyhow::Context;
use specgate_core::report::{self, OutputMode};
use specgate_core::types::DocumentType;
use specgate_core::validator::Validator;
use std::path::Path;

/// Validate one document and print its report. Returns the process exit code.
pub fn run(
    root: &Path,
    doc_type: DocumentType,
    input: &InputArgs,
    opts: &Options,
) -> anyhow::Result<i32> {
    let (config, catalog) = load_setup(root, opts)?;
    // Catalog problems are reported before the input is read.
    catalog
        .checks_for(doc_type)
        .with_context(|| format!("cannot validate {} documents", doc_type.label()))?;
    let validator = Validator::new(&catalog, config.validation.clone())
        .context("failed to compile pattern catalog")?;

    let doc = input.load(doc_type).context("failed to read document")?;
    let report = validator
        .validate(&doc, opts.strict)
        .with_context(|| format!("cannot validate {} documents", doc_type.label()))?;

    tracing::info!(
        doc_type = %doc_type,
        status = %report.status,
        score = report.score,
        "validation complete"
    );

    let rendered = report::format_validation(
        &report,
        OutputMode::from_json_flag(opts.json),
        opts.verbose,
    )?;
    print!("{rendered}");
    if opts.json {
        println!();
    }
    Ok(report::exit_code(report.status, opts.strict))
}
