use super::{load_setup, Options};
use crate::output::print_json;
use anyhow::Context;
use specgate_core::document::Document;
use specgate_core::report::{self, OutputMode, ValidationJson};
use specgate_core::types::DocumentType;
use specgate_core::validator::Validator;
use std::path::{Path, PathBuf};

/// Validate many documents of one type. Each document is independent: an
/// unreadable file is reported and the batch continues. The exit code is
/// the highest code over all documents.
pub fn run(
    root: &Path,
    doc_type: DocumentType,
    files: &[PathBuf],
    opts: &Options,
) -> anyhow::Result<i32> {
    let (config, catalog) = load_setup(root, opts)?;
    catalog
        .checks_for(doc_type)
        .with_context(|| format!("cannot validate {} documents", doc_type.label()))?;
    let validator = Validator::new(&catalog, config.validation.clone())
        .context("failed to compile pattern catalog")?;

    let mut exit = report::EXIT_OK;
    let mut entries = Vec::new();

    for path in files {
        let doc = match Document::from_file(doc_type, path) {
            Ok(doc) => doc,
            Err(e) if e.is_input_error() => {
                exit = exit.max(report::EXIT_FAIL);
                if opts.json {
                    entries.push(serde_json::json!({
                        "path": path.display().to_string(),
                        "error": e.to_string(),
                    }));
                } else {
                    eprintln!("error: {}: {e}", path.display());
                }
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let rpt = validator.validate(&doc, opts.strict)?;
        exit = exit.max(report::exit_code(rpt.status, opts.strict));

        if opts.json {
            entries.push(serde_json::json!({
                "path": path.display().to_string(),
                "report": ValidationJson::new(&rpt, opts.verbose),
            }));
        } else {
            println!("== {}", path.display());
            print!(
                "{}",
                report::format_validation(&rpt, OutputMode::Human, opts.verbose)?
            );
            println!();
        }
    }

    if opts.json {
        print_json(&entries)?;
    } else {
        println!(
            "{} document(s) checked, exit status {exit}",
            files.len()
        );
    }
    Ok(exit)
}
