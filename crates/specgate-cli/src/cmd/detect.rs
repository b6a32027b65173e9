use super::{load_setup, Options};
use crate::input::InputArgs;
use anyhow::Context;
use specgate_core::classifier::Classifier;
use specgate_core::report::{self, OutputMode};
use specgate_core::types::DocumentType;
use std::path::Path;

/// Classify free text into domains and print the delegation strategy.
/// Classification has no failing outcome, so success always exits `0`.
pub fn run(root: &Path, input: &InputArgs, opts: &Options) -> anyhow::Result<i32> {
    let (config, catalog) = load_setup(root, opts)?;
    let doc = input
        .load(DocumentType::Freeform)
        .context("failed to read input text")?;

    let classifier = Classifier::new(&catalog, &config.delegation)
        .context("failed to compile domain keywords")?;
    let result = classifier.classify(&doc.text);

    let rendered = report::format_classification(
        &result,
        OutputMode::from_json_flag(opts.json),
        opts.verbose,
    )?;
    print!("{rendered}");
    if opts.json {
        println!();
    }
    Ok(report::EXIT_OK)
}
