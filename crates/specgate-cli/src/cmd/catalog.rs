use super::{load_setup, Options};
use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use specgate_core::catalog::PatternCatalog;
use specgate_core::{io, paths};
use std::path::Path;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum CatalogSubcommand {
    /// Print the effective pattern catalog as YAML (JSON with --json)
    Show,

    /// List check ids and domains of the effective catalog
    List,

    /// Write the builtin catalog to .specgate/catalog.yaml for editing
    Init {
        /// Overwrite an existing catalog file
        #[arg(long)]
        force: bool,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(root: &Path, subcmd: CatalogSubcommand, opts: &Options) -> anyhow::Result<i32> {
    match subcmd {
        CatalogSubcommand::Show => show(root, opts),
        CatalogSubcommand::List => list(root, opts),
        CatalogSubcommand::Init { force } => init(root, force),
    }?;
    Ok(0)
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

fn show(root: &Path, opts: &Options) -> anyhow::Result<()> {
    let (_, catalog) = load_setup(root, opts)?;
    if opts.json {
        return print_json(&catalog);
    }
    print!(
        "{}",
        catalog.to_yaml().context("failed to serialize catalog")?
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

fn list(root: &Path, opts: &Options) -> anyhow::Result<()> {
    let (_, catalog) = load_setup(root, opts)?;

    if opts.json {
        let checks: std::collections::BTreeMap<_, Vec<_>> = catalog
            .documents
            .iter()
            .map(|(t, checks)| (t.as_str(), checks.iter().map(|c| c.id.as_str()).collect()))
            .collect();
        let domains: Vec<_> = catalog
            .domains
            .iter()
            .map(|d| serde_json::json!({ "domain": d.name, "agent": d.agent }))
            .collect();
        return print_json(&serde_json::json!({
            "orchestrator_agent": catalog.orchestrator_agent,
            "checks": checks,
            "domains": domains,
        }));
    }

    for (doc_type, checks) in &catalog.documents {
        println!("{} checks ({}):", doc_type.label(), doc_type);
        let rows = checks
            .iter()
            .map(|c| {
                vec![
                    c.id.clone(),
                    c.severity.to_string(),
                    c.description.clone(),
                ]
            })
            .collect();
        print_table(&["ID", "SEVERITY", "DESCRIPTION"], rows);
        println!();
    }

    println!("Domains (orchestrator: {}):", catalog.orchestrator_agent);
    let rows = catalog
        .domains
        .iter()
        .map(|d| {
            let keywords = if opts.verbose {
                d.keywords.join(", ")
            } else {
                d.keywords.len().to_string()
            };
            vec![d.name.clone(), d.agent.clone(), keywords]
        })
        .collect();
    print_table(&["DOMAIN", "AGENT", "KEYWORDS"], rows);
    Ok(())
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

fn init(root: &Path, force: bool) -> anyhow::Result<()> {
    let path = paths::catalog_path(root);
    let yaml = PatternCatalog::builtin()
        .to_yaml()
        .context("failed to serialize builtin catalog")?;

    if force {
        io::atomic_write(&path, yaml.as_bytes())
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Wrote builtin catalog to {}", path.display());
    } else if io::write_if_missing(&path, yaml.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))?
    {
        println!("Wrote builtin catalog to {}", path.display());
    } else {
        println!(
            "Catalog already exists at {} (use --force to overwrite)",
            path.display()
        );
    }
    Ok(())
}
