pub mod batch;
pub mod catalog;
pub mod config;
pub mod detect;
pub mod validate;

use anyhow::Context;
use specgate_core::catalog::PatternCatalog;
use specgate_core::config::Config;
use std::path::{Path, PathBuf};

/// Flags shared by every command.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub json: bool,
    pub verbose: bool,
    pub strict: bool,
    pub catalog: Option<PathBuf>,
}

/// Load the project config and the effective pattern catalog.
pub fn load_setup(root: &Path, opts: &Options) -> anyhow::Result<(Config, PatternCatalog)> {
    let config = Config::load(root).context("failed to load config")?;
    for w in config.validate(root) {
        tracing::warn!(level = ?w.level, "{}", w.message);
    }
    let catalog = config
        .load_catalog(root, opts.catalog.as_deref())
        .context("failed to load pattern catalog")?;
    Ok((config, catalog))
}
