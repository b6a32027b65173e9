use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const SPECGATE_DIR: &str = ".specgate";
pub const CONFIG_FILE: &str = ".specgate/config.yaml";
pub const CATALOG_FILE: &str = ".specgate/catalog.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn specgate_dir(root: &Path) -> PathBuf {
    root.join(SPECGATE_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn catalog_path(root: &Path) -> PathBuf {
    root.join(CATALOG_FILE)
}

/// Resolve a user-supplied path against the project root.
pub fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
