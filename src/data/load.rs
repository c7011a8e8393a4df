use crate::data::model::{AboutRecord, ProjectCatalog};
use crate::foundation::error::OrreryResult;
use anyhow::Context as _;
use std::path::Path;

/// Parse an about document.
pub fn parse_about(s: &str) -> OrreryResult<AboutRecord> {
    Ok(serde_json::from_str(s)?)
}

/// Read and parse the project catalog, propagating failures.
pub fn try_load_catalog(path: &Path) -> OrreryResult<ProjectCatalog> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read projects '{}'", path.display()))?;
    ProjectCatalog::from_json_str(&text)
}

/// Read and parse the about document, propagating failures.
pub fn try_load_about(path: &Path) -> OrreryResult<AboutRecord> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read about '{}'", path.display()))?;
    parse_about(&text)
}

/// Load the project catalog; any failure yields an empty catalog.
#[tracing::instrument]
pub fn load_catalog(path: &Path) -> ProjectCatalog {
    match try_load_catalog(path) {
        Ok(c) => {
            tracing::debug!(projects = c.len(), "loaded project catalog");
            c
        }
        Err(e) => {
            tracing::warn!(error = %e, "project data unavailable, starting with an empty galaxy");
            ProjectCatalog::default()
        }
    }
}

/// Load the about record; any failure yields [`AboutRecord::default`].
#[tracing::instrument]
pub fn load_about(path: &Path) -> AboutRecord {
    match try_load_about(path) {
        Ok(a) => a,
        Err(e) => {
            tracing::warn!(error = %e, "about data unavailable, using placeholder text");
            AboutRecord::default()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/load.rs"]
mod tests;
