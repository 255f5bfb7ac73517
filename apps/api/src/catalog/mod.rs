//! Catalog Store: read-only reference data loaded once at startup.
//!
//! Colleges feed the matcher. Courses and careers are loaded and exposed but
//! the current rule set does not consult them.

pub mod matcher;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::models::catalog::{CareerEntry, CollegeEntry, CourseEntry};

pub const COLLEGES_FILE: &str = "colleges.json";
pub const COURSES_FILE: &str = "courses.json";
pub const CAREERS_FILE: &str = "careers.json";

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub colleges: Vec<CollegeEntry>,
    pub courses: Vec<CourseEntry>,
    pub careers: Vec<CareerEntry>,
}

impl Catalog {
    /// Loads all three catalogs from `dir`. Missing files load as empty,
    /// malformed files are an error.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let catalog = Catalog {
            colleges: load_collection(&dir.join(COLLEGES_FILE))?,
            courses: load_collection(&dir.join(COURSES_FILE))?,
            careers: load_collection(&dir.join(CAREERS_FILE))?,
        };

        info!(
            "Catalog loaded from {}: {} colleges, {} courses, {} careers",
            dir.display(),
            catalog.colleges.len(),
            catalog.courses.len(),
            catalog.careers.len()
        );
        Ok(catalog)
    }

    #[cfg(test)]
    pub fn with_colleges(colleges: Vec<CollegeEntry>) -> Self {
        Catalog {
            colleges,
            ..Default::default()
        }
    }
}

fn load_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        warn!("Catalog file {} not found; using an empty list", path.display());
        return Ok(Vec::new());
    }

    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Catalog file {} is not a valid JSON array", path.display()))
}
