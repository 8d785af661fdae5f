//! Job catalog: the read-only reference data every assessment is scored against.
//!
//! Built once at startup from the Jobs and Behaviors tables and shared behind
//! `AppState`. Replaced wholesale by `POST /api/v1/catalog/reload`; never mutated.

pub mod behavior_index;
pub mod handlers;
pub mod level;
pub mod loader;
pub mod schema;

use std::fs::File;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::catalog::behavior_index::{BehaviorIndex, RawBehaviorRow};
use crate::catalog::loader::{read_behaviors, read_jobs, JobsTable};
use crate::catalog::schema::CatalogSchema;
use crate::models::job::JobRecord;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Cannot open catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Column '{column}' is missing from the {table} table")]
    MissingColumn { table: &'static str, column: String },

    #[error("Expected {expected} competency columns in the jobs table, found {}: {found:?}", .found.len())]
    CompetencyCount { expected: usize, found: Vec<String> },

    #[error("Catalog has no jobs")]
    Empty,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    competencies: Vec<String>,
    jobs: Vec<JobRecord>,
    areas: Vec<String>,
    behaviors: BehaviorIndex,
}

impl Catalog {
    pub fn new(table: JobsTable, behavior_rows: &[RawBehaviorRow]) -> Result<Self, CatalogError> {
        if table.jobs.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut areas: Vec<String> = table
            .jobs
            .iter()
            .map(|j| j.area.clone())
            .filter(|a| !a.is_empty())
            .collect();
        areas.sort();
        areas.dedup();

        Ok(Self {
            competencies: table.competencies,
            jobs: table.jobs,
            areas,
            behaviors: BehaviorIndex::build(behavior_rows),
        })
    }

    /// Reads both tables from disk and builds the catalog.
    pub fn load(
        jobs_path: &Path,
        behaviors_path: &Path,
        schema: &CatalogSchema,
    ) -> Result<Self, CatalogError> {
        let table = read_jobs(open(jobs_path)?, schema)?;
        let behavior_rows = read_behaviors(open(behaviors_path)?, schema)?;
        let catalog = Self::new(table, &behavior_rows)?;

        info!(
            jobs = catalog.jobs.len(),
            areas = catalog.areas.len(),
            behavior_rows = behavior_rows.len(),
            jobs_with_behaviors = catalog.behaviors.job_count(),
            "Catalog loaded from {} and {}",
            jobs_path.display(),
            behaviors_path.display()
        );
        Ok(catalog)
    }

    /// Competency names in catalog header order.
    pub fn competencies(&self) -> &[String] {
        &self.competencies
    }

    /// All jobs in catalog row order.
    pub fn jobs(&self) -> &[JobRecord] {
        &self.jobs
    }

    pub fn areas(&self) -> &[String] {
        &self.areas
    }

    pub fn behaviors(&self) -> &BehaviorIndex {
        &self.behaviors
    }

    pub fn job(&self, title: &str) -> Option<&JobRecord> {
        self.jobs.iter().find(|j| j.title == title)
    }

    pub fn has_area(&self, area: &str) -> bool {
        self.areas.iter().any(|a| a == area)
    }

    pub fn is_competency(&self, name: &str) -> bool {
        self.competencies.iter().any(|c| c == name)
    }

    /// Jobs of one area sorted by title.
    pub fn jobs_in_area(&self, area: &str) -> Vec<&JobRecord> {
        let mut jobs: Vec<&JobRecord> = self.jobs.iter().filter(|j| j.area == area).collect();
        jobs.sort_by(|a, b| a.title.cmp(&b.title));
        jobs
    }
}

fn open(path: &Path) -> Result<File, CatalogError> {
    File::open(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}


#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_areas_sorted_and_unique() {
        let catalog = finance_catalog();
        assert_eq!(catalog.areas(), ["Finance", "People"]);
        assert!(catalog.has_area("People"));
        assert!(!catalog.has_area("Legal"));
    }

    #[test]
    fn test_jobs_in_area_sorted_by_title() {
        let catalog = finance_catalog();
        let titles: Vec<&str> = catalog
            .jobs_in_area("Finance")
            .iter()
            .map(|j| j.title.as_str())
            .collect();
        assert_eq!(titles[0], "Analyst");
        assert_eq!(titles[1], "Clerk");
        assert!(!titles.contains(&"Recruiter"));
    }

    #[test]
    fn test_empty_catalog_is_rejected() {
        let err = Catalog::new(
            JobsTable {
                competencies: vec![],
                jobs: vec![],
            },
            &[],
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::Empty));
    }

    #[test]
    fn test_load_from_files() {
        let mut jobs = tempfile::NamedTempFile::new().unwrap();
        writeln!(jobs, "Job Title,Area,IPE,C1,C2,C3,C4,C5,C6,C7,C8").unwrap();
        writeln!(jobs, "Analyst,Finance,3,10,20,10,10,10,10,20,10").unwrap();
        writeln!(jobs, "Lead,Finance,4-6,10,20,10,10,10,10,20,10").unwrap();

        let mut behaviors = tempfile::NamedTempFile::new().unwrap();
        writeln!(behaviors, "Job Title,Competencia,Comportamientos,Valor").unwrap();
        writeln!(behaviors, "Lead,C1,1. Guía al equipo,5").unwrap();

        let catalog = Catalog::load(jobs.path(), behaviors.path(), &CatalogSchema::default()).unwrap();
        assert_eq!(catalog.jobs().len(), 2);
        assert_eq!(catalog.job("Lead").unwrap().level, Some(5.0));
        assert_eq!(
            catalog.behaviors().expected_rating("Lead", "C1", "guía al equipo"),
            Some(5.0)
        );
    }

    #[test]
    fn test_bundled_sample_catalog_loads() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        let catalog = Catalog::load(
            &dir.join("jobs.csv"),
            &dir.join("behaviors.csv"),
            &CatalogSchema::default(),
        )
        .unwrap();
        assert_eq!(catalog.competencies().len(), 8);
        assert_eq!(catalog.job("Senior Analyst").unwrap().level, Some(3.5));
        assert_eq!(catalog.areas(), ["Finance", "People"]);
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let err = Catalog::load(
            Path::new("/nonexistent/jobs.csv"),
            Path::new("/nonexistent/behaviors.csv"),
            &CatalogSchema::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/jobs.csv"));
    }
}
