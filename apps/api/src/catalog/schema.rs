use csv::StringRecord;
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogError;

/// Number of competency categories every catalog must define.
pub const COMPETENCY_COUNT: usize = 8;

/// Explicit column mapping for the two catalog tables.
///
/// Every configured column must be present in the file header; a missing column
/// fails the load instead of falling back to a partial-name match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSchema {
    pub job_title_column: String,
    pub area_column: String,
    pub level_column: String,
    pub competency_column: String,
    pub behavior_column: String,
    pub rating_column: String,
}

impl Default for CatalogSchema {
    fn default() -> Self {
        Self {
            job_title_column: "Job Title".to_string(),
            area_column: "Area".to_string(),
            level_column: "IPE".to_string(),
            competency_column: "Competencia".to_string(),
            behavior_column: "Comportamientos".to_string(),
            rating_column: "Valor".to_string(),
        }
    }
}

/// Resolved column positions of the Jobs table.
#[derive(Debug, Clone)]
pub struct JobsColumns {
    pub title: usize,
    pub area: usize,
    pub level: usize,
    /// (competency name, column index), in header order.
    pub competencies: Vec<(String, usize)>,
}

/// Resolved column positions of the Behaviors table.
#[derive(Debug, Clone)]
pub struct BehaviorsColumns {
    pub title: usize,
    pub competency: usize,
    pub behavior: usize,
    pub rating: usize,
}

impl CatalogSchema {
    pub fn resolve_jobs(&self, headers: &StringRecord) -> Result<JobsColumns, CatalogError> {
        let title = find_column(headers, "jobs", &self.job_title_column)?;
        let area = find_column(headers, "jobs", &self.area_column)?;
        let level = find_column(headers, "jobs", &self.level_column)?;

        let competencies: Vec<(String, usize)> = headers
            .iter()
            .enumerate()
            .filter(|(i, name)| ![title, area, level].contains(i) && !name.trim().is_empty())
            .map(|(i, name)| (name.trim().to_string(), i))
            .collect();

        if competencies.len() != COMPETENCY_COUNT {
            return Err(CatalogError::CompetencyCount {
                expected: COMPETENCY_COUNT,
                found: competencies.into_iter().map(|(name, _)| name).collect(),
            });
        }

        Ok(JobsColumns {
            title,
            area,
            level,
            competencies,
        })
    }

    pub fn resolve_behaviors(&self, headers: &StringRecord) -> Result<BehaviorsColumns, CatalogError> {
        Ok(BehaviorsColumns {
            title: find_column(headers, "behaviors", &self.job_title_column)?,
            competency: find_column(headers, "behaviors", &self.competency_column)?,
            behavior: find_column(headers, "behaviors", &self.behavior_column)?,
            rating: find_column(headers, "behaviors", &self.rating_column)?,
        })
    }
}

fn find_column(headers: &StringRecord, table: &'static str, name: &str) -> Result<usize, CatalogError> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| CatalogError::MissingColumn {
            table,
            column: name.to_string(),
        })
}
