//! CSV readers for the Jobs and Behaviors tables.
//!
//! Malformed rows (including cells that are not valid UTF-8) are skipped with a
//! warning; only structural problems (I/O, unreadable headers, missing columns,
//! wrong competency count) fail the load.

use std::collections::{HashMap, HashSet};
use std::io::Read;

use csv::{ByteRecord, ReaderBuilder, StringRecord, Trim};
use tracing::warn;

use crate::catalog::behavior_index::RawBehaviorRow;
use crate::catalog::level::parse_level_metric;
use crate::catalog::schema::CatalogSchema;
use crate::catalog::CatalogError;
use crate::models::job::JobRecord;

/// Jobs table contents: competency names in header order plus the job rows.
#[derive(Debug, Clone)]
pub struct JobsTable {
    pub competencies: Vec<String>,
    pub jobs: Vec<JobRecord>,
}

pub fn read_jobs<R: Read>(reader: R, schema: &CatalogSchema) -> Result<JobsTable, CatalogError> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();
    let columns = schema.resolve_jobs(&headers)?;

    let mut jobs = Vec::new();
    let mut seen = HashSet::new();

    for (i, record) in rdr.byte_records().enumerate() {
        let line = i + 2;
        let Some(record) = decode(record?, line) else {
            continue;
        };

        let title = cell(&record, columns.title);
        if title.is_empty() {
            warn!(line, "Skipping job row without a title");
            continue;
        }
        if !seen.insert(title.to_string()) {
            warn!(line, title, "Skipping duplicate job title");
            continue;
        }

        let mut reference = HashMap::with_capacity(columns.competencies.len());
        let mut malformed = None;
        for (name, idx) in &columns.competencies {
            let raw = cell(&record, *idx);
            if raw.is_empty() {
                reference.insert(name.clone(), 0.0);
                continue;
            }
            match raw.parse::<f64>() {
                Ok(v) if v.is_finite() => {
                    reference.insert(name.clone(), v);
                }
                _ => {
                    malformed = Some(name.as_str());
                    break;
                }
            }
        }
        if let Some(competency) = malformed {
            warn!(line, title, competency, "Skipping job with non-numeric competency weight");
            continue;
        }

        let raw_level = cell(&record, columns.level).to_string();
        let level = parse_level_metric(&raw_level);
        if level.is_none() {
            warn!(line, title, raw_level = %raw_level, "Unparseable level metric; job will never be eligible");
        }

        jobs.push(JobRecord {
            title: title.to_string(),
            area: cell(&record, columns.area).to_string(),
            raw_level,
            level,
            reference,
        });
    }

    Ok(JobsTable {
        competencies: columns.competencies.into_iter().map(|(name, _)| name).collect(),
        jobs,
    })
}

pub fn read_behaviors<R: Read>(
    reader: R,
    schema: &CatalogSchema,
) -> Result<Vec<RawBehaviorRow>, CatalogError> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();
    let columns = schema.resolve_behaviors(&headers)?;

    let mut rows = Vec::new();
    for (i, record) in rdr.byte_records().enumerate() {
        let Some(record) = decode(record?, i + 2) else {
            continue;
        };
        rows.push(RawBehaviorRow {
            job_title: non_empty(cell(&record, columns.title)),
            competency: non_empty(cell(&record, columns.competency)),
            behavior: non_empty(cell(&record, columns.behavior)),
            rating: cell(&record, columns.rating).parse::<f64>().ok(),
        });
    }
    Ok(rows)
}

fn decode(record: ByteRecord, line: usize) -> Option<StringRecord> {
    match StringRecord::from_byte_record(record) {
        Ok(record) => Some(record),
        Err(err) => {
            warn!(line, error = %err, "Skipping catalog row that is not valid UTF-8");
            None
        }
    }
}

/// Short rows (flexible CSV) read as empty cells.
fn cell(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).map(str::trim).unwrap_or("")
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
