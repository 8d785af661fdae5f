use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A row of the Jobs table. Loaded once; read-only for the lifetime of the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    pub title: String,
    pub area: String,
    /// Level cell as written in the catalog, e.g. `"3-4"`.
    pub raw_level: String,
    /// Parsed level metric; `None` when the cell is not a number or range.
    pub level: Option<f64>,
    /// Reference weight per competency. Not required to sum to 100.
    pub reference: HashMap<String, f64>,
}

impl JobRecord {
    pub fn reference_value(&self, competency: &str) -> f64 {
        self.reference.get(competency).copied().unwrap_or(0.0)
    }
}
