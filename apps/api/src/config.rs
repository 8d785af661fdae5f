use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::assessment::selector::RankingPrecision;
use crate::catalog::schema::CatalogSchema;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_jobs_path: PathBuf,
    pub catalog_behaviors_path: PathBuf,
    pub catalog_schema: CatalogSchema,
    pub ranking_precision: RankingPrecision,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_source(|key| std::env::var(key).ok())
    }

    pub fn from_source(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |key: &str| {
            get(key).with_context(|| format!("Required environment variable '{key}' is not set"))
        };
        let defaults = CatalogSchema::default();
        let column = |key: &str, default: String| get(key).unwrap_or(default);

        let rank_on_rounded = match get("RANK_ON_ROUNDED_GAPS") {
            Some(v) => v
                .parse::<bool>()
                .context("RANK_ON_ROUNDED_GAPS must be 'true' or 'false'")?,
            None => true,
        };

        Ok(Config {
            catalog_jobs_path: require("CATALOG_JOBS_PATH")?.into(),
            catalog_behaviors_path: require("CATALOG_BEHAVIORS_PATH")?.into(),
            catalog_schema: CatalogSchema {
                job_title_column: column("CATALOG_JOB_TITLE_COLUMN", defaults.job_title_column),
                area_column: column("CATALOG_AREA_COLUMN", defaults.area_column),
                level_column: column("CATALOG_LEVEL_COLUMN", defaults.level_column),
                competency_column: column("CATALOG_COMPETENCY_COLUMN", defaults.competency_column),
                behavior_column: column("CATALOG_BEHAVIOR_COLUMN", defaults.behavior_column),
                rating_column: column("CATALOG_RATING_COLUMN", defaults.rating_column),
            },
            ranking_precision: if rank_on_rounded {
                RankingPrecision::Rounded
            } else {
                RankingPrecision::Full
            },
            port: get("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_source(|key| vars.get(key).cloned())
    }

    const PATHS: [(&str, &str); 2] = [
        ("CATALOG_JOBS_PATH", "data/jobs.csv"),
        ("CATALOG_BEHAVIORS_PATH", "data/behaviors.csv"),
    ];

    #[test]
    fn test_defaults() {
        let cfg = config(&PATHS).unwrap();
        assert_eq!(cfg.catalog_jobs_path, PathBuf::from("data/jobs.csv"));
        assert_eq!(cfg.catalog_schema, CatalogSchema::default());
        assert_eq!(cfg.ranking_precision, RankingPrecision::Rounded);
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.rust_log, "info");
    }

    #[test]
    fn test_missing_catalog_path_fails() {
        let err = config(&PATHS[..1]).unwrap_err();
        assert!(err.to_string().contains("CATALOG_BEHAVIORS_PATH"));
    }

    #[test]
    fn test_overrides() {
        let mut vars = PATHS.to_vec();
        vars.extend([
            ("CATALOG_COMPETENCY_COLUMN", "Competencias clave"),
            ("RANK_ON_ROUNDED_GAPS", "false"),
            ("PORT", "9000"),
        ]);
        let cfg = config(&vars).unwrap();
        assert_eq!(cfg.catalog_schema.competency_column, "Competencias clave");
        assert_eq!(cfg.catalog_schema.level_column, "IPE");
        assert_eq!(cfg.ranking_precision, RankingPrecision::Full);
        assert_eq!(cfg.port, 9000);
    }

    #[test]
    fn test_bad_port_fails() {
        let mut vars = PATHS.to_vec();
        vars.push(("PORT", "http"));
        assert!(config(&vars).is_err());
    }
}
