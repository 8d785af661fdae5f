//! Submission validation. Every failure rejects only the current submission.
//!
//! Checks run in the order the survey form reports them: area/job selection,
//! competency points, name, then behavior ratings.

use std::collections::BTreeMap;

use crate::assessment::models::{
    AssessmentRequest, BehaviorRating, CompetencyProfile, MAX_RATING, MIN_RATING, TOTAL_POINTS,
};
use crate::catalog::behavior_index::normalize_behavior;
use crate::catalog::Catalog;
use crate::errors::AppError;
use crate::models::job::JobRecord;

pub const SELECT_AREA_AND_JOB: &str = "Select your area and current job.";
pub const ENTER_NAME: &str = "Please enter your name.";

/// A submission that is safe to score.
#[derive(Debug, Clone)]
pub struct ValidatedAssessment<'a> {
    pub name: String,
    pub current_job: &'a JobRecord,
    pub current_level: f64,
    pub profile: CompetencyProfile,
    pub ratings: BehaviorRating,
}

pub fn validate_submission<'a>(
    request: &AssessmentRequest,
    catalog: &'a Catalog,
) -> Result<ValidatedAssessment<'a>, AppError> {
    let current_job = validate_selection(request, catalog)?;
    let profile = validate_competencies(&request.competencies, catalog)?;

    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation(ENTER_NAME.to_string()));
    }

    let ratings = validate_behaviors(&request.behaviors, catalog)?;

    let current_level = current_job.level.ok_or_else(|| {
        AppError::UnprocessableEntity(format!(
            "Current job '{}' has no usable level metric ('{}'); cannot determine eligible jobs.",
            current_job.title, current_job.raw_level
        ))
    })?;

    Ok(ValidatedAssessment {
        name: name.to_string(),
        current_job,
        current_level,
        profile,
        ratings,
    })
}

fn validate_selection<'a>(
    request: &AssessmentRequest,
    catalog: &'a Catalog,
) -> Result<&'a JobRecord, AppError> {
    let selected = |v: &Option<String>| {
        v.as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };
    let (Some(area), Some(title)) = (selected(&request.area), selected(&request.current_job)) else {
        return Err(AppError::Validation(SELECT_AREA_AND_JOB.to_string()));
    };

    if !catalog.has_area(&area) {
        return Err(AppError::NotFound(format!("Area '{area}' is not in the catalog")));
    }
    let job = catalog
        .job(&title)
        .filter(|j| j.area == area)
        .ok_or_else(|| AppError::NotFound(format!("Job '{title}' is not in area '{area}'")))?;
    Ok(job)
}

fn validate_competencies(
    points: &BTreeMap<String, f64>,
    catalog: &Catalog,
) -> Result<CompetencyProfile, AppError> {
    if let Some(unknown) = points.keys().find(|c| !catalog.is_competency(c)) {
        return Err(AppError::Validation(format!("Unknown competency '{unknown}'")));
    }

    let mut whole = BTreeMap::new();
    for (competency, value) in points {
        match whole_number(*value).filter(|w| *w <= TOTAL_POINTS) {
            Some(w) => {
                whole.insert(competency.as_str(), w);
            }
            None => {
                return Err(AppError::Validation(format!(
                    "Competency '{competency}' has {value} points; each competency takes a whole number from 0 to {TOTAL_POINTS}."
                )))
            }
        }
    }

    let total: u32 = whole.values().sum();
    if total != TOTAL_POINTS {
        return Err(AppError::Validation(format!(
            "Distribute exactly {TOTAL_POINTS} points across the competencies (got {total})."
        )));
    }

    Ok(CompetencyProfile::new(
        catalog
            .competencies()
            .iter()
            .map(|c| (c.clone(), whole.get(c.as_str()).copied().unwrap_or(0)))
            .collect(),
    ))
}

fn validate_behaviors(
    ratings: &BTreeMap<String, f64>,
    catalog: &Catalog,
) -> Result<BehaviorRating, AppError> {
    let mut normalized = BTreeMap::new();
    for (label, value) in ratings {
        let rating = whole_number(*value)
            .and_then(|r| u8::try_from(r).ok())
            .filter(|r| (MIN_RATING..=MAX_RATING).contains(r))
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "Behavior '{label}' is rated {value}; ratings are whole numbers from {MIN_RATING} to {MAX_RATING}."
                ))
            })?;
        let key = normalize_behavior(label);
        if !catalog.behaviors().is_known_behavior(&key) {
            return Err(AppError::Validation(format!("Unknown behavior '{label}'")));
        }
        normalized.insert(key, rating);
    }
    Ok(BehaviorRating::new(normalized))
}

/// Non-negative integral values only; fractions, negatives and non-finite input give `None`.
fn whole_number(value: f64) -> Option<u32> {
    (value.is_finite() && value.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&value))
        .then_some(value as u32)
}
