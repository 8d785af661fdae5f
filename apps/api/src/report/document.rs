use std::fmt::Write;

use crate::assessment::models::CareerPlan;
use crate::report::format_level;

pub const CONTENT_TYPE: &str = "text/markdown; charset=utf-8";

/// Narrative career plan: header, current job, top strengths, then one section
/// per recommended job.
pub fn render_document(plan: &CareerPlan) -> String {
    let mut doc = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(doc, "# Career Plan: {}\n", plan.name);
    let _ = writeln!(
        doc,
        "Current job: {} ({}) - IPE {}\n",
        plan.current_job.title,
        plan.current_job.area,
        format_level(plan.current_job.ipe)
    );

    let _ = writeln!(doc, "Main strengths:\n");
    for strength in &plan.strengths {
        let _ = writeln!(doc, "- {} ({} points)", strength.competency, strength.points);
    }

    let _ = writeln!(doc, "\nRecommended development:");
    if plan.recommendations.is_empty() {
        let _ = writeln!(doc, "\nNo eligible jobs at or above the current level.");
    }
    for rec in &plan.recommendations {
        let _ = writeln!(doc, "\n## {}\n", rec.job_title);
        let _ = writeln!(
            doc,
            "Area: {} | IPE: {} | Gap Total: {:.2}",
            rec.area,
            format_level(rec.ipe),
            rec.gap_total
        );
    }

    let _ = writeln!(
        doc,
        "\n---\nGenerated {} (assessment {})",
        plan.generated_at.format("%Y-%m-%d %H:%M UTC"),
        plan.assessment_id
    );
    doc
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use super::*;
    use crate::assessment::models::{CurrentJob, Recommendation, Strength};

    pub(crate) fn sample_plan() -> CareerPlan {
        CareerPlan {
            assessment_id: Uuid::nil(),
            generated_at: Utc.with_ymd_and_hms(2026, 3, 2, 9, 30, 0).unwrap(),
            name: "Ana Pérez".to_string(),
            current_job: CurrentJob {
                title: "Analyst".to_string(),
                area: "Finance".to_string(),
                ipe: 3.0,
            },
            strengths: vec![
                Strength {
                    competency: "Liderazgo".to_string(),
                    points: 40,
                },
                Strength {
                    competency: "Comunicación".to_string(),
                    points: 30,
                },
            ],
            recommendations: vec![
                Recommendation {
                    job_title: "Senior Analyst".to_string(),
                    area: "Finance".to_string(),
                    ipe: 3.0,
                    gap_total: 1.4,
                    gap_comp: 2.0,
                    gap_beh: 0.0,
                },
                Recommendation {
                    job_title: "Team Lead".to_string(),
                    area: "Finance".to_string(),
                    ipe: 4.0,
                    gap_total: 4.57,
                    gap_comp: 6.1,
                    gap_beh: 0.99,
                },
            ],
            scored_jobs: 5,
            scorer_backend: "weighted".to_string(),
        }
    }

    #[test]
    fn test_document_sections() {
        let doc = render_document(&sample_plan());
        assert!(doc.starts_with("# Career Plan: Ana Pérez\n"));
        assert!(doc.contains("Current job: Analyst (Finance) - IPE 3.0"));
        assert!(doc.contains("- Liderazgo (40 points)\n- Comunicación (30 points)"));
        assert!(doc.contains("## Senior Analyst\n\nArea: Finance | IPE: 3.0 | Gap Total: 1.40"));
        assert!(doc.contains("## Team Lead\n\nArea: Finance | IPE: 4.0 | Gap Total: 4.57"));
        assert!(doc.contains("Generated 2026-03-02 09:30 UTC"));
    }

    #[test]
    fn test_jobs_listed_in_plan_order() {
        let doc = render_document(&sample_plan());
        let senior = doc.find("## Senior Analyst").unwrap();
        let lead = doc.find("## Team Lead").unwrap();
        assert!(senior < lead);
    }

    #[test]
    fn test_empty_plan_says_so() {
        let mut plan = sample_plan();
        plan.recommendations.clear();
        assert!(render_document(&plan).contains("No eligible jobs"));
    }
}
