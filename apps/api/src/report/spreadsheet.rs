use csv::Writer;

use crate::assessment::models::CareerPlan;
use crate::errors::AppError;

pub const CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// One row per recommendation, columns
/// `Job Title,Area,IPE,Gap Total,Gap Comp,Gap Beh`, in plan order.
pub fn render_spreadsheet(plan: &CareerPlan) -> Result<Vec<u8>, AppError> {
    let mut writer = Writer::from_writer(Vec::new());
    if plan.recommendations.is_empty() {
        writer
            .write_record(["Job Title", "Area", "IPE", "Gap Total", "Gap Comp", "Gap Beh"])
            .map_err(|e| AppError::Report(format!("CSV header: {e}")))?;
    }
    for recommendation in &plan.recommendations {
        writer
            .serialize(recommendation)
            .map_err(|e| AppError::Report(format!("CSV row: {e}")))?;
    }
    writer
        .into_inner()
        .map_err(|e| AppError::Report(format!("CSV flush: {e}")))
}
