//! Report Exporter: renders a career plan as a spreadsheet (CSV) or a
//! narrative document (Markdown). Both are computed on demand; nothing is stored.

pub mod document;
pub mod spreadsheet;

/// Download file name for a plan, e.g. `career_plan_Ana_Perez.csv`.
pub fn export_file_name(person: &str, extension: &str) -> String {
    let stem: String = person
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| !matches!(c, '"' | '/' | '\\' | ';'))
        .collect();
    format!("career_plan_{stem}.{extension}")
}

/// Level metrics print with one decimal when whole ("3.0"), as-is otherwise ("3.5").
pub fn format_level(level: f64) -> String {
    if level.fract() == 0.0 {
        format!("{level:.1}")
    } else {
        level.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_replaces_spaces() {
        assert_eq!(export_file_name("Ana María Pérez", "csv"), "career_plan_Ana_María_Pérez.csv");
    }

    #[test]
    fn test_file_name_drops_header_breaking_characters() {
        assert_eq!(export_file_name(" a\"b/c ", "md"), "career_plan_abc.md");
    }

    #[test]
    fn test_format_level() {
        assert_eq!(format_level(3.0), "3.0");
        assert_eq!(format_level(3.5), "3.5");
    }
}
