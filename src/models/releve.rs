//! Typed view of the grade-report payload.
//!
//! The grade-report service returns a list of grading periods, each
//! carrying per-subject averages. The fields below are the stable subset
//! observed across deployments; unknown fields are ignored, absent fields
//! decode as `None`. Deserialize from the value returned by the report
//! operation:
//!
//! ```ignore
//! let report = client.grade_report(&Selector::OwnAccount).await?;
//! let periods: Vec<ReportPeriod> = serde_json::from_value(report)?;
//! ```

use serde::Deserialize;

/// One grading period of the report.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportPeriod {
    /// Display label of the period (e.g. `"Trimestre 1"`).
    #[serde(rename = "periodeLibelle", default)]
    pub period_label: Option<String>,

    /// Per-subject averages for the period.
    #[serde(rename = "matieres", default)]
    pub subjects: Vec<ReportSubject>,
}

/// Per-subject averages within a grading period.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportSubject {
    /// Display label of the subject.
    #[serde(rename = "matiereLibelle", default)]
    pub subject_label: Option<String>,

    /// The student's average for the subject.
    #[serde(rename = "moyenneEleve", default)]
    pub student_average: Option<f64>,

    /// Grading scale the average is expressed on (usually 20).
    #[serde(rename = "bareme", default)]
    pub scale: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_report_decodes_observed_shape() {
        let payload = json!([
            {
                "periodeLibelle": "Trimestre 1",
                "matieres": [
                    {"matiereLibelle": "Mathématiques", "moyenneEleve": 14.5, "bareme": 20.0},
                    {"matiereLibelle": "Histoire", "moyenneEleve": 12.0, "bareme": 20.0}
                ]
            }
        ]);
        let periods: Vec<ReportPeriod> = serde_json::from_value(payload).unwrap();
        assert_eq!(periods.len(), 1);
        assert_eq!(periods[0].period_label.as_deref(), Some("Trimestre 1"));
        assert_eq!(periods[0].subjects.len(), 2);
        assert_eq!(periods[0].subjects[0].student_average, Some(14.5));
    }

    #[test]
    fn test_report_tolerates_missing_fields() {
        let payload = json!([{"matieres": [{}]}]);
        let periods: Vec<ReportPeriod> = serde_json::from_value(payload).unwrap();
        assert!(periods[0].period_label.is_none());
        assert!(periods[0].subjects[0].student_average.is_none());
    }
}
