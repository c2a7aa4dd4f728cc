use crate::coverage::{AnalysisResult, CoverageStatus};

/// Permet de customiser le résumé affiché à côté du badge de couverture.
pub trait SummaryRenderer {
    fn render(&self, label: &str, result: &AnalysisResult) -> String;
}

/// Résumé en italien, tel qu'affiché par l'application.
#[derive(Debug, Default, Clone, Copy)]
pub struct ItalianSummary;

impl ItalianSummary {
    fn status_label(status: CoverageStatus) -> &'static str {
        match status {
            CoverageStatus::Complete => "completa",
            CoverageStatus::Partial => "parziale",
            CoverageStatus::Incomplete => "incompleta",
        }
    }

    pub fn gaps_label(count: usize) -> String {
        if count == 1 {
            "1 buco orario".to_string()
        } else {
            format!("{count} buchi orari")
        }
    }

    pub fn overlaps_label(count: usize) -> String {
        if count == 1 {
            "1 sovrapposizione".to_string()
        } else {
            format!("{count} sovrapposizioni")
        }
    }
}

impl SummaryRenderer for ItalianSummary {
    fn render(&self, label: &str, result: &AnalysisResult) -> String {
        format!(
            "{label}: {status}, copertura {pct}% ({covered:.1}/{required:.1} h), {gaps}, {overlaps}",
            status = Self::status_label(result.status),
            pct = (result.coverage_ratio * 100.0).round() as i64,
            covered = result.covered_hours,
            required = result.required_hours,
            gaps = Self::gaps_label(result.gaps.len()),
            overlaps = Self::overlaps_label(result.overlaps.len()),
        )
    }
}
