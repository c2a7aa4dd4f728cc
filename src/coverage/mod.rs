mod classify;
mod gaps;
mod overlaps;
mod types;
pub(crate) mod util;

pub use types::{
    AnalysisResult, AnalyzeOptions, CoverageError, CoverageStatus, DayCoverage, Gap, Overlap,
    WeekCoverage,
};

use crate::model::{self, Plan, ShiftInterval, WorkWindow};
use chrono::{Duration, NaiveDate};

/// Analyse avec les options par défaut.
pub fn analyze(window: WorkWindow, shifts: &[ShiftInterval]) -> AnalysisResult {
    CoverageAnalyzer::default().analyze(window, shifts)
}

/// Analyseur sans état : seules les options de classification sont gardées.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoverageAnalyzer {
    opts: AnalyzeOptions,
}

impl CoverageAnalyzer {
    pub fn new(opts: AnalyzeOptions) -> Self {
        Self { opts }
    }

    pub fn options(&self) -> AnalyzeOptions {
        self.opts
    }

    pub fn analyze(&self, window: WorkWindow, shifts: &[ShiftInterval]) -> AnalysisResult {
        let required_minutes = window.duration_minutes();
        let covered_minutes: i64 = shifts.iter().map(|s| s.duration_minutes()).sum();

        let coverage_ratio = if required_minutes <= 0 {
            0.0
        } else {
            (covered_minutes as f64 / required_minutes as f64).clamp(0.0, 1.0)
        };

        let gaps = gaps::detect_gaps(window, shifts);
        let overlaps = overlaps::detect_overlaps(shifts);
        let status = classify::classify(shifts.len(), &gaps, &overlaps, coverage_ratio, self.opts);

        #[cfg(feature = "logging")]
        tracing::debug!(
            shifts = shifts.len(),
            gaps = gaps.len(),
            overlaps = overlaps.len(),
            ratio = coverage_ratio,
            status = status.as_str(),
            "coverage analyzed"
        );

        AnalysisResult {
            status,
            shift_count: shifts.len(),
            required_hours: required_minutes as f64 / 60.0,
            covered_hours: covered_minutes as f64 / 60.0,
            coverage_ratio,
            gaps,
            overlaps,
        }
    }

    /// Analyse un service pour une date donnée, d'après ses horaires.
    pub fn analyze_day(
        &self,
        plan: &Plan,
        department: &str,
        date: NaiveDate,
    ) -> Result<AnalysisResult, CoverageError> {
        let dept = plan
            .find_department(department)
            .ok_or_else(|| CoverageError::UnknownDepartment(department.to_string()))?;
        let window = dept.window_on(date).ok_or_else(|| CoverageError::ClosedDay {
            department: department.to_string(),
            weekday: model::weekday_of(date),
        })?;
        Ok(self.analyze(window, &plan.shifts_for(department, date)))
    }

    /// Sept jours à partir du lundi de la semaine de `week_start`.
    pub fn analyze_week(
        &self,
        plan: &Plan,
        department: &str,
        week_start: NaiveDate,
    ) -> Result<WeekCoverage, CoverageError> {
        let dept = plan
            .find_department(department)
            .ok_or_else(|| CoverageError::UnknownDepartment(department.to_string()))?;
        let monday = model::week_monday(week_start);

        let days = (0..7)
            .map(|offset| {
                let date = monday + Duration::days(offset);
                let result = dept
                    .window_on(date)
                    .map(|window| self.analyze(window, &plan.shifts_for(department, date)));
                DayCoverage {
                    date,
                    weekday: model::weekday_of(date),
                    result,
                }
            })
            .collect();

        Ok(WeekCoverage {
            department: department.to_string(),
            week_start: monday,
            days,
        })
    }
}
