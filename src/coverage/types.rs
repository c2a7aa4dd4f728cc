use super::util::minutes_between;
use crate::model::ShiftInterval;
use crate::publication::PublicationStatus;
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use thiserror::Error;

/// Options de classification
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyzeOptions {
    /// Ratio à partir duquel la couverture est complète (marge d'arrondi).
    pub complete_threshold: f64,
    pub partial_threshold: f64,
    /// Un trou, même court, empêche COMPLETE.
    pub gaps_block_complete: bool,
}

impl AnalyzeOptions {
    /// Exige `0 <= partial <= complete <= 1`, valeurs finies.
    pub fn new(
        complete_threshold: f64,
        partial_threshold: f64,
        gaps_block_complete: bool,
    ) -> Result<Self, CoverageError> {
        let in_unit = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);
        if !in_unit(complete_threshold)
            || !in_unit(partial_threshold)
            || partial_threshold > complete_threshold
        {
            return Err(CoverageError::InvalidThresholds {
                complete: complete_threshold,
                partial: partial_threshold,
            });
        }
        Ok(Self {
            complete_threshold,
            partial_threshold,
            gaps_block_complete,
        })
    }
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            complete_threshold: 0.95,
            partial_threshold: 0.5,
            gaps_block_complete: true,
        }
    }
}

/// Ordre : du pire au meilleur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CoverageStatus {
    Incomplete,
    Partial,
    Complete,
}

impl CoverageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoverageStatus::Incomplete => "INCOMPLETE",
            CoverageStatus::Partial => "PARTIAL",
            CoverageStatus::Complete => "COMPLETE",
        }
    }
}

/// Plage de la fenêtre non couverte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Gap {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub minutes: i64,
}

impl Gap {
    pub(crate) fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            start,
            end,
            minutes: minutes_between(start, end),
        }
    }
}

/// Intersection de deux créneaux ; `indices` renvoie à la liste d'entrée.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Overlap {
    pub first: ShiftInterval,
    pub second: ShiftInterval,
    pub indices: (usize, usize),
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl Overlap {
    pub fn minutes(&self) -> i64 {
        minutes_between(self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub status: CoverageStatus,
    pub shift_count: usize,
    pub required_hours: f64,
    /// Somme brute des durées : les chevauchements comptent deux fois.
    pub covered_hours: f64,
    /// `covered / required` borné à [0, 1].
    pub coverage_ratio: f64,
    pub gaps: Vec<Gap>,
    pub overlaps: Vec<Overlap>,
}

impl AnalysisResult {
    /// Ratio non borné (peut dépasser 1 en cas de chevauchement).
    pub fn raw_coverage_ratio(&self) -> f64 {
        if self.required_hours <= 0.0 {
            0.0
        } else {
            self.covered_hours / self.required_hours
        }
    }

    pub fn gap_minutes(&self) -> i64 {
        self.gaps.iter().map(|g| g.minutes).sum()
    }

    pub fn is_complete(&self) -> bool {
        self.status == CoverageStatus::Complete
    }
}

/// Résultat d'une journée ; `result` vaut `None` si le service est fermé.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCoverage {
    pub date: NaiveDate,
    pub weekday: u8,
    pub result: Option<AnalysisResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekCoverage {
    pub department: String,
    pub week_start: NaiveDate,
    pub days: Vec<DayCoverage>,
}

impl WeekCoverage {
    /// Pire statut des jours ouverts ; `None` si tout est fermé.
    pub fn status(&self) -> Option<CoverageStatus> {
        self.days
            .iter()
            .filter_map(|d| d.result.as_ref().map(|r| r.status))
            .min()
    }

    pub fn open_days(&self) -> usize {
        self.days.iter().filter(|d| d.result.is_some()).count()
    }
}

#[derive(Error, Debug)]
pub enum CoverageError {
    #[error("invalid time range: end must be after start")]
    InvalidTimeRange,
    #[error("invalid time (expected HH:MM): {0}")]
    InvalidTime(String),
    #[error("invalid thresholds: expected 0 <= partial ({partial}) <= complete ({complete}) <= 1")]
    InvalidThresholds { complete: f64, partial: f64 },
    #[error("invalid weekday: {0} (expected 1..=7)")]
    InvalidWeekday(u8),
    #[error("unknown department: {0}")]
    UnknownDepartment(String),
    #[error("department {department} is closed on weekday {weekday}")]
    ClosedDay { department: String, weekday: u8 },
    #[error("invalid publication transition: {from} -> {to}")]
    InvalidTransition {
        from: PublicationStatus,
        to: PublicationStatus,
    },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
