#![forbid(unsafe_code)]
//! BizSync coverage — analyse de couverture horaire des services.
//!
//! - Fenêtre d'ouverture par service et par jour de semaine.
//! - Détection des trous (union fusionnée) et des chevauchements.
//! - Classification COMPLETE / PARTIAL / INCOMPLETE.
//! - Heures locales (`NaiveTime`), pas de créneau de nuit.

pub mod coverage;
pub mod io;
pub mod model;
pub mod publication;
pub mod storage;
pub mod summary;

pub use coverage::{
    analyze, AnalysisResult, AnalyzeOptions, CoverageAnalyzer, CoverageError, CoverageStatus,
    DayCoverage, Gap, Overlap, WeekCoverage,
};
pub use model::{
    AssignedShift, Department, Plan, ShiftId, ShiftInterval, WorkWindow, PLAN_VERSION,
};
pub use publication::PublicationStatus;
pub use storage::{JsonStorage, Storage};
pub use summary::{ItalianSummary, SummaryRenderer};
