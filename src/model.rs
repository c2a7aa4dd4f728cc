use crate::coverage::{util::minutes_between, CoverageError};
use crate::publication::PublicationStatus;
use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Bornes brutes telles que lues (JSON), validées avant usage.
#[derive(Debug, Clone, Copy, Deserialize)]
struct RawSpan {
    start: NaiveTime,
    end: NaiveTime,
}

/// Horaires d'ouverture requis d'un service pour une journée (`start < end`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSpan")]
pub struct WorkWindow {
    start: NaiveTime,
    end: NaiveTime,
}

impl WorkWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, CoverageError> {
        if end <= start {
            return Err(CoverageError::InvalidTimeRange);
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }
    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Durée en minutes.
    pub fn duration_minutes(&self) -> i64 {
        minutes_between(self.start, self.end)
    }

    pub fn duration_hours(&self) -> f64 {
        self.duration_minutes() as f64 / 60.0
    }
}

impl TryFrom<RawSpan> for WorkWindow {
    type Error = CoverageError;

    fn try_from(raw: RawSpan) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

/// Créneau de travail assigné, sur une seule journée (`start < end`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSpan")]
pub struct ShiftInterval {
    start: NaiveTime,
    end: NaiveTime,
}

impl ShiftInterval {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, CoverageError> {
        if end <= start {
            return Err(CoverageError::InvalidTimeRange);
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }
    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Durée en minutes.
    pub fn duration_minutes(&self) -> i64 {
        minutes_between(self.start, self.end)
    }

    pub fn duration_hours(&self) -> f64 {
        self.duration_minutes() as f64 / 60.0
    }
}

impl TryFrom<RawSpan> for ShiftInterval {
    type Error = CoverageError;

    fn try_from(raw: RawSpan) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

/// Identifiant fort pour AssignedShift
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShiftId(String);

impl ShiftId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Créneau rattaché à un service et à une date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedShift {
    pub id: ShiftId,
    pub department: String,
    pub date: NaiveDate,
    pub interval: ShiftInterval,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee: Option<String>,
}

impl AssignedShift {
    pub fn new<D: Into<String>>(department: D, date: NaiveDate, interval: ShiftInterval) -> Self {
        Self {
            id: ShiftId::random(),
            department: department.into(),
            date,
            interval,
            employee: None,
        }
    }

    pub fn with_employee<E: Into<String>>(mut self, employee: E) -> Self {
        self.employee = Some(employee.into());
        self
    }
}

/// Vérifie un jour de semaine ISO (1 = lundi … 7 = dimanche).
pub fn check_weekday(day: u8) -> Result<u8, CoverageError> {
    if (1..=7).contains(&day) {
        Ok(day)
    } else {
        Err(CoverageError::InvalidWeekday(day))
    }
}

pub fn weekday_of(date: NaiveDate) -> u8 {
    date.weekday().number_from_monday() as u8
}

/// Lundi de la semaine contenant `date`.
pub fn week_monday(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

fn deserialize_hours<'de, D>(deserializer: D) -> Result<BTreeMap<u8, WorkWindow>, D::Error>
where
    D: Deserializer<'de>,
{
    let hours = BTreeMap::<u8, WorkWindow>::deserialize(deserializer)?;
    for day in hours.keys() {
        check_weekday(*day).map_err(serde::de::Error::custom)?;
    }
    Ok(hours)
}

/// Service (reparto) : horaires hebdomadaires et état de publication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub name: String,
    /// Clé : jour ISO 1..=7. Jour absent = fermé.
    #[serde(default, deserialize_with = "deserialize_hours")]
    pub hours: BTreeMap<u8, WorkWindow>,
    /// Clé : lundi de la semaine.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub publications: BTreeMap<NaiveDate, PublicationStatus>,
}

impl Department {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            hours: BTreeMap::new(),
            publications: BTreeMap::new(),
        }
    }

    pub fn set_hours(&mut self, day: u8, window: WorkWindow) -> Result<(), CoverageError> {
        self.hours.insert(check_weekday(day)?, window);
        Ok(())
    }

    pub fn close_day(&mut self, day: u8) -> Result<Option<WorkWindow>, CoverageError> {
        Ok(self.hours.remove(&check_weekday(day)?))
    }

    pub fn window_for(&self, day: u8) -> Option<WorkWindow> {
        self.hours.get(&day).copied()
    }

    pub fn window_on(&self, date: NaiveDate) -> Option<WorkWindow> {
        self.window_for(weekday_of(date))
    }

    pub fn publication(&self, date: NaiveDate) -> PublicationStatus {
        self.publications
            .get(&week_monday(date))
            .copied()
            .unwrap_or_default()
    }

    /// Fait avancer la publication de la semaine contenant `date`.
    pub fn publish(
        &mut self,
        date: NaiveDate,
        to: PublicationStatus,
    ) -> Result<PublicationStatus, CoverageError> {
        let next = self.publication(date).advance_to(to)?;
        self.publications.insert(week_monday(date), next);
        Ok(next)
    }
}

/// Version courante du format de planning.
pub const PLAN_VERSION: u32 = 1;

fn plan_version() -> u32 {
    PLAN_VERSION
}

/// Planning complet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Absent des fichiers antérieurs au versionnage : vaut 1.
    #[serde(default = "plan_version")]
    pub version: u32,
    #[serde(default)]
    pub departments: Vec<Department>,
    #[serde(default)]
    pub shifts: Vec<AssignedShift>,
}

impl Default for Plan {
    fn default() -> Self {
        Self {
            version: PLAN_VERSION,
            departments: Vec::new(),
            shifts: Vec::new(),
        }
    }
}

impl Plan {
    pub fn find_department<'a>(&'a self, name: &str) -> Option<&'a Department> {
        self.departments.iter().find(|d| d.name == name)
    }

    pub fn find_department_mut(&mut self, name: &str) -> Option<&mut Department> {
        self.departments.iter_mut().find(|d| d.name == name)
    }

    /// Retourne le service, en le créant s'il n'existe pas.
    pub fn department_entry(&mut self, name: &str) -> &mut Department {
        let pos = match self.departments.iter().position(|d| d.name == name) {
            Some(pos) => pos,
            None => {
                self.departments.push(Department::new(name));
                self.departments.len() - 1
            }
        };
        &mut self.departments[pos]
    }

    pub fn shifts_for(&self, department: &str, date: NaiveDate) -> Vec<ShiftInterval> {
        self.shifts
            .iter()
            .filter(|s| s.department == department && s.date == date)
            .map(|s| s.interval)
            .collect()
    }
}
