//! État de publication hebdomadaire des plannings.
//!
//! `NotPublished -> Draft -> Published`, uniquement vers l'avant.

use crate::coverage::CoverageError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PublicationStatus {
    #[default]
    NotPublished,
    Draft,
    Published,
}

impl PublicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublicationStatus::NotPublished => "NOT_PUBLISHED",
            PublicationStatus::Draft => "DRAFT",
            PublicationStatus::Published => "PUBLISHED",
        }
    }

    /// Avance vers `to`. Rester dans le même état est accepté (idempotent) ;
    /// tout retour en arrière est refusé.
    pub fn advance_to(self, to: PublicationStatus) -> Result<PublicationStatus, CoverageError> {
        if to < self {
            return Err(CoverageError::InvalidTransition { from: self, to });
        }
        Ok(to)
    }

    pub fn is_published(&self) -> bool {
        *self == PublicationStatus::Published
    }
}

impl fmt::Display for PublicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PublicationStatus {
    type Err = CoverageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "not_published" | "none" => Ok(PublicationStatus::NotPublished),
            "draft" | "bozza" => Ok(PublicationStatus::Draft),
            "published" | "pubblicato" => Ok(PublicationStatus::Published),
            other => Err(CoverageError::Other(anyhow::anyhow!(
                "unknown publication status: {other}"
            ))),
        }
    }
}
