//! Consultation model
//!
//! A treatment consultation record. Consultations never touch the cash
//! register; they are plain records of what was discussed and whether the
//! patient accepted the proposed treatment.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ConsultationId;
use super::money::Amount;

/// Outcome of a consultation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConsultationStatus {
    /// Decision still pending
    #[default]
    Pending,
    /// Patient accepted the proposed treatment
    Accepted,
    /// Patient declined
    Declined,
}

impl fmt::Display for ConsultationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "상담중"),
            Self::Accepted => write!(f, "동의"),
            Self::Declined => write!(f, "비동의"),
        }
    }
}

/// A consultation record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consultation {
    /// Unique identifier
    pub id: ConsultationId,

    /// Patient name
    pub patient_name: String,

    /// Consultation date (clinic civil date)
    pub date: NaiveDate,

    /// What was discussed
    #[serde(default)]
    pub content: String,

    /// Quoted treatment cost, if one was given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quoted_amount: Option<Amount>,

    /// Current status
    #[serde(default)]
    pub status: ConsultationStatus,

    /// When the record was created
    pub created_at: DateTime<Utc>,

    /// When the record was last modified
    pub updated_at: DateTime<Utc>,
}

impl Consultation {
    /// Create a new pending consultation
    pub fn new(patient_name: impl Into<String>, date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: ConsultationId::new(),
            patient_name: patient_name.into(),
            date,
            content: String::new(),
            quoted_amount: None,
            status: ConsultationStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Update the modification timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_consultation_is_pending() {
        let c = Consultation::new("정하윤", NaiveDate::from_ymd_opt(2024, 4, 3).unwrap());
        assert_eq!(c.status, ConsultationStatus::Pending);
        assert!(c.quoted_amount.is_none());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ConsultationStatus::Accepted.to_string(), "동의");
    }
}
