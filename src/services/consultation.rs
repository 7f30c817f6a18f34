//! Consultation service
//!
//! Plain CRUD; consultations never reach the cash register.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{ChairsideError, ChairsideResult};
use crate::models::{Amount, Consultation, ConsultationId, ConsultationStatus};
use crate::storage::Storage;

/// Service for consultation management
pub struct ConsultationService<'a> {
    storage: &'a Storage,
}

/// Input for creating a new consultation
#[derive(Debug, Clone)]
pub struct CreateConsultationInput {
    pub patient_name: String,
    pub date: NaiveDate,
    pub content: String,
    pub quoted_amount: Option<Amount>,
}

impl<'a> ConsultationService<'a> {
    /// Create a new consultation service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new consultation
    pub fn create(&self, input: CreateConsultationInput) -> ChairsideResult<Consultation> {
        if input.patient_name.trim().is_empty() {
            return Err(ChairsideError::Validation(
                "Patient name must not be empty".into(),
            ));
        }

        let mut consultation = Consultation::new(input.patient_name, input.date);
        consultation.content = input.content;
        consultation.quoted_amount = input.quoted_amount;

        self.storage.consultations.upsert(consultation.clone())?;
        self.storage.consultations.save()?;

        self.storage.log_create(
            EntityType::Consultation,
            consultation.id.to_string(),
            Some(consultation.patient_name.clone()),
            &consultation,
        )?;

        Ok(consultation)
    }

    /// Update a consultation's status
    pub fn set_status(
        &self,
        id: ConsultationId,
        status: ConsultationStatus,
    ) -> ChairsideResult<Consultation> {
        let old = self
            .storage
            .consultations
            .get(id)?
            .ok_or_else(|| ChairsideError::consultation_not_found(id.to_string()))?;

        let mut updated = old.clone();
        updated.status = status;
        updated.touch();

        self.storage.consultations.upsert(updated.clone())?;
        self.storage.consultations.save()?;

        self.storage.log_update(
            EntityType::Consultation,
            updated.id.to_string(),
            Some(updated.patient_name.clone()),
            &old,
            &updated,
            Some(format!("status: {} -> {}", old.status, updated.status)),
        )?;

        Ok(updated)
    }

    /// Delete a consultation, returning the removed instance
    pub fn delete(&self, id: ConsultationId) -> ChairsideResult<Consultation> {
        let old = self
            .storage
            .consultations
            .get(id)?
            .ok_or_else(|| ChairsideError::consultation_not_found(id.to_string()))?;

        self.storage.consultations.delete(id)?;
        self.storage.consultations.save()?;

        self.storage.log_delete(
            EntityType::Consultation,
            old.id.to_string(),
            Some(old.patient_name.clone()),
            &old,
        )?;

        Ok(old)
    }

    /// Get a consultation by ID
    pub fn get(&self, id: ConsultationId) -> ChairsideResult<Option<Consultation>> {
        self.storage.consultations.get(id)
    }

    /// List all consultations, newest first
    pub fn list(&self) -> ChairsideResult<Vec<Consultation>> {
        self.storage.consultations.get_all()
    }
}
