//! Consultation repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{ChairsideError, ChairsideResult};
use crate::models::{Consultation, ConsultationId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable consultation file structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ConsultationData {
    consultations: Vec<Consultation>,
}

/// Repository for consultation persistence
pub struct ConsultationRepository {
    path: PathBuf,
    data: RwLock<HashMap<ConsultationId, Consultation>>,
}

impl ConsultationRepository {
    /// Create a new consultation repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load consultations from disk
    pub fn load(&self) -> ChairsideResult<()> {
        let file_data: ConsultationData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| ChairsideError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for consultation in file_data.consultations {
            data.insert(consultation.id, consultation);
        }

        Ok(())
    }

    /// Save consultations to disk
    pub fn save(&self) -> ChairsideResult<()> {
        let data = self
            .data
            .read()
            .map_err(|e| ChairsideError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut consultations: Vec<_> = data.values().cloned().collect();
        consultations.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));

        write_json_atomic(&self.path, &ConsultationData { consultations })
    }

    /// Get a consultation by ID
    pub fn get(&self, id: ConsultationId) -> ChairsideResult<Option<Consultation>> {
        let data = self
            .data
            .read()
            .map_err(|e| ChairsideError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all consultations, newest first
    pub fn get_all(&self) -> ChairsideResult<Vec<Consultation>> {
        let data = self
            .data
            .read()
            .map_err(|e| ChairsideError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut consultations: Vec<_> = data.values().cloned().collect();
        consultations.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(consultations)
    }

    /// Insert or update a consultation
    pub fn upsert(&self, consultation: Consultation) -> ChairsideResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| ChairsideError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(consultation.id, consultation);
        Ok(())
    }

    /// Delete a consultation
    pub fn delete(&self, id: ConsultationId) -> ChairsideResult<bool> {
        let mut data = self
            .data
            .write()
            .map_err(|e| ChairsideError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }

    /// Count consultations
    pub fn count(&self) -> ChairsideResult<usize> {
        let data = self
            .data
            .read()
            .map_err(|e| ChairsideError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("consultations.json");
        let repo = ConsultationRepository::new(path.clone());
        repo.load().unwrap();

        let c = Consultation::new("정하윤", NaiveDate::from_ymd_opt(2024, 4, 3).unwrap());
        let id = c.id;
        repo.upsert(c).unwrap();
        repo.save().unwrap();

        let repo2 = ConsultationRepository::new(path);
        repo2.load().unwrap();
        assert!(repo2.get(id).unwrap().is_some());
    }
}
