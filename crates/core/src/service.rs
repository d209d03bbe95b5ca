//! Patient query and mutation service.
//!
//! [`PatientService`] owns the in-memory mapping of patients and the [`JsonFileStore`] that
//! mirrors it. It is created once at startup, shared behind an `Arc`, and dropped at
//! shutdown.
//!
//! ## Consistency
//!
//! Every mutation holds the write lock across both the in-memory change and the file
//! rewrite. The change is applied to a copy of the mapping, the copy is written to disk,
//! and only then does it replace the live mapping. A failed write therefore leaves memory
//! and disk as they were. Reads share the lock and never see a half-applied change.
//!
//! Ids are compared without regard to ASCII case everywhere, including the duplicate check
//! on create.

use crate::config::CoreConfig;
use crate::error::{PatientError, PatientResult};
use crate::patient::{PatientDraft, PatientRecord};
use crate::sort::{self, SortField, SortOrder};
use crate::store::JsonFileStore;
use api_shared::{CreatePatientReq, Patient, UpdatePatientReq};
use indexmap::IndexMap;
use patient_types::PatientId;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

type Patients = IndexMap<PatientId, PatientRecord>;

/// Patients keyed by id, in insertion order, as returned by [`PatientService::list_all`].
pub type PatientMap = IndexMap<PatientId, Patient>;

#[derive(Debug)]
pub struct PatientService {
    store: JsonFileStore,
    patients: RwLock<Patients>,
}

impl PatientService {
    /// Opens the store named by `cfg` and loads every patient into memory.
    ///
    /// # Errors
    ///
    /// See [`PatientService::with_store`].
    pub fn open(cfg: &CoreConfig) -> PatientResult<Self> {
        Self::with_store(JsonFileStore::new(cfg.patient_data_file()))
    }

    /// Loads and validates every record held by `store`.
    ///
    /// # Errors
    ///
    /// Returns `PatientError` if:
    /// - the file cannot be read or parsed
    /// - a stored record fails validation ([`PatientError::InvalidStoredRecord`])
    /// - two stored ids differ only by case ([`PatientError::DuplicateStoredId`])
    pub fn with_store(store: JsonFileStore) -> PatientResult<Self> {
        let raw = store.load()?;

        let mut patients = Patients::with_capacity(raw.len());
        for (key, mut draft) in raw {
            draft.id = Some(key.clone());
            let (id, record) = draft
                .validate()
                .map_err(|errors| PatientError::InvalidStoredRecord { id: key, errors })?;

            if let Some(existing) = patients.keys().find(|k| k.same_patient(&id)) {
                return Err(PatientError::DuplicateStoredId {
                    first: existing.to_string(),
                    second: id.to_string(),
                });
            }
            patients.insert(id, record);
        }

        tracing::info!(
            "loaded {} patients from {}",
            patients.len(),
            store.path().display()
        );

        Ok(Self {
            store,
            patients: RwLock::new(patients),
        })
    }

    fn read(&self) -> PatientResult<RwLockReadGuard<'_, Patients>> {
        self.patients.read().map_err(|_| PatientError::LockPoisoned)
    }

    fn write(&self) -> PatientResult<RwLockWriteGuard<'_, Patients>> {
        self.patients.write().map_err(|_| PatientError::LockPoisoned)
    }

    fn position(patients: &Patients, id: &str) -> Option<usize> {
        patients.keys().position(|k| k.matches(id))
    }

    /// Number of patients currently held.
    pub fn count(&self) -> PatientResult<usize> {
        Ok(self.read()?.len())
    }

    /// Returns every patient with derived fields, in insertion order.
    pub fn list_all(&self) -> PatientResult<PatientMap> {
        let patients = self.read()?;
        Ok(patients
            .iter()
            .map(|(id, record)| (id.clone(), record.to_view(id)))
            .collect())
    }

    /// Looks up a single patient, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::NotFound`] if no patient matches `id`.
    pub fn get(&self, id: &str) -> PatientResult<Patient> {
        let patients = self.read()?;
        let index =
            Self::position(&patients, id).ok_or_else(|| PatientError::NotFound(id.trim().into()))?;
        let (key, record) = patients
            .get_index(index)
            .ok_or_else(|| PatientError::NotFound(id.trim().into()))?;
        Ok(record.to_view(key))
    }

    /// Adds a new patient and persists the store.
    ///
    /// # Errors
    ///
    /// Returns `PatientError` if:
    /// - a patient with the same id exists, ignoring case ([`PatientError::Conflict`])
    /// - any field fails validation ([`PatientError::Validation`])
    /// - the store cannot be written
    pub fn create(&self, req: CreatePatientReq) -> PatientResult<Patient> {
        let mut patients = self.write()?;

        if let Some(raw_id) = req.id.as_deref() {
            if let Some(index) = Self::position(&patients, raw_id) {
                let existing = patients
                    .get_index(index)
                    .map(|(k, _)| k.to_string())
                    .unwrap_or_default();
                return Err(PatientError::Conflict(existing));
            }
        }

        let (id, record) = PatientDraft::from(req)
            .validate()
            .map_err(PatientError::Validation)?;

        let mut next = patients.clone();
        next.insert(id.clone(), record.clone());
        self.store.save(&next)?;
        *patients = next;

        tracing::info!("created patient {}", id);
        Ok(record.to_view(&id))
    }

    /// Merges the supplied fields onto an existing patient and persists the store.
    ///
    /// The stored id keeps its original spelling.
    ///
    /// # Errors
    ///
    /// Returns `PatientError` if:
    /// - no patient matches `id` ([`PatientError::NotFound`])
    /// - the merged record fails validation ([`PatientError::Validation`])
    /// - the store cannot be written
    pub fn update(&self, id: &str, update: UpdatePatientReq) -> PatientResult<Patient> {
        let mut patients = self.write()?;

        let index =
            Self::position(&patients, id).ok_or_else(|| PatientError::NotFound(id.trim().into()))?;
        let (key, existing) = patients
            .get_index(index)
            .ok_or_else(|| PatientError::NotFound(id.trim().into()))?;
        let key = key.clone();

        let mut draft = existing.to_draft(&key);
        draft.merge(update);
        let (_, record) = draft.validate().map_err(PatientError::Validation)?;

        let mut next = patients.clone();
        if let Some(slot) = next.get_mut(&key) {
            *slot = record.clone();
        }
        self.store.save(&next)?;
        *patients = next;

        tracing::info!("updated patient {}", key);
        Ok(record.to_view(&key))
    }

    /// Removes a patient and persists the store.
    ///
    /// # Returns
    ///
    /// The id of the removed patient, as it was stored.
    ///
    /// # Errors
    ///
    /// Returns `PatientError` if:
    /// - no patient matches `id` ([`PatientError::NotFound`])
    /// - the store cannot be written
    pub fn delete(&self, id: &str) -> PatientResult<PatientId> {
        let mut patients = self.write()?;

        let index =
            Self::position(&patients, id).ok_or_else(|| PatientError::NotFound(id.trim().into()))?;

        let mut next = patients.clone();
        let (key, _) = next
            .shift_remove_index(index)
            .ok_or_else(|| PatientError::NotFound(id.trim().into()))?;
        self.store.save(&next)?;
        *patients = next;

        tracing::info!("deleted patient {}", key);
        Ok(key)
    }

    /// Returns every patient ordered by `field`.
    ///
    /// Patients with equal keys keep their insertion order.
    pub fn sort(&self, field: SortField, order: SortOrder) -> PatientResult<Vec<Patient>> {
        let patients = self.read()?;

        let mut entries: Vec<(&PatientId, &PatientRecord)> = patients.iter().collect();
        sort::sort_entries(&mut entries, field, order);

        Ok(entries
            .into_iter()
            .map(|(id, record)| record.to_view(id))
            .collect())
    }
}
