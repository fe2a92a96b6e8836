use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::profiles::domain::{CaregiverId, CaregiverProfile, ShiftPreference, Skill};
use crate::profiles::repository::{
    NotificationError, NotificationPublisher, ProfileNotification, ProfileRecord,
    ProfileRepository, ProfileSearch, RepositoryError,
};
use crate::profiles::{profile_router, CaregiverProfileService};

pub(super) fn required_only_profile() -> CaregiverProfile {
    CaregiverProfile {
        name: Some("Asha".to_string()),
        phone: Some("01711223344".to_string()),
        location: Some("Dhaka".to_string()),
        gender: Some("female".to_string()),
        age: Some(29),
        ..CaregiverProfile::default()
    }
}

pub(super) fn full_profile() -> CaregiverProfile {
    CaregiverProfile {
        height: Some("5'3\"".to_string()),
        weight: Some(54),
        marital_status: Some("married".to_string()),
        nid_number: Some("1990261234567".to_string()),
        shift_preferences: BTreeSet::from([ShiftPreference::Day, ShiftPreference::LiveIn]),
        skills: BTreeSet::from([Skill::ElderlyCare, Skill::MedicationManagement]),
        cv_url: Some("cvs/asha.pdf".to_string()),
        certificate_url: Some("certificates/asha-nursing.pdf".to_string()),
        ..required_only_profile()
    }
}

pub(super) fn verified_profile() -> CaregiverProfile {
    CaregiverProfile {
        certificate_url: Some("certificates/asha-nursing.pdf".to_string()),
        ..required_only_profile()
    }
}

pub(super) fn caregiver(id: &str) -> CaregiverId {
    CaregiverId(id.to_string())
}

pub(super) fn build_service() -> (
    CaregiverProfileService<MemoryRepository, MemoryNotifications>,
    Arc<MemoryRepository>,
    Arc<MemoryNotifications>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let notifications = Arc::new(MemoryNotifications::default());
    let service = CaregiverProfileService::new(repository.clone(), notifications.clone(), 50);
    (service, repository, notifications)
}

pub(super) fn profile_router_with_service(
    service: CaregiverProfileService<MemoryRepository, MemoryNotifications>,
) -> axum::Router {
    profile_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<HashMap<CaregiverId, ProfileRecord>>>,
}

impl MemoryRepository {
    pub(super) fn fetch_all(&self) -> Vec<ProfileRecord> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        guard.values().cloned().collect()
    }
}

impl ProfileRepository for MemoryRepository {
    fn upsert(&self, record: ProfileRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.caregiver_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &CaregiverId) -> Result<Option<ProfileRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn search(&self, filter: &ProfileSearch) -> Result<Vec<ProfileRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableRepository;

impl ProfileRepository for UnavailableRepository {
    fn upsert(&self, _record: ProfileRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &CaregiverId) -> Result<Option<ProfileRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn search(&self, _filter: &ProfileSearch) -> Result<Vec<ProfileRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifications {
    events: Arc<Mutex<Vec<ProfileNotification>>>,
}

impl MemoryNotifications {
    pub(super) fn events(&self) -> Vec<ProfileNotification> {
        self.events.lock().expect("notification mutex poisoned").clone()
    }
}

impl NotificationPublisher for MemoryNotifications {
    fn publish(&self, notification: ProfileNotification) -> Result<(), NotificationError> {
        self.events
            .lock()
            .expect("notification mutex poisoned")
            .push(notification);
        Ok(())
    }
}

pub(super) struct OfflineNotifications;

impl NotificationPublisher for OfflineNotifications {
    fn publish(&self, _notification: ProfileNotification) -> Result<(), NotificationError> {
        Err(NotificationError::Transport("smtp relay offline".to_string()))
    }
}

/// Fails the first `failures` publishes, then delivers.
#[derive(Default)]
pub(super) struct FlakyNotifications {
    failures: usize,
    attempts: Mutex<usize>,
    delivered: Mutex<Vec<ProfileNotification>>,
}

impl FlakyNotifications {
    pub(super) fn failing_first(failures: usize) -> Self {
        Self {
            failures,
            ..Self::default()
        }
    }

    pub(super) fn attempts(&self) -> usize {
        *self.attempts.lock().expect("attempt mutex poisoned")
    }

    pub(super) fn delivered(&self) -> Vec<ProfileNotification> {
        self.delivered.lock().expect("delivery mutex poisoned").clone()
    }
}

impl NotificationPublisher for FlakyNotifications {
    fn publish(&self, notification: ProfileNotification) -> Result<(), NotificationError> {
        let mut attempts = self.attempts.lock().expect("attempt mutex poisoned");
        *attempts += 1;
        if *attempts <= self.failures {
            return Err(NotificationError::Transport("smtp relay timed out".to_string()));
        }
        self.delivered
            .lock()
            .expect("delivery mutex poisoned")
            .push(notification);
        Ok(())
    }
}
