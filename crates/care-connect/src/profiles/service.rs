use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::completion::{CompletionReport, ProfileCompletionScorer};
use super::domain::{CaregiverId, CaregiverIdError, CaregiverProfile};
use super::repository::{
    NotificationPublisher, ProfileNotification, ProfileRecord, ProfileRepository, ProfileSearch,
    RepositoryError,
};

pub(crate) const VERIFIED_TEMPLATE: &str = "profile_verified";

/// Service composing the completion scorer, repository, and notification hook.
pub struct CaregiverProfileService<R, N> {
    scorer: ProfileCompletionScorer,
    repository: Arc<R>,
    notifications: Arc<N>,
    search_limit: usize,
}

impl<R, N> CaregiverProfileService<R, N>
where
    R: ProfileRepository + 'static,
    N: NotificationPublisher + 'static,
{
    pub fn new(repository: Arc<R>, notifications: Arc<N>, search_limit: usize) -> Self {
        Self {
            scorer: ProfileCompletionScorer::new(),
            repository,
            notifications,
            search_limit: search_limit.max(1),
        }
    }

    pub fn score(&self, profile: &CaregiverProfile) -> CompletionReport {
        self.scorer.score(profile)
    }

    /// Re-score and persist a profile, replacing whatever was stored before.
    ///
    /// The `profile_verified` notification is attempted after the record is stored. A failed
    /// publish is logged and leaves `verification_notified` unset, so the next save retries it.
    pub fn save(
        &self,
        caregiver_id: CaregiverId,
        profile: CaregiverProfile,
    ) -> Result<ProfileRecord, ProfileServiceError> {
        let caregiver_id = CaregiverId::parse(caregiver_id.as_str())?;
        let completion = self.scorer.score(&profile);
        let previous = self.repository.fetch(&caregiver_id)?;
        let verification_notified = completion.is_verified
            && previous
                .as_ref()
                .is_some_and(|stored| stored.verification_notified);

        let mut record = ProfileRecord {
            caregiver_id,
            profile,
            completion,
            updated_at: Utc::now(),
            verification_notified,
        };
        self.repository.upsert(record.clone())?;

        info!(
            caregiver_id = %record.caregiver_id.0,
            percentage = record.completion.percentage,
            verified = record.completion.is_verified,
            "caregiver profile saved"
        );

        if record.completion.is_verified && !record.verification_notified {
            match self.notifications.publish(verified_notification(&record)) {
                Ok(()) => {
                    record.verification_notified = true;
                    self.repository.upsert(record.clone())?;
                }
                Err(error) => warn!(
                    caregiver_id = %record.caregiver_id.0,
                    %error,
                    "verification notification failed; will retry on next save"
                ),
            }
        }

        Ok(record)
    }

    pub fn get(&self, caregiver_id: &CaregiverId) -> Result<ProfileRecord, ProfileServiceError> {
        let caregiver_id = CaregiverId::parse(caregiver_id.as_str())?;
        let record = self
            .repository
            .fetch(&caregiver_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Matching profiles, most complete first, capped at the configured page size.
    pub fn search(
        &self,
        filter: &ProfileSearch,
    ) -> Result<Vec<ProfileRecord>, ProfileServiceError> {
        let mut records = self.repository.search(filter)?;
        records.retain(|record| filter.matches(record));
        records.sort_by(|left, right| {
            right
                .completion
                .percentage
                .cmp(&left.completion.percentage)
                .then_with(|| left.caregiver_id.cmp(&right.caregiver_id))
        });
        records.truncate(self.search_limit);
        debug!(results = records.len(), "caregiver search completed");
        Ok(records)
    }
}

fn verified_notification(record: &ProfileRecord) -> ProfileNotification {
    let mut details = BTreeMap::new();
    details.insert(
        "percentage".to_string(),
        record.completion.percentage.to_string(),
    );
    if let Some(name) = &record.profile.name {
        details.insert("name".to_string(), name.clone());
    }
    ProfileNotification {
        template: VERIFIED_TEMPLATE.to_string(),
        caregiver_id: record.caregiver_id.clone(),
        details,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProfileServiceError {
    #[error(transparent)]
    InvalidCaregiverId(#[from] CaregiverIdError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
