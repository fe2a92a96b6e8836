use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::completion::{CompletionReport, ProgressBand};
use super::domain::{CaregiverId, CaregiverProfile, ShiftPreference, Skill};

/// Repository record pairing the raw fields with the score computed at save time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub caregiver_id: CaregiverId,
    pub profile: CaregiverProfile,
    pub completion: CompletionReport,
    pub updated_at: DateTime<Utc>,
    /// Set once the `profile_verified` notification for the current verified stretch went out.
    #[serde(default)]
    pub verification_notified: bool,
}

impl ProfileRecord {
    pub fn status_view(&self) -> ProfileStatusView {
        ProfileStatusView {
            caregiver_id: self.caregiver_id.clone(),
            name: self.profile.name.clone(),
            location: self.profile.location.clone(),
            completion_percentage: self.completion.percentage,
            progress_band: self.completion.progress_band(),
            is_verified: self.completion.is_verified,
            missing_fields: self.completion.missing_fields.clone(),
            updated_at: self.updated_at,
        }
    }
}

/// Filter applied when employers browse saved caregiver profiles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProfileSearch {
    pub location: Option<String>,
    #[serde(deserialize_with = "blank_tag_as_none")]
    pub skill: Option<Skill>,
    #[serde(deserialize_with = "blank_tag_as_none")]
    pub shift: Option<ShiftPreference>,
    pub verified_only: bool,
}

/// Dashboard selects submit `skill=` for "any"; treat that like an absent filter.
fn blank_tag_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| value.parse::<T>().map_err(serde::de::Error::custom))
        .transpose()
}

impl ProfileSearch {
    pub fn matches(&self, record: &ProfileRecord) -> bool {
        if self.verified_only && !record.completion.is_verified {
            return false;
        }

        if let Some(location) = self.location.as_deref().map(str::trim) {
            let stored = record.profile.location.as_deref().unwrap_or_default();
            if !location.is_empty() && !stored.trim().eq_ignore_ascii_case(location) {
                return false;
            }
        }

        if let Some(skill) = self.skill {
            if !record.profile.skills.contains(&skill) {
                return false;
            }
        }

        if let Some(shift) = self.shift {
            if !record.profile.shift_preferences.contains(&shift) {
                return false;
            }
        }

        true
    }
}

/// Storage abstraction over the hosted profile table.
pub trait ProfileRepository: Send + Sync {
    /// Insert or replace the record keyed by its caregiver id.
    fn upsert(&self, record: ProfileRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &CaregiverId) -> Result<Option<ProfileRecord>, RepositoryError>;
    fn search(&self, filter: &ProfileSearch) -> Result<Vec<ProfileRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook for the serverless e-mail functions.
pub trait NotificationPublisher: Send + Sync {
    fn publish(&self, notification: ProfileNotification) -> Result<(), NotificationError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileNotification {
    pub template: String,
    pub caregiver_id: CaregiverId,
    pub details: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Public projection rendered by the dashboard and the employer search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileStatusView {
    pub caregiver_id: CaregiverId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub completion_percentage: u8,
    pub progress_band: ProgressBand,
    pub is_verified: bool,
    pub missing_fields: Vec<String>,
    pub updated_at: DateTime<Utc>,
}
