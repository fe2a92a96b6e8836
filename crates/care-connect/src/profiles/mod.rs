//! Caregiver profile completion scoring plus the save, lookup, and search flow around it.

pub mod completion;
pub mod domain;
pub mod import;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use completion::{
    CompletionReport, FieldStatus, FieldTier, ProfileCompletionScorer, ProfileField, ProgressBand,
};
pub use domain::{
    CaregiverId, CaregiverIdError, CaregiverProfile, ShiftPreference, Skill, UnknownTag,
};
pub use import::{ImportedProfile, ProfileCsvImporter, ProfileImportError};
pub use repository::{
    NotificationError, NotificationPublisher, ProfileNotification, ProfileRecord,
    ProfileRepository, ProfileSearch, ProfileStatusView, RepositoryError,
};
pub use router::profile_router;
pub use service::{CaregiverProfileService, ProfileServiceError};
