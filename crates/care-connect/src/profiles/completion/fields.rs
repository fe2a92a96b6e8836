use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::super::domain::CaregiverProfile;

/// Presence predicate shared by every scored attribute.
///
/// Strings must be non-empty, collections must hold at least one element, and numbers only
/// need to be present (`Some(0)` counts).
pub(crate) trait Filled {
    fn is_filled(&self) -> bool;
}

impl Filled for Option<String> {
    fn is_filled(&self) -> bool {
        self.as_deref().is_some_and(|value| !value.is_empty())
    }
}

impl Filled for Option<u32> {
    fn is_filled(&self) -> bool {
        self.is_some()
    }
}

impl<T> Filled for BTreeSet<T> {
    fn is_filled(&self) -> bool {
        !self.is_empty()
    }
}

/// How a scored field participates in the completion model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldTier {
    /// Gates verification and is reported when missing.
    Required,
    /// Physical and identity extras that only lift the percentage.
    Bonus,
    Capability,
    Document,
}

/// Every attribute counted in the completion denominator, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Name,
    Phone,
    Location,
    Gender,
    Age,
    Height,
    Weight,
    MaritalStatus,
    NidNumber,
    ShiftPreferences,
    Skills,
    CvUrl,
    CertificateUrl,
}

impl ProfileField {
    pub const ALL: [ProfileField; 13] = [
        ProfileField::Name,
        ProfileField::Phone,
        ProfileField::Location,
        ProfileField::Gender,
        ProfileField::Age,
        ProfileField::Height,
        ProfileField::Weight,
        ProfileField::MaritalStatus,
        ProfileField::NidNumber,
        ProfileField::ShiftPreferences,
        ProfileField::Skills,
        ProfileField::CvUrl,
        ProfileField::CertificateUrl,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ProfileField::Name => "Full Name",
            ProfileField::Phone => "Phone Number",
            ProfileField::Location => "Location",
            ProfileField::Gender => "Gender",
            ProfileField::Age => "Age",
            ProfileField::Height => "Height",
            ProfileField::Weight => "Weight",
            ProfileField::MaritalStatus => "Marital Status",
            ProfileField::NidNumber => "NID Number",
            ProfileField::ShiftPreferences => "Shift Preferences",
            ProfileField::Skills => "Skills",
            ProfileField::CvUrl => "CV",
            ProfileField::CertificateUrl => "Certificate",
        }
    }

    pub const fn tier(self) -> FieldTier {
        match self {
            ProfileField::Name
            | ProfileField::Phone
            | ProfileField::Location
            | ProfileField::Gender
            | ProfileField::Age => FieldTier::Required,
            ProfileField::Height
            | ProfileField::Weight
            | ProfileField::MaritalStatus
            | ProfileField::NidNumber => FieldTier::Bonus,
            ProfileField::ShiftPreferences | ProfileField::Skills => FieldTier::Capability,
            ProfileField::CvUrl | ProfileField::CertificateUrl => FieldTier::Document,
        }
    }

    pub const fn is_required(self) -> bool {
        matches!(self.tier(), FieldTier::Required)
    }

    /// Required fields plus the certificate reference.
    pub const fn gates_verification(self) -> bool {
        self.is_required() || matches!(self, ProfileField::CertificateUrl)
    }

    pub(crate) fn is_filled_in(self, profile: &CaregiverProfile) -> bool {
        match self {
            ProfileField::Name => profile.name.is_filled(),
            ProfileField::Phone => profile.phone.is_filled(),
            ProfileField::Location => profile.location.is_filled(),
            ProfileField::Gender => profile.gender.is_filled(),
            ProfileField::Age => profile.age.is_filled(),
            ProfileField::Height => profile.height.is_filled(),
            ProfileField::Weight => profile.weight.is_filled(),
            ProfileField::MaritalStatus => profile.marital_status.is_filled(),
            ProfileField::NidNumber => profile.nid_number.is_filled(),
            ProfileField::ShiftPreferences => profile.shift_preferences.is_filled(),
            ProfileField::Skills => profile.skills.is_filled(),
            ProfileField::CvUrl => profile.cv_url.is_filled(),
            ProfileField::CertificateUrl => profile.certificate_url.is_filled(),
        }
    }
}
