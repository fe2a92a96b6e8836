use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for caregiver accounts issued by the hosted auth provider.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CaregiverId(pub String);

impl CaregiverId {
    /// Path segments already taken by static routes under `/api/v1/profiles/`.
    pub const RESERVED: [&'static str; 1] = ["completion"];

    /// Trim surrounding whitespace so ids from the API and the CSV export agree.
    pub fn parse(raw: &str) -> Result<Self, CaregiverIdError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CaregiverIdError::Blank);
        }
        if Self::RESERVED
            .iter()
            .any(|reserved| reserved.eq_ignore_ascii_case(trimmed))
        {
            return Err(CaregiverIdError::Reserved(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaregiverIdError {
    #[error("caregiver id must not be blank")]
    Blank,
    #[error("caregiver id '{0}' is reserved")]
    Reserved(String),
}

/// Snapshot of the caregiver-entered fields at the time of a save.
///
/// Every attribute is optional so a freshly created account deserializes from `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaregiverProfile {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub gender: Option<String>,
    pub age: Option<u32>,
    pub height: Option<String>,
    pub weight: Option<u32>,
    pub marital_status: Option<String>,
    pub nid_number: Option<String>,
    pub shift_preferences: BTreeSet<ShiftPreference>,
    pub skills: BTreeSet<Skill>,
    pub cv_url: Option<String>,
    pub certificate_url: Option<String>,
}

/// Working patterns a caregiver is willing to accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftPreference {
    Day,
    Night,
    FullDay,
    PartTime,
    LiveIn,
}

impl ShiftPreference {
    pub const ALL: [ShiftPreference; 5] = [
        ShiftPreference::Day,
        ShiftPreference::Night,
        ShiftPreference::FullDay,
        ShiftPreference::PartTime,
        ShiftPreference::LiveIn,
    ];

    pub const fn tag(self) -> &'static str {
        match self {
            ShiftPreference::Day => "day",
            ShiftPreference::Night => "night",
            ShiftPreference::FullDay => "full_day",
            ShiftPreference::PartTime => "part_time",
            ShiftPreference::LiveIn => "live_in",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ShiftPreference::Day => "Day Shift",
            ShiftPreference::Night => "Night Shift",
            ShiftPreference::FullDay => "24 Hours",
            ShiftPreference::PartTime => "Part Time",
            ShiftPreference::LiveIn => "Live-in",
        }
    }
}

/// Care skills advertised to employers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    ElderlyCare,
    PatientCare,
    BabyCare,
    DisabilitySupport,
    PostOperativeCare,
    DementiaCare,
    MedicationManagement,
    FirstAid,
    PhysiotherapyAssistance,
    Cooking,
    Housekeeping,
}

impl Skill {
    pub const ALL: [Skill; 11] = [
        Skill::ElderlyCare,
        Skill::PatientCare,
        Skill::BabyCare,
        Skill::DisabilitySupport,
        Skill::PostOperativeCare,
        Skill::DementiaCare,
        Skill::MedicationManagement,
        Skill::FirstAid,
        Skill::PhysiotherapyAssistance,
        Skill::Cooking,
        Skill::Housekeeping,
    ];

    pub const fn tag(self) -> &'static str {
        match self {
            Skill::ElderlyCare => "elderly_care",
            Skill::PatientCare => "patient_care",
            Skill::BabyCare => "baby_care",
            Skill::DisabilitySupport => "disability_support",
            Skill::PostOperativeCare => "post_operative_care",
            Skill::DementiaCare => "dementia_care",
            Skill::MedicationManagement => "medication_management",
            Skill::FirstAid => "first_aid",
            Skill::PhysiotherapyAssistance => "physiotherapy_assistance",
            Skill::Cooking => "cooking",
            Skill::Housekeeping => "housekeeping",
        }
    }
}

/// Raised when a shift or skill tag does not match a known variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTag {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} tag '{}'", self.kind, self.value)
    }
}

impl std::error::Error for UnknownTag {}

impl FromStr for ShiftPreference {
    type Err = UnknownTag;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        ShiftPreference::ALL
            .into_iter()
            .find(|shift| shift.tag() == normalized)
            .ok_or_else(|| UnknownTag {
                kind: "shift",
                value: value.trim().to_string(),
            })
    }
}

impl FromStr for Skill {
    type Err = UnknownTag;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Skill::ALL
            .into_iter()
            .find(|skill| skill.tag() == normalized)
            .ok_or_else(|| UnknownTag {
                kind: "skill",
                value: value.trim().to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caregiver_ids_are_trimmed_and_checked() {
        assert_eq!(
            CaregiverId::parse("  cg-1 \t"),
            Ok(CaregiverId("cg-1".to_string()))
        );
        assert_eq!(CaregiverId::parse("   "), Err(CaregiverIdError::Blank));
        assert_eq!(
            CaregiverId::parse(" Completion "),
            Err(CaregiverIdError::Reserved("Completion".to_string()))
        );
    }

    #[test]
    fn tags_round_trip_through_from_str() {
        for shift in ShiftPreference::ALL {
            assert_eq!(shift.tag().parse::<ShiftPreference>(), Ok(shift));
        }
        for skill in Skill::ALL {
            assert_eq!(skill.tag().parse::<Skill>(), Ok(skill));
        }
    }

    #[test]
    fn from_str_tolerates_case_and_padding() {
        assert_eq!(" Night ".parse::<ShiftPreference>(), Ok(ShiftPreference::Night));
        assert_eq!("ELDERLY_CARE".parse::<Skill>(), Ok(Skill::ElderlyCare));
    }

    #[test]
    fn unknown_tags_are_reported() {
        let err = "weekend".parse::<ShiftPreference>().expect_err("unknown shift");
        assert_eq!(err.to_string(), "unknown shift tag 'weekend'");
    }

    #[test]
    fn empty_json_object_deserializes_to_blank_profile() {
        let profile: CaregiverProfile = serde_json::from_str("{}").expect("blank profile");
        assert_eq!(profile, CaregiverProfile::default());
    }

    #[test]
    fn serde_tags_match_tag_helpers() {
        let json = serde_json::to_string(&Skill::PostOperativeCare).expect("serialize");
        assert_eq!(json, format!("\"{}\"", Skill::PostOperativeCare.tag()));
        let json = serde_json::to_string(&ShiftPreference::FullDay).expect("serialize");
        assert_eq!(json, "\"full_day\"");
    }
}
