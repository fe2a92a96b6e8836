mod fields;

pub use fields::{FieldTier, ProfileField};

use super::domain::CaregiverProfile;
use serde::{Deserialize, Serialize};

/// Stateless scorer deriving completion and verification from a profile snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileCompletionScorer;

impl ProfileCompletionScorer {
    pub fn new() -> Self {
        Self
    }

    /// Percentage uses round-half-up over the full scored-field table.
    pub fn score(&self, profile: &CaregiverProfile) -> CompletionReport {
        let mut filled_count: u32 = 0;
        let mut missing_fields = Vec::new();
        let mut is_verified = true;

        for field in ProfileField::ALL {
            let filled = field.is_filled_in(profile);
            if filled {
                filled_count += 1;
            } else {
                if field.is_required() {
                    missing_fields.push(field.label().to_string());
                }
                if field.gates_verification() {
                    is_verified = false;
                }
            }
        }

        CompletionReport {
            percentage: rounded_percentage(filled_count, ProfileField::ALL.len() as u32),
            is_verified,
            missing_fields,
        }
    }

    pub fn breakdown(&self, profile: &CaregiverProfile) -> Vec<FieldStatus> {
        ProfileField::ALL
            .into_iter()
            .map(|field| FieldStatus {
                field,
                label: field.label(),
                tier: field.tier(),
                filled: field.is_filled_in(profile),
            })
            .collect()
    }
}

fn rounded_percentage(filled: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let rounded = (200 * filled + total) / (2 * total);
    rounded.min(100) as u8
}

/// Result handed to the profile editor and dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionReport {
    pub percentage: u8,
    pub is_verified: bool,
    pub missing_fields: Vec<String>,
}

impl CompletionReport {
    pub fn progress_band(&self) -> ProgressBand {
        ProgressBand::for_percentage(self.percentage)
    }
}

/// Coarse bucket used to color the dashboard progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressBand {
    Starter,
    Developing,
    Complete,
}

impl ProgressBand {
    pub const fn for_percentage(percentage: u8) -> Self {
        match percentage {
            0..=39 => ProgressBand::Starter,
            40..=79 => ProgressBand::Developing,
            _ => ProgressBand::Complete,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ProgressBand::Starter => "starter",
            ProgressBand::Developing => "developing",
            ProgressBand::Complete => "complete",
        }
    }
}

/// Per-field fill state for guidance panels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldStatus {
    pub field: ProfileField,
    pub label: &'static str,
    pub tier: FieldTier,
    pub filled: bool,
}
