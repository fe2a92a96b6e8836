mod parser;

use std::io::Read;
use std::path::Path;

use tracing::debug;

use super::domain::{CaregiverId, CaregiverProfile};

#[derive(Debug)]
pub enum ProfileImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRow { row: usize, reason: String },
}

impl std::fmt::Display for ProfileImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileImportError::Io(err) => write!(f, "failed to read profile export: {}", err),
            ProfileImportError::Csv(err) => write!(f, "invalid profile CSV data: {}", err),
            ProfileImportError::InvalidRow { row, reason } => {
                write!(f, "profile export row {}: {}", row, reason)
            }
        }
    }
}

impl std::error::Error for ProfileImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProfileImportError::Io(err) => Some(err),
            ProfileImportError::Csv(err) => Some(err),
            ProfileImportError::InvalidRow { .. } => None,
        }
    }
}

impl From<std::io::Error> for ProfileImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ProfileImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// A caregiver row converted into the scoring model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedProfile {
    pub caregiver_id: CaregiverId,
    pub profile: CaregiverProfile,
}

/// Reads profile exports so completion can be recomputed in bulk.
pub struct ProfileCsvImporter;

impl ProfileCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ImportedProfile>, ProfileImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ImportedProfile>, ProfileImportError> {
        let mut imported = Vec::new();

        for (index, row) in parser::parse_rows(reader).enumerate() {
            let (caregiver_id, profile) = row?
                .into_profile()
                .map_err(|reason| ProfileImportError::InvalidRow {
                    row: index + 1,
                    reason,
                })?;
            imported.push(ImportedProfile {
                caregiver_id,
                profile,
            });
        }

        debug!(rows = imported.len(), "profile export parsed");
        Ok(imported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::domain::{ShiftPreference, Skill};
    use std::io::Cursor;

    const HEADER: &str = "caregiver_id,name,phone,location,gender,age,height,weight,marital_status,nid_number,shift_preferences,skills,cv_url,certificate_url\n";

    #[test]
    fn importer_maps_columns_and_blank_cells() {
        let csv = format!(
            "{HEADER}cg-1,Asha Begum,01711000000,Dhaka,female,29,,,,,day;night,elderly_care,,\n"
        );
        let imported = ProfileCsvImporter::from_reader(Cursor::new(csv)).expect("import succeeds");
        assert_eq!(imported.len(), 1);

        let row = &imported[0];
        assert_eq!(row.caregiver_id, CaregiverId("cg-1".to_string()));
        assert_eq!(row.profile.age, Some(29));
        assert!(row.profile.height.is_none());
        assert!(row.profile.weight.is_none());
        assert!(row.profile.cv_url.is_none());
        assert!(row.profile.shift_preferences.contains(&ShiftPreference::Night));
        assert!(row.profile.skills.contains(&Skill::ElderlyCare));
    }

    #[test]
    fn importer_reports_row_for_unknown_tags() {
        let csv = format!(
            "{HEADER}cg-1,A,,,,,,,,,,,,\ncg-2,B,,,,,,,,,,knitting,,\n"
        );
        let error = ProfileCsvImporter::from_reader(Cursor::new(csv)).expect_err("bad tag");
        match error {
            ProfileImportError::InvalidRow { row, reason } => {
                assert_eq!(row, 2);
                assert!(reason.contains("knitting"));
            }
            other => panic!("expected invalid row, got {other:?}"),
        }
    }

    #[test]
    fn importer_rejects_blank_caregiver_id() {
        let csv = format!("{HEADER} ,A,,,,,,,,,,,,\n");
        let error = ProfileCsvImporter::from_reader(Cursor::new(csv)).expect_err("blank id");
        assert!(error.to_string().contains("row 1: caregiver_id is blank"));
    }

    #[test]
    fn importer_rejects_reserved_caregiver_id() {
        let csv = format!("{HEADER}completion,A,,,,,,,,,,,,\n");
        let error = ProfileCsvImporter::from_reader(Cursor::new(csv)).expect_err("reserved id");
        assert!(error
            .to_string()
            .contains("row 1: caregiver id 'completion' is reserved"));
    }

    #[test]
    fn importer_from_path_propagates_io_errors() {
        let error = ProfileCsvImporter::from_path("./does-not-exist.csv")
            .expect_err("expected io error");
        match error {
            ProfileImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
