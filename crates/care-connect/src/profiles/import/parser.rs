use std::collections::BTreeSet;
use std::io::Read;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use super::super::domain::{CaregiverId, CaregiverIdError, CaregiverProfile};

/// One caregiver row from the hosted profile table export.
#[derive(Debug, Deserialize)]
pub(crate) struct ProfileRow {
    caregiver_id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    phone: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    location: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    gender: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    age: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    height: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    weight: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    marital_status: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    nid_number: Option<String>,
    #[serde(default)]
    shift_preferences: String,
    #[serde(default)]
    skills: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    cv_url: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    certificate_url: Option<String>,
}

impl ProfileRow {
    pub(crate) fn into_profile(self) -> Result<(CaregiverId, CaregiverProfile), String> {
        let caregiver_id = CaregiverId::parse(&self.caregiver_id).map_err(|err| match err {
            CaregiverIdError::Blank => "caregiver_id is blank".to_string(),
            other => other.to_string(),
        })?;

        let profile = CaregiverProfile {
            name: self.name,
            phone: self.phone,
            location: self.location,
            gender: self.gender,
            age: parse_number("age", self.age.as_deref())?,
            height: self.height,
            weight: parse_number("weight", self.weight.as_deref())?,
            marital_status: self.marital_status,
            nid_number: self.nid_number,
            shift_preferences: parse_tags(&self.shift_preferences)?,
            skills: parse_tags(&self.skills)?,
            cv_url: self.cv_url,
            certificate_url: self.certificate_url,
        };

        Ok((caregiver_id, profile))
    }
}

pub(crate) fn parse_rows<R: Read>(
    reader: R,
) -> impl Iterator<Item = Result<ProfileRow, csv::Error>> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .into_deserialize::<ProfileRow>()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_number(column: &str, raw: Option<&str>) -> Result<Option<u32>, String> {
    raw.map(|value| {
        value
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("{column} '{value}' is not a whole number"))
    })
    .transpose()
}

fn parse_tags<T>(raw: &str) -> Result<BTreeSet<T>, String>
where
    T: FromStr + Ord,
    T::Err: std::fmt::Display,
{
    raw.split(';')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(|tag| tag.parse::<T>().map_err(|err| err.to_string()))
        .collect()
}
