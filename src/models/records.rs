//! Raw row shapes as stored in the external data store.
//!
//! Rows are loosely typed: arrays may be null, modality and seniority are free
//! text, and coordinates are only present once a posting has been geocoded.
//! Conversion into the domain types never fails.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::domain::{CandidateProfile, Coordinates, ExperienceLevel, JobPosting, Modality};

/// Treat `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// List of strings where null or non-string entries are dropped
fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items,
        _ => return Ok(Vec::new()),
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(text) => Some(text),
            _ => None,
        })
        .collect())
}

/// UUID column that may hold legacy integer or free-text ids
fn lenient_uuid<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|text| Uuid::parse_str(text.trim()).ok()))
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_str).and_then(parse_timestamp))
}

/// RFC 3339, or a timestamp without zone read as UTC
fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Some(at.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Row of the jobs table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(default, deserialize_with = "lenient_uuid")]
    pub id: Option<Uuid>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(rename = "type", default)]
    pub modality: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<JobRecord> for JobPosting {
    fn from(record: JobRecord) -> Self {
        JobPosting {
            id: record.id,
            title: record.title,
            company: record.company,
            category: record.category,
            modality: record.modality.as_deref().map(Modality::parse).unwrap_or_default(),
            required_skills: record.required_skills,
            coordinates: Coordinates::from_parts(record.latitude, record.longitude),
            created_at: record.created_at,
        }
    }
}

/// Free-form metadata blob attached to a profile row
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileMetadata {
    #[serde(default, deserialize_with = "string_list")]
    pub tools: Vec<String>,
    #[serde(rename = "preferredModality", default)]
    pub preferred_modality: Option<String>,
    #[serde(rename = "experienceLevel", default)]
    pub experience_level: Option<String>,
}

/// Row of the profiles table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRecord {
    #[serde(default, deserialize_with = "lenient_uuid")]
    pub id: Option<Uuid>,
    #[serde(default, deserialize_with = "string_list")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: ProfileMetadata,
    #[serde(default)]
    pub target_role: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub search_radius: Option<f64>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl From<ProfileRecord> for CandidateProfile {
    fn from(record: ProfileRecord) -> Self {
        let metadata = record.metadata;

        CandidateProfile {
            id: record.id,
            skills: record.skills,
            tools: metadata.tools,
            target_role: record.target_role.unwrap_or_default(),
            target_industry: record.industry.unwrap_or_default(),
            preferred_modality: metadata
                .preferred_modality
                .as_deref()
                .map(Modality::parse)
                .unwrap_or_default(),
            experience_level: metadata
                .experience_level
                .as_deref()
                .map(ExperienceLevel::parse)
                .unwrap_or_default(),
            search_radius_km: record
                .search_radius
                .filter(|radius| radius.is_finite() && *radius > 0.0),
            coordinates: Coordinates::from_parts(record.latitude, record.longitude),
        }
    }
}
