use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Work arrangement of a job posting or a candidate preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Modality {
    Remote,
    OnSite,
    Hybrid,
    #[default]
    Unspecified,
}

impl Modality {
    /// Tolerant parser for values coming from the data store.
    ///
    /// Legacy rows hold free text ("on-site", "Presencial", "REMOTE"), so the
    /// input is case-folded and separators are stripped before matching.
    /// Anything unrecognised maps to `Unspecified`.
    pub fn parse(raw: &str) -> Self {
        let folded: String = raw
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect();

        match folded.as_str() {
            "remote" | "remoto" => Modality::Remote,
            "onsite" | "inoffice" | "office" | "presencial" => Modality::OnSite,
            "hybrid" | "hibrido" | "híbrido" => Modality::Hybrid,
            _ => Modality::Unspecified,
        }
    }

    pub fn is_specified(self) -> bool {
        self != Modality::Unspecified
    }

    /// Human-readable label used in match reasons
    pub fn label(self) -> &'static str {
        match self {
            Modality::Remote => "Remote",
            Modality::OnSite => "On-site",
            Modality::Hybrid => "Hybrid",
            Modality::Unspecified => "Unspecified",
        }
    }
}

impl<'de> Deserialize<'de> for Modality {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Modality::parse).unwrap_or_default())
    }
}

/// Canonical seniority bucket behind an experience label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Seniority {
    Intern,
    Junior,
    Mid,
    Senior,
    Lead,
    Other,
    #[default]
    Unspecified,
}

impl Seniority {
    pub fn classify(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "" => Seniority::Unspecified,
            "intern" | "internship" | "trainee" | "estagio" | "estágio" => Seniority::Intern,
            "junior" | "jr" | "jr." => Seniority::Junior,
            "mid" | "mid-level" | "midlevel" | "pleno" => Seniority::Mid,
            "senior" | "sr" | "sr." => Seniority::Senior,
            "lead" | "principal" | "staff" => Seniority::Lead,
            _ => Seniority::Other,
        }
    }
}

/// Declared experience of a candidate
///
/// Keeps the label exactly as the candidate typed it (trimmed). Job titles are
/// matched against that label, so "Sr." finds "Sr. Developer" and "Pleno" finds
/// "Desenvolvedor Pleno"; the [`Seniority`] bucket is only for grouping.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExperienceLevel {
    seniority: Seniority,
    label: String,
}

impl ExperienceLevel {
    pub fn parse(raw: &str) -> Self {
        let label = raw.trim();
        ExperienceLevel {
            seniority: Seniority::classify(label),
            label: label.to_string(),
        }
    }

    pub fn seniority(&self) -> Seniority {
        self.seniority
    }

    pub fn is_specified(&self) -> bool {
        !self.label.is_empty()
    }

    /// Lowercase keyword searched for in job titles, `None` when unspecified
    pub fn keyword(&self) -> Option<String> {
        self.is_specified().then(|| self.label.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.label
    }
}

impl Serialize for ExperienceLevel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_specified() {
            serializer.serialize_str(&self.label)
        } else {
            serializer.serialize_none()
        }
    }
}

impl<'de> Deserialize<'de> for ExperienceLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(ExperienceLevel::parse).unwrap_or_default())
    }
}

/// Geographic point in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Build coordinates only when both halves are present and finite
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        match (latitude, longitude) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => Some(Self::new(lat, lon)),
            _ => None,
        }
    }
}

/// A job opportunity as read by the scorer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobPosting {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub modality: Modality,
    #[serde(rename = "requiredSkills", default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// A job seeker's profile as read by the scorer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(rename = "targetRole", default)]
    pub target_role: String,
    #[serde(rename = "targetIndustry", default)]
    pub target_industry: String,
    #[serde(rename = "preferredModality", default)]
    pub preferred_modality: Modality,
    #[serde(rename = "experienceLevel", default)]
    pub experience_level: ExperienceLevel,
    #[serde(rename = "searchRadiusKm", default)]
    pub search_radius_km: Option<f64>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

impl CandidateProfile {
    /// Search radius in km, falling back to the default when unset or not positive
    pub fn search_radius(&self) -> f64 {
        self.search_radius_km
            .filter(|radius| radius.is_finite() && *radius > 0.0)
            .unwrap_or(DEFAULT_SEARCH_RADIUS_KM)
    }
}

/// Radius applied when a candidate has not configured one
pub const DEFAULT_SEARCH_RADIUS_KM: f64 = 50.0;

/// Compatibility of one job with one candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: u8,
    #[serde(rename = "matchReasons")]
    pub match_reasons: Vec<String>,
    #[serde(rename = "distanceKm", default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

/// Job annotated with its match result, as returned by listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredJob {
    #[serde(flatten)]
    pub job: JobPosting,
    #[serde(flatten)]
    pub result: MatchResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modality_parse_tolerates_legacy_values() {
        assert_eq!(Modality::parse("Remote"), Modality::Remote);
        assert_eq!(Modality::parse("  on-site "), Modality::OnSite);
        assert_eq!(Modality::parse("On_Site"), Modality::OnSite);
        assert_eq!(Modality::parse("Presencial"), Modality::OnSite);
        assert_eq!(Modality::parse("HYBRID"), Modality::Hybrid);
        assert_eq!(Modality::parse("four-day week"), Modality::Unspecified);
        assert_eq!(Modality::parse(""), Modality::Unspecified);
    }

    #[test]
    fn test_modality_deserialize_never_fails() {
        let parsed: Modality = serde_json::from_str("\"whatever\"").unwrap();
        assert_eq!(parsed, Modality::Unspecified);

        let parsed: Modality = serde_json::from_str("null").unwrap();
        assert_eq!(parsed, Modality::Unspecified);
    }

    #[test]
    fn test_experience_level_keeps_typed_label() {
        let level = ExperienceLevel::parse(" Sr. ");
        assert_eq!(level.seniority(), Seniority::Senior);
        assert_eq!(level.as_str(), "Sr.");
        assert_eq!(level.keyword().as_deref(), Some("sr."));

        let level = ExperienceLevel::parse("Estágio");
        assert_eq!(level.seniority(), Seniority::Intern);
        assert_eq!(level.keyword().as_deref(), Some("estágio"));

        let level = ExperienceLevel::parse("Apprentice");
        assert_eq!(level.seniority(), Seniority::Other);
        assert_eq!(level.keyword().as_deref(), Some("apprentice"));

        assert_eq!(ExperienceLevel::parse(" "), ExperienceLevel::default());
        assert_eq!(ExperienceLevel::default().keyword(), None);
    }

    #[test]
    fn test_experience_level_serializes_label() {
        let json = serde_json::to_value(ExperienceLevel::parse("Pleno")).unwrap();
        assert_eq!(json, "Pleno");

        let json = serde_json::to_value(ExperienceLevel::default()).unwrap();
        assert!(json.is_null());
    }

    #[test]
    fn test_coordinates_require_both_parts() {
        assert!(Coordinates::from_parts(Some(1.0), None).is_none());
        assert!(Coordinates::from_parts(Some(f64::NAN), Some(1.0)).is_none());
        assert_eq!(
            Coordinates::from_parts(Some(1.0), Some(2.0)),
            Some(Coordinates::new(1.0, 2.0))
        );
    }

    #[test]
    fn test_search_radius_default() {
        let mut profile = CandidateProfile::default();
        assert_eq!(profile.search_radius(), 50.0);

        profile.search_radius_km = Some(-3.0);
        assert_eq!(profile.search_radius(), 50.0);

        profile.search_radius_km = Some(120.0);
        assert_eq!(profile.search_radius(), 120.0);
    }

    #[test]
    fn test_scored_job_serializes_flat() {
        let scored = ScoredJob {
            job: JobPosting {
                title: "Backend Dev".to_string(),
                ..Default::default()
            },
            result: MatchResult {
                score: 72,
                match_reasons: vec!["Desired role compatible".to_string()],
                distance_km: None,
            },
        };

        let json = serde_json::to_value(&scored).unwrap();
        assert_eq!(json["title"], "Backend Dev");
        assert_eq!(json["score"], 72);
        assert!(json.get("distanceKm").is_none());
    }
}
