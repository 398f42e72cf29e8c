use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

/// A registered participant, as supplied by the roster provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Participant {
    #[validate(length(min = 1))]
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(rename = "firstName", alias = "first_name", default)]
    pub first_name: String,
    #[serde(rename = "lastName", alias = "last_name", default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub congregation: Option<String>,
    /// Raw gender label; see [`GenderBucket::from_label`] for how it is bucketed
    #[serde(default, deserialize_with = "lenient_string")]
    pub gender: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub age: Option<f64>,
    #[serde(rename = "isLeader", alias = "is_leader", default, deserialize_with = "lenient_bool")]
    pub is_leader: bool,
}

impl Participant {
    pub fn new(id: impl Into<String>, gender: impl Into<String>, age: f64) -> Self {
        Self {
            id: id.into(),
            first_name: String::new(),
            last_name: String::new(),
            nickname: None,
            congregation: None,
            gender: gender.into(),
            age: Some(age),
            is_leader: false,
        }
    }

    /// First and last name joined by a space, trimmed
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Age used for sorting and averaging. Missing, non-finite or negative
    /// ages count as zero.
    #[inline]
    pub fn effective_age(&self) -> f64 {
        match self.age {
            Some(age) if age.is_finite() && age >= 0.0 => age,
            _ => 0.0,
        }
    }

    #[inline]
    pub fn bucket(&self) -> GenderBucket {
        GenderBucket::from_label(&self.gender)
    }
}

/// Normalized gender bucket used during partitioning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GenderBucket {
    Male,
    Female,
    Other,
}

impl GenderBucket {
    /// Buckets in fill order
    pub const ALL: [GenderBucket; 3] = [GenderBucket::Male, GenderBucket::Female, GenderBucket::Other];

    /// Only the exact labels `Male` and `Female` get their own bucket.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Male" => GenderBucket::Male,
            "Female" => GenderBucket::Female,
            _ => GenderBucket::Other,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            GenderBucket::Male => 0,
            GenderBucket::Female => 1,
            GenderBucket::Other => 2,
        }
    }
}

/// How strictly gender composition is enforced per team
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Parity {
    /// Exact per-team quota for each gender bucket
    #[default]
    Strict,
    /// Round-robin over a gender-interleaved sequence
    Loose,
}

impl From<&str> for Parity {
    fn from(value: &str) -> Self {
        if value == "strict" {
            Parity::Strict
        } else {
            Parity::Loose
        }
    }
}

impl From<String> for Parity {
    fn from(value: String) -> Self {
        Parity::from(value.as_str())
    }
}

/// Options accepted by the partitioner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionOptions {
    #[serde(default)]
    pub parity: Parity,
}

impl PartitionOptions {
    pub fn strict() -> Self {
        Self { parity: Parity::Strict }
    }

    pub fn loose() -> Self {
        Self { parity: Parity::Loose }
    }
}

/// Members ordered by ascending age. Identity is the team's index in the result.
pub type Team = Vec<Participant>;

/// Per-team summary for reporting and verification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub count: usize,
    #[serde(rename = "averageAge")]
    pub average_age: f64,
    /// Keyed by the raw gender label, not the normalized bucket
    #[serde(rename = "genderHistogram")]
    pub gender_histogram: BTreeMap<String, usize>,
}

/// Saved team assignment, stored as participant identifiers per team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSnapshot {
    pub teams: Vec<Vec<String>>,
    #[serde(rename = "savedAt")]
    pub saved_at: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "savedBy", default)]
    pub saved_by: Option<String>,
}

impl TeamSnapshot {
    pub fn from_teams(teams: &[Team], saved_by: Option<String>) -> Self {
        Self {
            teams: teams
                .iter()
                .map(|team| team.iter().map(|p| p.id.clone()).collect())
                .collect(),
            saved_at: chrono::Utc::now(),
            saved_by,
        }
    }
}

/// Accepts a JSON number or numeric string; anything else becomes `None`.
pub(crate) fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

/// Accepts a string or a number; numeric ids keep their decimal form.
pub(crate) fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    id_from_value(serde_json::Value::deserialize(deserializer)?).map_err(serde::de::Error::custom)
}

/// Nested id lists, each element accepted as by [`lenient_id`]
pub(crate) fn lenient_id_lists<'de, D>(deserializer: D) -> Result<Vec<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<Vec<serde_json::Value>>::deserialize(deserializer)?
        .into_iter()
        .map(|ids| ids.into_iter().map(id_from_value).collect::<Result<Vec<_>, _>>())
        .collect::<Result<_, _>>()
        .map_err(serde::de::Error::custom)
}

fn id_from_value(value: serde_json::Value) -> Result<String, String> {
    match value {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(format!("invalid id: expected a string or number, got {}", other)),
    }
}

/// Accepts booleans, `0`/`1` style numbers and `"true"`/`"false"`/`"1"`/`"0"`.
/// Null counts as false.
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(false),
        Some(serde_json::Value::Bool(b)) => Ok(b),
        Some(serde_json::Value::Number(n)) => Ok(n.as_f64().is_some_and(|v| v != 0.0)),
        Some(serde_json::Value::String(s)) => match s.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" | "" => Ok(false),
            other => Err(serde::de::Error::custom(format!("invalid boolean: {:?}", other))),
        },
        Some(other) => Err(serde::de::Error::custom(format!("invalid boolean: {}", other))),
    }
}

/// Accepts a string or null; non-string scalars are rendered to text.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    })
}
