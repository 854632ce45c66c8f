use crate::error::{CampaignError, CampaignResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A campaign record as delivered by the source. Fields are free-form; only
/// `id` is interpreted, to name the per-campaign file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Campaign(Value);

impl Campaign {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    pub fn id(&self) -> CampaignResult<CampaignId> {
        match self.0.get("id") {
            Some(Value::String(s)) => CampaignId::parse(s),
            Some(Value::Number(n)) => CampaignId::parse(&number_id(n)),
            _ => Err(CampaignError::MissingId),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    pub fn description(&self) -> Option<&str> {
        self.0.get("description").and_then(Value::as_str)
    }

    pub fn goal(&self) -> Option<f64> {
        self.0.get("goal").and_then(Value::as_f64)
    }

    pub fn raised(&self) -> Option<f64> {
        self.0.get("raised").and_then(Value::as_f64)
    }

    /// Percentage of the goal raised so far; `None` when either amount is
    /// missing or the goal is not positive.
    pub fn progress(&self) -> Option<f64> {
        let goal = self.goal()?;
        let raised = self.raised()?;
        if goal <= 0.0 {
            return None;
        }
        Some(raised / goal * 100.0)
    }
}

// `1.0` names the same file as `1`
fn number_id(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
            (f as i64).to_string()
        }
        _ => n.to_string(),
    }
}

impl From<Value> for Campaign {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Campaign id usable as a file stem inside the campaign directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CampaignId(String);

impl CampaignId {
    pub fn parse(raw: &str) -> CampaignResult<Self> {
        let valid = !raw.is_empty()
            && raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(CampaignError::InvalidId(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

impl fmt::Display for CampaignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn id_comes_from_string_or_number() {
        let by_string = Campaign::new(json!({"id": "alpha-1", "name": "A"}));
        assert_eq!(by_string.id().unwrap().file_name(), "alpha-1.json");

        let by_number = Campaign::new(json!({"id": 42}));
        assert_eq!(by_number.id().unwrap().as_str(), "42");

        let whole_float = Campaign::new(json!({"id": 1.0}));
        assert_eq!(whole_float.id().unwrap().as_str(), "1");

        let negative = Campaign::new(json!({"id": -3.0}));
        assert_eq!(negative.id().unwrap().as_str(), "-3");

        assert!(Campaign::new(json!({"id": 1.5})).id().is_err());
    }

    #[test]
    fn unusable_ids_are_rejected() {
        assert!(matches!(
            Campaign::new(json!({"name": "no id"})).id(),
            Err(CampaignError::MissingId)
        ));
        assert!(matches!(
            Campaign::new(json!({"id": null})).id(),
            Err(CampaignError::MissingId)
        ));
        for bad in ["", "../etc/passwd", "a/b", "a.json", "with space"] {
            assert!(CampaignId::parse(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn progress_needs_positive_goal() {
        let c = Campaign::new(json!({"goal": 200, "raised": 101}));
        let pct = c.progress().unwrap();
        assert!((pct - 50.5).abs() < f64::EPSILON);

        assert!(Campaign::new(json!({"goal": 0, "raised": 1})).progress().is_none());
        assert!(Campaign::new(json!({"raised": 1})).progress().is_none());
    }
}
