//! A/B test records stored in their own JSON file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of a test: `draft → active → completed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbTestStatus {
    #[default]
    Draft,
    Active,
    Completed,
}

impl AbTestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariantMetrics {
    pub views: u64,
    pub conversions: u64,
}

/// One side of a test. `content` holds overrides the public site applies
/// on top of the landing page document for visitors bucketed here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Variant {
    pub name: String,
    pub content: serde_json::Value,
    pub metrics: VariantMetrics,
}

impl Variant {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }
}

impl Default for Variant {
    fn default() -> Self {
        Self {
            name: String::new(),
            content: serde_json::Value::Object(serde_json::Map::new()),
            metrics: VariantMetrics::default(),
        }
    }
}

/// Which variant an event or update targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariantKey {
    #[serde(alias = "a")]
    A,
    #[serde(alias = "b")]
    B,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbTest {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: AbTestStatus,
    #[serde(default = "default_traffic_split")]
    pub traffic_split: u8,
    #[serde(default)]
    pub variant_a: Variant,
    #[serde(default)]
    pub variant_b: Variant,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
}

pub const DEFAULT_TRAFFIC_SPLIT: u8 = 50;

fn default_traffic_split() -> u8 {
    DEFAULT_TRAFFIC_SPLIT
}

impl AbTest {
    /// New draft test with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            description: None,
            status: AbTestStatus::Draft,
            traffic_split: DEFAULT_TRAFFIC_SPLIT,
            variant_a: Variant::named("Control"),
            variant_b: Variant::named("Variant B"),
            created_at: now,
            updated_at: now,
            start_date: None,
            end_date: None,
        }
    }

    pub fn variant_mut(&mut self, key: VariantKey) -> &mut Variant {
        match key {
            VariantKey::A => &mut self.variant_a,
            VariantKey::B => &mut self.variant_b,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == AbTestStatus::Active
    }

    /// Mark the test running.
    pub fn start(&mut self, now: DateTime<Utc>) {
        self.status = AbTestStatus::Active;
        self.start_date = Some(now);
        self.end_date = None;
        self.updated_at = now;
    }

    /// Mark the test finished.
    pub fn complete(&mut self, now: DateTime<Utc>) {
        self.status = AbTestStatus::Completed;
        self.end_date = Some(now);
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_test_is_draft_with_even_split() {
        let test = AbTest::new("Spring hero");
        assert_eq!(test.status, AbTestStatus::Draft);
        assert_eq!(test.traffic_split, 50);
        assert!(!test.id.is_empty());
        assert_eq!(test.created_at, test.updated_at);
    }

    #[test]
    fn lifecycle_timestamps() {
        let mut test = AbTest::new("t");
        let started = Utc::now();
        test.start(started);
        assert!(test.is_active());
        assert_eq!(test.start_date, Some(started));

        let ended = Utc::now();
        test.complete(ended);
        assert_eq!(test.status, AbTestStatus::Completed);
        assert_eq!(test.end_date, Some(ended));
    }

    #[test]
    fn status_serializes_lowercase() {
        let value = serde_json::to_value(AbTestStatus::Completed).unwrap();
        assert_eq!(value, "completed");
        assert_eq!(AbTestStatus::Active.as_str(), "active");
    }
}
