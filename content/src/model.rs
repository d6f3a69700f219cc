//! Typed landing page document.
//!
//! Every struct defaults field-by-field so documents written by older
//! admin builds (missing keys) still load. Wrong types are a parse error,
//! which the store turns into the default document.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::defaults::default_content;

/// Root document persisted as a single JSON file.
///
/// A missing top-level section deserializes to the built-in section from
/// [`default_content`], the same one served when the file is missing.
/// `Default` itself is the empty document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default = "default_content", rename_all = "camelCase")]
pub struct LandingPageContent {
    pub metadata: Metadata,
    pub content: ContentSections,
    pub contact: BusinessContactData,
    pub theme: Theme,
    pub layout: Layout,
    pub experiments: Experiments,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Metadata {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            last_updated: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Content sections
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentSections {
    pub hero_banners: Vec<HeroBanner>,
    pub seasonal_plants: Vec<SeasonalPlant>,
    pub plant_tips: Vec<PlantTip>,
    pub social_proof: SocialProof,
    pub newsletter: Newsletter,
}

/// List entities that the public view filters and sorts.
pub trait Displayable {
    fn is_active(&self) -> bool;
    fn display_order(&self) -> i32;
}

macro_rules! impl_displayable {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Displayable for $ty {
                fn is_active(&self) -> bool {
                    self.is_active
                }

                fn display_order(&self) -> i32 {
                    self.display_order
                }
            }
        )*
    };
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroBanner {
    pub id: String,
    pub image_url: String,
    pub alt_text: String,
    pub headline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subheadline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_link: Option<String>,
    pub is_active: bool,
    pub display_order: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
    #[default]
    YearRound,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeasonalPlant {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub season: Season,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub care_level: Option<String>,
    pub is_active: bool,
    pub display_order: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlantTip {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<Season>,
    pub is_active: bool,
    pub display_order: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SocialProof {
    pub headline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subheadline: Option<String>,
    pub stats: Vec<Stat>,
    pub testimonials: Vec<Testimonial>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Stat {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Testimonial {
    pub id: String,
    pub author: String,
    pub quote: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub is_active: bool,
    pub display_order: i32,
}

impl_displayable!(HeroBanner, SeasonalPlant, PlantTip, Testimonial);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Newsletter {
    pub enabled: bool,
    pub title: String,
    pub description: String,
    pub button_text: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Contact / location
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BusinessContactData {
    pub business_name: String,
    pub phone: String,
    pub email: String,
    pub address: Address,
    pub hours: BusinessHours,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directions_url: Option<String>,
    pub social_links: SocialLinks,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SocialLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinterest: Option<String>,
}

/// Opening hours as free-form strings, one per weekday.
///
/// The admin form writes `"Closed"` for a day with the closed toggle set;
/// anything else is displayed verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BusinessHours {
    pub monday: String,
    pub tuesday: String,
    pub wednesday: String,
    pub thursday: String,
    pub friday: String,
    pub saturday: String,
    pub sunday: String,
}

pub const CLOSED: &str = "Closed";

impl BusinessHours {
    /// Days in display order paired with their hours.
    fn days(&self) -> [(&'static str, &str); 7] {
        [
            ("monday", self.monday.as_str()),
            ("tuesday", self.tuesday.as_str()),
            ("wednesday", self.wednesday.as_str()),
            ("thursday", self.thursday.as_str()),
            ("friday", self.friday.as_str()),
            ("saturday", self.saturday.as_str()),
            ("sunday", self.sunday.as_str()),
        ]
    }

    /// Hours for a lowercase weekday name.
    fn get(&self, day: &str) -> Option<&str> {
        self.days()
            .into_iter()
            .find(|(name, _)| *name == day)
            .map(|(_, hours)| hours)
    }

    /// Whether the given day is closed. Unknown day names return `None`.
    pub fn is_closed(&self, day: &str) -> Option<bool> {
        self.get(day).map(|hours| {
            let hours = hours.trim();
            hours.is_empty() || hours.eq_ignore_ascii_case(CLOSED)
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings: theme, layout, experiments
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Theme {
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub font_family: String,
    pub dark_mode: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_color: "#2e7d32".to_string(),
            secondary_color: "#8d6e63".to_string(),
            accent_color: "#f9a825".to_string(),
            font_family: "Roboto, sans-serif".to_string(),
            dark_mode: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Layout {
    pub sections: BTreeMap<String, SectionLayout>,
    pub container_width: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionLayout {
    pub enabled: bool,
    pub order: i32,
}

impl Default for SectionLayout {
    fn default() -> Self {
        Self {
            enabled: true,
            order: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Experiments {
    pub ab_testing: AbTestingSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AbTestingSettings {
    pub enabled: bool,
    pub active_test_id: Option<String>,
}

impl AbTestingSettings {
    /// The referenced active test id, when experiments are enabled.
    pub fn running_test_id(&self) -> Option<&str> {
        if self.enabled {
            self.active_test_id.as_deref()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn closed_day_detection() {
        let hours = BusinessHours {
            monday: "9:00 AM - 5:00 PM".to_string(),
            sunday: " closed ".to_string(),
            ..Default::default()
        };
        assert_eq!(hours.is_closed("monday"), Some(false));
        assert_eq!(hours.is_closed("sunday"), Some(true));
        // Empty strings count as closed.
        assert_eq!(hours.is_closed("tuesday"), Some(true));
        assert_eq!(hours.is_closed("someday"), None);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let doc: LandingPageContent =
            serde_json::from_str(r#"{"contact":{"phone":"555-0100"}}"#).unwrap();
        assert_eq!(doc.contact.phone, "555-0100");
        assert_eq!(doc.metadata.version, "1.0");
        assert_eq!(doc.theme, Theme::default());
        // Missing sections come from the built-in document, not empty defaults.
        assert_eq!(doc.content, default_content().content);
        assert_eq!(doc.layout.sections.len(), 6);
        // Present sections default field by field.
        assert_eq!(doc.contact.business_name, "");
    }

    #[test]
    fn present_but_empty_sections_stay_empty() {
        let doc: LandingPageContent =
            serde_json::from_str(r#"{"content":{"plantTips":[]}}"#).unwrap();
        assert!(doc.content.plant_tips.is_empty());
        assert!(doc.content.hero_banners.is_empty());
        assert!(!doc.layout.sections.is_empty());
    }

    #[test]
    fn wrong_types_are_rejected() {
        let result: Result<LandingPageContent, _> =
            serde_json::from_str(r#"{"content":{"heroBanners":"nope"}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn camel_case_keys() {
        let banner = HeroBanner {
            id: "b1".to_string(),
            is_active: true,
            display_order: 3,
            ..Default::default()
        };
        let value = serde_json::to_value(&banner).unwrap();
        assert_eq!(value["isActive"], true);
        assert_eq!(value["displayOrder"], 3);
        assert!(value.get("ctaText").is_none());
    }

    #[test]
    fn running_test_requires_enabled_flag() {
        let mut ab = AbTestingSettings {
            enabled: false,
            active_test_id: Some("t1".to_string()),
        };
        assert_eq!(ab.running_test_id(), None);
        ab.enabled = true;
        assert_eq!(ab.running_test_id(), Some("t1"));
    }
}
