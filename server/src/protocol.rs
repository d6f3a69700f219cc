//! Request and response bodies for the landing page API.

use landing_content::model::{
    BusinessContactData, ContentSections, Experiments, HeroBanner, LandingPageContent, Layout,
    Newsletter, PlantTip, SeasonalPlant, SocialProof, Theme,
};
use landing_content::{VariantKey, VariantMetrics};
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Envelopes
// ─────────────────────────────────────────────────────────────────────────────

/// Successful write: `{ success: true, message, data }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T> WriteResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvalidateResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub uptime_s: u64,
    pub cache_backend: String,
    pub environment: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// GET /
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentQuery {
    /// Admin only: return the stored document with inactive items.
    #[serde(default)]
    pub include_inactive: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// PUT / (bulk)
// ─────────────────────────────────────────────────────────────────────────────

/// Each present section replaces the stored one wholesale.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BulkUpdate {
    pub content: Option<ContentSections>,
    pub contact: Option<BusinessContactData>,
    pub theme: Option<Theme>,
    pub layout: Option<Layout>,
    pub experiments: Option<Experiments>,
}

impl BulkUpdate {
    pub fn is_empty(&self) -> bool {
        self.content.is_none()
            && self.contact.is_none()
            && self.theme.is_none()
            && self.layout.is_none()
            && self.experiments.is_none()
    }

    pub fn apply_to(self, doc: &mut LandingPageContent) {
        if let Some(content) = self.content {
            doc.content = content;
        }
        if let Some(contact) = self.contact {
            doc.contact = contact;
        }
        if let Some(theme) = self.theme {
            doc.theme = theme;
        }
        if let Some(layout) = self.layout {
            doc.layout = layout;
        }
        if let Some(experiments) = self.experiments {
            doc.experiments = experiments;
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// PUT /sections
// ─────────────────────────────────────────────────────────────────────────────

/// Each present content section replaces the stored one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SectionsUpdate {
    pub hero_banners: Option<Vec<HeroBanner>>,
    pub seasonal_plants: Option<Vec<SeasonalPlant>>,
    pub plant_tips: Option<Vec<PlantTip>>,
    pub social_proof: Option<SocialProof>,
    pub newsletter: Option<Newsletter>,
}

impl SectionsUpdate {
    pub fn is_empty(&self) -> bool {
        self.hero_banners.is_none()
            && self.seasonal_plants.is_none()
            && self.plant_tips.is_none()
            && self.social_proof.is_none()
            && self.newsletter.is_none()
    }

    pub fn apply_to(self, sections: &mut ContentSections) {
        if let Some(hero_banners) = self.hero_banners {
            sections.hero_banners = hero_banners;
        }
        if let Some(seasonal_plants) = self.seasonal_plants {
            sections.seasonal_plants = seasonal_plants;
        }
        if let Some(plant_tips) = self.plant_tips {
            sections.plant_tips = plant_tips;
        }
        if let Some(social_proof) = self.social_proof {
            sections.social_proof = social_proof;
        }
        if let Some(newsletter) = self.newsletter {
            sections.newsletter = newsletter;
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// PUT /settings
// ─────────────────────────────────────────────────────────────────────────────

/// The deep-mergeable part of the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Settings {
    pub theme: Theme,
    pub layout: Layout,
    pub experiments: Experiments,
}

impl Settings {
    pub const KEYS: [&'static str; 3] = ["theme", "layout", "experiments"];

    pub fn from_doc(doc: &LandingPageContent) -> Self {
        Self {
            theme: doc.theme.clone(),
            layout: doc.layout.clone(),
            experiments: doc.experiments.clone(),
        }
    }

    pub fn apply_to(self, doc: &mut LandingPageContent) {
        doc.theme = self.theme;
        doc.layout = self.layout;
        doc.experiments = self.experiments;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// A/B tests
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariantInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Content overrides; must be a JSON object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateAbTest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traffic_split: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_a: Option<VariantInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_b: Option<VariantInput>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateAbTest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traffic_split: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_a: Option<VariantInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_b: Option<VariantInput>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackedEvent {
    View,
    Conversion,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrackRequest {
    pub variant: VariantKey,
    pub event: TrackedEvent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackResponse {
    pub variant: VariantKey,
    pub metrics: VariantMetrics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bulk_update_rejects_unknown_sections() {
        let result: Result<BulkUpdate, _> = serde_json::from_str(r#"{"footer": {}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn bulk_update_applies_present_sections_only() {
        let mut doc = LandingPageContent::default();
        doc.contact.phone = "555-0000".to_string();

        let update: BulkUpdate =
            serde_json::from_str(r##"{"theme": {"primaryColor": "#000000"}}"##).unwrap();
        assert!(!update.is_empty());
        update.apply_to(&mut doc);

        assert_eq!(doc.theme.primary_color, "#000000");
        // Wholesale replace: unspecified theme fields take defaults.
        assert_eq!(doc.theme.font_family, Theme::default().font_family);
        assert_eq!(doc.contact.phone, "555-0000");
    }

    #[test]
    fn sections_update_replaces_lists() {
        let mut sections = ContentSections::default();
        sections.plant_tips.push(PlantTip::default());

        let update: SectionsUpdate =
            serde_json::from_str(r#"{"plantTips": [], "heroBanners": [{"id": "h1", "isActive": true}]}"#)
                .unwrap();
        update.apply_to(&mut sections);
        assert!(sections.plant_tips.is_empty());
        assert_eq!(sections.hero_banners.len(), 1);
        assert!(sections.hero_banners[0].is_active);
    }

    #[test]
    fn track_request_parses_variant_letters() {
        let req: TrackRequest =
            serde_json::from_str(r#"{"variant": "B", "event": "conversion"}"#).unwrap();
        assert_eq!(req.variant, VariantKey::B);
        assert_eq!(req.event, TrackedEvent::Conversion);

        let lower: TrackRequest =
            serde_json::from_str(r#"{"variant": "a", "event": "view"}"#).unwrap();
        assert_eq!(lower.variant, VariantKey::A);
    }
}
