//! Public ("aggregated") view of the landing page.
//!
//! This is what `GET /` serves and what the cache stores: inactive list
//! items removed, the rest sorted by `displayOrder`, plus the running A/B
//! test (without its metrics) when experiments are enabled.

use serde::{Deserialize, Serialize};

use crate::ab_test::{AbTest, Variant};
use crate::model::{Displayable, LandingPageContent};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicLandingPage {
    #[serde(flatten)]
    pub page: LandingPageContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_experiment: Option<ActiveExperiment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveExperiment {
    pub id: String,
    pub name: String,
    pub traffic_split: u8,
    pub variant_a: PublicVariant,
    pub variant_b: PublicVariant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicVariant {
    pub name: String,
    pub content: serde_json::Value,
}

impl From<&Variant> for PublicVariant {
    fn from(variant: &Variant) -> Self {
        Self {
            name: variant.name.clone(),
            content: variant.content.clone(),
        }
    }
}

impl From<&AbTest> for ActiveExperiment {
    fn from(test: &AbTest) -> Self {
        Self {
            id: test.id.clone(),
            name: test.name.clone(),
            traffic_split: test.traffic_split,
            variant_a: PublicVariant::from(&test.variant_a),
            variant_b: PublicVariant::from(&test.variant_b),
        }
    }
}

/// Keep active items and stable-sort them by `displayOrder`.
pub fn active_sorted<T: Displayable>(items: Vec<T>) -> Vec<T> {
    let mut items: Vec<T> = items.into_iter().filter(Displayable::is_active).collect();
    items.sort_by_key(Displayable::display_order);
    items
}

/// Build the public view of `doc`.
///
/// `tests` is the full A/B test list; only the test referenced by
/// `experiments.abTesting` is exposed, and only while it is `active`.
pub fn aggregate(mut doc: LandingPageContent, tests: &[AbTest]) -> PublicLandingPage {
    let content = &mut doc.content;
    content.hero_banners = active_sorted(std::mem::take(&mut content.hero_banners));
    content.seasonal_plants = active_sorted(std::mem::take(&mut content.seasonal_plants));
    content.plant_tips = active_sorted(std::mem::take(&mut content.plant_tips));
    content.social_proof.testimonials =
        active_sorted(std::mem::take(&mut content.social_proof.testimonials));

    let active_experiment = doc
        .experiments
        .ab_testing
        .running_test_id()
        .and_then(|id| tests.iter().find(|t| t.id == id))
        .filter(|t| t.is_active())
        .map(ActiveExperiment::from);

    PublicLandingPage {
        page: doc,
        active_experiment,
    }
}
