//! LandingService: content reads/writes, cache-aside, and A/B test lifecycle.
//!
//! Every write follows the same shape: read the whole file, change it,
//! write it back, then drop the cached public view. Cache failures are
//! logged and never surface to the caller. Nothing here locks; two admins
//! saving at once race and the last write wins.

use std::sync::Arc;

use chrono::Utc;
use landing_content::merge::deep_merge;
use landing_content::model::{BusinessContactData, ContentSections, LandingPageContent};
use landing_content::{
    AGGREGATED_CACHE_KEY, AbTest, AbTestStore, AbTestStatus, ContentCache, ContentStore,
    PublicLandingPage, StoreError, Variant, VariantMetrics, aggregate,
};

use crate::protocol::{
    BulkUpdate, CreateAbTest, SectionsUpdate, Settings, TrackRequest, TrackedEvent,
    UpdateAbTest, VariantInput,
};

/// Error type for service operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Store(StoreError::Serde(err))
    }
}

fn test_not_found(id: &str) -> ServiceError {
    ServiceError::NotFound(format!("A/B test not found: {id}"))
}

pub struct LandingService {
    content: ContentStore,
    ab_tests: AbTestStore,
    cache: Arc<dyn ContentCache>,
}

impl LandingService {
    pub fn new(content: ContentStore, ab_tests: AbTestStore, cache: Arc<dyn ContentCache>) -> Self {
        Self {
            content,
            ab_tests,
            cache,
        }
    }

    pub fn cache_backend(&self) -> &'static str {
        self.cache.backend()
    }

    // ── Reads ────────────────────────────────────────────────────────────

    /// Public view, served from cache when possible.
    pub async fn public_view(&self) -> PublicLandingPage {
        match self.cache.get(AGGREGATED_CACHE_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(view) => {
                    tracing::debug!("landing page cache hit");
                    return view;
                }
                Err(e) => tracing::warn!("discarding unparseable cache entry: {e}"),
            },
            Ok(None) => tracing::debug!("landing page cache miss"),
            Err(e) => tracing::warn!("cache read failed, falling back to file: {e}"),
        }

        let view = aggregate(self.content.read(), &self.ab_tests.list());
        match serde_json::to_string(&view) {
            Ok(raw) => {
                if let Err(e) = self.cache.set(AGGREGATED_CACHE_KEY, &raw).await {
                    tracing::warn!("cache write failed: {e}");
                }
            }
            Err(e) => tracing::warn!("failed to serialize landing page for cache: {e}"),
        }
        view
    }

    /// Stored document including inactive items. Never cached.
    pub fn raw_content(&self) -> LandingPageContent {
        self.content.read()
    }

    // ── Cache ────────────────────────────────────────────────────────────

    /// Drop the cached public view. Returns whether the backend accepted it.
    pub async fn invalidate_cache(&self) -> bool {
        match self.cache.invalidate(AGGREGATED_CACHE_KEY).await {
            Ok(()) => {
                tracing::debug!("landing page cache invalidated");
                true
            }
            Err(e) => {
                tracing::warn!("cache invalidation failed: {e}");
                false
            }
        }
    }

    async fn save_content(
        &self,
        mut doc: LandingPageContent,
    ) -> Result<LandingPageContent, ServiceError> {
        self.content.write(&mut doc)?;
        self.invalidate_cache().await;
        Ok(doc)
    }

    // ── Content writes ───────────────────────────────────────────────────

    /// Replace whole top-level sections.
    pub async fn update_bulk(
        &self,
        update: BulkUpdate,
    ) -> Result<LandingPageContent, ServiceError> {
        if update.is_empty() {
            return Err(ServiceError::BadRequest(
                "request body contains no sections to update".to_string(),
            ));
        }
        let mut doc = self.content.read();
        update.apply_to(&mut doc);
        self.save_content(doc).await
    }

    pub async fn update_contact(
        &self,
        contact: BusinessContactData,
    ) -> Result<BusinessContactData, ServiceError> {
        let mut doc = self.content.read();
        doc.contact = contact;
        Ok(self.save_content(doc).await?.contact)
    }

    /// Deep-merge `patch` into theme, layout and experiments.
    pub async fn update_settings(
        &self,
        patch: serde_json::Value,
    ) -> Result<Settings, ServiceError> {
        match &patch {
            serde_json::Value::Object(fields) => {
                if let Some(key) = fields
                    .keys()
                    .find(|key| !Settings::KEYS.contains(&key.as_str()))
                {
                    return Err(ServiceError::BadRequest(format!(
                        "unknown settings section: {key}"
                    )));
                }
            }
            _ => {
                return Err(ServiceError::BadRequest(
                    "settings must be a JSON object".to_string(),
                ));
            }
        }

        let mut doc = self.content.read();
        let mut merged = serde_json::to_value(Settings::from_doc(&doc))?;
        deep_merge(&mut merged, patch);
        let settings: Settings = serde_json::from_value(merged)
            .map_err(|e| ServiceError::BadRequest(format!("invalid settings: {e}")))?;

        settings.clone().apply_to(&mut doc);
        self.save_content(doc).await?;
        Ok(settings)
    }

    pub async fn update_sections(
        &self,
        update: SectionsUpdate,
    ) -> Result<ContentSections, ServiceError> {
        if update.is_empty() {
            return Err(ServiceError::BadRequest(
                "request body contains no sections to update".to_string(),
            ));
        }
        let mut doc = self.content.read();
        update.apply_to(&mut doc.content);
        Ok(self.save_content(doc).await?.content)
    }

    // ── A/B tests ────────────────────────────────────────────────────────

    pub fn list_tests(&self) -> Vec<AbTest> {
        self.ab_tests.list()
    }

    pub fn get_test(&self, id: &str) -> Result<AbTest, ServiceError> {
        self.ab_tests.get(id).ok_or_else(|| test_not_found(id))
    }

    pub fn create_test(&self, req: CreateAbTest) -> Result<AbTest, ServiceError> {
        let name = req.name.trim();
        if name.is_empty() {
            return Err(ServiceError::BadRequest("name is required".to_string()));
        }

        let mut test = AbTest::new(name);
        test.description = req.description;
        if let Some(split) = req.traffic_split {
            test.traffic_split = validate_split(split)?;
        }
        if let Some(input) = req.variant_a {
            apply_variant_input(&mut test.variant_a, input)?;
        }
        if let Some(input) = req.variant_b {
            apply_variant_input(&mut test.variant_b, input)?;
        }

        let mut tests = self.ab_tests.list();
        tests.push(test.clone());
        self.ab_tests.save_all(&tests)?;
        tracing::info!(test_id = %test.id, "A/B test created");
        Ok(test)
    }

    pub async fn update_test(&self, id: &str, req: UpdateAbTest) -> Result<AbTest, ServiceError> {
        let mut tests = self.ab_tests.list();
        let test = tests
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| test_not_found(id))?;

        if let Some(name) = req.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(ServiceError::BadRequest("name must not be empty".to_string()));
            }
            test.name = name.to_string();
        }
        if let Some(description) = req.description {
            test.description = Some(description);
        }
        if let Some(split) = req.traffic_split {
            test.traffic_split = validate_split(split)?;
        }
        if let Some(input) = req.variant_a {
            apply_variant_input(&mut test.variant_a, input)?;
        }
        if let Some(input) = req.variant_b {
            apply_variant_input(&mut test.variant_b, input)?;
        }
        test.updated_at = Utc::now();
        let updated = test.clone();

        self.ab_tests.save_all(&tests)?;
        if self.is_referenced(id) {
            self.invalidate_cache().await;
        }
        Ok(updated)
    }

    /// Delete a test. A running test, or the one `experiments.abTesting`
    /// points at, can't be deleted.
    pub fn delete_test(&self, id: &str) -> Result<AbTest, ServiceError> {
        let mut tests = self.ab_tests.list();
        let index = tests
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| test_not_found(id))?;
        if tests[index].is_active() || self.is_referenced(id) {
            return Err(ServiceError::BadRequest(
                "Cannot delete the active A/B test. Stop it first.".to_string(),
            ));
        }

        let removed = tests.remove(index);
        self.ab_tests.save_all(&tests)?;
        tracing::info!(test_id = %id, "A/B test deleted");
        Ok(removed)
    }

    /// Activate a test and point `experiments.abTesting` at it.
    ///
    /// At most one test is `active` at a time, whatever the experiments flag
    /// says.
    pub async fn start_test(&self, id: &str) -> Result<AbTest, ServiceError> {
        let mut tests = self.ab_tests.list();
        if !tests.iter().any(|t| t.id == id) {
            return Err(test_not_found(id));
        }
        if let Some(running) = tests.iter().find(|t| t.is_active() && t.id != id) {
            return Err(ServiceError::Conflict(format!(
                "A/B test {} is already active. Stop it first.",
                running.id
            )));
        }
        let test = tests
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| test_not_found(id))?;

        if test.status == AbTestStatus::Completed {
            return Err(ServiceError::BadRequest(
                "completed tests cannot be restarted".to_string(),
            ));
        }

        let mut doc = self.content.read();
        let ab_testing = &mut doc.experiments.ab_testing;
        match ab_testing.running_test_id() {
            Some(running) if running != id => {
                return Err(ServiceError::Conflict(format!(
                    "A/B test {running} is already active. Stop it first."
                )));
            }
            Some(_) if test.is_active() => return Ok(test.clone()),
            _ => {}
        }

        test.start(Utc::now());
        let started = test.clone();
        self.ab_tests.save_all(&tests)?;

        ab_testing.enabled = true;
        ab_testing.active_test_id = Some(id.to_string());
        self.save_content(doc).await?;
        tracing::info!(test_id = %id, "A/B test started");
        Ok(started)
    }

    /// Complete a running test and clear the active reference.
    pub async fn stop_test(&self, id: &str) -> Result<AbTest, ServiceError> {
        let mut tests = self.ab_tests.list();
        let test = tests
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| test_not_found(id))?;

        if !test.is_active() {
            return Err(ServiceError::BadRequest(format!(
                "A/B test is not active (status: {})",
                test.status.as_str()
            )));
        }

        test.complete(Utc::now());
        let stopped = test.clone();
        self.ab_tests.save_all(&tests)?;

        let mut doc = self.content.read();
        if doc.experiments.ab_testing.active_test_id.as_deref() == Some(id) {
            doc.experiments.ab_testing.enabled = false;
            doc.experiments.ab_testing.active_test_id = None;
            self.save_content(doc).await?;
        } else {
            self.invalidate_cache().await;
        }
        tracing::info!(test_id = %id, "A/B test stopped");
        Ok(stopped)
    }

    /// Count a view or conversion against one variant of a running test.
    pub fn track(&self, id: &str, req: TrackRequest) -> Result<VariantMetrics, ServiceError> {
        let mut tests = self.ab_tests.list();
        let test = tests
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| test_not_found(id))?;

        if !test.is_active() {
            return Err(ServiceError::BadRequest(
                "events can only be tracked for active tests".to_string(),
            ));
        }

        let metrics = &mut test.variant_mut(req.variant).metrics;
        match req.event {
            TrackedEvent::View => metrics.views = metrics.views.saturating_add(1),
            TrackedEvent::Conversion => {
                metrics.conversions = metrics.conversions.saturating_add(1);
            }
        }
        let metrics = *metrics;
        self.ab_tests.save_all(&tests)?;
        Ok(metrics)
    }

    /// Whether `id` is the test `experiments.abTesting.activeTestId` points at.
    fn is_referenced(&self, id: &str) -> bool {
        self.content
            .read()
            .experiments
            .ab_testing
            .active_test_id
            .as_deref()
            == Some(id)
    }
}

fn validate_split(split: u8) -> Result<u8, ServiceError> {
    if split > 100 {
        return Err(ServiceError::BadRequest(format!(
            "trafficSplit must be between 0 and 100, got {split}"
        )));
    }
    Ok(split)
}

fn apply_variant_input(variant: &mut Variant, input: VariantInput) -> Result<(), ServiceError> {
    if let Some(content) = input.content {
        if !content.is_object() {
            return Err(ServiceError::BadRequest(
                "variant content must be a JSON object".to_string(),
            ));
        }
        variant.content = content;
    }
    if let Some(name) = input.name {
        variant.name = name;
    }
    Ok(())
}
