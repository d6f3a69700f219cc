//! Landing page content handlers.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use landing_content::model::{BusinessContactData, ContentSections, LandingPageContent};

use super::{ApiJson, ApiQuery};
use crate::auth::{AdminGuard, is_admin};
use crate::error::{ApiError, ApiResult};
use crate::protocol::{
    BulkUpdate, ContentQuery, InvalidateResponse, SectionsUpdate, Settings, WriteResponse,
};
use crate::state::AppState;

/// `GET /`: cached public view, or the raw document for admins.
pub async fn get_content(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ContentQuery>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    if query.include_inactive {
        if !is_admin(&headers, &state.config().admin_tokens) {
            return Err(ApiError::Forbidden);
        }
        return Ok(Json(state.service().raw_content()).into_response());
    }
    Ok(Json(state.service().public_view().await).into_response())
}

/// `POST /invalidate-cache`
pub async fn invalidate_cache(
    _admin: AdminGuard,
    State(state): State<AppState>,
) -> Json<InvalidateResponse> {
    let success = state.service().invalidate_cache().await;
    let message = if success {
        "Cache invalidated successfully"
    } else {
        "Cache invalidation failed; entries will expire with their TTL"
    };
    Json(InvalidateResponse {
        success,
        message: message.to_string(),
    })
}

/// `PUT /`: replace whole top-level sections.
pub async fn update_content(
    _admin: AdminGuard,
    State(state): State<AppState>,
    ApiJson(update): ApiJson<BulkUpdate>,
) -> ApiResult<Json<WriteResponse<LandingPageContent>>> {
    let doc = state
        .service()
        .update_bulk(update)
        .await
        .map_err(|e| state.api_error(e))?;
    Ok(Json(WriteResponse::ok(
        "Landing page content updated successfully",
        doc,
    )))
}

/// `PUT /contact-info`
pub async fn update_contact_info(
    _admin: AdminGuard,
    State(state): State<AppState>,
    ApiJson(contact): ApiJson<BusinessContactData>,
) -> ApiResult<Json<WriteResponse<BusinessContactData>>> {
    let contact = state
        .service()
        .update_contact(contact)
        .await
        .map_err(|e| state.api_error(e))?;
    Ok(Json(WriteResponse::ok(
        "Contact information updated successfully",
        contact,
    )))
}

/// `PUT /settings`: deep merge into theme, layout and experiments.
pub async fn update_settings(
    _admin: AdminGuard,
    State(state): State<AppState>,
    ApiJson(patch): ApiJson<serde_json::Value>,
) -> ApiResult<Json<WriteResponse<Settings>>> {
    let settings = state
        .service()
        .update_settings(patch)
        .await
        .map_err(|e| state.api_error(e))?;
    Ok(Json(WriteResponse::ok(
        "Settings updated successfully",
        settings,
    )))
}

/// `PUT /sections`: replace individual content sections.
pub async fn update_sections(
    _admin: AdminGuard,
    State(state): State<AppState>,
    ApiJson(update): ApiJson<SectionsUpdate>,
) -> ApiResult<Json<WriteResponse<ContentSections>>> {
    let sections = state
        .service()
        .update_sections(update)
        .await
        .map_err(|e| state.api_error(e))?;
    Ok(Json(WriteResponse::ok(
        "Sections updated successfully",
        sections,
    )))
}
