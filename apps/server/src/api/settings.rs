use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::State,
    routing::{get, put},
    Json, Router,
};
use tracer_core::settings::{SiteProfile, SiteProfileUpdate};

async fn get_site_profile(State(state): State<Arc<AppState>>) -> ApiResult<Json<SiteProfile>> {
    let profile = state.settings_service.get_site_profile()?;
    Ok(Json(profile))
}

async fn update_site_profile(
    State(state): State<Arc<AppState>>,
    Json(update): Json<SiteProfileUpdate>,
) -> ApiResult<Json<SiteProfile>> {
    let profile = state.settings_service.update_site_profile(&update).await?;
    Ok(Json(profile))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/site-profile", get(get_site_profile))
}

pub fn admin_router() -> Router<Arc<AppState>> {
    Router::new().route("/site-profile", put(update_site_profile))
}
