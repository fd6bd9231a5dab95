use std::sync::Arc;

use crate::{api::shared::MultipartForm, error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use tracer_core::campaigns::{
    Campaign, CampaignFilter, CampaignProgress, CampaignSummary, CampaignUpdate,
    LedgerReconciliation, NewCampaign,
};

async fn list_open_campaigns(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<CampaignProgress>>> {
    let now = chrono::Local::now().naive_local();
    let campaigns = state.campaign_service.list_open_campaigns(now)?;
    Ok(Json(campaigns))
}

async fn get_campaign(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<CampaignProgress>> {
    let campaign = state.campaign_service.get_campaign_progress(&id)?;
    Ok(Json(campaign))
}

#[derive(Deserialize)]
struct CampaignQuery {
    search: Option<String>,
}

async fn list_campaigns(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CampaignQuery>,
) -> ApiResult<Json<Vec<CampaignProgress>>> {
    let filter = CampaignFilter {
        search_text: query.search,
    };
    let campaigns = state
        .campaign_service
        .list_campaigns(&filter)?
        .into_iter()
        .map(CampaignProgress::from)
        .collect();
    Ok(Json(campaigns))
}

async fn create_campaign(
    State(state): State<Arc<AppState>>,
    Json(campaign): Json<NewCampaign>,
) -> ApiResult<(StatusCode, Json<Campaign>)> {
    let created = state.campaign_service.create_campaign(campaign).await?;
    tracing::info!("Campaign {} created", created.id);
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_campaign(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut campaign): Json<CampaignUpdate>,
) -> ApiResult<Json<Campaign>> {
    campaign.id = Some(id);
    let updated = state.campaign_service.update_campaign(campaign).await?;
    Ok(Json(updated))
}

async fn delete_campaign(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.campaign_service.delete_campaign(&id).await?;
    tracing::info!("Campaign {} deleted", id);
    Ok(StatusCode::NO_CONTENT)
}

async fn upload_campaign_image(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> ApiResult<Json<Campaign>> {
    let mut form = MultipartForm::read(multipart).await?;
    let image = form.take_file("image");
    let campaign = state.campaign_service.set_campaign_image(&id, image).await?;
    Ok(Json(campaign))
}

async fn get_campaign_summary(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<CampaignSummary>> {
    let summary = state.campaign_service.get_campaign_summary(&id)?;
    Ok(Json(summary))
}

async fn reconcile_campaign(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<LedgerReconciliation>> {
    let report = state.campaign_service.reconcile_campaign(&id)?;
    if !report.is_consistent {
        tracing::warn!("Campaign {} running total drifted by {}", id, report.difference);
    }
    Ok(Json(report))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/campaigns", get(list_open_campaigns))
        .route("/campaigns/{id}", get(get_campaign))
}

pub fn admin_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/campaigns", get(list_campaigns).post(create_campaign))
        .route("/campaigns/{id}", put(update_campaign).delete(delete_campaign))
        .route("/campaigns/{id}/image", post(upload_campaign_image))
        .route("/campaigns/{id}/summary", get(get_campaign_summary))
        .route("/campaigns/{id}/reconciliation", get(reconcile_campaign))
}
