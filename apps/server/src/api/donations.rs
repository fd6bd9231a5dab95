use std::{str::FromStr, sync::Arc};

use crate::{api::shared::MultipartForm, error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde::Deserialize;
use tracer_core::constants::DEFAULT_PAGE_SIZE;
use tracer_core::donations::{
    AmountInput, Donation, DonationFilter, DonationSearchResponse, DonationStatus, DonationSubmission,
    StatusTransition,
};

const SUBMITTED_MESSAGE: &str =
    "Thank you! Your donation has been received and is awaiting verification.";

/// `302 Found` back to the campaign page with a one-shot flash cookie.
fn redirect_with_flash(location: &str, message: &str) -> Response {
    let cookie = format!(
        "flash={}; Path=/; Max-Age=60; HttpOnly; SameSite=Lax",
        urlencoding::encode(message)
    );
    (
        StatusCode::FOUND,
        [
            (header::LOCATION, location.to_string()),
            (header::SET_COOKIE, cookie),
        ],
    )
        .into_response()
}

async fn submit_donation(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> ApiResult<Response> {
    let mut form = MultipartForm::read(multipart).await?;
    let submission = DonationSubmission {
        campaign_id: form.text("campaignId"),
        donor_name: form.text("donorName"),
        donor_phone: form.text("donorPhone"),
        donor_address: form.text("donorAddress"),
        amount: AmountInput::parse(&form.text("amount")),
        receipt: form.take_file("receipt"),
    };

    let donation = state.donation_service.submit_donation(submission).await?;
    tracing::info!(
        "Donation {} recorded as pending for campaign {}",
        donation.id,
        donation.campaign_id
    );
    let location = format!("/campaigns/{}", urlencoding::encode(&donation.campaign_id));
    Ok(redirect_with_flash(&location, SUBMITTED_MESSAGE))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DonationQuery {
    search: Option<String>,
    status: Option<String>,
    page: Option<i64>,
    page_size: Option<i64>,
}

impl DonationQuery {
    fn into_filter(self) -> ApiResult<DonationFilter> {
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(DonationStatus::from_str(raw)?),
        };
        Ok(DonationFilter {
            search_text: self.search,
            status,
            page: self.page.unwrap_or(1),
            page_size: self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        })
    }
}

async fn search_donations(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DonationQuery>,
) -> ApiResult<Json<DonationSearchResponse>> {
    let filter = query.into_filter()?;
    let response = state.donation_service.search_donations(&filter)?;
    Ok(Json(response))
}

async fn get_donation(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Donation>> {
    let donation = state.donation_service.get_donation(&id)?;
    Ok(Json(donation))
}

#[derive(Deserialize)]
struct StatusRequest {
    status: String,
}

async fn set_donation_status(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<StatusRequest>,
) -> ApiResult<Json<StatusTransition>> {
    let transition = state
        .donation_service
        .set_donation_status(&id, &body.status)
        .await?;
    tracing::info!(
        "Donation {} moved from {} to {}, campaign total now {}",
        id,
        transition.previous_status,
        transition.donation.status,
        transition.campaign_current_amount
    );
    Ok(Json(transition))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/donations", post(submit_donation))
}

pub fn admin_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/donations", get(search_donations))
        .route("/donations/{id}", get(get_donation))
        .route("/donations/{id}/status", patch(set_donation_status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_with_blank_status_has_no_status_filter() {
        let filter = DonationQuery {
            search: Some("siti".to_string()),
            status: Some(" ".to_string()),
            page: None,
            page_size: None,
        }
        .into_filter()
        .unwrap();
        assert_eq!(filter.status, None);
        assert_eq!(filter.page, 1);
        assert_eq!(filter.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_query_rejects_unknown_status() {
        let result = DonationQuery {
            search: None,
            status: Some("approved".to_string()),
            page: None,
            page_size: None,
        }
        .into_filter();
        assert!(result.is_err());
    }

    #[test]
    fn test_redirect_sets_location_and_flash_cookie() {
        let response = redirect_with_flash("/campaigns/abc", "Thanks, all good");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "/campaigns/abc");
        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with("flash=Thanks%2C%20all%20good;"));
        assert!(cookie.contains("HttpOnly"));
    }
}
