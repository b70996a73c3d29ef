use axum::{
    extract::{Query, State},
    Json,
};

use crate::{error::Result, state::AppState};
use super::analytics_dto::{AnalyticsData, AnalyticsQuery, TimeRange};

/// Charts data for the analytics page
#[utoipa::path(
    get,
    path = "/api/analytics",
    params(AnalyticsQuery),
    responses(
        (status = 200, description = "Analytics document", body = AnalyticsData),
        (status = 401, description = "Unauthorized")
    ),
    tag = "analytics",
    security(("bearer_auth" = []))
)]
pub async fn get_analytics(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<AnalyticsData>> {
    let range = TimeRange::parse(query.time_range.as_deref());
    Ok(Json(state.analytics_service.analytics(range).await?))
}
