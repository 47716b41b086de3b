use actix_web::{web, HttpResponse};
use actix_middleware::UserId;
use serde::Deserialize;

use crate::app_state::AppState;
use crate::error::Result;
use crate::services::FeedQuery;

/// Raw query-string values; sanitised by `FeedQuery::from_raw`
#[derive(Debug, Deserialize)]
pub struct FeedParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub interests: Option<String>,
}

/// Unfiltered feed page
/// GET /api/feed?page=&limit=
pub async fn get_feed(
    state: web::Data<AppState>,
    user: UserId,
    params: web::Query<FeedParams>,
) -> Result<HttpResponse> {
    let query = FeedQuery::from_raw(params.page.as_deref(), params.limit.as_deref(), None);
    let page = state.feed.get_feed(user.0, &query).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// Feed page filtered by interest-tag intersection
/// GET /api/feed/filter?page=&limit=&interests=a,b
pub async fn filter_feed(
    state: web::Data<AppState>,
    user: UserId,
    params: web::Query<FeedParams>,
) -> Result<HttpResponse> {
    let query = FeedQuery::from_raw(
        params.page.as_deref(),
        params.limit.as_deref(),
        params.interests.as_deref(),
    );
    let page = state.feed.get_feed(user.0, &query).await?;
    Ok(HttpResponse::Ok().json(page))
}
