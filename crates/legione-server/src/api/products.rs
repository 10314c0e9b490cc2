use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use legione_scraper::{find_product_link, format_post, ProductRecord};

use crate::middleware::RequestId;

use super::{map_scraper_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct LookupItem {
    #[serde(flatten)]
    record: ProductRecord,
    discount_percent: u32,
    post: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct LookupQuery {
    pub url: Option<String>,
}

pub(super) async fn lookup_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<ApiResponse<LookupItem>>, ApiError> {
    let input = query.url.as_deref().map(str::trim).unwrap_or_default();
    if input.is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "bad_request",
            "query parameter 'url' is required",
        ));
    }
    let link = find_product_link(input).unwrap_or(input);

    let record = state
        .scraper
        .scrape(link)
        .await
        .map_err(|e| map_scraper_error(req_id.0.clone(), &e))?;

    let data = LookupItem {
        discount_percent: record.discount_percent(),
        post: format_post(&record),
        record,
    };

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
