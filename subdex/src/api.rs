//! HTTP surface of the lookup service.

use axum::{
    Json, Router, async_trait,
    extract::{FromRequestParts, Path, Query, State},
    http::request::Parts,
    routing::get,
};
use serde::{Deserialize, Deserializer, de::Error as _};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    error::{SubstanceError, SubstanceResult},
    filters::{DEFAULT_LIMIT, parse_limit},
    model::{HealthRes, SubstanceDetail, SubstanceSummary},
    service::SubstanceService,
};

/// Shared state handed to every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    pub service: SubstanceService,
}

impl AppState {
    pub fn new(service: SubstanceService) -> Self {
        Self { service }
    }
}

/// Query string of the search endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
    #[serde(default, deserialize_with = "deserialize_limit")]
    pub limit: Option<i64>,
}

fn deserialize_limit<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;

    parse_limit(&raw).map(Some).map_err(D::Error::custom)
}

/// [`Query`] extractor whose rejection is a 422 JSON body.
#[derive(Debug)]
pub struct SearchQuery(pub SearchParams);

#[async_trait]
impl<S> FromRequestParts<S> for SearchQuery
where
    S: Send + Sync,
{
    type Rejection = SubstanceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<SearchParams>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| SubstanceError::InvalidQuery(rejection.body_text()))?;

        Ok(SearchQuery(params))
    }
}

/// Builds the router with permissive CORS and request tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/substances", get(list_substances))
        .route("/api/substances/:name", get(get_substance))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<HealthRes> {
    Json(HealthRes::ok())
}

async fn list_substances(
    State(state): State<AppState>,
    SearchQuery(params): SearchQuery,
) -> SubstanceResult<Json<Vec<SubstanceSummary>>> {
    let summaries = state
        .service
        .search(params.search.as_deref(), params.limit.unwrap_or(DEFAULT_LIMIT))
        .await?;

    Ok(Json(summaries))
}

async fn get_substance(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> SubstanceResult<Json<SubstanceDetail>> {
    Ok(Json(state.service.get_detail(&name).await?))
}
