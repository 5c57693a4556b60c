//! Catalog reads.

use axum::{
    extract::{Query, State},
    Json,
};
use nutricart_core::filter::FilterCriteria;
use nutricart_engine::commands::engine_query::{apply_engine_query, EngineQuery, EngineQueryResult};
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

const DB_ERROR: &str = "Database error";

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

/// Bounds arrive as raw strings; anything that is not an integer is ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    pub max_calories: Option<String>,
    pub min_protein: Option<String>,
    pub max_price: Option<String>,
}

impl FilterParams {
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::from_raw(
            self.max_calories.as_deref(),
            self.min_protein.as_deref(),
            self.max_price.as_deref(),
        )
    }
}

async fn query(state: &AppState, query: EngineQuery) -> Result<Json<EngineQueryResult>, ApiError> {
    state
        .db
        .run(DB_ERROR, move |conn| apply_engine_query(query, conn))
        .await
        .map(Json)
}

pub async fn list_items(State(state): State<AppState>) -> Result<Json<EngineQueryResult>, ApiError> {
    query(&state, EngineQuery::ItemList).await
}

pub async fn search_items(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<EngineQueryResult>, ApiError> {
    query(&state, EngineQuery::ItemSearch { query: params.query }).await
}

pub async fn filter_items(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<EngineQueryResult>, ApiError> {
    query(&state, EngineQuery::ItemFilter(params.criteria())).await
}

pub async fn favorite_items(State(state): State<AppState>) -> Result<Json<EngineQueryResult>, ApiError> {
    query(&state, EngineQuery::ItemFavorites).await
}
