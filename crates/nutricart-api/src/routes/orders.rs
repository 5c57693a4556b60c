//! Order commit and order/statistics reads.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use nutricart_core::errors::{ExError, NutriCartError};
use nutricart_core::model::{NutritionTotals, OrderId, UserId};
use nutricart_engine::commands::engine_command::{
    apply_engine_command, EngineCommand, EngineCommandResult,
};
use nutricart_engine::commands::engine_query::{apply_engine_query, EngineQuery, EngineQueryResult};
use nutricart_engine::commands::order_commit::OrderCommitRequest;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

const DB_ERROR: &str = "Database error";
const SAVE_ERROR: &str = "Failed to save order";

/// One cart entry as the client sends it. Only `name` is read; the
/// catalog attributes echoed alongside it are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutItem {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub items: Vec<CheckoutItem>,
    #[serde(default)]
    pub totals: NutritionTotals,
}

impl CheckoutRequest {
    fn into_command(self) -> Result<OrderCommitRequest, ExError> {
        let user_id = self.user_id.ok_or_else(|| NutriCartError::MissingField {
            field: "userId".to_string(),
        })?;
        Ok(OrderCommitRequest {
            user_id,
            items: self.items.into_iter().map(|item| item.name).collect(),
            totals: self.totals,
        })
    }
}

pub async fn create_order(
    State(state): State<AppState>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(checkout) = payload.map_err(|e| ApiError::MalformedPayload(e.body_text()))?;
    let request = checkout.into_command().map_err(|source| ApiError::Engine {
        context: SAVE_ERROR,
        source,
    })?;

    let result = state
        .db
        .run(SAVE_ERROR, move |conn| {
            apply_engine_command(EngineCommand::CommitOrder(request), conn)
        })
        .await?;

    let EngineCommandResult::OrderCommitted(committed) = result;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Order saved successfully",
            "orderId": committed.order_id,
        })),
    ))
}

async fn query(state: &AppState, query: EngineQuery) -> Result<Json<EngineQueryResult>, ApiError> {
    state
        .db
        .run(DB_ERROR, move |conn| apply_engine_query(query, conn))
        .await
        .map(Json)
}

pub async fn orders_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<EngineQueryResult>, ApiError> {
    query(&state, EngineQuery::OrdersForUser { user_id }).await
}

pub async fn favorite_orders(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<EngineQueryResult>, ApiError> {
    query(&state, EngineQuery::FavoriteOrdersForUser { user_id }).await
}

pub async fn order_detail(
    State(state): State<AppState>,
    Path(order_id): Path<OrderId>,
) -> Result<Json<EngineQueryResult>, ApiError> {
    query(&state, EngineQuery::OrderDetail { order_id }).await
}

pub async fn user_stats(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<EngineQueryResult>, ApiError> {
    query(&state, EngineQuery::UserStats { user_id }).await
}
