//! Inventory handlers.
//!
//! Every handler runs the role check before it looks at the body or path,
//! so a rejected caller never reaches validation or storage.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use stockpile_core::{InventoryItem, RestockHistoryEntry, RoleName};

use crate::auth::gate::ADMIN_ONLY;
use crate::auth::{authorize, Authenticated};
use crate::dto::{CreateItemRequest, HistoryQuery, RestockRequest, RestockResponse};
use crate::error::ApiError;
use crate::routes::invalid_input;
use crate::services::inventory_service;
use crate::AppState;

/// `POST /api/inventory`
pub async fn create_item(
    State(state): State<Arc<AppState>>,
    Authenticated(claims): Authenticated,
    body: Result<Json<CreateItemRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<InventoryItem>), ApiError> {
    authorize(Some(&claims), ADMIN_ONLY)?;
    let Json(req) = body.map_err(invalid_input)?;

    let item = inventory_service::create_item(&state, &claims, req).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// `POST /api/inventory/{item_id}/restock`
pub async fn restock(
    State(state): State<Arc<AppState>>,
    Authenticated(claims): Authenticated,
    path: Result<Path<u32>, PathRejection>,
    body: Result<Json<RestockRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RestockResponse>), ApiError> {
    authorize(Some(&claims), ADMIN_ONLY)?;
    let Path(item_id) = path.map_err(|_| ApiError::bad_request("Invalid itemID"))?;
    let Json(req) = body.map_err(invalid_input)?;

    let outcome =
        inventory_service::restock(&state, &claims, i64::from(item_id), i64::from(req.quantity))
            .await?;
    Ok((StatusCode::CREATED, Json(outcome.into())))
}

/// `GET /api/inventory/restock?itemId=`
pub async fn history(
    State(state): State<Arc<AppState>>,
    Authenticated(claims): Authenticated,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<Vec<RestockHistoryEntry>>, ApiError> {
    authorize(Some(&claims), &RoleName::ALL)?;
    let Query(query) = query.map_err(|_| ApiError::bad_request("Invalid input"))?;

    let item_id = parse_item_filter(query.item_id.as_deref())?;
    let entries = inventory_service::history(&state, item_id).await?;
    Ok(Json(entries))
}

/// Empty or absent means no filter.
fn parse_item_filter(raw: Option<&str>) -> Result<Option<i64>, ApiError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<u32>()
            .map(|id| Some(i64::from(id)))
            .map_err(|_| ApiError::bad_request("Invalid itemId")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item_filter() {
        assert_eq!(parse_item_filter(None).unwrap(), None);
        assert_eq!(parse_item_filter(Some("")).unwrap(), None);
        assert_eq!(parse_item_filter(Some(" 7 ")).unwrap(), Some(7));
        assert!(parse_item_filter(Some("abc")).is_err());
        assert!(parse_item_filter(Some("-1")).is_err());
    }
}
