// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Drink menu handlers.
//!
//! `GET /drinks` is public. Every other route runs behind
//! [`require_permission`](crate::auth::require_permission), so handlers
//! receive already-verified claims through [`Auth`].

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};

use crate::{
    auth::Auth,
    error::ApiError,
    models::{
        CreateDrinkRequest, DeleteDrinkResponse, DrinkDetailResponse, DrinkMenuResponse,
        UpdateDrinkRequest,
    },
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/",
    tag = "Drinks",
    responses((status = 200, description = "Service banner", body = String))
)]
pub async fn home() -> &'static str {
    "Drinks menu API"
}

/// Public menu: recipes reduced to colors and parts.
#[utoipa::path(
    get,
    path = "/drinks",
    tag = "Drinks",
    responses((status = 200, body = DrinkMenuResponse))
)]
pub async fn list_drinks(State(state): State<AppState>) -> Json<DrinkMenuResponse> {
    let store = state.store.read().await;
    Json(DrinkMenuResponse {
        success: true,
        drinks: store.list().iter().map(|drink| drink.short()).collect(),
    })
}

/// Full recipes, for staff holding `get:drinks-detail`.
#[utoipa::path(
    get,
    path = "/drinks-detail",
    tag = "Drinks",
    security(("bearer" = [])),
    responses(
        (status = 200, body = DrinkDetailResponse),
        (status = 400, description = "Token has no permissions claim"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 403, description = "Permission not granted")
    )
)]
pub async fn list_drink_details(
    Auth(claims): Auth,
    State(state): State<AppState>,
) -> Json<DrinkDetailResponse> {
    let store = state.store.read().await;
    tracing::debug!(subject = %claims.subject, "Listing drink details");
    Json(DrinkDetailResponse {
        success: true,
        drinks: store.list().iter().map(|drink| drink.long()).collect(),
    })
}

#[utoipa::path(
    post,
    path = "/drinks",
    tag = "Drinks",
    security(("bearer" = [])),
    request_body = CreateDrinkRequest,
    responses(
        (status = 200, body = DrinkDetailResponse),
        (status = 400, description = "Missing field or duplicate title"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 403, description = "Permission not granted"),
        (status = 422, description = "Body has the wrong shape")
    )
)]
pub async fn create_drink(
    Auth(claims): Auth,
    State(state): State<AppState>,
    body: Result<Json<CreateDrinkRequest>, JsonRejection>,
) -> Result<Json<DrinkDetailResponse>, ApiError> {
    let Json(request) = body?;
    let (Some(title), Some(recipe)) = (request.title, request.recipe) else {
        return Err(ApiError::bad_request("title and recipe are required"));
    };

    let drink = state.store.write().await.create(title, recipe.into())?;
    tracing::info!(subject = %claims.subject, drink_id = drink.id, title = %drink.title, "Drink created");

    Ok(Json(DrinkDetailResponse {
        success: true,
        drinks: vec![drink.long()],
    }))
}

/// Update the title, the recipe, or both.
#[utoipa::path(
    patch,
    path = "/drinks/{id}",
    tag = "Drinks",
    security(("bearer" = [])),
    params(("id" = i64, Path, description = "Drink ID")),
    request_body = UpdateDrinkRequest,
    responses(
        (status = 200, body = DrinkDetailResponse),
        (status = 400, description = "Invalid body or duplicate title"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 403, description = "Permission not granted"),
        (status = 404, description = "No such drink")
    )
)]
pub async fn update_drink(
    Auth(claims): Auth,
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateDrinkRequest>, JsonRejection>,
) -> Result<Json<DrinkDetailResponse>, ApiError> {
    let Path(id) = id?;
    let mut store = state.store.write().await;
    if store.get(id).is_none() {
        return Err(ApiError::not_found(format!("no drink with id {id}")));
    }

    let Json(request) = body?;
    let drink = store.update(id, request.title, request.recipe.map(Into::into))?;
    tracing::info!(subject = %claims.subject, drink_id = id, "Drink updated");

    Ok(Json(DrinkDetailResponse {
        success: true,
        drinks: vec![drink.long()],
    }))
}

#[utoipa::path(
    delete,
    path = "/drinks/{id}",
    tag = "Drinks",
    security(("bearer" = [])),
    params(("id" = i64, Path, description = "Drink ID")),
    responses(
        (status = 200, body = DeleteDrinkResponse),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 403, description = "Permission not granted"),
        (status = 404, description = "No such drink")
    )
)]
pub async fn delete_drink(
    Auth(claims): Auth,
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeleteDrinkResponse>, ApiError> {
    let Path(id) = id?;
    let drink = state.store.write().await.delete(id)?;
    tracing::info!(subject = %claims.subject, drink_id = drink.id, "Drink deleted");

    Ok(Json(DeleteDrinkResponse {
        success: true,
        delete: drink.id,
    }))
}
