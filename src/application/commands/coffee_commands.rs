// src/application/commands/coffee_commands.rs
//
// Coffee handlers (`/api/coffees`)

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};

use super::run_blocking;
use crate::application::dto::{AffordableQuery, CoffeeDto, FilterQuery, SearchQuery};
use crate::application::error_handling::{request_correlation_id, ApiResult};
use crate::application::extract::{ApiJson, ApiPath, ApiQuery};
use crate::application::state::AppState;
use crate::domain::Coffee;
use crate::error::AppError;

pub async fn list_coffees(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<Coffee>>> {
    let service = state.coffee_service.clone();
    let coffees =
        run_blocking(request_correlation_id(&headers), move || service.list_coffees()).await?;

    Ok(Json(coffees))
}

pub async fn get_coffee(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Coffee>> {
    let service = state.coffee_service.clone();
    let coffee = run_blocking(request_correlation_id(&headers), move || {
        service
            .get_coffee(id)?
            .ok_or_else(|| AppError::not_found(format!("Coffee {}", id)))
    })
    .await?;

    Ok(Json(coffee))
}

/// `GET /api/coffees/search?pattern=latte`
pub async fn search_coffees(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> ApiResult<Json<Vec<Coffee>>> {
    let service = state.coffee_service.clone();
    let coffees = run_blocking(request_correlation_id(&headers), move || {
        service.search_by_name(&query.pattern)
    })
    .await?;

    Ok(Json(coffees))
}

/// `GET /api/coffees/filter?size=MEDIUM&minPrice=4.00`
pub async fn filter_coffees(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiQuery(query): ApiQuery<FilterQuery>,
) -> ApiResult<Json<Vec<Coffee>>> {
    let service = state.coffee_service.clone();
    let coffees = run_blocking(request_correlation_id(&headers), move || {
        service.filter_by_size_and_min_price(query.size, &query.min_price)
    })
    .await?;

    Ok(Json(coffees))
}

/// `GET /api/coffees/affordable?size=LARGE&maxPrice=6.00`
pub async fn affordable_coffees(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiQuery(query): ApiQuery<AffordableQuery>,
) -> ApiResult<Json<Vec<Coffee>>> {
    let service = state.coffee_service.clone();
    let coffees = run_blocking(request_correlation_id(&headers), move || {
        service.affordable(query.size, &query.max_price)
    })
    .await?;

    Ok(Json(coffees))
}

pub async fn create_coffee(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiJson(dto): ApiJson<CoffeeDto>,
) -> ApiResult<(StatusCode, Json<Coffee>)> {
    let service = state.coffee_service.clone();
    let created = run_blocking(request_correlation_id(&headers), move || {
        service.create_coffee(dto.into())
    })
    .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_coffee(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiPath(id): ApiPath<i64>,
    ApiJson(dto): ApiJson<CoffeeDto>,
) -> ApiResult<Json<Coffee>> {
    let service = state.coffee_service.clone();
    let updated = run_blocking(request_correlation_id(&headers), move || {
        service.update_coffee(id, dto.into())
    })
    .await?;

    Ok(Json(updated))
}

pub async fn delete_coffee(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    let service = state.coffee_service.clone();
    run_blocking(request_correlation_id(&headers), move || service.delete_coffee(id)).await?;

    Ok(StatusCode::NO_CONTENT)
}
