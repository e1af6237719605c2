use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{Local, NaiveDateTime};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::models::{BookingFilter, NewBooking};
use crate::services::bookings::{self, ListOptions};
use crate::state::AppState;

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

// POST /api/bookings
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewBooking>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let Json(req) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let booking = {
        let mut store = state.lock_store("Failed to create booking")?;
        bookings::create_booking(&mut store, &req, local_now())?
    };

    tracing::info!(
        id = %booking.id,
        date = %booking.date,
        time = %booking.time,
        guests = booking.guests,
        "booking created"
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": booking })),
    ))
}

// GET /api/bookings
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub filter: Option<BookingFilter>,
    pub q: Option<String>,
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let opts = ListOptions {
        filter: query.filter.unwrap_or_default(),
        search: query.q,
    };

    let list = {
        let store = state.lock_store("Failed to fetch bookings")?;
        bookings::list_bookings(&store, &opts, local_now().date())
    };

    Ok(Json(json!({ "success": true, "data": list })))
}

// GET /api/bookings/:id
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let booking = {
        let store = state.lock_store("Failed to fetch booking")?;
        bookings::get_booking(&store, &id)?
    };

    Ok(Json(json!({ "success": true, "data": booking })))
}

// DELETE /api/bookings/:id
pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let removed = {
        let mut store = state.lock_store("Failed to delete booking")?;
        bookings::delete_booking(&mut store, &id, local_now())?
    };

    tracing::info!(id = %removed.id, date = %removed.date, time = %removed.time, "booking deleted");

    Ok(Json(json!({
        "success": true,
        "message": "Booking deleted successfully"
    })))
}
