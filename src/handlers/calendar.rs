use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::errors::AppError;
use crate::services::bookings;
use crate::services::calendar::generate_ics;
use crate::state::AppState;

// GET /api/bookings/:id/calendar.ics
pub async fn download_ics(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let booking = {
        let store = state.lock_store("Failed to fetch booking")?;
        bookings::get_booking(&store, &id)?
    };

    let ics = generate_ics(
        &booking,
        &state.config.restaurant_name,
        state.config.seating_minutes,
    )
    .ok_or_else(|| AppError::internal("Failed to fetch booking", "stored slot does not parse"))?;
    let filename = format!("booking-{}.ics", booking.id);

    Ok((
        [
            (header::CONTENT_TYPE, "text/calendar; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        ics,
    )
        .into_response())
}
