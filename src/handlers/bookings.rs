use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Response;
use axum::{Form, Json};
use serde::{Deserialize, Serialize};

use super::{redirect_with, render};
use crate::errors::AppError;
use crate::i18n::Text;
use crate::services::booking;
use crate::session::{FlashLevel, Session};
use crate::state::AppState;
use crate::views;

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct BookingForm {
    pub email: String,
}

fn service_not_found(state: &AppState, session: Session) -> Response {
    redirect_with(state, session, FlashLevel::Danger, Text::ServiceNotFound, "/")
}

// GET /book/:service_id
//
// Ids that are not an i64 get the same not-found redirect as unknown ones.
pub async fn book_form(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(raw_id): Path<String>,
) -> Result<Response, AppError> {
    let Ok(service_id) = raw_id.parse::<i64>() else {
        return Ok(service_not_found(&state, session));
    };

    match booking::get_service(&state, service_id) {
        Ok(service) => Ok(render(&state, session, |ctx| views::book_service(ctx, &service))),
        Err(AppError::NotFound(_)) => Ok(service_not_found(&state, session)),
        Err(e) => Err(e),
    }
}

// POST /book/:service_id
pub async fn book_submit(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(raw_id): Path<String>,
    Form(form): Form<BookingForm>,
) -> Result<Response, AppError> {
    let Ok(service_id) = raw_id.parse::<i64>() else {
        return Ok(service_not_found(&state, session));
    };

    match booking::create_booking(&state, service_id, &form.email) {
        Ok(_) => Ok(redirect_with(
            &state,
            session,
            FlashLevel::Success,
            Text::BookingCreated,
            "/",
        )),
        Err(AppError::NotFound(_)) => Ok(service_not_found(&state, session)),
        Err(AppError::Validation(_)) => Ok(redirect_with(
            &state,
            session,
            FlashLevel::Warning,
            Text::MissingFields,
            &format!("/book/{service_id}"),
        )),
        Err(e) => Err(e),
    }
}

// GET /new_bookings_count
#[derive(Serialize)]
pub struct NewBookingsCount {
    new_count: i64,
}

pub async fn new_bookings_count(
    State(state): State<Arc<AppState>>,
) -> Result<Json<NewBookingsCount>, AppError> {
    let new_count = booking::count_unseen_bookings(&state)?;
    Ok(Json(NewBookingsCount { new_count }))
}

// GET /owner_bookings
//
// Viewing this page marks every listed booking as seen.
pub async fn owner_bookings(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Response, AppError> {
    let Some(user) = session.user() else {
        return Ok(redirect_with(
            &state,
            session,
            FlashLevel::Warning,
            Text::LoginRequired,
            "/login",
        ));
    };

    let bookings = booking::list_owner_bookings(&state, user.id)?;
    Ok(render(&state, session, |ctx| views::owner_bookings(ctx, &bookings)))
}
