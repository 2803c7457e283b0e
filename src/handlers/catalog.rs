use std::sync::Arc;

use axum::extract::State;
use axum::response::Response;
use axum::Form;
use serde::Deserialize;

use super::{flash, redirect_with, render};
use crate::errors::AppError;
use crate::i18n::Text;
use crate::services::catalog;
use crate::session::{FlashLevel, Session};
use crate::state::AppState;
use crate::views;

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct ServiceForm {
    pub name: String,
    pub description: String,
    pub price: String,
}

fn login_required(state: &AppState, session: Session) -> Response {
    redirect_with(
        state,
        session,
        FlashLevel::Warning,
        Text::LoginRequiredForService,
        "/login",
    )
}

// GET /add_service
pub async fn add_service_form(State(state): State<Arc<AppState>>, session: Session) -> Response {
    if session.user().is_none() {
        return login_required(&state, session);
    }
    render(&state, session, views::add_service)
}

// POST /add_service
pub async fn add_service_submit(
    State(state): State<Arc<AppState>>,
    mut session: Session,
    Form(form): Form<ServiceForm>,
) -> Result<Response, AppError> {
    let Some(user) = session.user() else {
        return Ok(login_required(&state, session));
    };

    match catalog::add_service(&state, user.id, &form.name, &form.description, &form.price) {
        Ok(_) => Ok(redirect_with(
            &state,
            session,
            FlashLevel::Success,
            Text::ServiceAdded,
            "/",
        )),
        Err(AppError::InvalidPrice(e)) => {
            tracing::debug!(error = %e, "rejected service price");
            flash(&state, &mut session, FlashLevel::Danger, Text::InvalidPrice);
            Ok(render(&state, session, views::add_service))
        }
        Err(AppError::Validation(_)) => {
            flash(&state, &mut session, FlashLevel::Warning, Text::MissingFields);
            Ok(render(&state, session, views::add_service))
        }
        Err(AppError::Unauthorized) => {
            // session refers to a user that no longer exists
            session.clear();
            Ok(login_required(&state, session))
        }
        Err(e) => Err(e),
    }
}
