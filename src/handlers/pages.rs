use std::sync::Arc;

use axum::extract::State;
use axum::response::Response;

use crate::errors::AppError;
use crate::services::catalog;
use crate::session::Session;
use crate::state::AppState;
use crate::views;

// GET /
pub async fn home(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Response, AppError> {
    let services = catalog::list_services(&state)?;
    Ok(super::render(&state, session, |ctx| views::home(ctx, &services)))
}
