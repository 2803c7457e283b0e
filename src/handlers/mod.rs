pub mod auth;
pub mod bookings;
pub mod catalog;
pub mod health;
pub mod pages;

use std::sync::Arc;

use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::errors::AppError;
use crate::i18n::Text;
use crate::session::{FlashLevel, Session};
use crate::state::AppState;
use crate::views::PageContext;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/health", get(health::health))
        .route("/register", get(auth::register_form).post(auth::register_submit))
        .route("/login", get(auth::login_form).post(auth::login_submit))
        .route("/logout", get(auth::logout))
        .route(
            "/add_service",
            get(catalog::add_service_form).post(catalog::add_service_submit),
        )
        .route(
            "/book/:service_id",
            get(bookings::book_form).post(bookings::book_submit),
        )
        .route("/new_bookings_count", get(bookings::new_bookings_count))
        .route("/owner_bookings", get(bookings::owner_bookings))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Renders a page, consuming the pending flashes.
fn render(
    state: &AppState,
    mut session: Session,
    page: impl FnOnce(&PageContext) -> String,
) -> Response {
    let ctx = PageContext {
        locale: state.config.locale,
        user: session.user(),
        flashes: session.take_flashes(),
    };
    let html = page(&ctx);
    (session.into_jar(), Html(html)).into_response()
}

fn flash(state: &AppState, session: &mut Session, level: FlashLevel, text: Text) {
    session.flash(level, text.get(state.config.locale));
}

fn redirect_with(
    state: &AppState,
    mut session: Session,
    level: FlashLevel,
    text: Text,
    to: &str,
) -> Response {
    flash(state, &mut session, level, text);
    (session.into_jar(), Redirect::to(to)).into_response()
}

/// Runs a CPU-bound service call (argon2 hashing) on the blocking pool.
async fn blocking<T, F>(state: &Arc<AppState>, f: F) -> Result<T, AppError>
where
    F: FnOnce(&AppState) -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || f(&state))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("blocking task failed: {e}")))?
}
