use std::sync::Arc;

use axum::extract::State;
use axum::response::Response;
use axum::Form;
use serde::Deserialize;

use super::{blocking, flash, redirect_with, render};
use crate::errors::AppError;
use crate::i18n::Text;
use crate::services::auth;
use crate::session::{FlashLevel, Session};
use crate::state::AppState;
use crate::views;

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct RegisterForm {
    pub fullname: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

// GET /register
pub async fn register_form(State(state): State<Arc<AppState>>, session: Session) -> Response {
    render(&state, session, views::register)
}

// POST /register
pub async fn register_submit(
    State(state): State<Arc<AppState>>,
    mut session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    let RegisterForm {
        fullname,
        email,
        password,
    } = form;
    let result = blocking(&state, move |state| {
        auth::register(state, &fullname, &email, &password)
    })
    .await;

    match result {
        Ok(_) => Ok(redirect_with(
            &state,
            session,
            FlashLevel::Success,
            Text::RegisterSuccess,
            "/login",
        )),
        Err(AppError::DuplicateEmail) => {
            flash(&state, &mut session, FlashLevel::Danger, Text::EmailTaken);
            Ok(render(&state, session, views::register))
        }
        Err(AppError::Validation(_)) => {
            flash(&state, &mut session, FlashLevel::Warning, Text::MissingFields);
            Ok(render(&state, session, views::register))
        }
        Err(e) => Err(e),
    }
}

// GET /login
pub async fn login_form(State(state): State<Arc<AppState>>, session: Session) -> Response {
    render(&state, session, views::login)
}

// POST /login
pub async fn login_submit(
    State(state): State<Arc<AppState>>,
    mut session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let LoginForm { email, password } = form;
    let result = blocking(&state, move |state| auth::login(state, &email, &password)).await;

    match result {
        Ok(user) => {
            session.login(user.id, &user.fullname);
            Ok(redirect_with(
                &state,
                session,
                FlashLevel::Success,
                Text::LoginSuccess,
                "/",
            ))
        }
        Err(AppError::InvalidCredentials) => {
            flash(&state, &mut session, FlashLevel::Danger, Text::InvalidCredentials);
            Ok(render(&state, session, views::login))
        }
        Err(e) => Err(e),
    }
}

// GET /logout
pub async fn logout(State(state): State<Arc<AppState>>, mut session: Session) -> Response {
    session.clear();
    redirect_with(&state, session, FlashLevel::Info, Text::LoggedOut, "/")
}
