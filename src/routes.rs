use std::sync::Arc;

use axum::{
    Form,
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, header::SET_COOKIE},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::warn;

use crate::{
    error::AppError, news::normalize, session::SessionHandle, state::AppState, views,
};

/// The page shows only the leading articles even though the upstream query
/// is capped at 10.
const DISPLAY_LIMIT: usize = 5;

#[derive(Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct NewsQuery {
    #[serde(default)]
    pub keyword: String,
}

pub async fn index_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let sess = state.sessions.open(&headers);
    let notices = state.sessions.take_notices(&sess);

    page(&sess, views::index(&notices))
}

pub async fn login_form_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let sess = state.sessions.open(&headers);
    let notices = state.sessions.take_notices(&sess);

    page(&sess, views::login(&notices))
}

pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(credentials): Form<Credentials>,
) -> impl IntoResponse {
    let sess = state.sessions.open(&headers);

    if state
        .accounts
        .verify(&credentials.email, &credentials.password)
    {
        state.sessions.set_identity(&sess, &credentials.email);
        state.sessions.push_notice(&sess, "Login successful!");

        return see_other(&sess, "/dashboard");
    }

    // Same notice for unknown email and wrong password.
    state
        .sessions
        .push_notice(&sess, &AppError::InvalidCredentials.to_string());
    let notices = state.sessions.take_notices(&sess);

    page(&sess, views::login(&notices))
}

pub async fn register_form_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let sess = state.sessions.open(&headers);
    let notices = state.sessions.take_notices(&sess);

    page(&sess, views::register(&notices))
}

pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(credentials): Form<Credentials>,
) -> Result<Response, AppError> {
    let sess = state.sessions.open(&headers);

    match state
        .accounts
        .register(&credentials.email, &credentials.password)
    {
        Ok(()) => {
            state.sessions.push_notice(&sess, "Registration successful!");

            Ok(see_other(&sess, "/login"))
        }
        Err(AppError::AlreadyExists) => {
            state
                .sessions
                .push_notice(&sess, &AppError::AlreadyExists.to_string());
            let notices = state.sessions.take_notices(&sess);

            Ok(page(&sess, views::register(&notices)))
        }
        Err(err) => Err(err),
    }
}

pub async fn dashboard_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let sess = state.sessions.open(&headers);
    let identity = match gate(&state, &sess) {
        Ok(identity) => identity,
        Err(redirect) => return redirect,
    };

    let notices = state.sessions.take_notices(&sess);

    page(&sess, views::dashboard(&notices, &identity))
}

pub async fn news_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<NewsQuery>,
) -> impl IntoResponse {
    let sess = state.sessions.open(&headers);
    if let Err(redirect) = gate(&state, &sess) {
        return redirect;
    }

    // Empty keyword: empty result set, no outbound call.
    let mut articles = Vec::new();
    if !query.keyword.is_empty() {
        match state.news.search(&query.keyword).await {
            Ok(raws) => articles = normalize(raws),
            Err(err) => {
                warn!("News fetch failed: {err}");
                state
                    .sessions
                    .push_notice(&sess, &AppError::from(err).to_string());
            }
        }
    }
    articles.truncate(DISPLAY_LIMIT);

    let notices = state.sessions.take_notices(&sess);

    page(&sess, views::news(&notices, &query.keyword, &articles))
}

pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let sess = state.sessions.open(&headers);

    state.sessions.clear_identity(&sess);
    state.sessions.push_notice(&sess, "Logged out successfully");

    see_other(&sess, "/")
}

fn gate(state: &AppState, sess: &SessionHandle) -> Result<String, Response> {
    state.sessions.require_identity(sess).map_err(|err| {
        state.sessions.push_notice(sess, &err.to_string());

        see_other(sess, "/login")
    })
}

fn page(sess: &SessionHandle, html: String) -> Response {
    let mut response = Html(html).into_response();
    attach_session(sess, &mut response);

    response
}

fn see_other(sess: &SessionHandle, to: &str) -> Response {
    let mut response = Redirect::to(to).into_response();
    attach_session(sess, &mut response);

    response
}

fn attach_session(sess: &SessionHandle, response: &mut Response) {
    if !sess.fresh {
        return;
    }

    if let Ok(value) = HeaderValue::from_str(&sess.cookie()) {
        response.headers_mut().append(SET_COOKIE, value);
    }
}
