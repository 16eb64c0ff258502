use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use thiserror::Error;

use crate::news::FetchError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Email already registered")]
    AlreadyExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Please login first")]
    Unauthenticated,

    #[error("Registration failed")]
    Hashing,

    #[error("Failed to fetch news")]
    News(#[from] FetchError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Unauthenticated => return Redirect::to("/login").into_response(),
            AppError::AlreadyExists | AppError::InvalidCredentials => StatusCode::BAD_REQUEST,
            AppError::Hashing => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::News { .. } => StatusCode::BAD_GATEWAY,
        };

        (status, self.to_string()).into_response()
    }
}
