use askama::Template;
use axum::{
    Json,
    body::Body,
    http::header,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::{Error, error::ErrorInfo, models::TemplateData};
use tenancy::actor::Actor;
use tenancy::dto::ErrorMessageDto;

#[derive(Clone, Template)]
#[template(path = "pages/error.html")]
struct ErrorPageData {
    t: TemplateData,
    error: ErrorInfo,
}

/// Fallback for paths no router knows about
pub async fn error_handler() -> Response<Body> {
    let err = Error::NotFound {
        msg: String::from("The page you are looking for cannot be found."),
    };
    handle_error(Actor::default(), ErrorInfo::from(&err))
}

/// Render an error page
pub fn handle_error(actor: Actor, error: ErrorInfo) -> Response<Body> {
    let status_code = error.status_code;
    let mut t = TemplateData::new(actor);
    t.title = error.title.clone();

    let tpl = ErrorPageData { t, error };

    match tpl.render() {
        Ok(html) => (
            status_code,
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            html,
        )
            .into_response(),
        Err(e) => {
            error!("Unable to render error page: {}", e);
            (status_code, tpl.error.message).into_response()
        }
    }
}

/// Render an error as the JSON error body used by the API routes
pub fn handle_api_error(error: ErrorInfo) -> Response<Body> {
    let body = ErrorMessageDto {
        status_code: error.status_code.as_u16(),
        message: error.message,
        error: error.title,
    };

    (error.status_code, Json(body)).into_response()
}

/// Server errors are logged once here with their full detail
pub fn log_error(error: &ErrorInfo) {
    if error.status_code.is_server_error() {
        error!("{}", error.detail);
    }
}
