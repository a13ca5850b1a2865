use axum::http::{self, StatusCode};
use axum::{
    body::Body,
    extract::rejection::QueryRejection,
    response::{IntoResponse, Response},
};
use snafu::Snafu;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Config error: {}", msg))]
    Config { msg: String },

    #[snafu(display("Server error: {}", source))]
    Server { source: std::io::Error },

    #[snafu(display("Failed to render template: {}", source))]
    Template { source: askama::Error },

    #[snafu(display("Response builder error: {}", source))]
    ResponseBuilder { source: http::Error },

    #[snafu(display("Health payload violates its contract: {}", msg))]
    HealthContract { msg: String },

    #[snafu(display("{}", msg))]
    Validation { msg: String },

    #[snafu(display("{}", msg))]
    BadRequest { msg: String },

    #[snafu(display("{}", msg))]
    QueryRejection { msg: String, source: QueryRejection },

    #[snafu(display("{}", msg))]
    Forbidden { msg: String },

    #[snafu(display("{}", msg))]
    NotFound { msg: String },

    #[snafu(display("Login to continue"))]
    LoginRequired,

    #[snafu(display("Stale form data. Refresh the page and try again."))]
    CsrfToken,

    #[snafu(display("{}", source))]
    Db { source: db::Error },

    #[snafu(display("{}: {}", msg, source))]
    HttpClient { msg: String, source: reqwest::Error },

    #[snafu(display("{}: {}", msg, source))]
    HttpResponseParse { msg: String, source: reqwest::Error },

    #[snafu(display("{}", msg))]
    Identity { msg: String },

    #[snafu(display("{}", msg))]
    Whatever { msg: String },
}

// Allow string slices to be converted to Error
impl From<&str> for Error {
    fn from(val: &str) -> Self {
        Self::Whatever {
            msg: val.to_string(),
        }
    }
}

impl From<String> for Error {
    fn from(val: String) -> Self {
        Self::Whatever { msg: val }
    }
}

impl From<db::Error> for Error {
    fn from(val: db::Error) -> Self {
        Self::Db { source: val }
    }
}

/// Allow Error to be converted to StatusCode
impl From<&Error> for StatusCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Validation { .. } => StatusCode::BAD_REQUEST,
            Error::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Error::QueryRejection { .. } => StatusCode::BAD_REQUEST,
            Error::CsrfToken => StatusCode::BAD_REQUEST,
            Error::Forbidden { .. } => StatusCode::FORBIDDEN,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::LoginRequired => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Allow errors to be rendered as response
impl IntoResponse for Error {
    fn into_response(self) -> Response<Body> {
        let info = ErrorInfo::from(&self);

        // Placeholder, the response mapper renders the actual body
        let mut res = Response::new(Body::empty());
        *res.status_mut() = info.status_code;
        res.extensions_mut().insert(info);
        res
    }
}

#[derive(Clone, Debug)]
pub struct ErrorInfo {
    pub status_code: StatusCode,
    pub title: String,
    pub message: String,
    /// Full error text, only written to logs
    pub detail: String,
}

impl From<&Error> for ErrorInfo {
    fn from(e: &Error) -> Self {
        let status_code: StatusCode = e.into();
        let detail = e.to_string();
        let message = if status_code.is_server_error() {
            "Something went wrong. Try again later.".to_string()
        } else {
            detail.clone()
        };
        Self {
            status_code,
            title: status_code
                .canonical_reason()
                .unwrap_or("Error")
                .to_string(),
            message,
            detail,
        }
    }
}
