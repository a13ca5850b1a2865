use axum::{body::Body, extract::Request, http::header, middleware::Next, response::Response};

/// Middleware to add security headers to all responses
pub async fn add_security_headers(req: Request, next: Next) -> Response<Body> {
    let mut response = next.run(req).await;

    let headers = response.headers_mut();

    headers.insert(
        header::X_FRAME_OPTIONS,
        header::HeaderValue::from_static("DENY"),
    );

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        header::HeaderValue::from_static("nosniff"),
    );

    headers.insert(
        header::REFERRER_POLICY,
        header::HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    // Plain server-rendered HTML with inline styles
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        header::HeaderValue::from_static(
            "default-src 'self'; \
             script-src 'none'; \
             style-src 'self' 'unsafe-inline'; \
             img-src 'self' data: https:; \
             frame-ancestors 'none'; \
             base-uri 'self'",
        ),
    );

    response
}
