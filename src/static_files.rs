use axum::{
    http::{header, HeaderValue},
    response::{Html, IntoResponse, Response},
};

static INDEX_HTML: &str = include_str!("../assets/index.html");

/// Browser client for the document API
/// GET /
pub async fn index() -> Response {
    let mut response = Html(INDEX_HTML).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}
