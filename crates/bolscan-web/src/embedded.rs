//! 업로드 & 표시 클라이언트 페이지 임베드 및 서빙.
//!
//! rust-embed로 `frontend/` 정적 파일을 바이너리에 포함한다.

use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use rust_embed::Embed;

/// 클라이언트 정적 파일
#[derive(Embed)]
#[folder = "frontend"]
#[include = "*.html"]
#[include = "*.js"]
#[include = "*.css"]
#[include = "*.svg"]
#[include = "*.ico"]
struct Assets;

/// 정적 파일 서빙을 위한 fallback 핸들러
pub async fn serve_static(uri: Uri) -> Response {
    serve_static_impl(uri)
}

fn serve_static_impl(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    // 빈 경로는 index.html로
    let path = if path.is_empty() { "index.html" } else { path };

    match Assets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            let cache_control = if path.ends_with(".html") {
                "no-cache"
            } else {
                "public, max-age=3600"
            };

            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, mime.as_ref()),
                    (header::CACHE_CONTROL, cache_control),
                ],
                content.data.into_owned(),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_is_embedded() {
        let index = Assets::get("index.html").expect("index.html 임베드");
        let html = String::from_utf8_lossy(&index.data);
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("app.js"));
    }

    #[test]
    fn root_serves_index() {
        let response = serve_static_impl(Uri::from_static("/"));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html"
        );
    }

    #[test]
    fn script_served_with_js_mime() {
        let response = serve_static_impl(Uri::from_static("/app.js"));
        assert_eq!(response.status(), StatusCode::OK);
        let mime = response.headers().get(header::CONTENT_TYPE).unwrap();
        assert!(mime.to_str().unwrap().contains("javascript"));
    }

    #[test]
    fn unknown_path_is_404() {
        let response = serve_static_impl(Uri::from_static("/nope.txt"));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
