//! API 라우트 정의.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::AppState;

/// API 라우트 생성
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // 추출
        .route("/process-image", post(handlers::extract::process_image))
        // 헬스 체크
        .route("/health", get(handlers::health::health))
}
