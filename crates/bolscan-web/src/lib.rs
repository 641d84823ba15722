//! # bolscan-web
//!
//! BOL 추출 HTTP 서비스.
//! Axum 기반 REST API + 업로드 & 표시 클라이언트 페이지 임베드.
//!
//! ## 엔드포인트
//! - `POST /api/process-image`: 이미지 업로드 → BOL 번호/중량/중량 분류 추출
//! - `GET /api/health`: 생존 확인
//! - 그 외 경로: 임베드된 클라이언트 페이지

pub mod embedded;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod scratch;
pub mod upload;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use bolscan_core::config::{AppConfig, CorsConfig};
use bolscan_core::pipeline::ExtractionPipeline;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// multipart 경계/헤더 여유분: 본문 제한 = 최대 업로드 크기 + 여유분
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// 웹 서버 애플리케이션 상태
///
/// 요청 간 공유되는 것은 불변 설정과 파이프라인(무상태)뿐이다.
#[derive(Clone)]
pub struct AppState {
    /// 시작 시 한 번 로드된 설정
    pub config: Arc<AppConfig>,
    /// 추출 파이프라인
    pub pipeline: ExtractionPipeline,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, pipeline: ExtractionPipeline) -> Self {
        Self { config, pipeline }
    }
}

/// 라우터 구성 (테스트에서도 사용)
pub fn router(state: AppState) -> Router {
    let body_limit = usize::try_from(state.config.upload.max_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);
    let cors = cors_layer(&state.config.cors);

    Router::new()
        .nest("/api", routes::api_routes())
        .fallback(embedded::serve_static)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 허용 목록 기반 CORS 레이어
///
/// 목록에 없는 Origin에는 CORS 헤더를 붙이지 않아 브라우저가 응답을 차단한다.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(origin = %origin, "잘못된 CORS Origin 무시: {e}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// 추출 서비스 서버
pub struct WebServer {
    state: AppState,
}

impl WebServer {
    /// 새 웹 서버 생성
    pub fn new(config: Arc<AppConfig>, pipeline: ExtractionPipeline) -> Self {
        Self {
            state: AppState::new(config, pipeline),
        }
    }

    /// 서버 실행
    ///
    /// 설정된 주소에 바인드하고, `shutdown_rx`가 true가 되면 진행 중인 요청을
    /// 마친 뒤 종료한다.
    pub async fn run(self, mut shutdown_rx: watch::Receiver<bool>) -> Result<(), std::io::Error> {
        let addr = self.state.config.bind_address();
        let listener = TcpListener::bind(&addr).await?;
        info!("BOL 추출 서버 시작: http://{}", listener.local_addr()?);

        let app = router(self.state);

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                loop {
                    if *shutdown_rx.borrow() {
                        info!("웹 서버 종료 신호 수신");
                        break;
                    }
                    if shutdown_rx.changed().await.is_err() {
                        break;
                    }
                }
            })
            .await?;

        info!("BOL 추출 서버 종료");
        Ok(())
    }

    /// 서버 URL 반환
    pub fn url(&self) -> String {
        format!("http://localhost:{}", self.state.config.server.port)
    }
}
