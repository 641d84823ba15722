//! 설정 로딩.
//!
//! 우선순위 (낮음 → 높음):
//! 1. 구조체 기본값 (serde default)
//! 2. 설정 파일: `--config` 경로, 없으면 플랫폼 설정 디렉토리의 `config.toml` (있을 때만)
//! 3. `BOLSCAN__` 접두 환경변수 (예: `BOLSCAN__SERVER__PORT=8080`)
//! 4. `BOLSCAN_LLM_API_KEY` (API 키 전용)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::error::CoreError;

/// 환경변수 접두사
pub const ENV_PREFIX: &str = "BOLSCAN";

/// API 키 전용 환경변수
pub const API_KEY_ENV: &str = "BOLSCAN_LLM_API_KEY";

/// 설정 파일 이름
const CONFIG_FILE_NAME: &str = "config.toml";

/// 플랫폼별 기본 설정 파일 경로
///
/// - macOS: `~/Library/Application Support/com.bolscan.bolscan/config.toml`
/// - Linux: `~/.config/bolscan/config.toml`
/// - Windows: `%APPDATA%\bolscan\bolscan\config\config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "bolscan", "bolscan").map(|p| p.config_dir().join(CONFIG_FILE_NAME))
}

/// 설정 로드 (프로세스 시작 시 한 번)
pub fn load_config(explicit_path: Option<&Path>) -> Result<AppConfig, CoreError> {
    load_config_with_env(explicit_path, None)
}

/// 환경변수 출처를 지정해 설정 로드
///
/// `env`가 `None`이면 프로세스 환경변수를 읽는다.
pub fn load_config_with_env(
    explicit_path: Option<&Path>,
    env: Option<config::Map<String, String>>,
) -> Result<AppConfig, CoreError> {
    let mut builder = config::Config::builder();

    match explicit_path {
        Some(path) => {
            if !path.exists() {
                return Err(CoreError::Config(format!(
                    "설정 파일 없음: {}",
                    path.display()
                )));
            }
            info!("설정 파일 로드: {}", path.display());
            builder = builder.add_source(config::File::from(path).required(true));
        }
        None => {
            if let Some(path) = default_config_path() {
                debug!("기본 설정 파일 경로: {}", path.display());
                builder = builder.add_source(config::File::from(path).required(false));
            }
        }
    }

    let api_key = match &env {
        Some(vars) => vars.get(API_KEY_ENV).cloned(),
        None => std::env::var(API_KEY_ENV).ok(),
    };

    builder = builder.add_source(
        config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("cors.allowed_origins")
            .source(env),
    );

    let mut app_config: AppConfig = builder
        .build()
        .and_then(|c| c.try_deserialize())
        .map_err(|e| CoreError::Config(format!("설정 로드 실패: {e}")))?;

    if let Some(key) = api_key {
        if !key.trim().is_empty() {
            app_config.llm.api_key = key;
        }
    }

    Ok(app_config)
}
