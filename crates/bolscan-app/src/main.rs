//! # bolscan-app
//!
//! BOLSCAN 바이너리 진입점.
//! 설정 로드, OCR/LLM 제공자 조립, 웹 서버 라이프사이클, CLI 업로드 클라이언트.

mod client;

use anyhow::{anyhow, Context, Result};
use bolscan_core::config_loader::load_config;
use bolscan_core::pipeline::ExtractionPipeline;
use bolscan_network::RemoteVisionLlm;
use bolscan_vision::ocr_provider_from_config;
use bolscan_web::WebServer;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::client::SubmitClient;

/// 선하증권(BOL) 이미지에서 BOL 번호와 중량을 추출하는 서비스
#[derive(Parser, Debug)]
#[command(name = "bolscan")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 추출 HTTP 서비스 실행
    Serve {
        /// 설정 파일 경로 (기본: 플랫폼 설정 디렉토리의 config.toml)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// 리스닝 포트 (설정 파일/환경변수보다 우선)
        #[arg(long, short = 'p')]
        port: Option<u16>,
    },
    /// 이미지를 서비스에 업로드하고 추출 결과 출력
    Submit {
        /// 업로드할 이미지 파일
        file: PathBuf,

        /// 서비스 URL (기본: 설정의 client.base_url)
        #[arg(long, short = 's')]
        server: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_filter = format!(
        "bolscan={lvl},bolscan_app={lvl},bolscan_core={lvl},bolscan_vision={lvl},bolscan_network={lvl},bolscan_web={lvl},tower_http={lvl}",
        lvl = args.log_level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .init();

    match args.command {
        Command::Serve { config, port } => serve(config, port).await,
        Command::Submit { file, server } => submit(file, server).await,
    }
}

/// 설정 로드 → 제공자 조립 → 서버 실행 (Ctrl-C까지)
async fn serve(config_path: Option<PathBuf>, port: Option<u16>) -> Result<()> {
    let mut config = load_config(config_path.as_deref()).context("설정 로드 실패")?;
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate().context("설정 검증 실패")?;

    info!(
        ocr_engine = ?config.ocr.engine,
        llm_provider = ?config.llm.provider_type,
        model = %config.llm.model,
        max_upload_mb = config.upload.max_megabytes(),
        "BOLSCAN 서버 설정 로드 완료"
    );

    let ocr = ocr_provider_from_config(&config.ocr).context("OCR 엔진 초기화 실패")?;
    let llm = Arc::new(
        RemoteVisionLlm::new(&config.llm).context("비전 LLM 클라이언트 초기화 실패")?,
    );
    let pipeline = ExtractionPipeline::new(ocr, llm);

    let server = WebServer::new(Arc::new(config), pipeline);
    info!("클라이언트 페이지: {}", server.url());

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            // 송신 측을 유지해야 서버가 곧바로 종료되지 않는다
            error!("시그널 핸들러 등록 실패: {e}");
            std::future::pending::<()>().await;
        }
        info!("Ctrl-C 수신, 종료 중");
        let _ = shutdown_tx.send(true);
    });

    server.run(shutdown_rx).await.context("웹 서버 실행 실패")?;
    Ok(())
}

/// 이미지 업로드 후 결과 출력
async fn submit(file: PathBuf, server: Option<String>) -> Result<()> {
    let base_url = match server {
        Some(url) => url,
        None => load_config(None).context("설정 로드 실패")?.client.base_url,
    };

    let client = SubmitClient::new(&base_url);
    let outcome = client.submit_file(&file).await;

    if outcome.is_success() {
        println!("{outcome}");
        Ok(())
    } else {
        Err(anyhow!("{outcome}"))
    }
}
