//! Tesseract CLI OCR 제공자.
//!
//! `tesseract <image> stdout -l <lang>`을 비동기 서브프로세스로 실행한다.
//! 시스템 라이브러리 링크 없이 `tesseract` 실행 파일만 있으면 동작한다.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use bolscan_core::config::OcrConfig;
use bolscan_core::error::CoreError;
use bolscan_core::ports::ocr_provider::OcrProvider;

/// Tesseract 실행 파일 기반 OCR 제공자
#[derive(Debug, Clone)]
pub struct TesseractCliProvider {
    /// 실행 파일 경로
    command: String,
    /// 언어 프로필
    language: String,
    /// tessdata 경로 (선택)
    tessdata_path: Option<PathBuf>,
}

impl TesseractCliProvider {
    /// 설정으로부터 생성
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            command: config.tesseract_cmd.clone(),
            language: config.language.clone(),
            tessdata_path: config.tessdata_path.clone(),
        }
    }

    fn build_command(&self, image_path: &Path) -> Command {
        let mut cmd = Command::new(&self.command);
        cmd.arg(image_path).arg("stdout").arg("-l").arg(&self.language);
        if let Some(dir) = &self.tessdata_path {
            cmd.arg("--tessdata-dir").arg(dir);
        }
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl OcrProvider for TesseractCliProvider {
    async fn recognize(&self, image_path: &Path) -> Result<String, CoreError> {
        debug!(
            command = %self.command,
            language = %self.language,
            path = %image_path.display(),
            "tesseract 실행"
        );

        let output = self
            .build_command(image_path)
            .output()
            .await
            .map_err(|e| CoreError::OcrError(format!("{} 실행 실패: {e}", self.command)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(status = %output.status, "tesseract 비정상 종료");
            return Err(CoreError::OcrError(format!(
                "tesseract 비정상 종료 ({}): {}",
                output.status,
                stderr.trim().chars().take(200).collect::<String>()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn provider_name(&self) -> &str {
        "tesseract-cli"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider_with_command(command: &str) -> TesseractCliProvider {
        TesseractCliProvider::new(&OcrConfig {
            tesseract_cmd: command.to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn command_arguments_include_language_and_tessdata() {
        let provider = TesseractCliProvider::new(&OcrConfig {
            tessdata_path: Some(PathBuf::from("/opt/tessdata")),
            ..Default::default()
        });
        let cmd = provider.build_command(Path::new("/tmp/bol.png"));
        let args: Vec<String> = cmd
            .as_std()
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            vec![
                "/tmp/bol.png",
                "stdout",
                "-l",
                "eng",
                "--tessdata-dir",
                "/opt/tessdata"
            ]
        );
    }

    #[tokio::test]
    async fn missing_executable_is_ocr_error() {
        let provider = provider_with_command("/nonexistent/bin/tesseract");
        let err = provider
            .recognize(Path::new("/tmp/bol.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::OcrError(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_is_ocr_error() {
        let provider = provider_with_command("false");
        let err = provider
            .recognize(Path::new("/tmp/bol.png"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("비정상 종료"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn stdout_is_returned_unmodified() {
        // `sh <file> stdout -l eng`: 이미지 자리에 스크립트를 넘겨 엔진 출력을 흉내낸다
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("fake-ocr.sh");
        std::fs::write(&script, "printf '  BOL 42\\nNet Weight: 10 kg\\n'\n").unwrap();

        let provider = provider_with_command("sh");
        let text = provider.recognize(&script).await.unwrap();
        assert_eq!(text, "  BOL 42\nNet Weight: 10 kg\n");
    }
}
