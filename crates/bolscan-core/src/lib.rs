//! # bolscan-core
//!
//! BOLSCAN 도메인 모델, 포트(trait) 정의, 에러 타입.
//! 선하증권(BOL) 이미지 → OCR → 비전 LLM → 필드 파싱으로 이어지는
//! 추출 파이프라인의 핵심 로직을 제공한다.
//!
//! ## 구조
//!
//! - [`models`]: 추출 결과 등 도메인 데이터 구조체
//! - [`ports`]: OCR / 비전 LLM 포트 인터페이스 (async_trait)
//! - [`prompt`]: 모델 지시문 구성
//! - [`parser`]: 모델 응답 파싱 (엄격 JSON → 정규식 폴백)
//! - [`pipeline`]: OCR → LLM → 파싱 오케스트레이션
//! - [`error`]: 핵심 에러 타입 (thiserror)
//! - [`config`]: 애플리케이션 설정 구조체
//! - [`config_loader`]: 파일/환경변수 설정 로딩

pub mod config;
pub mod config_loader;
pub mod error;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod ports;
pub mod prompt;
