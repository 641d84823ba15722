//! 도메인 모델.

pub mod extraction;

pub use extraction::{
    ExtractedFields, ExtractionResult, ModelCompletion, ParsedCompletion, UploadedImage,
    RAW_OCR_PREVIEW_CHARS,
};
