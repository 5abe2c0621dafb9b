//! Settings read from the environment.

use anyhow::Result;

use crate::error::CaptureError;

pub const UPLOAD_CMD_VAR: &str = "CLOUDSHOT_UPLOAD_CMD";
pub const BASE_URL_VAR: &str = "CLOUDSHOT_BASE_URL";
pub const OCR_LANG_VAR: &str = "CLOUDSHOT_OCR_LANG";

const DEFAULT_OCR_LANG: &str = "eng";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    upload_command: Option<String>,
    base_url: Option<String>,
    pub ocr_lang: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Config {
            upload_command: get(UPLOAD_CMD_VAR),
            base_url: get(BASE_URL_VAR),
            ocr_lang: get(OCR_LANG_VAR).unwrap_or_else(|| DEFAULT_OCR_LANG.to_string()),
        }
    }

    /// Upload command template, required only by the upload sink.
    pub fn upload_command(&self) -> Result<&str> {
        self.upload_command
            .as_deref()
            .ok_or_else(|| CaptureError::MissingVar(UPLOAD_CMD_VAR).into())
    }

    pub fn base_url(&self) -> Result<&str> {
        self.base_url
            .as_deref()
            .ok_or_else(|| CaptureError::MissingVar(BASE_URL_VAR).into())
    }
}
