//! JSON Reader

use std::fs;
use std::path::Path;

use crate::io::{IoError, IoResult, Reader};
use crate::site::SiteContent;

/// Reader for JSON site content
pub struct JsonReader;

impl JsonReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReader {
    fn default() -> Self {
        Self::new()
    }
}

impl Reader for JsonReader {
    fn read(&self, input: &Path) -> IoResult<SiteContent> {
        let content = fs::read_to_string(input)?;
        serde_json::from_str(&content).map_err(|e| IoError::Parse(e.to_string()))
    }

    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }
}
