//! Reader/Writer traits and format dispatch
//!
//! Readers load a site content file into [`SiteContent`]; writers turn that
//! content into an output directory.

use std::path::Path;

use thiserror::Error;

use crate::html_writer::HtmlWriter;
use crate::json_reader::JsonReader;
use crate::site::SiteContent;
use crate::yaml_reader::YamlReader;

/// Errors that can occur during reading or writing
#[derive(Error, Debug)]
pub enum IoError {
    /// The file format is not supported
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The file extension could not be determined
    #[error("could not determine file format from path: {0}")]
    UnknownExtension(String),

    /// An I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A parsing error occurred
    #[error("parse error: {0}")]
    Parse(String),

    /// The content parsed but breaks a content rule
    #[error("invalid content: {0}")]
    InvalidContent(String),

    /// A rendering/writing error occurred
    #[error("write error: {0}")]
    Write(String),
}

/// Result type for reader/writer operations
pub type IoResult<T> = Result<T, IoError>;

/// A reader parses a content file into [`SiteContent`]
pub trait Reader {
    /// Parse the input file
    fn read(&self, input: &Path) -> IoResult<SiteContent>;

    /// File extensions this reader can handle (e.g., ["yaml", "yml"])
    fn supported_extensions(&self) -> &[&str];

    /// Check if this reader can handle the given file extension
    fn supports_extension(&self, ext: &str) -> bool {
        self.supported_extensions()
            .iter()
            .any(|e| e.eq_ignore_ascii_case(ext))
    }
}

/// A writer renders site content into an output directory
pub trait Writer {
    fn write(&self, site: &SiteContent, output: &Path) -> IoResult<()>;

    /// Identifier for this output format (e.g., "html")
    fn format_id(&self) -> &str;
}

/// Registry of available readers and writers
pub struct FormatRegistry {
    readers: Vec<Box<dyn Reader>>,
    writers: Vec<Box<dyn Writer>>,
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            readers: Vec::new(),
            writers: Vec::new(),
        }
    }

    /// Registry with `YamlReader` (yaml, yml), `JsonReader` (json) and
    /// `HtmlWriter` (html)
    pub fn with_defaults() -> Self {
        Self::with_html_writer(HtmlWriter::new())
    }

    /// Registry with the content readers and a configured `HtmlWriter`
    pub fn with_html_writer(writer: HtmlWriter) -> Self {
        let mut registry = Self::new();
        registry.register_reader(Box::new(YamlReader::new()));
        registry.register_reader(Box::new(JsonReader::new()));
        registry.register_writer(Box::new(writer));
        registry
    }

    /// Register a reader
    pub fn register_reader(&mut self, reader: Box<dyn Reader>) {
        self.readers.push(reader);
    }

    /// Register a writer
    pub fn register_writer(&mut self, writer: Box<dyn Writer>) {
        self.writers.push(writer);
    }

    /// Find a reader for the given file extension
    pub fn reader_for_extension(&self, ext: &str) -> Option<&dyn Reader> {
        self.readers
            .iter()
            .find(|r| r.supports_extension(ext))
            .map(|r| r.as_ref())
    }

    /// Find a writer by format ID
    pub fn writer_for_format(&self, format_id: &str) -> Option<&dyn Writer> {
        self.writers
            .iter()
            .find(|w| w.format_id().eq_ignore_ascii_case(format_id))
            .map(|w| w.as_ref())
    }

    /// Get file extension from a path
    pub fn extension_from_path(path: &Path) -> Option<&str> {
        path.extension().and_then(|e| e.to_str())
    }

    /// Find a reader for the given path based on its extension
    pub fn reader_for_path(&self, path: &Path) -> IoResult<&dyn Reader> {
        let ext = Self::extension_from_path(path)
            .ok_or_else(|| IoError::UnknownExtension(path.display().to_string()))?;

        self.reader_for_extension(ext)
            .ok_or_else(|| IoError::UnsupportedFormat(ext.to_string()))
    }
}
