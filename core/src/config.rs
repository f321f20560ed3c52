//! config.rs
//! Stream format selection and decoder tuning.

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    format_names, DEFAULT_DELIMITER, DEFAULT_READ_BUFFER_SIZE, MAX_CHAR_WIDTH, MAX_READ_BUFFER_SIZE,
};
use crate::stream::delimited::TokenFormat;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown stream format {0:?}, expected one of binary, text, base64-text")]
    UnknownFormat(String),

    #[error("delimiter must be exactly one character, got {0:?}")]
    DelimiterNotSingleChar(String),

    #[error("delimiter {0:?} is part of the base64 alphabet")]
    DelimiterInAlphabet(char),

    #[error("read buffer of {size} bytes is below the minimum of {min}")]
    BufferTooSmall { size: usize, min: usize },

    #[error("read buffer of {size} bytes exceeds the maximum of {max}")]
    BufferTooLarge { size: usize, max: usize },
}

/// Wire encoding of a record stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StreamFormat {
    /// `[u32 BE length][binary record]` frames.
    Binary,
    /// Structured text records separated by the delimiter.
    Text,
    /// Unpadded standard base64 of the binary record, separated by the delimiter.
    Base64Text,
}

impl StreamFormat {
    /// Token strategy for the delimited formats; `None` for binary frames.
    pub fn token_format(self) -> Option<TokenFormat> {
        match self {
            StreamFormat::Binary => None,
            StreamFormat::Text => Some(TokenFormat::Text),
            StreamFormat::Base64Text => Some(TokenFormat::Base64),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StreamFormat::Binary => format_names::BINARY,
            StreamFormat::Text => format_names::TEXT,
            StreamFormat::Base64Text => format_names::BASE64_TEXT,
        }
    }
}

impl fmt::Display for StreamFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StreamFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            format_names::BINARY => Ok(StreamFormat::Binary),
            format_names::TEXT => Ok(StreamFormat::Text),
            format_names::BASE64_TEXT => Ok(StreamFormat::Base64Text),
            other => Err(ConfigError::UnknownFormat(other.to_string())),
        }
    }
}

/// Accept a delimiter given as text, enforcing the single-character rule.
pub fn parse_delimiter(s: &str) -> Result<char, ConfigError> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        _ => Err(ConfigError::DelimiterNotSingleChar(s.to_string())),
    }
}

#[inline]
fn in_base64_alphabet(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '+' || ch == '/'
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub format: StreamFormat,
    /// Token separator for the delimited formats; ignored for binary.
    pub delimiter: char,
    /// Scanner read buffer; must hold at least one full UTF-8 character.
    pub read_buffer_size: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            format: StreamFormat::Binary,
            delimiter: DEFAULT_DELIMITER,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
        }
    }
}

impl CodecConfig {
    pub fn new(format: StreamFormat) -> Self {
        Self { format, ..Self::default() }
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_read_buffer_size(mut self, size: usize) -> Self {
        self.read_buffer_size = size;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_read_buffer_size(self.read_buffer_size)?;
        if self.format == StreamFormat::Base64Text && in_base64_alphabet(self.delimiter) {
            return Err(ConfigError::DelimiterInAlphabet(self.delimiter));
        }
        Ok(())
    }
}

pub fn validate_read_buffer_size(size: usize) -> Result<(), ConfigError> {
    if size < MAX_CHAR_WIDTH {
        return Err(ConfigError::BufferTooSmall { size, min: MAX_CHAR_WIDTH });
    }
    if size > MAX_READ_BUFFER_SIZE {
        return Err(ConfigError::BufferTooLarge { size, max: MAX_READ_BUFFER_SIZE });
    }
    Ok(())
}
