//! Codec options.
//!
//! Defaults write the fixed-size binary frame header, decode leniently and
//! name the sidecar `<artifact>.codes`. [`CodecConfig::from_env`] overlays
//! the `PIXEL_HUFFMAN_*` environment variables on top of the defaults.

use std::env;
use std::str::FromStr;

use crate::error::HuffError;

pub const ENV_HEADER: &str = "PIXEL_HUFFMAN_HEADER";
pub const ENV_DECODE: &str = "PIXEL_HUFFMAN_DECODE";
pub const ENV_SIDECAR_SUFFIX: &str = "PIXEL_HUFFMAN_SIDECAR_SUFFIX";

pub const DEFAULT_SIDECAR_SUFFIX: &str = "codes";

/// Layout of the primary artifact header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderFormat {
    /// `"<width> <height>\n"`, shares its alphabet with the payload.
    Text,
    /// Magic, version byte, then width and height as little-endian `u32`.
    #[default]
    Binary,
}

/// What decoding does with a token span that matches no code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    /// Drop the span, keep going, warn once with the dropped token count.
    #[default]
    Lenient,
    /// Fail with [`HuffError::CorruptPayload`].
    Strict,
}

impl FromStr for HeaderFormat {
    type Err = HuffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(HeaderFormat::Text),
            "binary" => Ok(HeaderFormat::Binary),
            other => Err(HuffError::InvalidArgument(format!("unknown header format '{}'", other))),
        }
    }
}

impl FromStr for DecodeMode {
    type Err = HuffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(DecodeMode::Lenient),
            "strict" => Ok(DecodeMode::Strict),
            other => Err(HuffError::InvalidArgument(format!("unknown decode mode '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    pub header_format: HeaderFormat,
    pub decode_mode: DecodeMode,
    pub sidecar_suffix: String,
}

impl Default for CodecConfig {
    fn default() -> Self {
        CodecConfig {
            header_format: HeaderFormat::default(),
            decode_mode: DecodeMode::default(),
            sidecar_suffix: DEFAULT_SIDECAR_SUFFIX.to_string(),
        }
    }
}

impl CodecConfig {
    pub fn with_header_format(mut self, header_format: HeaderFormat) -> Self {
        self.header_format = header_format;
        self
    }

    pub fn with_decode_mode(mut self, decode_mode: DecodeMode) -> Self {
        self.decode_mode = decode_mode;
        self
    }

    pub fn with_sidecar_suffix<S: Into<String>>(mut self, suffix: S) -> Self {
        self.sidecar_suffix = suffix.into();
        self
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Unusable values are
    /// ignored with a warning and the default is kept.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = CodecConfig::default();

        if let Some(value) = lookup(ENV_HEADER) {
            match value.parse() {
                Ok(format) => config.header_format = format,
                Err(e) => log::warn!("ignoring {}: {}", ENV_HEADER, e),
            }
        }
        if let Some(value) = lookup(ENV_DECODE) {
            match value.parse() {
                Ok(mode) => config.decode_mode = mode,
                Err(e) => log::warn!("ignoring {}: {}", ENV_DECODE, e),
            }
        }
        if let Some(value) = lookup(ENV_SIDECAR_SUFFIX) {
            let value = value.trim().trim_start_matches('.');
            if value.is_empty() {
                log::warn!("ignoring {}: empty suffix", ENV_SIDECAR_SUFFIX);
            } else {
                config.sidecar_suffix = value.to_string();
            }
        }

        config
    }
}
