//! Primary artifact framing: a width/height header followed by the bit tokens.

use std::io::{self, Cursor, Read, Write};

use crate::config::HeaderFormat;
use crate::error::{HuffError, Result};

pub const MAGIC: &[u8; 4] = b"HUFB";
pub const VERSION: u8 = 1;
pub const BINARY_HEADER_LEN: usize = MAGIC.len() + 1 + 4 + 4;

/// Image dimensions carried in front of the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub width: u32,
    pub height: u32,
}

impl FrameHeader {
    pub fn new(width: u32, height: u32) -> Self {
        FrameHeader { width, height }
    }

    /// `width * height`, the number of bytes a decode must produce.
    pub fn pixel_count(&self) -> Result<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .ok_or_else(|| {
                HuffError::InvalidArgument(format!("{}x{} overflows usize", self.width, self.height))
            })
    }

    pub fn write<W: Write>(&self, format: HeaderFormat, writer: &mut W) -> io::Result<()> {
        match format {
            HeaderFormat::Text => writeln!(writer, "{} {}", self.width, self.height),
            HeaderFormat::Binary => {
                writer.write_all(MAGIC)?;
                writer.write_all(&[VERSION])?;
                writer.write_all(&self.width.to_le_bytes())?;
                writer.write_all(&self.height.to_le_bytes())
            }
        }
    }

    fn read_binary(raw: &[u8]) -> Result<Self> {
        if raw.len() < BINARY_HEADER_LEN {
            return Err(HuffError::MalformedHeader(format!(
                "binary header needs {} bytes, artifact has {}",
                BINARY_HEADER_LEN,
                raw.len()
            )));
        }
        let mut cursor = Cursor::new(&raw[MAGIC.len()..BINARY_HEADER_LEN]);

        let mut version = [0u8; 1];
        cursor.read_exact(&mut version)?;
        if version[0] != VERSION {
            return Err(HuffError::MalformedHeader(format!("unsupported version {}", version[0])));
        }

        let mut width_bytes = [0u8; 4];
        cursor.read_exact(&mut width_bytes)?;
        let mut height_bytes = [0u8; 4];
        cursor.read_exact(&mut height_bytes)?;

        Ok(FrameHeader {
            width: u32::from_le_bytes(width_bytes),
            height: u32::from_le_bytes(height_bytes),
        })
    }

    fn parse_text(line: &[u8]) -> Option<Self> {
        let line = std::str::from_utf8(line).ok()?;
        let mut fields = line.trim_end_matches('\r').split(' ');
        let width = fields.next()?.parse().ok()?;
        let height = fields.next()?.parse().ok()?;
        if fields.next().is_some() {
            return None;
        }
        Some(FrameHeader { width, height })
    }
}

/// A primary artifact split into header and payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame<'a> {
    /// `None` when no header was present or a text header did not parse.
    pub header: Option<FrameHeader>,
    pub format: Option<HeaderFormat>,
    pub payload: &'a [u8],
}

impl<'a> Frame<'a> {
    /// Splits `raw` into header and payload.
    ///
    /// Binary headers are recognised by their magic. Otherwise a leading
    /// ASCII digit means a text header running up to the first newline.
    /// Payload tokens are digits too, so a headerless payload starting with
    /// a bit is mistaken for a text header; artifacts always carry one.
    pub fn parse(raw: &'a [u8]) -> Result<Frame<'a>> {
        if raw.starts_with(MAGIC) {
            let header = FrameHeader::read_binary(raw)?;
            log::debug!("binary frame header {}x{}", header.width, header.height);
            return Ok(Frame {
                header: Some(header),
                format: Some(HeaderFormat::Binary),
                payload: &raw[BINARY_HEADER_LEN..],
            });
        }

        match raw.first() {
            Some(b) if b.is_ascii_digit() => {
                let (line, payload) = match raw.iter().position(|&b| b == b'\n') {
                    Some(newline) => (&raw[..newline], &raw[newline + 1..]),
                    None => (raw, &raw[raw.len()..]),
                };
                let header = FrameHeader::parse_text(line);
                if header.is_none() {
                    log::debug!("skipped unparsable text header of {} bytes", line.len());
                }
                Ok(Frame {
                    header,
                    format: Some(HeaderFormat::Text),
                    payload,
                })
            }
            _ => Ok(Frame {
                header: None,
                format: None,
                payload: raw,
            }),
        }
    }
}

/// Header followed directly by the payload, ready for a single write.
pub fn write_frame(header: FrameHeader, format: HeaderFormat, payload: &[u8]) -> io::Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(BINARY_HEADER_LEN + payload.len());
    header.write(format, &mut bytes)?;
    bytes.write_all(payload)?;
    Ok(bytes)
}
