use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::bit_string::BitString;
use crate::code_table::{CodeTable, InverseCodeTable};
use crate::config::{CodecConfig, DecodeMode, HeaderFormat};
use crate::error::{HuffError, Result};
use crate::frame::{self, Frame, FrameHeader};
use crate::frequency::FrequencyTable;
use crate::hufftree::HuffmanTree;
use crate::sidecar;

pub struct HuffmanCodec {
    table: CodeTable,
    inverse: InverseCodeTable,
}

impl HuffmanCodec {
    pub fn new(tree: &HuffmanTree) -> Self {
        Self::from_table(tree.generate_table())
    }

    pub fn from_table(table: CodeTable) -> Self {
        let inverse = table.inverse();
        HuffmanCodec { table, inverse }
    }

    /// Builds the code table of `data`. An empty buffer gives an empty table.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        match HuffmanTree::from_bytes(data) {
            Ok(tree) => Ok(Self::new(&tree)),
            Err(HuffError::EmptyInput) => {
                log::debug!("empty input, using an empty code table");
                Ok(Self::from_table(CodeTable::new()))
            }
            Err(e) => Err(e),
        }
    }

    /// Loads the code table from a sidecar artifact.
    pub fn from_sidecar(path: &Path) -> Result<Self> {
        Ok(Self::from_table(sidecar::load_from_path(path)?))
    }

    pub fn code_table(&self) -> &CodeTable {
        &self.table
    }

    pub fn inverse(&self) -> &InverseCodeTable {
        &self.inverse
    }

    pub fn encode_bits(&self, data: &[u8]) -> Result<BitString> {
        encode_bits(data, &self.table)
    }

    /// Encodes `data` into a complete primary artifact.
    pub fn encode(&self, data: &[u8], header: FrameHeader, format: HeaderFormat) -> Result<Vec<u8>> {
        let bits = self.encode_bits(data)?;
        Ok(frame::write_frame(header, format, bits.as_bytes())?)
    }

    pub fn decode_bits(&self, bits: &[u8], mode: DecodeMode) -> Result<Vec<u8>> {
        decode_bits(bits, &self.inverse, mode)
    }

    pub fn decode(&self, raw: &[u8], mode: DecodeMode) -> Result<Vec<u8>> {
        decode(raw, &self.inverse, mode)
    }
}

/// Concatenates the code of every byte, one ASCII token per bit.
pub fn encode_bits(data: &[u8], table: &CodeTable) -> Result<BitString> {
    let mut bits = BitString::with_capacity(encoded_len(data, table));
    for &byte in data {
        match table.get(byte) {
            Some(code) => bits.push_code(code),
            None => return Err(HuffError::UnknownSymbol(byte)),
        }
    }
    Ok(bits)
}

/// Exact token count of `data` under `table`, ignoring bytes without a code.
fn encoded_len(data: &[u8], table: &CodeTable) -> usize {
    FrequencyTable::sample(data)
        .iter()
        .map(|(symbol, count)| count * table.get(symbol).map_or(0, str::len))
        .sum()
}

/// Skips the frame header of `raw` and decodes the remaining tokens.
pub fn decode(raw: &[u8], inverse: &InverseCodeTable, mode: DecodeMode) -> Result<Vec<u8>> {
    let frame = Frame::parse(raw)?;
    decode_bits(frame.payload, inverse, mode)
}

/// Greedy incremental matching of `bits` against `inverse`.
///
/// Tokens accumulate into a candidate until it equals a known code. A
/// candidate longer than the longest code can never match; lenient mode
/// drops it and starts over, strict mode fails. A partial candidate left at
/// the end of input is treated the same way.
pub fn decode_bits(bits: &[u8], inverse: &InverseCodeTable, mode: DecodeMode) -> Result<Vec<u8>> {
    let max_len = inverse.max_code_len();
    let mut result = Vec::with_capacity(bits.len() / max_len.max(1));
    let mut candidate: Vec<u8> = Vec::with_capacity(max_len + 1);
    let mut dropped = 0usize;

    for (offset, &token) in bits.iter().enumerate() {
        candidate.push(token);

        if let Some(symbol) = inverse.get_tokens(&candidate) {
            result.push(symbol);
            candidate.clear();
        } else if candidate.len() > max_len {
            if mode == DecodeMode::Strict {
                return Err(HuffError::CorruptPayload { offset });
            }
            dropped += candidate.len();
            candidate.clear();
        }
    }

    if !candidate.is_empty() {
        if mode == DecodeMode::Strict {
            return Err(HuffError::CorruptPayload { offset: bits.len() });
        }
        dropped += candidate.len();
    }

    if dropped > 0 {
        log::warn!(
            "dropped {} of {} payload tokens that matched no code",
            dropped,
            bits.len()
        );
    }

    Ok(result)
}

/// Locations of the primary artifact and its code table sidecar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub artifact: PathBuf,
    pub sidecar: PathBuf,
}

impl ArtifactPaths {
    /// `<stem>.bin` and `<stem>.bin.<suffix>`.
    pub fn from_stem<P: AsRef<Path>>(stem: P, config: &CodecConfig) -> Self {
        Self::for_artifact(append_extension(stem.as_ref(), "bin"), config)
    }

    /// The given artifact path and `<artifact>.<suffix>`.
    pub fn for_artifact<P: Into<PathBuf>>(artifact: P, config: &CodecConfig) -> Self {
        let artifact = artifact.into();
        let sidecar = append_extension(&artifact, &config.sidecar_suffix);
        ArtifactPaths { artifact, sidecar }
    }
}

fn append_extension(path: &Path, extension: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

/// Sizes of a finished encode, for display by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeReport {
    pub input_bytes: usize,
    pub payload_tokens: usize,
    pub distinct_symbols: usize,
    pub artifact_bytes: usize,
}

/// Encodes `pixels` and writes both the primary artifact and the sidecar.
///
/// Both files are staged next to their targets and only moved into place
/// once both were written, so a failed encode leaves the previous pair
/// untouched. Empty input writes a header-only artifact and an empty sidecar.
pub fn encode_to_files(
    pixels: &[u8],
    width: u32,
    height: u32,
    paths: &ArtifactPaths,
    config: &CodecConfig,
) -> Result<EncodeReport> {
    let header = FrameHeader::new(width, height);
    let expected = header.pixel_count()?;
    if expected != pixels.len() {
        log::debug!(
            "{}x{} declares {} pixels, buffer holds {} bytes",
            width,
            height,
            expected,
            pixels.len()
        );
    }

    let codec = HuffmanCodec::from_bytes(pixels)?;
    let bits = codec.encode_bits(pixels)?;
    let artifact = frame::write_frame(header, config.header_format, bits.as_bytes())?;

    let mut table_bytes = Vec::new();
    sidecar::save(codec.code_table(), &mut table_bytes)?;

    let staged_artifact = stage(&paths.artifact, &artifact)?;
    let staged_sidecar = stage(&paths.sidecar, &table_bytes)?;
    // the sidecar goes first: a stale artifact without its table fails loudly
    staged_sidecar.persist(&paths.sidecar).map_err(|e| e.error)?;
    staged_artifact.persist(&paths.artifact).map_err(|e| e.error)?;

    let report = EncodeReport {
        input_bytes: pixels.len(),
        payload_tokens: bits.bit_count(),
        distinct_symbols: codec.code_table().len(),
        artifact_bytes: artifact.len(),
    };
    log::info!(
        "encoded {} bytes into {} tokens ({} symbols) at {}",
        report.input_bytes,
        report.payload_tokens,
        report.distinct_symbols,
        paths.artifact.display()
    );
    Ok(report)
}

/// Writes `bytes` to a temporary file in the directory of `target`.
fn stage(target: &Path, bytes: &[u8]) -> Result<NamedTempFile> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(bytes)?;
    staged.as_file().sync_all()?;
    Ok(staged)
}

/// Loads the sidecar, then decodes the primary artifact.
///
/// The caller's `width * height` is authoritative: fewer decoded bytes is a
/// [`HuffError::TruncatedOutput`], extra bytes are cut off.
pub fn decode_artifact(
    paths: &ArtifactPaths,
    width: u32,
    height: u32,
    config: &CodecConfig,
) -> Result<Vec<u8>> {
    let expected_header = FrameHeader::new(width, height);
    let expected = expected_header.pixel_count()?;

    let codec = match HuffmanCodec::from_sidecar(&paths.sidecar) {
        Ok(codec) => codec,
        // an empty image legitimately has an empty table
        Err(HuffError::TableNotFound { .. }) if expected == 0 && paths.sidecar.exists() => {
            HuffmanCodec::from_table(CodeTable::new())
        }
        Err(e) => return Err(e),
    };

    let raw = fs::read(&paths.artifact)?;
    let frame = Frame::parse(&raw)?;
    if let Some(header) = frame.header {
        if header != expected_header {
            log::warn!(
                "artifact header says {}x{}, decoding as {}x{}",
                header.width,
                header.height,
                width,
                height
            );
        }
    }

    let mut decoded = codec.decode_bits(frame.payload, config.decode_mode)?;
    if decoded.len() < expected {
        return Err(HuffError::TruncatedOutput {
            expected,
            actual: decoded.len(),
        });
    }
    if decoded.len() > expected {
        log::debug!("keeping {} of {} decoded bytes", expected, decoded.len());
        decoded.truncate(expected);
    }

    Ok(decoded)
}

/// Decodes and writes the raw pixel bytes to `output`. Nothing is written
/// when decoding fails.
pub fn decode_to_file(
    paths: &ArtifactPaths,
    width: u32,
    height: u32,
    output: &Path,
    config: &CodecConfig,
) -> Result<usize> {
    let decoded = decode_artifact(paths, width, height, config)?;
    fs::write(output, &decoded)?;
    log::info!("decoded {} bytes into {}", decoded.len(), output.display());
    Ok(decoded.len())
}
