//! # pixel_huffman
//!
//! Huffman entropy coder for raw pixel buffers. The encoded payload is
//! written as ASCII '0'/'1' tokens behind a width/height header, and the
//! code table goes to a sidecar file next to it.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pixel_huffman::{decode_artifact, encode_to_files, ArtifactPaths, CodecConfig};
//!
//! let config = CodecConfig::default();
//! let pixels = vec![10u8, 32, 10, 65];
//!
//! // writes photo.bin and photo.bin.codes
//! let paths = ArtifactPaths::from_stem("photo", &config);
//! encode_to_files(&pixels, 2, 2, &paths, &config)?;
//!
//! let decoded = decode_artifact(&paths, 2, 2, &config)?;
//! assert_eq!(decoded, pixels);
//! # Ok::<(), pixel_huffman::HuffError>(())
//! ```

pub mod code_table;
pub mod config;
pub mod error;
pub mod frame;
pub mod frequency;
pub mod huffman_codec;
pub mod hufftree;
pub mod sidecar;

// Internal modules - not part of public API
mod bit_string;
mod min_heap;

// Re-export main types for convenience
pub use bit_string::BitString;
pub use code_table::{CodeTable, InverseCodeTable};
pub use config::{CodecConfig, DecodeMode, HeaderFormat};
pub use error::{HuffError, Result};
pub use frame::FrameHeader;
pub use frequency::FrequencyTable;
pub use huffman_codec::{
    decode_artifact, decode_to_file, encode_to_files, ArtifactPaths, EncodeReport, HuffmanCodec,
};
pub use hufftree::HuffmanTree;
pub use min_heap::HeapErr;
