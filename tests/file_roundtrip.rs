use std::fs;

use pixel_huffman::{
    decode_artifact, decode_to_file, encode_to_files, sidecar, ArtifactPaths, CodecConfig,
    DecodeMode, HeaderFormat, HuffError, HuffmanCodec,
};
use tempfile::TempDir;

fn paths_in(dir: &TempDir, config: &CodecConfig) -> ArtifactPaths {
    ArtifactPaths::from_stem(dir.path().join("image"), config)
}

#[test]
fn test_newline_space_scenario() {
    let dir = TempDir::new().unwrap();
    let config = CodecConfig::default();
    let paths = paths_in(&dir, &config);
    let pixels = [10u8, 32, 10, 65];

    let report = encode_to_files(&pixels, 2, 2, &paths, &config).unwrap();
    assert_eq!(report.distinct_symbols, 3);
    assert_eq!(report.input_bytes, 4);

    let generated = HuffmanCodec::from_bytes(&pixels).unwrap();
    let reloaded = sidecar::load_from_path(&paths.sidecar).unwrap();
    assert_eq!(&reloaded, generated.code_table());

    let decoded = decode_artifact(&paths, 2, 2, &config).unwrap();
    assert_eq!(decoded, pixels);
}

#[test]
fn test_legacy_text_header() {
    let dir = TempDir::new().unwrap();
    let config = CodecConfig::default().with_header_format(HeaderFormat::Text);
    let paths = paths_in(&dir, &config);
    let pixels: Vec<u8> = (0..12u8).map(|i| i % 5).collect();

    encode_to_files(&pixels, 4, 3, &paths, &config).unwrap();
    let raw = fs::read(&paths.artifact).unwrap();
    assert!(raw.starts_with(b"4 3\n"));

    // the reader recognises either header regardless of the writer setting
    let decoded = decode_artifact(&paths, 4, 3, &CodecConfig::default()).unwrap();
    assert_eq!(decoded, pixels);
}

#[test]
fn test_single_symbol_image() {
    let dir = TempDir::new().unwrap();
    let config = CodecConfig::default();
    let paths = paths_in(&dir, &config);
    let pixels = vec![255u8; 64];

    encode_to_files(&pixels, 8, 8, &paths, &config).unwrap();
    assert_eq!(fs::read(&paths.sidecar).unwrap(), b"255:0\n");
    assert_eq!(decode_artifact(&paths, 8, 8, &config).unwrap(), pixels);
}

#[test]
fn test_empty_image() {
    let dir = TempDir::new().unwrap();
    let config = CodecConfig::default();
    let paths = paths_in(&dir, &config);

    let report = encode_to_files(&[], 0, 0, &paths, &config).unwrap();
    assert_eq!(report.payload_tokens, 0);
    assert!(fs::read(&paths.sidecar).unwrap().is_empty());

    assert!(decode_artifact(&paths, 0, 0, &config).unwrap().is_empty());
}

#[test]
fn test_truncated_output_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let config = CodecConfig::default();
    let paths = paths_in(&dir, &config);
    let pixels = [1u8, 2, 3, 4, 1, 2];

    encode_to_files(&pixels, 3, 2, &paths, &config).unwrap();

    let output = dir.path().join("decoded.raw");
    let err = decode_to_file(&paths, 4, 4, &output, &config).unwrap_err();
    assert!(matches!(err, HuffError::TruncatedOutput { expected: 16, actual: 6 }));
    assert!(!output.exists());
}

#[test]
fn test_extra_bytes_are_cut() {
    let dir = TempDir::new().unwrap();
    let config = CodecConfig::default();
    let paths = paths_in(&dir, &config);
    let pixels = [9u8, 8, 7, 6, 5, 4];

    encode_to_files(&pixels, 3, 2, &paths, &config).unwrap();
    let decoded = decode_artifact(&paths, 2, 2, &config).unwrap();
    assert_eq!(decoded, [9, 8, 7, 6]);
}

#[test]
fn test_decode_to_file() {
    let dir = TempDir::new().unwrap();
    let config = CodecConfig::default();
    let paths = paths_in(&dir, &config);
    let pixels: Vec<u8> = (0..=255u8).collect();

    encode_to_files(&pixels, 16, 16, &paths, &config).unwrap();
    let output = dir.path().join("decoded.raw");
    let written = decode_to_file(&paths, 16, 16, &output, &config).unwrap();
    assert_eq!(written, 256);
    assert_eq!(fs::read(&output).unwrap(), pixels);
}

#[test]
fn test_missing_sidecar() {
    let dir = TempDir::new().unwrap();
    let config = CodecConfig::default();
    let paths = paths_in(&dir, &config);

    encode_to_files(&[1, 2, 3, 4], 2, 2, &paths, &config).unwrap();
    fs::remove_file(&paths.sidecar).unwrap();

    let err = decode_artifact(&paths, 2, 2, &config).unwrap_err();
    assert!(matches!(err, HuffError::TableNotFound { .. }));
}

#[test]
fn test_empty_sidecar_for_nonempty_image() {
    let dir = TempDir::new().unwrap();
    let config = CodecConfig::default();
    let paths = paths_in(&dir, &config);

    encode_to_files(&[1, 2, 3, 4], 2, 2, &paths, &config).unwrap();
    fs::write(&paths.sidecar, b"").unwrap();

    let err = decode_artifact(&paths, 2, 2, &config).unwrap_err();
    assert!(matches!(err, HuffError::TableNotFound { .. }));
}

#[test]
fn test_missing_artifact_is_io_error() {
    let dir = TempDir::new().unwrap();
    let config = CodecConfig::default();
    let paths = paths_in(&dir, &config);

    encode_to_files(&[1, 2, 3, 4], 2, 2, &paths, &config).unwrap();
    fs::remove_file(&paths.artifact).unwrap();

    let err = decode_artifact(&paths, 2, 2, &config).unwrap_err();
    assert!(matches!(err, HuffError::Io(_)));
}

#[test]
fn test_corrupt_payload_modes() {
    let dir = TempDir::new().unwrap();
    let config = CodecConfig::default().with_header_format(HeaderFormat::Text);
    let paths = paths_in(&dir, &config);
    // codes: 0 -> "0", 1 -> "10", 2 -> "11"
    let pixels = [0u8, 0, 1, 2];

    encode_to_files(&pixels, 2, 2, &paths, &config).unwrap();
    let mut raw = fs::read(&paths.artifact).unwrap();
    raw.extend_from_slice(b"xxx0");
    fs::write(&paths.artifact, &raw).unwrap();

    let lenient = decode_artifact(&paths, 2, 2, &config).unwrap();
    assert_eq!(lenient, pixels);

    let strict = config.with_decode_mode(DecodeMode::Strict);
    let err = decode_artifact(&paths, 2, 2, &strict).unwrap_err();
    assert!(matches!(err, HuffError::CorruptPayload { .. }));
}

#[test]
fn test_failed_sidecar_write_keeps_old_artifact() {
    let dir = TempDir::new().unwrap();
    let config = CodecConfig::default();
    let paths = paths_in(&dir, &config);

    encode_to_files(&[1, 1, 1, 2], 2, 2, &paths, &config).unwrap();
    let before = fs::read(&paths.artifact).unwrap();

    // a non-empty directory in place of the sidecar cannot be replaced by a file
    fs::remove_file(&paths.sidecar).unwrap();
    fs::create_dir(&paths.sidecar).unwrap();
    fs::write(paths.sidecar.join("keep"), b"x").unwrap();

    let err = encode_to_files(&[7, 8, 9, 9], 2, 2, &paths, &config).unwrap_err();
    assert!(matches!(err, HuffError::Io(_)));
    assert_eq!(fs::read(&paths.artifact).unwrap(), before);

    // staged files are cleaned up
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
}
