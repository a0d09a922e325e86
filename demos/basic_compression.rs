use pixel_huffman::{decode_artifact, encode_to_files, ArtifactPaths, CodecConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // A small 16x8 grayscale gradient with a few repeated bands
    let (width, height) = (16u32, 8u32);
    let pixels: Vec<u8> = (0..width * height)
        .map(|i| ((i % width) / 4 * 64) as u8)
        .collect();

    let config = CodecConfig::default();
    let dir = std::env::temp_dir().join("pixel_huffman_demo");
    std::fs::create_dir_all(&dir)?;
    let paths = ArtifactPaths::from_stem(dir.join("gradient"), &config);

    let report = encode_to_files(&pixels, width, height, &paths, &config)?;
    println!(
        "Encoded {} pixels into {} tokens using {} symbols",
        report.input_bytes, report.payload_tokens, report.distinct_symbols
    );
    println!("Artifact: {}", paths.artifact.display());
    println!("Code table: {}", paths.sidecar.display());

    let decoded = decode_artifact(&paths, width, height, &config)?;
    if decoded != pixels {
        return Err("Decoded pixels differ from the original".into());
    }
    println!("Decoded {} pixels, data matches exactly.", decoded.len());

    std::fs::remove_file(&paths.artifact)?;
    std::fs::remove_file(&paths.sidecar)?;

    Ok(())
}
