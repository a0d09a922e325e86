use std::path::PathBuf;
use std::{env, fs, io};

use pixel_huffman::{decode_to_file, encode_to_files, ArtifactPaths, CodecConfig};

const USAGE: &str = "usage:\n  \
    pixel_huffman encode <raw-pixels> <output-stem> <width> <height>\n  \
    pixel_huffman decode <artifact> <raw-output> <width> <height>";

enum Command {
    Encode { input: PathBuf, stem: PathBuf },
    Decode { artifact: PathBuf, output: PathBuf },
}

fn parse_dimension(value: &str, name: &str) -> Result<u32, Box<dyn std::error::Error>> {
    value.parse::<u32>().map_err(|e| {
        Box::new(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} '{}' is not a valid dimension: {}", name, value, e),
        )) as Box<dyn std::error::Error>
    })
}

fn parse_args() -> Result<(Command, u32, u32), Box<dyn std::error::Error>> {
    let args = env::args().skip(1).collect::<Vec<String>>();
    if args.len() != 5 {
        return Err(Box::new(io::Error::new(io::ErrorKind::InvalidInput, USAGE)));
    }

    let width = parse_dimension(&args[3], "width")?;
    let height = parse_dimension(&args[4], "height")?;
    let command = match args[0].as_str() {
        "encode" => Command::Encode {
            input: PathBuf::from(&args[1]),
            stem: PathBuf::from(&args[2]),
        },
        "decode" => Command::Decode {
            artifact: PathBuf::from(&args[1]),
            output: PathBuf::from(&args[2]),
        },
        other => {
            return Err(Box::new(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("unknown command '{}'\n{}", other, USAGE),
            )))
        }
    };
    Ok((command, width, height))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let (command, width, height) = parse_args()?;
    let config = CodecConfig::from_env();
    log::debug!("using {:?}", config);

    match command {
        Command::Encode { input, stem } => {
            let pixels = fs::read(&input)?;
            let paths = ArtifactPaths::from_stem(&stem, &config);
            let report = encode_to_files(&pixels, width, height, &paths, &config)?;
            println!(
                "{} -> {} ({} bytes in, {} bytes out, {} symbols), table at {}",
                input.display(),
                paths.artifact.display(),
                report.input_bytes,
                report.artifact_bytes,
                report.distinct_symbols,
                paths.sidecar.display()
            );
        }
        Command::Decode { artifact, output } => {
            let paths = ArtifactPaths::for_artifact(artifact, &config);
            let written = decode_to_file(&paths, width, height, &output, &config)?;
            println!("{} -> {} ({} bytes)", paths.artifact.display(), output.display(), written);
        }
    }

    Ok(())
}
