//! png-stego - hide and recover messages inside PNG chunk payloads.
//!
//! Embeds a message two bits at a time into the low bits of palette or
//! image data bytes, spread evenly across the carrier.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use png_stego::png::{ChunkType, ImageHeader, Png};
use png_stego::stego;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "png-stego")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Hide messages in PNG chunk payload bits",
    long_about = "Embeds a message two bits at a time into the low bits of PNG palette or image data bytes, spreading the consumed bytes evenly across the carrier."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Embed a message into a carrier PNG
    Embed {
        /// PNG image that acts as the carrier file
        carrier: PathBuf,

        /// Output path for the modified PNG
        output: PathBuf,

        /// File whose contents are embedded
        #[arg(long, conflicts_with = "data")]
        input: Option<PathBuf>,

        /// String data to embed
        #[arg(long, conflicts_with = "input")]
        data: Option<String>,

        /// Print the chunk layout and file digests
        #[arg(long)]
        verbose: bool,
    },

    /// Extract a hidden message from a PNG
    Extract {
        /// PNG image carrying a hidden message
        carrier: PathBuf,

        /// Output file (default: stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show container metadata, chunk layout, and capacity
    Info {
        /// PNG image to inspect
        carrier: PathBuf,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Embed {
            carrier,
            output,
            input,
            data,
            verbose,
        } => cmd_embed(&carrier, &output, input, data, verbose),

        Commands::Extract { carrier, output } => cmd_extract(&carrier, output),

        Commands::Info { carrier, json } => cmd_info(&carrier, json),
    }
}

fn cmd_embed(
    carrier: &Path,
    output: &Path,
    input: Option<PathBuf>,
    data: Option<String>,
    verbose: bool,
) -> Result<()> {
    let raw = read_carrier(carrier)?;
    if verbose {
        println!("Carrier SHA-256: {}", digest(&raw));
    }

    let mut png = Png::parse(&raw)?;
    if verbose {
        print_metadata(png.header());
        print_layout(&png);
    }

    let message = match (input, data) {
        (Some(path), None) => {
            if !path.is_file() {
                bail!("File \"{}\" could not be found!", path.display());
            }
            std::fs::read(&path)?
        }
        (None, Some(s)) => s.into_bytes(),
        (None, None) => {
            // Read from stdin
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;
            buffer
        }
        (Some(_), Some(_)) => unreachable!(),
    };

    stego::embed(&mut png, &message)?;
    let out_bytes = png.serialize();
    std::fs::write(output, &out_bytes)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!("Embedded {} bytes into {}", message.len(), output.display());
    if verbose {
        println!("Output SHA-256: {}", digest(&out_bytes));
    }

    Ok(())
}

fn cmd_extract(carrier: &Path, output: Option<PathBuf>) -> Result<()> {
    let raw = read_carrier(carrier)?;
    let png = Png::parse(&raw)?;

    let message = stego::extract(&png)?;

    match output {
        Some(path) => {
            std::fs::write(&path, &message)?;
            println!("Wrote {} bytes to {}", message.len(), path.display());
        }
        None => {
            io::stdout().write_all(&message)?;
        }
    }

    Ok(())
}

fn cmd_info(carrier: &Path, json: bool) -> Result<()> {
    let raw = read_carrier(carrier)?;
    let png = Png::parse(&raw)?;

    let report = Report {
        header: *png.header(),
        chunks: png
            .chunks()
            .iter()
            .map(|chunk| ChunkSummary {
                type_tag: chunk.type_tag().to_string(),
                length: chunk.len(),
                checksum_ok: chunk.verify_checksum(),
            })
            .collect(),
        capacity_bytes: stego::capacity(&png).ok(),
        hidden_length: png.get_one(ChunkType::IEND)?.declared_length(),
        sha256: digest(&raw),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_metadata(&report.header);
    print_layout(&png);
    match report.capacity_bytes {
        Some(capacity) => println!("Message capacity: {} bytes", capacity),
        None => println!("Message capacity: none (grayscale carrier)"),
    }
    if report.hidden_length > 0 {
        println!("Recorded hidden length: {} bytes", report.hidden_length);
    }
    let stale = png.checksum_mismatches();
    if !stale.is_empty() {
        let names: Vec<String> = stale.iter().map(ToString::to_string).collect();
        println!("Stale checksums: {}", names.join(", "));
    }
    println!("File SHA-256: {}", report.sha256);

    Ok(())
}

#[derive(Serialize)]
struct Report {
    header: ImageHeader,
    chunks: Vec<ChunkSummary>,
    capacity_bytes: Option<usize>,
    hidden_length: u32,
    sha256: String,
}

#[derive(Serialize)]
struct ChunkSummary {
    type_tag: String,
    length: usize,
    checksum_ok: bool,
}

fn read_carrier(path: &Path) -> Result<Vec<u8>> {
    if !path.is_file() {
        bail!("File \"{}\" could not be found!", path.display());
    }
    std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

fn digest(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

fn print_metadata(header: &ImageHeader) {
    println!("Image width: {}px", header.width);
    println!("Image height: {}px", header.height);
    println!("Image bit depth: {}-bit", header.bit_depth);
    println!("Image color mode: {:?}", header.color_mode);
    println!("Image compression method: {}", header.compression_method);
    println!("Image filter method: {}", header.filter_method);
    println!("Image interlace method: {}", header.interlace_method);
}

fn print_layout(png: &Png) {
    println!("PNG split into {} chunks", png.chunk_count());
    for chunk in png.chunks() {
        let class = if chunk.type_tag().is_critical() {
            "critical"
        } else {
            "ancillary"
        };
        println!(
            "  {} {:>9} bytes  {}",
            chunk.type_tag(),
            chunk.len(),
            class
        );
    }
}
