//! Offline analyzer for captured PCF messages.
//!
//! Prints each dump's length, a hex preview, the header fields read in
//! both byte orders (handy when a capture's origin is unclear), and the
//! decoded record as JSON.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use mqcrab::pcf::{PCF_HEADER_LEN, PcfDecoder};
use mqcrab::source::replay::load_dump;

// -----------------------------------------------------------------------------
// ----- Args ------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "pcfdump", version, about = "Decode captured IBM MQ PCF message dumps")]
struct Args {
    /// Dump files: `.hex` for hex dumps, anything else raw bytes.
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

// -----------------------------------------------------------------------------
// ----- Main ------------------------------------------------------------------

fn main() -> ExitCode {
    let args = Args::parse();
    let decoder = PcfDecoder::new(tracing::Span::none());

    let mut failures = 0usize;

    for (i, path) in args.files.iter().enumerate() {
        println!("=== Message {} ({}) ===", i + 1, path.display());

        let data = match load_dump(path) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("error: {e}");
                failures += 1;
                continue;
            }
        };

        println!("Length: {} bytes", data.len());
        println!("Hex dump (first 64 bytes):");
        print!("{}", hex_preview(&data, 64));

        if data.len() >= PCF_HEADER_LEN {
            print_header_analysis(&data);
        }

        match decoder.decode(&data) {
            Ok(record) => match serde_json::to_string_pretty(&record) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("serialization error: {e}");
                    failures += 1;
                }
            },
            Err(e) => {
                eprintln!("decode error: {e}");
                failures += 1;
            }
        }

        println!();
    }

    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

// -----------------------------------------------------------------------------
// ----- Formatting ------------------------------------------------------------

fn hex_preview(data: &[u8], limit: usize) -> String {
    let mut out = String::new();

    for (i, chunk) in data[..data.len().min(limit)].chunks(16).enumerate() {
        let mut hex_part = String::with_capacity(48);
        for b in chunk {
            hex_part.push_str(&format!("{b:02x} "));
        }

        let ascii: String = chunk
            .iter()
            .map(|&b| if (0x20..0x7F).contains(&b) { b as char } else { '.' })
            .collect();

        out.push_str(&format!("{:08x}  {hex_part:<48} |{ascii}|\n", i * 16));
    }

    out
}

/// The wire is little-endian, but captures of unknown provenance show up
/// often enough that both readings are printed side by side.
fn print_header_analysis(data: &[u8]) {
    let be = |off: usize| u32::from_be_bytes(data[off..off + 4].try_into().unwrap());
    let le = |off: usize| u32::from_le_bytes(data[off..off + 4].try_into().unwrap());

    println!("PCF header analysis:");
    println!("  type:            {:>10} (LE)  {:>10} (BE)", le(0), be(0));
    println!("  struc_length:    {:>10} (LE)  {:>10} (BE)", le(4), be(4));
    println!("  command:         {:>10} (LE)  {:>10} (BE)", le(12), be(12));
    println!("  parameter_count: {:>10} (LE)  {:>10} (BE)", le(32), be(32));
}

// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
