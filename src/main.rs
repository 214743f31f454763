//! # Chunk Store Demo Entry Point
//!
//! Calls into the library's `run()` function.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- [config.json]
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    match chunk_store::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("chunk-store: {err}");
            ExitCode::FAILURE
        }
    }
}
