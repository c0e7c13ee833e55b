//! Accumulator Calc CLI
//!
//! Replays a CSV script of accumulator commands and prints one result row
//! per command.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- script.csv > results.csv
//! echo "push,2" | cargo run -- -
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use accumulator_calc::{CalcError, Result, ScriptEngine};
use std::env;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let script_path = env::args().nth(1).ok_or(CalcError::MissingArgument)?;

    // "-" replays from stdin
    let reader: Box<dyn Read> = if script_path == "-" {
        Box::new(io::stdin().lock())
    } else {
        Box::new(BufReader::new(File::open(&script_path)?))
    };

    let mut engine = ScriptEngine::new();
    engine.process_script(reader)?;
    log::debug!("Replayed {} command(s) from {}", engine.steps().len(), script_path);

    let stdout = io::stdout();
    let handle = stdout.lock();
    engine.write_output(handle)?;

    Ok(())
}
