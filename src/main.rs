//! mca-hazards: RAW hazard analysis for saved llvm-mca timeline reports

use std::env;
use std::fs;
use std::process;

use anyhow::Context;
use mca_hazards::{analyze, report};

fn usage() -> ! {
    eprintln!("Usage: mca-hazards <trace-file> [--json]");
    eprintln!();
    eprintln!("Reads an llvm-mca report containing a timeline view and prints");
    eprintln!("the register read-after-write dependencies found in it.");
    process::exit(2);
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut json = false;
    let mut path = None;

    for arg in &args[1..] {
        if arg == "--json" {
            json = true;
        } else if arg == "--help" || arg == "-h" {
            usage();
        } else if !arg.starts_with('-') {
            path = Some(arg.as_str());
        }
    }

    let path = match path {
        Some(p) => p,
        None => usage(),
    };

    let trace = fs::read_to_string(path)
        .with_context(|| format!("failed to read trace file {path}"))?;

    let result = analyze(&trace);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", report::render(&result));
    }

    Ok(())
}
