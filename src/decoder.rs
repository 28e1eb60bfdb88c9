use std::env;
use std::process;

use log::{error, info};

use huffpack::cli::{self, Args};

fn main() {
    env_logger::init();

    let args = match Args::parse(env::args()) {
        Ok(args) => args,
        Err(e) => {
            error!("{}", e);
            process::exit(e.exit_code());
        }
    };

    info!("--- Start Decoding ---");
    let summary = match cli::run_decode(&args) {
        Ok(summary) => summary,
        Err(e) => {
            error!("{}", e);
            process::exit(e.exit_code());
        }
    };
    info!("Write successful.");

    println!(
        "\r\n✅ decoding successful.\n\
         📂 input file:        {} ({} bytes)\n\
         💾 output file:       {} ({} bytes)\n\
         ℹ️ entropy:           {:.2} bits/symbol\n\
         🗜️ compression ratio: {:.2}% (relative to decoded output)",
        args.input.display(),
        summary.input_bytes,
        args.output.display(),
        summary.output_bytes,
        summary.frequencies.entropy(),
        cli::ratio(summary.output_bytes, summary.input_bytes)
    );
    info!("--- End ---");
}
