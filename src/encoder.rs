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

    info!("--- Start Encoding ---");
    let summary = match cli::run_encode(&args) {
        Ok(summary) => summary,
        Err(e) => {
            error!("{}", e);
            process::exit(e.exit_code());
        }
    };

    print!("{}", summary.codes.chart(&summary.frequencies));
    println!("Total chars = {}", summary.input_bytes());

    println!(
        "\r\n✅ Encoding successful.\n\
         📂  Input:       {} ({} bytes)\n\
         💾  Output:      {} ({} bytes)\n\
         ℹ️  Entropy:     {:.4} bits/symbol\n\
         🗜️  Ratio:       {:.4}%",
        args.input.display(),
        summary.input_bytes(),
        args.output.display(),
        summary.output_bytes(),
        summary.frequencies.entropy(),
        cli::ratio(summary.input_bytes(), summary.output_bytes())
    );
    info!("--- End ---");
}
