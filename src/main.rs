use clap::Parser;
use kmertour::kmertour::{run_kmertour, Args};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    run_kmertour(args)?;
    Ok(())
}
