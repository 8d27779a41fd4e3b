mod format;
mod grid;
mod split;

use clap::Parser;
use std::io::{self, Write};

/// Example, for a sheet with cards 5 wide and 4 high:
///
///   card-splitter --width 5 --height 4 --output-path images/ --target three.jpg
///
/// Crop the scan to the edge of the grid first. A background matching the card
/// colour works best.
#[derive(Parser)]
#[command(
    name = "card-splitter",
    about = "Split a scanned grid of cards into one square image per card"
)]
struct Cli {
    #[command(flatten)]
    args: split::SplitArgs,
}

fn progress(progress: f64, message: &str) {
    let _ = writeln!(
        io::stderr(),
        "{}",
        serde_json::json!({ "progress": progress, "message": message })
    );
    let _ = io::stderr().flush();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    split::run(cli.args, progress)?;
    Ok(())
}
