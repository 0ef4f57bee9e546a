// Soku Assets
// Entry point; the pipeline itself lives in the library

use soku_assets::cli::CliHandler;

#[tokio::main]
async fn main() {
    let handler = CliHandler::new();

    if let Err(e) = handler.run().await {
        eprintln!("{}", e.format_detailed());
        std::process::exit(if e.is_not_found() { 2 } else { 1 });
    }
}
