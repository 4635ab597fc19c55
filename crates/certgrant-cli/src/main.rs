#[tokio::main]
async fn main() {
    if let Err(e) = certgrant_cli::run().await {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}
