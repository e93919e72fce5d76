use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = erase_proxy::cli::Cli::parse();
    if let Err(e) = erase_proxy::cmd::dispatch(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
