use birdwatch::cli::Config;
use clap::Parser;

#[tokio::main]
async fn main() {
    let config = Config::parse();
    birdwatch::cli::run(config).await
}
