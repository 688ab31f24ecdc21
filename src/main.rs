use clap::Parser;
use station_weather::cli::{run, Cli};
use station_weather::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
