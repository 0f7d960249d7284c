// glossa - words and pictures in, meanings out

use glossa::cli;

#[tokio::main]
async fn main() -> miette::Result<()> {
    cli::run().await
}
