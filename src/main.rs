use clap::Parser;

use unisite::cli::{self, Cli};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    unisite::logging::init_tracing();

    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    cli::run(cli, &mut out).await
}
