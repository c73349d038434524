use queue_migrator_cli::run_cli;
use tracing::error;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run_cli().await {
        error!("{}", e);
        std::process::exit(e.exit_code());
    }
}
