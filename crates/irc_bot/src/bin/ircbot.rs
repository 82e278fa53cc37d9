//! Standalone entrypoint for the bot, for running it apart from `ircserv`.

use clap::Parser;
use flexi_logger::{Duplicate, Logger};
use log::error;

#[derive(Parser, Debug)]
#[command(name = "ircbot")]
struct Cli {
    port: u16,
    password: String,
    nick: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    Logger::try_with_str("info")
        .and_then(|logger| logger.log_to_stderr().duplicate_to_stderr(Duplicate::All).start())
        .ok();

    let cli = Cli::parse();
    let addr = format!("127.0.0.1:{}", cli.port);
    if let Err(e) = irc_bot::run_bot(&addr, &cli.password, &cli.nick).await {
        error!("bot exited with error: {e}");
        return Err(e.into());
    }
    Ok(())
}
