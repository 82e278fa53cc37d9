//! `ircserv <port> <password> [<botname>]` (§6.1). Three arguments launch
//! the companion bot instead of the daemon, connecting to the server on
//! the same port, per the reference implementation's `main()` switching on
//! `argc`.

use clap::Parser;
use flexi_logger::{Duplicate, Logger};
use irc_server::config::{lookup_hostname, Config};
use log::error;

#[derive(Parser, Debug)]
#[command(name = "ircserv")]
struct Cli {
    /// TCP port to listen on (server mode) or connect to (bot mode).
    port: u16,
    /// Shared server password.
    password: String,
    /// When present, launches the companion bot under this nickname
    /// instead of the server.
    botname: Option<String>,
    /// Optional path to a TOML config file for soft operational knobs.
    #[arg(long, default_value = "ircserv.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    Logger::try_with_str("info")
        .and_then(|logger| logger.log_to_stderr().duplicate_to_stderr(Duplicate::All).start())
        .ok();

    let cli = Cli::parse();

    if let Some(botname) = cli.botname {
        let addr = format!("127.0.0.1:{}", cli.port);
        if let Err(e) = irc_bot::run_bot(&addr, &cli.password, &botname).await {
            error!("bot exited with error: {e}");
            return Err(e.into());
        }
        return Ok(());
    }

    let config = Config::load(&cli.config).unwrap_or_default();
    let hostname = lookup_hostname();
    irc_server::net::run(cli.port, cli.password, hostname, config).await?;
    Ok(())
}
