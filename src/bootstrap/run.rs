//! Terminal control surface.
//!
//! Forwarding starts immediately. Each line on stdin is a command: an empty
//! line or `t` toggles forwarding, `s` prints the status, `q` quits. Ctrl-C
//! stops forwarding and exits.

use std::sync::Arc;

use cf_app::{ForwardingController, ForwardingError};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use super::config::ResolvedConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Toggle,
    Status,
    Quit,
    Unknown(String),
}

fn parse_command(line: &str) -> Command {
    match line.trim().to_ascii_lowercase().as_str() {
        "" | "t" | "toggle" => Command::Toggle,
        "s" | "status" => Command::Status,
        "q" | "quit" | "exit" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    }
}

pub async fn run_app(
    config: ResolvedConfig,
    controller: Arc<ForwardingController>,
) -> anyhow::Result<()> {
    start(&controller, &config).await;
    println!("Commands: <enter>/t toggle forwarding, s status, q quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupt received");
                break;
            }
            line = lines.next_line() => match line? {
                Some(line) => match parse_command(&line) {
                    Command::Toggle => {
                        if controller.is_active() {
                            match controller.stop_forwarding().await.into_result() {
                                Ok(()) => println!("Forwarding stopped"),
                                Err(err) => println!("{err}"),
                            }
                        } else {
                            start(&controller, &config).await;
                        }
                    }
                    Command::Status => println!("{}", controller.status()),
                    Command::Quit => break,
                    Command::Unknown(other) => println!("Unknown command: {other}"),
                },
                None => {
                    info!("stdin closed, forwarding until interrupted");
                    tokio::signal::ctrl_c().await?;
                    break;
                }
            },
        }
    }

    controller.stop_forwarding().await;
    info!("Exiting");
    Ok(())
}

async fn start(controller: &ForwardingController, config: &ResolvedConfig) {
    match controller
        .start_forwarding(config.endpoint.clone(), config.platform_tier)
        .await
    {
        Ok(()) => println!(
            "Forwarding to {} ({} clipboard access)",
            config.endpoint, config.platform_tier
        ),
        Err(ForwardingError::AlreadyActive) => println!("Forwarding is already active"),
        Err(err) => warn!(error = %err, "Failed to start forwarding"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command(""), Command::Toggle);
        assert_eq!(parse_command(" T \n"), Command::Toggle);
        assert_eq!(parse_command("s"), Command::Status);
        assert_eq!(parse_command("quit"), Command::Quit);
        assert_eq!(
            parse_command("upload"),
            Command::Unknown("upload".to_string())
        );
    }
}
