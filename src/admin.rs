use anyhow::{Result, bail};
use std::net::SocketAddr;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tracing::{info, warn};

use crate::pool::Mode;
use crate::state::ServerState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminCommand {
    SetMode(Mode),
    SwitchPort,
    Shutdown,
}

pub fn parse_command(line: &str) -> Result<AdminCommand, String> {
    match line.trim().to_uppercase().as_str() {
        "J" => Ok(AdminCommand::SetMode(Mode::Joke)),
        "P" => Ok(AdminCommand::SetMode(Mode::Proverb)),
        "S" => Ok(AdminCommand::SwitchPort),
        "SHUTDOWN" => Ok(AdminCommand::Shutdown),
        other => Err(format!("unknown command: {other}")),
    }
}

/// One admin exchange: a command line in, a status line out, then the
/// connection closes. SHUTDOWN additionally ends the whole process
/// once the confirmation is on the wire.
pub async fn handle(state: ServerState, socket: TcpStream, peer: SocketAddr) -> Result<()> {
    info!("[{peer}] admin connected at port {}", state.admin_port());

    let (reader, mut writer) = socket.into_split();

    let mut lines = BufReader::new(reader).lines();

    let Some(line) = lines.next_line().await? else {
        bail!("admin closed before sending a command");
    };

    let command = match parse_command(&line) {
        Ok(command) => command,
        Err(e) => {
            writer.write_all(format!("[error] {e}\n").as_bytes()).await?;
            bail!("rejected admin input: {e}");
        }
    };

    match command {
        AdminCommand::SetMode(mode) => {
            let previous = state.mode.set(mode);

            if previous == mode {
                writer
                    .write_all(b"Currently on this mode, no need to change.\n")
                    .await?;
            } else {
                info!("server mode changed, now on {}", mode.label());
                writer
                    .write_all(
                        format!("Server Mode has been changed, now it is on {}.\n", mode.label())
                            .as_bytes(),
                    )
                    .await?;
            }
        }

        AdminCommand::SwitchPort => {
            let port = state.switch_admin_port();

            info!("admin client now switched to port {port}");
            writer
                .write_all(format!("Server port switched to {port}.\n").as_bytes())
                .await?;
        }

        AdminCommand::Shutdown => {
            warn!("shut down by the admin client, closing");

            writer.write_all(b"Server has been shut down.\n").await?;
            writer.flush().await?;

            std::process::exit(0);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_parse_case_insensitively() {
        assert_eq!(parse_command("J"), Ok(AdminCommand::SetMode(Mode::Joke)));
        assert_eq!(parse_command("p"), Ok(AdminCommand::SetMode(Mode::Proverb)));
        assert_eq!(parse_command(" s "), Ok(AdminCommand::SwitchPort));
        assert_eq!(parse_command("shutdown"), Ok(AdminCommand::Shutdown));
    }

    #[test]
    fn unknown_input_is_rejected() {
        assert!(parse_command("restart").is_err());
        assert!(parse_command("").is_err());
    }
}
