use anyhow::{Context, Result, bail};
use std::net::SocketAddr;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tracing::info;

use crate::pool;
use crate::progress::{self, Progress};
use crate::rotation::Rotation;
use crate::state::ServerState;

/// One full client exchange: identifier and progress word in, mode
/// code, updated word and item text out, then the connection closes.
pub async fn handle(state: ServerState, socket: TcpStream, peer: SocketAddr) -> Result<()> {
    let (reader, mut writer) = socket.into_split();

    let mut lines = BufReader::new(reader).lines();

    let Some(id) = lines.next_line().await? else {
        bail!("peer closed before sending an identifier");
    };
    let id = id.trim().to_string();
    if id.is_empty() {
        bail!("empty client identifier");
    }

    let Some(raw) = lines.next_line().await? else {
        bail!("peer closed before sending a progress word");
    };
    let word: u8 = raw
        .trim()
        .parse()
        .with_context(|| format!("malformed progress word: {raw:?}"))?;

    // Mode is sampled once and used for the whole exchange; a racing
    // admin switch lands on the next request.
    let mode = state.mode.current();

    let progress = progress::decode(word, mode);

    let rotation = match progress {
        Progress::Restart => {
            let fresh = Rotation::draw();
            state.sessions.replace(&id, mode, fresh);
            fresh
        }
        Progress::Continue(_) => state.sessions.get_or_create(&id, mode),
    };

    let index = rotation.index(progress.position());

    info!("[{peer}] sending {} #{index} to client {id}", mode.noun());

    let reply = format!(
        "{}\n{}\n{}\n",
        mode.code(),
        progress::encode(word, progress, mode),
        pool::text(mode, index),
    );

    writer.write_all(reply.as_bytes()).await?;

    Ok(())
}
