use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::cli::ServeArgs;
use crate::state::ServerState;

pub const CLIENT_PORT: u16 = 4545;
pub const CLIENT_PORT_SECONDARY: u16 = 4546;

pub const ADMIN_PORT: u16 = 5050;
pub const ADMIN_PORT_SECONDARY: u16 = 5051;

/// Bind the primary endpoint pair, and the secondary pair when asked,
/// then serve until an admin shuts the process down.
pub async fn serve(args: ServeArgs) -> Result<()> {
    let state = ServerState::new();

    let admin = TcpListener::bind((args.host.as_str(), ADMIN_PORT)).await?;
    spawn_admin_loop(admin, state.clone());

    if args.secondary {
        let clients = TcpListener::bind((args.host.as_str(), CLIENT_PORT_SECONDARY)).await?;
        spawn_client_loop(clients, state.clone());

        let admin = TcpListener::bind((args.host.as_str(), ADMIN_PORT_SECONDARY)).await?;
        spawn_admin_loop(admin, state.clone());

        info!(
            "secondary endpoints bound: client port {CLIENT_PORT_SECONDARY}, admin port {ADMIN_PORT_SECONDARY}"
        );
    }

    let clients = TcpListener::bind((args.host.as_str(), CLIENT_PORT)).await?;

    info!("listening for clients at port {CLIENT_PORT}, admins at port {ADMIN_PORT}");

    listen_clients(clients, state).await
}

fn spawn_client_loop(listener: TcpListener, state: ServerState) {
    tokio::spawn(async move {
        if let Err(err) = listen_clients(listener, state).await {
            warn!("client listener failed: {err:?}");
        }
    });
}

fn spawn_admin_loop(listener: TcpListener, state: ServerState) {
    tokio::spawn(async move {
        if let Err(err) = listen_admin(listener, state).await {
            warn!("admin listener failed: {err:?}");
        }
    });
}

/// Accept loop for a client-facing port. One task per connection; a
/// failed exchange aborts only that connection.
pub async fn listen_clients(listener: TcpListener, state: ServerState) -> Result<()> {
    loop {
        let (socket, peer) = listener.accept().await?;

        let state = state.clone();

        tokio::spawn(async move {
            if let Err(err) = crate::conn::handle(state, socket, peer).await {
                warn!("[{peer}] connection error: {err:?}");
            }
        });
    }
}

/// Accept loop for an admin port.
pub async fn listen_admin(listener: TcpListener, state: ServerState) -> Result<()> {
    loop {
        let (socket, peer) = listener.accept().await?;

        let state = state.clone();

        tokio::spawn(async move {
            if let Err(err) = crate::admin::handle(state, socket, peer).await {
                warn!("[{peer}] admin connection error: {err:?}");
            }
        });
    }
}
