use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the server, answering clients and admins over TCP.
    Serve(ServeArgs),
    /// Interactive console that fetches jokes or proverbs.
    Client(HostArgs),
    /// Interactive administration console.
    Admin(HostArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Interface to bind the listening ports on.
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Additionally bind the secondary client/admin port pair, so one
    /// process answers as both primary and secondary.
    #[arg(long)]
    pub secondary: bool,
}

#[derive(Args, Debug, Clone)]
pub struct HostArgs {
    /// Primary server host.
    #[arg(default_value = "localhost")]
    pub primary: String,

    /// Optional secondary server host.
    pub secondary: Option<String>,
}
