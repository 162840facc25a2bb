//! Interactive front-ends: the joke/proverb client and the admin
//! console. Thin wrappers over the wire protocol; all the cycle logic
//! lives server-side, keyed by the identifier generated here.

use std::io::Write as _;

use anyhow::{Context, Result, bail};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tokio::net::TcpStream;

use crate::cli::HostArgs;
use crate::ident;
use crate::pool::Mode;
use crate::progress;
use crate::server::{ADMIN_PORT, ADMIN_PORT_SECONDARY, CLIENT_PORT, CLIENT_PORT_SECONDARY};

fn prompt(text: &str) -> Result<()> {
    print!("{text}");
    std::io::stdout().flush()?;
    Ok(())
}

/// Read one trimmed console entry. EOF behaves like 'quit'.
async fn next_entry(stdin: &mut Lines<BufReader<Stdin>>) -> Result<String> {
    match stdin.next_line().await? {
        Some(line) => Ok(line.trim().to_string()),
        None => Ok("quit".to_string()),
    }
}

async fn read_reply_line<R>(lines: &mut Lines<R>, what: &str) -> Result<String>
where
    R: AsyncBufRead + Unpin,
{
    match lines.next_line().await? {
        Some(line) => Ok(line),
        None => bail!("server closed before sending {what}"),
    }
}

struct Target {
    host: String,
    port: u16,
    word: u8,
    secondary: bool,
}

impl Target {
    fn new(host: String, port: u16, secondary: bool) -> Self {
        Self {
            host,
            port,
            word: 0,
            secondary,
        }
    }
}

pub async fn run_client(args: HostArgs) -> Result<()> {
    let id = ident::fresh_id();

    let mut primary = Target::new(args.primary.clone(), CLIENT_PORT, false);
    let mut alternate = args
        .secondary
        .clone()
        .map(|host| Target::new(host, CLIENT_PORT_SECONDARY, true));

    println!("Joke client.");
    println!("Primary server: {}, port {}.", primary.host, primary.port);
    if let Some(alt) = &alternate {
        println!("Secondary server: {}, port {}.", alt.host, alt.port);
    }
    println!();

    prompt("Enter your name: ")?;
    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let name = next_entry(&mut stdin).await?;
    println!();

    let mut on_secondary = false;

    loop {
        prompt("Press Enter for a response, 's' to switch server, 'quit' to end: ")?;

        let entry = next_entry(&mut stdin).await?;

        match entry.to_lowercase().as_str() {
            "" => {
                let target = match (&mut alternate, on_secondary) {
                    (Some(alt), true) => alt,
                    _ => &mut primary,
                };

                if let Err(err) = request(target, &id, &name).await {
                    println!("Socket error: {err:#}");
                }
            }

            "s" => match &alternate {
                Some(alt) => {
                    on_secondary = !on_secondary;

                    let (host, port) = if on_secondary {
                        (alt.host.as_str(), alt.port)
                    } else {
                        (primary.host.as_str(), primary.port)
                    };
                    println!("Now communicating with: {host}, port {port}");
                }
                None => println!("No secondary server being used."),
            },

            "quit" => break,

            _ => println!("Unrecognized entry, please re-enter."),
        }
    }

    println!("Cancelled by user request.");
    Ok(())
}

/// One request/reply exchange; updates the target's progress word.
async fn request(target: &mut Target, id: &str, name: &str) -> Result<()> {
    let stream = TcpStream::connect((target.host.as_str(), target.port))
        .await
        .with_context(|| format!("failed to connect to {}:{}", target.host, target.port))?;

    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    writer
        .write_all(format!("{id}\n{}\n", target.word).as_bytes())
        .await?;

    let code = read_reply_line(&mut lines, "a mode code").await?;
    let mode = Mode::from_code(code.trim())
        .with_context(|| format!("unrecognized mode code: {code:?}"))?;

    let raw = read_reply_line(&mut lines, "a progress word").await?;
    target.word = raw
        .trim()
        .parse()
        .with_context(|| format!("malformed progress word: {raw:?}"))?;

    let text = read_reply_line(&mut lines, "the item text").await?;

    let lead = if target.secondary { "<S2> " } else { "" };
    println!(
        "{lead}{}{} {name}: {text}",
        mode.code(),
        countdown_letter(target.word, mode)
    );
    println!();

    Ok(())
}

/// Tag letter printed before each item: A for the first item of a
/// cycle down to D for the last, derived from the updated word.
fn countdown_letter(word: u8, mode: Mode) -> char {
    match progress::cycle_progress(word, mode) {
        3 => 'A',
        2 => 'B',
        1 => 'C',
        _ => 'D',
    }
}

pub async fn run_admin(args: HostArgs) -> Result<()> {
    let primary = args.primary;
    let secondary = args.secondary;

    println!("Administration client.");
    println!("Primary server: {primary}, port {ADMIN_PORT}.");
    if let Some(host) = &secondary {
        println!("Secondary server: {host}, port {ADMIN_PORT_SECONDARY}.");
    }
    println!();

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut on_secondary = false;

    loop {
        prompt(
            "Enter 'J' for jokes, 'P' for proverbs, 'S' to switch server, \
             'shutdown' to close the server, 'quit' to end: ",
        )?;

        let entry = next_entry(&mut stdin).await?.to_uppercase();

        match entry.as_str() {
            "J" | "P" | "SHUTDOWN" => {
                let (host, port) = admin_target(&primary, &secondary, on_secondary);

                match send_command(host, port, &entry).await {
                    Ok(status) => println!("{status}"),
                    Err(err) => println!("Socket error: {err:#}"),
                }

                if entry == "SHUTDOWN" {
                    println!("Server {host} has been shut down.");
                }
            }

            "S" => match &secondary {
                Some(host) => {
                    on_secondary = !on_secondary;

                    let (current, port) = admin_target(&primary, &secondary, on_secondary);
                    println!("Now administrating: {current}, port {port}.");

                    // Same host named twice means one process answering
                    // both admin ports; tell it which one we now use.
                    if *host == primary {
                        match send_command(current, port, "S").await {
                            Ok(status) => println!("{status}"),
                            Err(err) => println!("Socket error: {err:#}"),
                        }
                    }
                }
                None => println!("No secondary server being used."),
            },

            "QUIT" => break,

            _ => println!("Invalid input, please follow the instruction and re-enter."),
        }
    }

    println!("AdminClient cancelled.");
    Ok(())
}

fn admin_target<'a>(
    primary: &'a str,
    secondary: &'a Option<String>,
    on_secondary: bool,
) -> (&'a str, u16) {
    match secondary {
        Some(host) if on_secondary => (host.as_str(), ADMIN_PORT_SECONDARY),
        _ => (primary, ADMIN_PORT),
    }
}

/// Send one admin command and return the server's status line.
async fn send_command(host: &str, port: u16, command: &str) -> Result<String> {
    let stream = TcpStream::connect((host, port))
        .await
        .with_context(|| format!("failed to connect to {host}:{port}"))?;

    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    writer.write_all(format!("{command}\n").as_bytes()).await?;

    read_reply_line(&mut lines, "a status line").await
}
