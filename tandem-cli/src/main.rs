mod input;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use dialoguer::Input as Prompt;
use std::sync::Arc;
use tandem_client::{
    CallEvent, ClientConfig, Coordinator, CoordinatorHandle, RtcEngineFactory, SampleMediaSource,
    WsSignaling,
};
use tandem_core::{PeerId, RoomId};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::input::{HELP, Input, parse_input};
use crate::render::{ChatView, render_event, render_message};

#[derive(Parser)]
#[command(name = "tandem")]
#[command(about = "Two-party video call and chat over a tandem relay")]
struct Cli {
    /// Relay WebSocket base URL (overrides TANDEM_RELAY_URL).
    #[arg(long)]
    relay: Option<String>,

    /// Room to join (overrides TANDEM_ROOM).
    #[arg(short, long)]
    room: Option<String>,

    /// Display name; prompted for when missing.
    #[arg(short, long)]
    user: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(relay) = cli.relay {
        config.relay_url = relay;
    }
    if let Some(room) = cli.room {
        config.room = RoomId::new(room);
    }

    let user = match cli.user {
        Some(user) => user,
        None => prompt_user_name().await?,
    };

    let peer_id = PeerId::new();
    let (signaling, relay_rx) = WsSignaling::connect(&config.relay_url, peer_id.clone())
        .await
        .context("Failed to reach the relay")?;
    info!("Connected as {}", peer_id);

    let (coordinator, handle, events) = Coordinator::new(
        Arc::new(signaling),
        Arc::new(RtcEngineFactory::new(config.transport.clone())),
        Arc::new(SampleMediaSource),
        relay_rx,
    );
    let coordinator_task = tokio::spawn(coordinator.run());

    handle.join(config.room.clone(), user.clone()).await?;
    println!(
        "{}",
        format!("Joined room '{}' as {}. Type /help for commands.", config.room, user)
            .green()
            .bold()
    );

    run_session(&handle, events, &user).await?;

    drop(handle);
    let _ = coordinator_task.await;
    Ok(())
}

async fn prompt_user_name() -> Result<String> {
    tokio::task::spawn_blocking(|| {
        Prompt::<String>::new()
            .with_prompt("Your name")
            .validate_with(|name: &String| {
                if name.trim().is_empty() {
                    Err("name cannot be empty")
                } else {
                    Ok(())
                }
            })
            .interact_text()
    })
    .await?
    .context("Failed to read user name")
}

/// Reads intents from stdin and renders coordinator events until the user
/// leaves, stdin closes or the relay goes away.
async fn run_session(
    handle: &CoordinatorHandle,
    mut events: mpsc::UnboundedReceiver<CallEvent>,
    me: &str,
) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut chat = ChatView::default();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("stdin closed");
                    handle.leave().await?;
                    break;
                };

                match parse_input(&line) {
                    None => {}
                    Some(Input::Call) => handle.start_call().await?,
                    Some(Input::HangUp) => handle.stop_call().await?,
                    Some(Input::Leave) => {
                        handle.leave().await?;
                        break;
                    }
                    Some(Input::Help) => println!("{}", HELP.dimmed()),
                    Some(Input::Say(text)) => handle.send_message(text).await?,
                }
            }

            event = events.recv() => {
                let Some(event) = event else {
                    break;
                };

                if let CallEvent::MessagesUpdated(log) = &event {
                    for message in chat.update(log) {
                        println!("{}", render_message(message, me));
                    }
                }
                if let Some(line) = render_event(&event) {
                    println!("{}", line);
                }
                if event == CallEvent::RelayDisconnected {
                    break;
                }
            }
        }
    }

    Ok(())
}
