//! Main chat loop orchestration.
//!
//! Drives a [`ChatView`] against a running server: credential prompts until
//! `validate-keys` accepts, then the input loop with slash commands and
//! agent replies. `/keys` drops back to the credential prompts.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Confirm, Input, Password};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use walletpilot_core::ui::{ChatView, UiError, render_transcript};
use walletpilot_types::chat::Sender;
use walletpilot_types::credential::{CredentialPayload, NetworkId};

use super::banner::print_welcome_banner;
use super::client::ApiClient;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::ChatRenderer;

const HISTORY_PREVIEW_CHARS: usize = 100;

/// How an input session ended.
enum SessionEnd {
    Exit,
    ChangeKeys,
}

/// Run the interactive chat client against `server`.
pub async fn run_chat_loop(server: &str) -> Result<()> {
    let client = ApiClient::new(server);
    let health = client.health().await?;
    if health.status != "ok" {
        warn!(status = %health.status, "server reports degraded health");
    }

    let renderer = ChatRenderer::new();
    let mut view = ChatView::new();

    loop {
        if !configure(&client, &mut view).await? {
            break;
        }

        let network = view
            .credentials()
            .and_then(|c| c.network_id.clone())
            .unwrap_or_else(|| NetworkId::default().to_string());
        print_welcome_banner(client.base_url(), Some(&health.version), &network);

        match run_session(&client, &renderer, &mut view, &network).await? {
            SessionEnd::Exit => break,
            SessionEnd::ChangeKeys => {
                view.reset();
                println!("\n  {}\n", style("API keys cleared.").dim());
            }
        }
    }

    println!("\n  {}", style("Session ended.").dim());
    Ok(())
}

/// Prompt for credentials until the server accepts them.
///
/// Returns `false` when the user gives up.
async fn configure(client: &ApiClient, view: &mut ChatView) -> Result<bool> {
    loop {
        let payload = match resolve_key_file(prompt_credentials()?) {
            Ok(payload) => payload,
            Err(e) => {
                println!("  {} {e:#}", style("!").red().bold());
                continue;
            }
        };

        let spinner = spinner("validating keys...");
        let outcome = client.validate_keys(&payload).await;
        spinner.finish_and_clear();

        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(e) => {
                println!("  {} {e:#}", style("!").red().bold());
                if retry()? {
                    continue;
                }
                return Ok(false);
            }
        };

        match view.configure(payload, &outcome) {
            Ok(()) => {
                if let Some(message) = &outcome.message {
                    println!("  {} {}", style("✓").green(), message);
                }
                return Ok(true);
            }
            Err(UiError::Rejected(reason)) => {
                debug!(kind = outcome.kind.as_deref().unwrap_or("-"), "keys rejected");
                println!("  {} {}", style("✗").red(), style(reason).red());
                if !retry()? {
                    return Ok(false);
                }
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn retry() -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt("Try different keys?")
        .default(true)
        .interact()?)
}

fn prompt_credentials() -> Result<CredentialPayload> {
    println!();
    println!(
        "  {}",
        style("Enter your API keys. They stay in memory and are sent only to the server.").dim()
    );
    println!();

    let openai_key = Password::new()
        .with_prompt("  OpenAI API key")
        .allow_empty_password(true)
        .interact()?;
    let wallet_key_id: String = Input::new()
        .with_prompt("  Wallet API key id")
        .allow_empty(true)
        .interact_text()?;
    let wallet_private_key = Password::new()
        .with_prompt("  Wallet API private key (or @path to a key file)")
        .allow_empty_password(true)
        .interact()?;
    let network_id: String = Input::new()
        .with_prompt("  Network")
        .default(NetworkId::default().to_string())
        .interact_text()?;

    Ok(CredentialPayload {
        openai_key: Some(openai_key),
        wallet_key_id: Some(wallet_key_id),
        wallet_private_key: Some(wallet_private_key),
        network_id: Some(network_id),
    })
}

/// Replace an `@path` wallet private key with the contents of that file.
fn resolve_key_file(mut payload: CredentialPayload) -> Result<CredentialPayload> {
    let path = payload
        .wallet_private_key
        .as_deref()
        .and_then(|k| k.trim().strip_prefix('@'))
        .map(str::to_string);
    if let Some(path) = path {
        let key = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read wallet key file {path}"))?;
        payload.wallet_private_key = Some(key);
    }
    Ok(payload)
}

async fn run_session(
    client: &ApiClient,
    renderer: &ChatRenderer,
    view: &mut ChatView,
    network: &str,
) -> Result<SessionEnd> {
    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) =
        ChatInput::new(prompt).map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        let text = match chat_input.read_line().await {
            InputEvent::Eof => return Ok(SessionEnd::Exit),
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            InputEvent::Message(text) if text.is_empty() => continue,
            InputEvent::Message(text) => text,
        };

        if let Some(cmd) = commands::parse(&text) {
            match cmd {
                ChatCommand::Help => commands::print_help(),
                ChatCommand::Keys => return Ok(SessionEnd::ChangeKeys),
                ChatCommand::Exit => return Ok(SessionEnd::Exit),
                ChatCommand::History => print_history(view),
                ChatCommand::Clear => {
                    view.clear_messages();
                    chat_input.clear();
                }
                ChatCommand::Save(path) => save_transcript(view, path),
                ChatCommand::Unknown(name) => println!(
                    "\n  {} Unknown command: {}. Type /help for available commands.\n",
                    style("?").yellow().bold(),
                    style(name).dim()
                ),
            }
            continue;
        }

        let request = match view.begin_send(&text) {
            Ok(request) => request,
            Err(e) => {
                println!("\n  {} {e}\n", style("!").yellow().bold());
                continue;
            }
        };

        let spinner = spinner("thinking...");
        let start = Instant::now();
        let outcome = match client.send(&request).await {
            Ok(reply) => reply.into_result(),
            Err(e) => Err(format!("{e:#}")),
        };
        spinner.finish_and_clear();

        match &outcome {
            Ok(reply) => renderer.print_reply(reply),
            Err(error) => renderer.print_error(error),
        }
        renderer.print_stats_footer(start.elapsed().as_millis() as u64, network);
        println!();

        view.complete(outcome);
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(template);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

fn print_history(view: &ChatView) {
    println!();
    if view.messages().is_empty() {
        println!("  {}", style("No messages yet.").dim());
    }
    for message in view.messages() {
        let label = match message.sender {
            Sender::User => style("You").green().bold(),
            Sender::Agent => style("Agent").cyan().bold(),
        };
        println!("  {} {}", label, preview(&message.text));
    }
    println!();
}

fn preview(text: &str) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() > HISTORY_PREVIEW_CHARS {
        let head: String = flat.chars().take(HISTORY_PREVIEW_CHARS - 3).collect();
        format!("{head}...")
    } else {
        flat
    }
}

fn default_transcript_path() -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    PathBuf::from(format!("walletpilot-chat-{stamp}.md"))
}

fn save_transcript(view: &ChatView, path: Option<String>) {
    let path = path.map(PathBuf::from).unwrap_or_else(default_transcript_path);
    match std::fs::write(&path, render_transcript(view.messages())) {
        Ok(()) => println!(
            "\n  {} Saved {} messages to {}\n",
            style("*").cyan().bold(),
            view.messages().len(),
            style(path.display()).dim()
        ),
        Err(e) => println!(
            "\n  {} Failed to save transcript: {e}\n",
            style("!").red().bold()
        ),
    }
}
