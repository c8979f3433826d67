//! Launchdeck application binary - composition root.
//!
//! Ties the Launchdeck crates together into a single executable:
//! 1. Load configuration from TOML
//! 2. Restore the persisted identity session, if any
//! 3. Wire the chat mini-app (provider, speech capture, file store)
//! 4. Run the interactive launcher shell on stdin
//!
//! The shell is a line-oriented rendition of the launcher home screen:
//! tiles open with `/open <id>`, and while the chat tile is active every
//! non-command line is sent to the assistant.

mod cli;
mod launcher;

use std::io::BufRead;
use std::sync::Arc;

use clap::Parser;

use launchdeck_chat::ConversationController;
use launchdeck_cloud::drive::{resolve_dir, LocalDrive};
use launchdeck_cloud::identity::{Identity, MockIdentity};
use launchdeck_core::config::LaunchdeckConfig;
use launchdeck_provider::{ChatProvider, GeminiProvider};
use launchdeck_speech::{SpeechCapture, UnsupportedCapture};

use cli::CliArgs;
use launcher::{default_tiles, Launcher, MiniAppKind, TileTarget};

/// Print messages appended to the log since the last call, plus any
/// banner, then advance the cursor.
fn print_chat_update(controller: &ConversationController, shown: &mut usize) {
    for message in &controller.messages()[*shown..] {
        println!("{}: {}", message.sender.label(), message.text);
        if !message.sources.is_empty() {
            let uris: Vec<&str> = message.sources.iter().map(|s| s.uri.as_str()).collect();
            println!("  [Sources: {}]", uris.join(", "));
        }
    }
    *shown = controller.messages().len();
    if let Some(banner) = controller.last_error() {
        println!("! {}", banner);
    }
}

fn print_tiles(launcher: &Launcher) {
    println!("Apps:");
    for tile in launcher.tiles() {
        println!("  {:<16} {} ({})", tile.id, tile.name, tile.description);
    }
}

fn print_help() {
    println!("Commands:");
    println!("  /home            list the launcher tiles");
    println!("  /open <id>       open a tile");
    println!("  /close           close the active tile");
    println!("  /save            save the chat transcript");
    println!("  /mic             toggle dictation");
    println!("  /signin          sign in");
    println!("  /signout         sign out");
    println!("  /quit            exit");
    println!("While the chat tile is open, any other line is sent to the assistant.");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config.
    let config_file = args.resolve_config_path();
    let config = LaunchdeckConfig::load_or_default(&config_file);

    // Tracing.
    let log_level = args
        .resolve_log_level()
        .unwrap_or_else(|| config.general.log_level.clone());
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    tracing::info!("Starting Launchdeck v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    // Data directory.
    let data_dir = resolve_dir(
        &args
            .resolve_data_dir()
            .unwrap_or_else(|| config.general.data_dir.clone()),
    );
    if let Err(e) = std::fs::create_dir_all(&data_dir) {
        tracing::error!(path = %data_dir.display(), error = %e, "Failed to create data directory");
        return Err(e.into());
    }

    // Identity.
    let identity = MockIdentity::new(&data_dir);
    let user = identity.restore_session().await;

    // Capabilities for the chat mini-app.
    let store = Arc::new(LocalDrive::new(resolve_dir(&config.drive.export_dir)));
    let provider: Arc<dyn ChatProvider> = match GeminiProvider::from_config(&config.chat) {
        Ok(p) => Arc::new(p),
        Err(e) => {
            // The shell still starts; the chat surface shows a banner.
            tracing::warn!(error = %e, "Chat provider not configured");
            Arc::new(GeminiProvider::new("", config.chat.model.clone()))
        }
    };
    // No platform recognizer is wired in yet; dictation reports itself
    // unsupported, matching browsers without the speech API.
    let capture: Box<dyn SpeechCapture> = Box::new(UnsupportedCapture);

    let mut controller =
        ConversationController::new(provider, capture, store, config.chat.clone());
    controller.set_user(user.clone());

    let mut launcher = Launcher::new(default_tiles());

    // === Interactive shell ===

    println!("Launchdeck");
    match &user {
        Some(u) => println!("Signed in as {} <{}>", u.name, u.email),
        None => println!("Not signed in."),
    }
    print_tiles(&launcher);
    print_help();

    let mut shown = 0usize;
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let chat_active = matches!(
            launcher.active_tile().map(|t| &t.target),
            Some(TileTarget::MiniApp(MiniAppKind::Chat))
        );

        match input {
            "/quit" => break,
            "/home" => print_tiles(&launcher),
            "/close" => {
                if chat_active {
                    controller.set_visible(false).await;
                    shown = 0;
                }
                launcher.close();
                println!("Back at the home screen.");
            }
            "/save" => {
                if chat_active {
                    controller.export_transcript().await;
                    if let Some(alert) = controller.take_alert() {
                        println!("{}", alert);
                    }
                } else {
                    println!("Open the chat tile first.");
                }
            }
            "/mic" => {
                if chat_active {
                    controller.toggle_dictation();
                    controller.poll_dictation();
                    if controller.is_listening() {
                        println!("Listening...");
                    }
                    print_chat_update(&controller, &mut shown);
                } else {
                    println!("Open the chat tile first.");
                }
            }
            "/signin" => match identity.sign_in().await {
                Ok(u) => {
                    println!("Signed in as {} <{}>", u.name, u.email);
                    controller.set_user(Some(u));
                }
                Err(e) => println!("Could not sign in: {}", e),
            },
            "/signout" => {
                identity.sign_out().await;
                controller.set_user(None);
                println!("Signed out.");
            }
            _ if input.starts_with("/open ") => {
                let id = input["/open ".len()..].trim();
                if chat_active {
                    controller.set_visible(false).await;
                    shown = 0;
                }
                match launcher.open(id).cloned() {
                    Some(tile) => match tile.target {
                        TileTarget::ExternalUrl(url) => {
                            println!("{} opens in your browser: {}", tile.name, url);
                            launcher.close();
                        }
                        TileTarget::MiniApp(MiniAppKind::Chat) => {
                            controller.set_visible(true).await;
                            print_chat_update(&controller, &mut shown);
                        }
                        TileTarget::MiniApp(_) => {
                            println!("{} is not available in the terminal shell.", tile.name);
                            launcher.close();
                        }
                    },
                    None => println!("No tile named '{}'.", id),
                }
            }
            _ if input.starts_with('/') => print_help(),
            _ => {
                if chat_active {
                    controller.set_compose_text(input);
                    controller.submit().await;
                    controller.poll_dictation();
                    print_chat_update(&controller, &mut shown);
                } else {
                    println!("Open the chat tile first ('/open chat'), or see /help.");
                }
            }
        }
    }

    tracing::info!("Launchdeck shutting down");
    Ok(())
}
