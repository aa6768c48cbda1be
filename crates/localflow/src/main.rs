//! LocalFlow: push-to-talk dictation with chord hotkeys and spoken
//! formatting commands.

mod app;
mod app_command;
mod backend;
mod config;
mod dispatch;
mod error;
mod listener;
#[cfg(test)]
mod tests;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    backend::BackendClient,
    dispatch::{OutputDispatcher, PasteKeyGuard},
    error::{AppError, Result as AppResult},
};

use crate::config::Config;

use std::sync::{Arc, Mutex as StdMutex};

use localflow_core::{audio::AudioCapturer, hotkey::HotkeyMachine, transform::CommandTransformer};
use tokio::sync::{Mutex, mpsc};
use tracing::error;

/// Application entry point.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("localflow=debug")
        .init();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    let bindings = match config.hotkeys.bindings() {
        Ok(b) => b,
        Err(e) => {
            error!("Invalid hotkey configuration: {:?}", e);
            std::process::exit(1);
        }
    };

    let machine = Arc::new(StdMutex::new(HotkeyMachine::new(bindings)));
    let (command_tx, command_rx) = mpsc::channel(32);

    let suppress_trigger = config.hotkeys.suppress_trigger;
    let hook_machine = Arc::clone(&machine);
    let hook_tx = command_tx.clone();
    let shutdown_tx = command_tx.clone();

    let config = Arc::new(config);

    // The async runtime lives on a worker thread; the main thread belongs
    // to the OS input hook (macOS requires the event tap there).
    let runtime_thread = std::thread::spawn(move || {
        let rt = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                error!("Failed to create tokio runtime: {:?}", e);
                std::process::exit(1);
            }
        };

        rt.block_on(async {
            let capturer = match AudioCapturer::new(config.audio.selected_device.as_deref()) {
                Ok(c) => c,
                Err(e) => {
                    error!("Failed to open audio input: {:?}", e);
                    std::process::exit(1);
                }
            };

            let backend = match BackendClient::new(&config.server) {
                Ok(b) => Arc::new(b),
                Err(e) => {
                    error!("Failed to create backend client: {:?}", e);
                    std::process::exit(1);
                }
            };

            let dispatcher = match OutputDispatcher::new() {
                Ok(d) => Arc::new(Mutex::new(d)),
                Err(e) => {
                    error!("Failed to create output dispatcher: {:?}", e);
                    std::process::exit(1);
                }
            };

            let app = App {
                machine,
                capturer,
                backend,
                dispatcher,
                transformer: CommandTransformer::default(),
                config,
                command_tx,
                command_rx,
                session: None,
            };

            app.run().await;
        });
    });

    // The hook only returns once it can no longer deliver events. Drain
    // the event loop before exiting so in-flight sessions finish.
    let hook_result = listener::run(hook_machine, hook_tx, suppress_trigger);
    if let Err(e) = &hook_result {
        error!("Input hook failed: {:?}", e);
    }

    let _ = shutdown_tx.blocking_send(AppCommand::Shutdown);
    let _ = runtime_thread.join();

    if hook_result.is_err() {
        std::process::exit(1);
    }
}
