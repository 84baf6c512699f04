// SPDX-License-Identifier: MIT OR Apache-2.0
//! `OrdoPlay` Tween Preview - headless timeline player
//!
//! Plays a tween timeline against an in-memory scene node and logs every
//! frame:
//! - With no arguments the built-in demo session runs, using `tween.ron`
//!   from the working directory as its settings when present
//! - `<session.ron>` runs a session file
//! - `--dump` prints the demo session as RON
//!
//! Set `RUST_LOG` to adjust verbosity.

mod scene;
mod session;

use session::PreviewSession;
use std::path::Path;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let mut env_filter = EnvFilter::from_default_env();
    for directive in ["ordoplay_tween=info", "ordoplay_tween_preview=debug"] {
        match directive.parse() {
            Ok(directive) => env_filter = env_filter.add_directive(directive),
            Err(e) => eprintln!("Ignoring log directive {directive}: {e}"),
        }
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() {
    init_tracing();
    tracing::info!(
        "Starting OrdoPlay Tween Preview v{}",
        env!("CARGO_PKG_VERSION")
    );

    let arg = std::env::args().nth(1);
    let session = match arg.as_deref() {
        Some("--dump") => {
            match PreviewSession::demo().to_ron_string() {
                Ok(text) => println!("{text}"),
                Err(e) => {
                    tracing::error!("{e}");
                    std::process::exit(1);
                }
            }
            return;
        }
        Some(path) => match PreviewSession::load(Path::new(path)) {
            Ok(session) => session,
            Err(e) => {
                tracing::error!("{e}");
                std::process::exit(1);
            }
        },
        None => {
            let mut session = PreviewSession::demo();
            if let Err(e) = session.load_settings_from(Path::new(".")) {
                tracing::warn!("Ignoring settings file: {e}");
            }
            session
        }
    };

    let report = session::run(&session);
    tracing::info!(
        "Session '{}': {} player frames (completed: {}), {} preview steps, {} issue(s)",
        session.timeline.name,
        report.player_frames,
        report.completed,
        report.preview_frames,
        report.issues
    );
}
