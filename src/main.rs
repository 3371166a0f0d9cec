mod binder;
mod config;
mod dispatch;
mod error;
mod graphql;
mod host;
mod ipc;
mod screens;
mod view;

use dispatch::Inbound;
use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    // stdout carries the protocol; logs go to stderr.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn write_line(stdout: &mut impl Write, value: &serde_json::Value) {
    let _ = writeln!(
        stdout,
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{\"ok\":false}".to_string())
    );
    let _ = stdout.flush();
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let config = config::Config::from_env()?;
    tracing::info!(endpoint = %config.endpoint, "schoold starting");

    let (tx, rx) = mpsc::channel::<Inbound>();
    let stdin_tx = tx.clone();
    thread::Builder::new()
        .name("stdin".to_string())
        .spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                if stdin_tx.send(Inbound::Line(line)).is_err() {
                    return;
                }
            }
            let _ = stdin_tx.send(Inbound::Eof);
        })?;

    let mut state = ipc::AppState::new(config);
    let mut stdout = io::stdout();

    for msg in rx.iter() {
        match msg {
            Inbound::Line(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let req: ipc::Request = match serde_json::from_str(&line) {
                    Ok(v) => v,
                    Err(e) => {
                        // Can't reply without id.
                        write_line(&mut stdout, &ipc::err("", "bad_json", e.to_string()));
                        continue;
                    }
                };
                let resp = ipc::handle_request(&mut state, req);
                write_line(&mut stdout, &resp);
            }
            Inbound::Completed(done) => {
                for event in state.host.complete(done) {
                    match serde_json::to_value(&event) {
                        Ok(v) => write_line(&mut stdout, &v),
                        Err(e) => tracing::error!(error = %e, "cannot serialize event"),
                    }
                }
            }
            Inbound::Eof => break,
        }

        let commands = state.host.drain_commands();
        if commands.is_empty() {
            continue;
        }
        let Some(session) = state.session.as_ref() else {
            tracing::warn!(count = commands.len(), "dropping commands without a session");
            continue;
        };
        for cmd in commands {
            dispatch::dispatch(session.transport.clone(), cmd, tx.clone());
        }
    }

    tracing::info!("stdin closed, shutting down");
    Ok(())
}
