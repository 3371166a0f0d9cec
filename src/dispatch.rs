use crate::error::ClientError;
use crate::graphql::Transport;
use crate::host::{Command, Completion};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;

/// Everything the main loop reacts to, in arrival order.
#[derive(Debug)]
pub enum Inbound {
    Line(String),
    Completed(Completion),
    Eof,
}

/// Runs `cmd` on its own thread and posts the completion back to the main
/// loop. The worker never touches screen state.
pub fn dispatch(transport: Arc<dyn Transport>, cmd: Command, tx: Sender<Inbound>) {
    let name = format!("gql-{}", cmd.operation().name);
    let on_spawn_failure = (cmd.clone(), tx.clone());
    let spawned = thread::Builder::new().name(name).spawn(move || {
        tracing::debug!(
            screen_id = %cmd.screen_id(),
            operation = cmd.operation().name,
            kind = ?cmd.operation().kind,
            "executing"
        );
        let outcome = transport.execute(cmd.operation());
        // The receiver is gone only when the process is shutting down.
        let _ = tx.send(Inbound::Completed(cmd.complete(outcome)));
    });
    if let Err(e) = spawned {
        tracing::error!(error = %e, "failed to spawn worker");
        let (cmd, tx) = on_spawn_failure;
        let _ = tx.send(Inbound::Completed(
            cmd.complete(Err(ClientError::server(e.to_string()))),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::{operations, Operation};
    use crate::host::ScreenHost;
    use crate::screens::{Identity, Role, ScreenKind};
    use serde_json::json;
    use std::sync::mpsc;
    use std::time::Duration;

    struct Canned(serde_json::Value);

    impl Transport for Canned {
        fn execute(&self, op: &Operation) -> Result<serde_json::Value, ClientError> {
            assert_eq!(op, &operations::get_all_grades());
            Ok(self.0.clone())
        }
    }

    #[test]
    fn completion_comes_back_through_the_channel() {
        let mut host = ScreenHost::new();
        let admin = Identity {
            dni: "1".into(),
            role: Role::Admin,
        };
        let id = host
            .open(ScreenKind::Grades, &admin, &json!({}))
            .expect("open")
            .screen_id;
        let (tx, rx) = mpsc::channel();
        let transport: Arc<dyn Transport> =
            Arc::new(Canned(json!({ "grades": [{ "_id": "1", "name": "1st" }] })));
        for cmd in host.drain_commands() {
            dispatch(transport.clone(), cmd, tx.clone());
        }
        let Inbound::Completed(done) = rx.recv_timeout(Duration::from_secs(5)).expect("recv") else {
            panic!("expected a completion");
        };
        let events = host.complete(done);
        assert_eq!(events.len(), 1);
        assert_eq!(host.snapshot(&id).expect("snap").view.state_name(), "ready");
    }
}
