//! Owns every open screen instance. Network work leaves as [`Command`]s and
//! comes back as [`Completion`]s; nothing here blocks or spawns.

use crate::binder::{ReadTicket, Resolution, WriteTicket};
use crate::error::{ClientError, HostError};
use crate::graphql::Operation;
use crate::screens::{self, Identity, MountedScreen, PendingWrite, ScreenKind, WriteOutcome};
use crate::view::View;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

pub const PERMISSION_ALERT: &str = "Se requiere acceso al Almacenamiento Interno";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Read {
        screen_id: String,
        ticket: ReadTicket,
        operation: Operation,
    },
    Write {
        screen_id: String,
        ticket: WriteTicket,
        operation: Operation,
    },
}

impl Command {
    pub fn screen_id(&self) -> &str {
        match self {
            Command::Read { screen_id, .. } | Command::Write { screen_id, .. } => screen_id,
        }
    }

    pub fn operation(&self) -> &Operation {
        match self {
            Command::Read { operation, .. } | Command::Write { operation, .. } => operation,
        }
    }

    pub fn complete(self, outcome: Result<serde_json::Value, ClientError>) -> Completion {
        match self {
            Command::Read {
                screen_id, ticket, ..
            } => Completion::Read {
                screen_id,
                ticket,
                outcome,
            },
            Command::Write {
                screen_id, ticket, ..
            } => Completion::Write {
                screen_id,
                ticket,
                outcome,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    Read {
        screen_id: String,
        ticket: ReadTicket,
        outcome: Result<serde_json::Value, ClientError>,
    },
    Write {
        screen_id: String,
        ticket: WriteTicket,
        outcome: Result<serde_json::Value, ClientError>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

impl From<&ClientError> for ErrorBody {
    fn from(e: &ClientError) -> Self {
        Self {
            code: e.code(),
            message: e.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event")]
pub enum HostEvent {
    #[serde(rename = "screen.updated", rename_all = "camelCase")]
    ScreenUpdated { screen_id: String, view: View },
    #[serde(rename = "mutation.failed", rename_all = "camelCase")]
    MutationFailed { screen_id: String, error: ErrorBody },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationPrompt {
    pub confirmation_id: String,
    pub title: String,
    pub message: String,
    pub options: [&'static str; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenSnapshot {
    pub screen_id: String,
    pub screen: ScreenKind,
    pub view: View,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_image: Option<String>,
    pub mutation_in_flight: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mutation_error: Option<ErrorBody>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<String>,
    pub view: View,
}

struct Slot {
    screen: Box<dyn MountedScreen>,
    loaded_at: Option<DateTime<Utc>>,
}

struct PendingConfirmation {
    screen_id: String,
    record_id: String,
}

#[derive(Default)]
pub struct ScreenHost {
    slots: HashMap<String, Slot>,
    confirmations: HashMap<String, PendingConfirmation>,
    outbox: Vec<Command>,
}

impl ScreenHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_count(&self) -> usize {
        self.slots.len()
    }

    pub fn drain_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.outbox)
    }

    fn slot(&self, screen_id: &str) -> Result<&Slot, HostError> {
        self.slots
            .get(screen_id)
            .ok_or_else(|| HostError::UnknownScreen(screen_id.to_string()))
    }

    fn slot_mut(&mut self, screen_id: &str) -> Result<&mut Slot, HostError> {
        self.slots
            .get_mut(screen_id)
            .ok_or_else(|| HostError::UnknownScreen(screen_id.to_string()))
    }

    pub fn open(
        &mut self,
        kind: ScreenKind,
        identity: &Identity,
        route: &serde_json::Value,
    ) -> Result<ScreenSnapshot, HostError> {
        let mut screen = screens::open(kind, identity, route)?;
        let read = screen.load()?;
        let screen_id = Uuid::new_v4().to_string();
        tracing::info!(screen_id = %screen_id, screen = kind.as_str(), "screen opened");
        self.outbox.push(Command::Read {
            screen_id: screen_id.clone(),
            ticket: read.ticket,
            operation: read.operation,
        });
        self.slots.insert(
            screen_id.clone(),
            Slot {
                screen,
                loaded_at: None,
            },
        );
        self.snapshot(&screen_id)
    }

    pub fn snapshot(&self, screen_id: &str) -> Result<ScreenSnapshot, HostError> {
        let slot = self.slot(screen_id)?;
        Ok(ScreenSnapshot {
            screen_id: screen_id.to_string(),
            screen: slot.screen.kind(),
            view: slot.screen.view(),
            loaded_at: slot.loaded_at.map(|t| t.to_rfc3339()),
            selected_image: slot.screen.selected_image().map(str::to_string),
            mutation_in_flight: slot.screen.write_in_flight(),
            mutation_error: slot.screen.last_write_error().map(ErrorBody::from),
        })
    }

    /// Manual retry. Supersedes whatever read is still outstanding.
    pub fn refresh(&mut self, screen_id: &str) -> Result<ScreenSnapshot, HostError> {
        let slot = self.slot_mut(screen_id)?;
        let read = slot.screen.load()?;
        self.outbox.push(Command::Read {
            screen_id: screen_id.to_string(),
            ticket: read.ticket,
            operation: read.operation,
        });
        self.snapshot(screen_id)
    }

    /// Unmounts the screen. Results still in flight for it are dropped on
    /// arrival, and its open confirmations die with it.
    pub fn close(&mut self, screen_id: &str) -> Result<(), HostError> {
        let Some(mut slot) = self.slots.remove(screen_id) else {
            return Err(HostError::UnknownScreen(screen_id.to_string()));
        };
        slot.screen.unmount();
        self.confirmations.retain(|_, c| c.screen_id != screen_id);
        self.outbox.retain(|c| c.screen_id() != screen_id);
        tracing::info!(screen_id = %screen_id, "screen closed");
        Ok(())
    }

    pub fn close_all(&mut self) {
        let ids: Vec<String> = self.slots.keys().cloned().collect();
        for id in ids {
            let _ = self.close(&id);
        }
    }

    /// First step of a destructive action: describe it and wait for the user.
    /// A screen has at most one open prompt; a new one replaces the old.
    pub fn request_delete(
        &mut self,
        screen_id: &str,
        record_id: &str,
    ) -> Result<ConfirmationPrompt, HostError> {
        let slot = self.slot(screen_id)?;
        if slot.screen.write_in_flight() {
            return Err(crate::error::BinderError::MutationInFlight.into());
        }
        let intent = slot.screen.delete_intent(record_id)?;
        self.confirmations.retain(|_, c| c.screen_id != screen_id);
        let confirmation_id = Uuid::new_v4().to_string();
        self.confirmations.insert(
            confirmation_id.clone(),
            PendingConfirmation {
                screen_id: screen_id.to_string(),
                record_id: record_id.to_string(),
            },
        );
        Ok(ConfirmationPrompt {
            confirmation_id,
            title: intent.title,
            message: intent.message,
            options: ["Cancelar", "OK"],
        })
    }

    /// Second step. Declining is a no-op; accepting re-checks the record
    /// against the current data and starts the mutation.
    /// Returns whether a mutation was started.
    pub fn answer(&mut self, confirmation_id: &str, accepted: bool) -> Result<bool, HostError> {
        let Some(pending) = self.confirmations.remove(confirmation_id) else {
            return Err(HostError::UnknownConfirmation(confirmation_id.to_string()));
        };
        if !accepted {
            tracing::debug!(screen_id = %pending.screen_id, "confirmation declined");
            return Ok(false);
        }
        let intent = self
            .slot(&pending.screen_id)?
            .screen
            .delete_intent(&pending.record_id)?;
        self.start_write(&pending.screen_id, intent.operation)?;
        Ok(true)
    }

    fn start_write(&mut self, screen_id: &str, operation: Operation) -> Result<(), HostError> {
        let slot = self.slot_mut(screen_id)?;
        let write = slot.screen.begin_write(operation)?;
        self.queue_write(screen_id, write);
        Ok(())
    }

    fn queue_write(&mut self, screen_id: &str, write: PendingWrite) {
        tracing::info!(
            screen_id = %screen_id,
            operation = write.operation.name,
            "mutation started"
        );
        self.outbox.push(Command::Write {
            screen_id: screen_id.to_string(),
            ticket: write.ticket,
            operation: write.operation,
        });
    }

    /// The picker's own failures abort the local action and nothing else.
    pub fn image_picked(
        &mut self,
        screen_id: &str,
        outcome: Result<String, ClientError>,
    ) -> Result<PickResult, HostError> {
        let slot = self.slot_mut(screen_id)?;
        let alert = match outcome {
            Ok(uri) => {
                slot.screen.select_image(uri)?;
                None
            }
            Err(ClientError::PermissionDenied(what)) => {
                tracing::debug!(screen_id = %screen_id, denied = %what, "picker permission denied");
                Some(PERMISSION_ALERT.to_string())
            }
            Err(e) => {
                tracing::debug!(screen_id = %screen_id, reason = %e, "picker aborted");
                None
            }
        };
        Ok(PickResult {
            alert,
            view: slot.screen.view(),
        })
    }

    pub fn save_picture(&mut self, screen_id: &str) -> Result<(), HostError> {
        let slot = self.slot_mut(screen_id)?;
        let write = slot.screen.begin_save_picture()?;
        self.queue_write(screen_id, write);
        Ok(())
    }

    /// Applies a finished network call. Results for closed screens and
    /// superseded reads produce no events.
    pub fn complete(&mut self, completion: Completion) -> Vec<HostEvent> {
        match completion {
            Completion::Read {
                screen_id,
                ticket,
                outcome,
            } => {
                let Some(slot) = self.slots.get_mut(&screen_id) else {
                    tracing::debug!(screen_id = %screen_id, "dropping read for closed screen");
                    return Vec::new();
                };
                match slot.screen.complete_read(ticket, outcome) {
                    Resolution::Applied => {
                        let view = slot.screen.view();
                        tracing::debug!(
                            screen_id = %screen_id,
                            generation = ticket.generation(),
                            state = view.state_name(),
                            "read applied"
                        );
                        if matches!(view, View::Ready { .. }) {
                            slot.loaded_at = Some(Utc::now());
                        }
                        vec![HostEvent::ScreenUpdated { screen_id, view }]
                    }
                    res => {
                        tracing::debug!(
                            screen_id = %screen_id,
                            generation = ticket.generation(),
                            resolution = ?res,
                            "read result discarded"
                        );
                        Vec::new()
                    }
                }
            }
            Completion::Write {
                screen_id,
                ticket,
                outcome,
            } => {
                let Some(slot) = self.slots.get_mut(&screen_id) else {
                    tracing::debug!(screen_id = %screen_id, "dropping write for closed screen");
                    return Vec::new();
                };
                match slot.screen.complete_write(ticket, outcome) {
                    WriteOutcome::Refetch(read) => {
                        let view = slot.screen.view();
                        self.outbox.push(Command::Read {
                            screen_id: screen_id.clone(),
                            ticket: read.ticket,
                            operation: read.operation,
                        });
                        vec![HostEvent::ScreenUpdated { screen_id, view }]
                    }
                    WriteOutcome::Failed(e) => {
                        tracing::warn!(screen_id = %screen_id, error = %e, "mutation failed");
                        vec![HostEvent::MutationFailed {
                            screen_id,
                            error: ErrorBody::from(&e),
                        }]
                    }
                    WriteOutcome::Discarded => Vec::new(),
                }
            }
        }
    }
}
