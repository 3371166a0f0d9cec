//! The query lifecycle shared by every screen: one read in flight at a time,
//! last request wins, writes invalidate the read instead of patching it.

use crate::error::{BinderError, ClientError};
use crate::view::{Node, View};

#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ClientError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReadTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WriteTicket(u64);

impl ReadTicket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    Superseded,
    Unmounted,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WriteResolution {
    Refetch(ReadTicket),
    Failed(ClientError),
    Discarded,
}

#[derive(Debug)]
pub struct ScreenDataBinder<T> {
    state: QueryState<T>,
    generation: u64,
    pending_read: Option<u64>,
    write_seq: u64,
    pending_write: Option<u64>,
    last_write_error: Option<ClientError>,
    mounted: bool,
}

impl<T> Default for ScreenDataBinder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ScreenDataBinder<T> {
    pub fn new() -> Self {
        Self {
            state: QueryState::Idle,
            generation: 0,
            pending_read: None,
            write_seq: 0,
            pending_write: None,
            last_write_error: None,
            mounted: true,
        }
    }

    pub fn state(&self) -> &QueryState<T> {
        &self.state
    }

    pub fn data(&self) -> Option<&T> {
        match &self.state {
            QueryState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn write_in_flight(&self) -> bool {
        self.pending_write.is_some()
    }

    pub fn last_write_error(&self) -> Option<&ClientError> {
        self.last_write_error.as_ref()
    }

    /// Starts a read. Any read issued earlier is superseded.
    pub fn load(&mut self) -> Result<ReadTicket, BinderError> {
        if !self.mounted {
            return Err(BinderError::Unmounted);
        }
        self.generation += 1;
        self.pending_read = Some(self.generation);
        self.state = QueryState::Loading;
        Ok(ReadTicket(self.generation))
    }

    pub fn resolve_read(
        &mut self,
        ticket: ReadTicket,
        outcome: Result<T, ClientError>,
    ) -> Resolution {
        if !self.mounted {
            return Resolution::Unmounted;
        }
        if self.pending_read != Some(ticket.0) {
            return Resolution::Superseded;
        }
        self.pending_read = None;
        self.state = match outcome {
            Ok(data) => QueryState::Ready(data),
            Err(e) => QueryState::Error(e),
        };
        Resolution::Applied
    }

    /// Reserves the single write slot. Requires loaded data: writes act on
    /// records the user can see.
    pub fn begin_write(&mut self) -> Result<WriteTicket, BinderError> {
        if !self.mounted {
            return Err(BinderError::Unmounted);
        }
        if self.pending_write.is_some() {
            return Err(BinderError::MutationInFlight);
        }
        if self.data().is_none() {
            return Err(BinderError::NotReady);
        }
        self.write_seq += 1;
        self.pending_write = Some(self.write_seq);
        self.last_write_error = None;
        Ok(WriteTicket(self.write_seq))
    }

    /// On success the read is re-issued; on failure the ready state stays
    /// as it was and the error is kept for the front end.
    pub fn resolve_write(
        &mut self,
        ticket: WriteTicket,
        outcome: Result<(), ClientError>,
    ) -> WriteResolution {
        if !self.mounted || self.pending_write != Some(ticket.0) {
            return WriteResolution::Discarded;
        }
        self.pending_write = None;
        match outcome {
            Ok(()) => match self.load() {
                Ok(read) => WriteResolution::Refetch(read),
                Err(_) => WriteResolution::Discarded,
            },
            Err(e) => {
                self.last_write_error = Some(e.clone());
                WriteResolution::Failed(e)
            }
        }
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
        self.pending_read = None;
        self.pending_write = None;
    }

    pub fn render<F>(&self, f: F) -> View
    where
        F: FnOnce(&T) -> Vec<Node>,
    {
        match self.state() {
            QueryState::Idle | QueryState::Loading => View::loading(),
            QueryState::Error(_) => View::error(),
            QueryState::Ready(data) => View::Ready { nodes: f(data) },
        }
    }
}
