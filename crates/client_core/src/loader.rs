//! Cancellable one-shot catalog loading tied to a view mount.

use std::{collections::HashMap, sync::Arc};

use shared::{domain::Product, error::CatalogError};
use tokio::task::JoinHandle;

use crate::catalog::CatalogSource;

/// Identifies one mount of the grid view. Later mounts get larger tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
pub struct LoadOutcome {
    pub ticket: LoadTicket,
    pub result: Result<Vec<Product>, CatalogError>,
}

/// View-side bookkeeping: which mount is live and whether its catalog has arrived.
#[derive(Debug, Default)]
pub struct MountState {
    generation: u64,
    mounted: Option<LoadTicket>,
    settled: bool,
}

impl MountState {
    pub fn mount(&mut self) -> LoadTicket {
        self.generation += 1;
        let ticket = LoadTicket(self.generation);
        self.mounted = Some(ticket);
        self.settled = false;
        ticket
    }

    pub fn unmount(&mut self) -> Option<LoadTicket> {
        self.settled = false;
        self.mounted.take()
    }

    pub fn current(&self) -> Option<LoadTicket> {
        self.mounted
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.mounted == Some(ticket)
    }

    /// True exactly once per mount, for the first outcome carrying the live ticket.
    pub fn accept_outcome(&mut self, ticket: LoadTicket) -> bool {
        if !self.is_current(ticket) || self.settled {
            return false;
        }
        self.settled = true;
        true
    }
}

/// Worker-side task registry. Dropping the loader aborts everything in flight.
#[derive(Default)]
pub struct CatalogLoader {
    in_flight: HashMap<LoadTicket, JoinHandle<()>>,
    last_started: Option<LoadTicket>,
}

impl CatalogLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns the fetch for `ticket` on the current tokio runtime.
    ///
    /// Returns `false` without spawning when the ticket was already used or is
    /// older than one already started. Starting a newer ticket aborts older
    /// fetches, whose views are gone.
    pub fn start<F>(&mut self, ticket: LoadTicket, source: Arc<dyn CatalogSource>, deliver: F) -> bool
    where
        F: FnOnce(LoadOutcome) + Send + 'static,
    {
        if self.last_started.is_some_and(|last| ticket <= last) {
            tracing::warn!(ticket = ticket.value(), "catalog load already started for ticket");
            return false;
        }
        self.last_started = Some(ticket);
        self.cancel_all();

        tracing::info!(ticket = ticket.value(), "catalog load started");
        let handle = tokio::spawn(async move {
            let result = source.fetch_products().await;
            if let Err(err) = &result {
                tracing::error!(ticket = ticket.value(), "catalog load failed: {err}");
            }
            deliver(LoadOutcome { ticket, result });
        });
        self.in_flight.insert(ticket, handle);
        true
    }

    pub fn cancel(&mut self, ticket: LoadTicket) -> bool {
        match self.in_flight.remove(&ticket) {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                tracing::info!(ticket = ticket.value(), "catalog load cancelled");
                true
            }
            _ => false,
        }
    }

    pub fn cancel_all(&mut self) {
        for (ticket, handle) in self.in_flight.drain() {
            if !handle.is_finished() {
                handle.abort();
                tracing::debug!(ticket = ticket.value(), "aborted stale catalog load");
            }
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
            .values()
            .filter(|handle| !handle.is_finished())
            .count()
    }
}

impl Drop for CatalogLoader {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
