//! In-process bus implementation.
//!
//! `LoopbackBus` wires exporters and importers living in the same process
//! together without any transport underneath. It is the reference `Bus`
//! used by the test suites, and is good enough for single-process
//! deployments that still want the export/import split.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::broadcast;

use crate::bus::{Bus, MethodHandler, DEFAULT_SIGNAL_CAPACITY};
use crate::error::BusError;

type ObjectKey = (String, String);
type SignalKey = (String, String, String);

/// An in-process message bus.
///
/// Objects are keyed by path and interface, names are exclusive, and
/// signals fan out over per-subscription broadcast channels in emission
/// order. Handler failures during `call` are reported as
/// `BusError::Remote`, mirroring how a real bus turns a remote exception
/// into an error reply.
pub struct LoopbackBus {
    objects: DashMap<ObjectKey, Arc<dyn MethodHandler>>,
    names: DashMap<String, ()>,
    signals: DashMap<SignalKey, broadcast::Sender<Vec<String>>>,
    registrations: broadcast::Sender<String>,
    calls: AtomicU64,
}

impl LoopbackBus {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        let (registrations, _) = broadcast::channel(DEFAULT_SIGNAL_CAPACITY);
        Self {
            objects: DashMap::new(),
            names: DashMap::new(),
            signals: DashMap::new(),
            registrations,
            calls: AtomicU64::new(0),
        }
    }

    /// Number of `call` invocations observed, successful or not. Tests use
    /// this to assert that a code path generated no bus traffic.
    #[must_use]
    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    fn signal_sender(&self, key: SignalKey) -> broadcast::Sender<Vec<String>> {
        self.signals
            .entry(key)
            .or_insert_with(|| broadcast::channel(DEFAULT_SIGNAL_CAPACITY).0)
            .clone()
    }
}

impl Default for LoopbackBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Bus for LoopbackBus {
    async fn register_object(
        &self,
        path: &str,
        interface: &str,
        handler: Arc<dyn MethodHandler>,
    ) -> Result<(), BusError> {
        match self.objects.entry((path.to_owned(), interface.to_owned())) {
            Entry::Occupied(_) => Err(BusError::PathTaken(path.to_owned())),
            Entry::Vacant(entry) => {
                entry.insert(handler);
                tracing::debug!(path, interface, "object registered");
                Ok(())
            }
        }
    }

    async fn register_name(&self, name: &str) -> Result<(), BusError> {
        match self.names.entry(name.to_owned()) {
            Entry::Occupied(_) => Err(BusError::NameTaken(name.to_owned())),
            Entry::Vacant(entry) => {
                entry.insert(());
                tracing::debug!(name, "service name registered");
                // Wake anyone waiting on this registration. No receivers is fine.
                let _ = self.registrations.send(name.to_owned());
                Ok(())
            }
        }
    }

    async fn call(
        &self,
        service: &str,
        path: &str,
        interface: &str,
        method: &str,
        args: Vec<String>,
    ) -> Result<String, BusError> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        if !self.names.contains_key(service) {
            return Err(BusError::ServiceUnknown(service.to_owned()));
        }
        let handler = self
            .objects
            .get(&(path.to_owned(), interface.to_owned()))
            .map(|entry| Arc::clone(&entry))
            .ok_or_else(|| BusError::NoSuchObject(path.to_owned()))?;

        handler
            .dispatch(method, args)
            .await
            .map_err(|err| BusError::Remote(err.to_string()))
    }

    async fn emit(
        &self,
        path: &str,
        interface: &str,
        signal: &str,
        args: Vec<String>,
    ) -> Result<(), BusError> {
        let key = (path.to_owned(), interface.to_owned(), signal.to_owned());
        if let Some(sender) = self.signals.get(&key) {
            // No subscribers is not an error; signals are fire-and-forget.
            let _ = sender.send(args);
        }
        Ok(())
    }

    fn subscribe(
        &self,
        path: &str,
        interface: &str,
        signal: &str,
    ) -> broadcast::Receiver<Vec<String>> {
        self.signal_sender((path.to_owned(), interface.to_owned(), signal.to_owned()))
            .subscribe()
    }

    async fn is_registered(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    fn watch_registrations(&self) -> broadcast::Receiver<String> {
        self.registrations.subscribe()
    }
}
