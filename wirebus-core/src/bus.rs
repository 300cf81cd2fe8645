//! The bus primitive surface.
//!
//! The generated roles never speak to a concrete transport directly; they go
//! through `Bus`, which abstracts the handful of primitives the framework
//! needs: object/name registration, a blocking string call, signal
//! emission/subscription, and registration discovery. Everything crossing
//! this boundary is a `String`.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::error::{BusError, CallError};

/// Default capacity for signal and registration broadcast channels.
pub const DEFAULT_SIGNAL_CAPACITY: usize = 64;

/// Dispatch entry point exposed by a generated export adapter.
///
/// The bus delivers a method name and the positional string arguments; the
/// handler decodes, invokes the wrapped implementation, and returns the
/// string-encoded reply. Implementation errors are not swallowed here; they
/// propagate so the bus layer can report them to the remote caller.
#[async_trait]
pub trait MethodHandler: Send + Sync {
    /// Handle one string-encoded call.
    async fn dispatch(&self, method: &str, args: Vec<String>) -> Result<String, CallError>;
}

/// Inter-process message transport, abstracted to the primitives the
/// generated roles need.
///
/// Ordering contract: signals for a given subscription are delivered in
/// emission order, and `call` is a complete round-trip before it returns.
/// No timeout, cancellation, or retry is layered on at this level.
#[async_trait]
pub trait Bus: Send + Sync {
    /// Register a call handler at an object path under an interface name.
    /// Fails if that path/interface pair is taken. Calls addressed to the
    /// path under any other interface do not reach the handler.
    async fn register_object(
        &self,
        path: &str,
        interface: &str,
        handler: Arc<dyn MethodHandler>,
    ) -> Result<(), BusError>;

    /// Claim a service name on the bus. Fails if the name is taken.
    async fn register_name(&self, name: &str) -> Result<(), BusError>;

    /// Invoke a method on a remote object and wait for its string reply.
    async fn call(
        &self,
        service: &str,
        path: &str,
        interface: &str,
        method: &str,
        args: Vec<String>,
    ) -> Result<String, BusError>;

    /// Emit a one-way signal carrying string-encoded arguments.
    async fn emit(
        &self,
        path: &str,
        interface: &str,
        signal: &str,
        args: Vec<String>,
    ) -> Result<(), BusError>;

    /// Subscribe to a signal. The receiver yields the string argument
    /// sequence of each emission, in order.
    fn subscribe(&self, path: &str, interface: &str, signal: &str)
        -> broadcast::Receiver<Vec<String>>;

    /// Non-blocking check whether a service name is currently registered.
    async fn is_registered(&self, name: &str) -> bool;

    /// Watch name registrations. The receiver yields each service name as
    /// it is registered on the bus.
    fn watch_registrations(&self) -> broadcast::Receiver<String>;
}
