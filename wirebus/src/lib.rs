//! # wirebus
//!
//! Typed proxy generation over string-wire message buses.
//!
//! A service is declared once, as a trait, and the `#[remote_service]`
//! attribute generates the three cooperating roles around it:
//!
//! - the **export adapter**, which registers an implementation on the bus
//!   and dispatches inbound string calls to it
//! - the **import stub**, which implements the trait by marshaling
//!   arguments, performing the bus round-trip, and decoding the reply
//! - the **access facade**, the caller-facing handle with an attach-once
//!   lifecycle driven by the directory operations
//!
//! Everything crossing the bus is a `String`; per-type conversion goes
//! through the [`Wire`] trait, so a parameter type without a `Wire` impl is
//! a compile error at the definition site, not a runtime surprise.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use wirebus::{remote_service, CallError, LoopbackBus};
//!
//! #[remote_service(
//!     name = "org.example.Player",
//!     path = "/org/example/Player",
//!     interface = "org.example.Player",
//! )]
//! pub trait Player {
//!     async fn play(&self, track: String) -> Result<u32, CallError>;
//!
//!     #[notification]
//!     fn track_changed(&self, index: u32, title: String);
//! }
//!
//! # async fn run(implementation: Arc<impl Player + 'static>) {
//! let bus = Arc::new(LoopbackBus::new());
//! PlayerService::register(bus.clone(), implementation).await.unwrap();
//! let player = PlayerService::create_and_connect(bus).await.unwrap();
//! let slot = player.play("intro.ogg".into()).await.unwrap();
//! # }
//! ```
//!
//! ## Architecture
//!
//! wirebus is composed of several crates:
//!
//! - [`wirebus-core`] - Core types, traits, and error definitions
//! - [`wirebus-codec`] - The `Wire` codec trait and call marshaling
//! - [`wirebus-macros`] - Proc macros (`#[remote_service]`)
//! - [`wirebus-directory`] - Registration discovery and connection
//!
//! [`wirebus-core`]: wirebus_core
//! [`wirebus-codec`]: wirebus_codec
//! [`wirebus-macros`]: wirebus_macros
//! [`wirebus-directory`]: wirebus_directory

// Re-export the async-trait attribute for generated impls
pub use async_trait::async_trait;

// Re-export the runtime crates generated code leans on, so a downstream
// crate only needs a wirebus dependency for `#[remote_service]` to expand
pub use tokio;
pub use tracing;

// Re-export codec types
pub use wirebus_codec::{
    check_arity, marshal, unmarshal, unwrap_return, unwrap_void, wrap_return, wrap_void, Wire,
    VOID_SENTINEL,
};
// Re-export core types
pub use wirebus_core::{
    Bus, BusError, BusSelector, CallError, CodecError, ConnectError, LoopbackBus, MethodHandler,
    MethodSignature, NotificationSignature, RegisterError, ServiceDescriptor, ServiceFacade,
    DEFAULT_SIGNAL_CAPACITY,
};

// Re-export the directory operations as a module
pub use wirebus_directory as directory;

// Re-export macros
pub use wirebus_macros::remote_service;

/// Crate version, as compiled.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Commonly used items, importable in one line.
pub mod prelude {
    pub use crate::directory::{
        connect_service, is_registered, wait_and_connect_service, wait_for_registration,
    };
    pub use crate::{
        remote_service, Bus, CallError, ConnectError, LoopbackBus, RegisterError,
        ServiceDescriptor, ServiceFacade, Wire,
    };
}
