//! # wirebus-core
//!
//! Core types, traits, and error definitions for the wirebus proxy framework.
//!
//! This crate provides:
//! - Error types (`BusError`, `CodecError`, `CallError`, `ConnectError`, `RegisterError`)
//! - Service metadata (`ServiceDescriptor`, `MethodSignature`, `NotificationSignature`)
//! - The `Bus` trait: the primitive surface the generated roles use to reach
//!   the underlying message transport
//! - The `MethodHandler` trait implemented by generated export adapters
//! - The `ServiceFacade` trait implemented by generated access facades
//! - `LoopbackBus`, an in-process bus for tests and single-process wiring

mod bus;
mod descriptor;
mod error;
mod facade;
mod loopback;

pub use bus::{Bus, MethodHandler, DEFAULT_SIGNAL_CAPACITY};
pub use descriptor::{BusSelector, MethodSignature, NotificationSignature, ServiceDescriptor};
pub use error::{BusError, CallError, CodecError, ConnectError, RegisterError};
pub use facade::ServiceFacade;
pub use loopback::LoopbackBus;
