//! # wirebus-macros
//!
//! Proc macros for the wirebus proxy framework.
//!
//! This crate provides the `#[remote_service]` attribute macro for defining
//! bus services.
//!
//! ## Overview
//!
//! The `#[remote_service]` macro transforms a trait into a complete remote
//! service: the typed notification hub, the three cooperating roles (export
//! adapter, import stub, access facade), the static service descriptor, and
//! the lifecycle helpers.
//!
//! ## Generated Items
//!
//! For a trait named `Player`, the macro generates:
//! - `PlayerNotifications` - typed broadcast channels for the notifications
//! - `PlayerService` - service tag: addressing constants, descriptor,
//!   register / create / connect helpers
//! - `PlayerExport<S>` - export adapter wrapping an implementation
//! - `PlayerImport` - import stub performing string-wire bus round-trips
//! - `PlayerFacade` - access facade implementing the `Player` trait

mod generate;
mod parse;

use proc_macro::TokenStream;
use syn::{parse_macro_input, ItemTrait};

/// Define a remote bus service from a trait.
///
/// ## Usage
///
/// ```rust,ignore
/// use wirebus::CallError;
///
/// #[wirebus::remote_service(
///     name = "org.example.Player",
///     path = "/org/example/Player",
///     interface = "org.example.Player",
///     bus = "session",
/// )]
/// pub trait Player {
///     async fn play(&self, track: String) -> Result<u32, CallError>;
///     async fn stop(&self) -> Result<(), CallError>;
///
///     #[notification]
///     fn track_changed(&self, index: u32, title: String);
/// }
/// ```
///
/// Methods must be `async`, take `&self`, and return
/// `Result<T, wirebus::CallError>` where every parameter type and `T`
/// implement `wirebus::Wire`. A method returning `Result<(), _>` crosses the
/// bus as the void sentinel.
///
/// Notifications are one-way: plain fns marked `#[notification]`, taking
/// `&self` and returning nothing. The macro gives them default bodies that
/// fire the service's notification hub, so an implementation emits by
/// calling them directly.
///
/// The `bus` attribute selects the descriptor's bus selector
/// (`"system"`, `"session"`, or `"custom"`) and defaults to `"session"`;
/// the concrete bus instance is always the one passed to `register` /
/// `create`.
#[proc_macro_attribute]
pub fn remote_service(attr: TokenStream, input: TokenStream) -> TokenStream {
    let args = match parse::ServiceArgs::parse(attr.into()) {
        Ok(args) => args,
        Err(err) => return err.to_compile_error().into(),
    };
    let item = parse_macro_input!(input as ItemTrait);

    match generate::generate_service(args, item) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
