//! # wirebus-codec
//!
//! String wire conversion for the wirebus proxy framework.
//!
//! This crate provides:
//! - `Wire` - the per-type codec trait (the integrator's customization point)
//! - Stock `Wire` impls for primitives and `String`
//! - Call-marshaling helpers: argument conversion, return wrapping, the
//!   void sentinel, and arity checking
//!
//! ## Wire format
//!
//! Every argument and every return value crosses the bus as one opaque
//! string; there is no structural or binary encoding at this layer.
//! Argument order on the wire equals declaration order, and that is the
//! only positional contract.

mod marshal;
mod wire;

pub use marshal::{
    check_arity, marshal, unmarshal, unwrap_return, unwrap_void, wrap_return, wrap_void,
    VOID_SENTINEL,
};
pub use wire::Wire;
