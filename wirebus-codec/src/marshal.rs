//! Call-marshaling helpers.
//!
//! These are the routines the generated adapters and stubs call at each
//! direction change: typed value to wire string on the way out, wire string
//! to typed value on the way in, plus the void sentinel for methods with no
//! return value.

use wirebus_core::{CallError, CodecError};

use crate::wire::Wire;

/// Canonical reply for a method with no return value. The inbound void path
/// accepts it without consulting any codec.
pub const VOID_SENTINEL: &str = "";

/// Encode one outbound argument.
pub fn marshal<T: Wire>(value: &T) -> String {
    value.to_wire()
}

/// Decode one inbound argument. Codec failures propagate; they are never
/// swallowed here.
pub fn unmarshal<T: Wire>(raw: &str) -> Result<T, CodecError> {
    T::from_wire(raw)
}

/// Wrap a typed return value for the wire.
pub fn wrap_return<T: Wire>(value: &T) -> String {
    value.to_wire()
}

/// Wrap the absence of a return value.
#[must_use]
pub fn wrap_void() -> String {
    VOID_SENTINEL.to_owned()
}

/// Recover a typed return value from a wire reply.
pub fn unwrap_return<T: Wire>(reply: &str) -> Result<T, CodecError> {
    T::from_wire(reply)
}

/// Accept the reply of a void method. Any reply shape is accepted and no
/// codec is invoked.
pub fn unwrap_void(_reply: &str) {}

/// Reject an inbound call whose argument count does not match the declared
/// signature, before any codec runs.
pub fn check_arity(method: &'static str, got: usize, expected: usize) -> Result<(), CallError> {
    if got == expected {
        Ok(())
    } else {
        Err(CallError::BadArity {
            method,
            expected,
            got,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marshal_unmarshal_roundtrip() {
        let raw = marshal(&42_i32);
        assert_eq!(raw, "42");
        assert_eq!(unmarshal::<i32>(&raw).unwrap(), 42);
    }

    #[test]
    fn test_void_sentinel() {
        assert_eq!(wrap_void(), VOID_SENTINEL);
        // The void path accepts anything, including a non-sentinel reply.
        unwrap_void(VOID_SENTINEL);
        unwrap_void("unexpected");
    }

    #[test]
    fn test_unwrap_return_propagates_decode_failures() {
        let err = unwrap_return::<u32>("garbage").unwrap_err();
        assert!(matches!(err, CodecError::Decode { target: "u32", .. }));
    }

    #[test]
    fn test_check_arity() {
        assert!(check_arity("play", 2, 2).is_ok());
        let err = check_arity("play", 1, 2).unwrap_err();
        assert!(matches!(
            err,
            CallError::BadArity {
                method: "play",
                expected: 2,
                got: 1,
            }
        ));
    }
}
