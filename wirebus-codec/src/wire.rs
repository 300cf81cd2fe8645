//! The per-type string codec trait and stock implementations.

use wirebus_core::CodecError;

/// How a value of one type crosses the bus as a string.
///
/// This is the integrator's customization point: every type that appears in
/// a remote method or notification signature must implement `Wire`. A
/// missing impl is a compile error at the service definition, not a runtime
/// failure.
///
/// Both directions must be pure, and decode must invert encode:
/// `T::from_wire(&x.to_wire())` yields `x` for every representable value.
///
/// ## Example
///
/// ```rust
/// use wirebus_codec::Wire;
/// use wirebus_core::CodecError;
///
/// struct Celsius(f64);
///
/// impl Wire for Celsius {
///     fn to_wire(&self) -> String {
///         self.0.to_string()
///     }
///
///     fn from_wire(raw: &str) -> Result<Self, CodecError> {
///         raw.parse().map(Celsius).map_err(|_| CodecError::decode("Celsius", raw))
///     }
/// }
/// ```
pub trait Wire: Sized {
    /// Encode the value as its wire string.
    fn to_wire(&self) -> String;

    /// Decode a value from its wire string. Malformed input is a
    /// `CodecError` and is never swallowed by the marshaling layer.
    fn from_wire(raw: &str) -> Result<Self, CodecError>;
}

impl Wire for String {
    fn to_wire(&self) -> String {
        self.clone()
    }

    fn from_wire(raw: &str) -> Result<Self, CodecError> {
        Ok(raw.to_owned())
    }
}

impl Wire for bool {
    fn to_wire(&self) -> String {
        self.to_string()
    }

    fn from_wire(raw: &str) -> Result<Self, CodecError> {
        raw.parse().map_err(|_| CodecError::decode("bool", raw))
    }
}

impl Wire for char {
    fn to_wire(&self) -> String {
        self.to_string()
    }

    fn from_wire(raw: &str) -> Result<Self, CodecError> {
        raw.parse().map_err(|_| CodecError::decode("char", raw))
    }
}

macro_rules! impl_wire_via_parse {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Wire for $ty {
                fn to_wire(&self) -> String {
                    self.to_string()
                }

                fn from_wire(raw: &str) -> Result<Self, CodecError> {
                    raw.parse()
                        .map_err(|_| CodecError::decode(stringify!($ty), raw))
                }
            }
        )*
    };
}

impl_wire_via_parse!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_integers() {
        for v in [i64::MIN, -1, 0, 1, i64::MAX] {
            assert_eq!(i64::from_wire(&v.to_wire()).unwrap(), v);
        }
        for v in [u32::MIN, 1, u32::MAX] {
            assert_eq!(u32::from_wire(&v.to_wire()).unwrap(), v);
        }
    }

    #[test]
    fn test_roundtrip_floats() {
        for v in [0.0_f64, -2.5, 1e300] {
            assert_eq!(f64::from_wire(&v.to_wire()).unwrap(), v);
        }
    }

    #[test]
    fn test_roundtrip_misc() {
        assert_eq!(bool::from_wire(&true.to_wire()).unwrap(), true);
        assert_eq!(char::from_wire(&'x'.to_wire()).unwrap(), 'x');
        let s = "hello bus".to_string();
        assert_eq!(String::from_wire(&s.to_wire()).unwrap(), s);
    }

    #[test]
    fn test_empty_string_roundtrips() {
        assert_eq!(String::from_wire("").unwrap(), "");
    }

    #[test]
    fn test_malformed_input_is_a_decode_error() {
        let err = i32::from_wire("not a number").unwrap_err();
        assert!(err.to_string().contains("i32"));

        assert!(bool::from_wire("yes").is_err());
        assert!(char::from_wire("ab").is_err());
        assert!(u8::from_wire("300").is_err());
    }
}
