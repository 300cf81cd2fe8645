//! Error types for the wirebus proxy framework.
//!
//! Each failure domain gets its own enum so callers can tell a bus-level
//! failure from a conversion failure from a lifecycle mistake. Nothing here
//! is retried; every failure surfaces to the nearest caller.

/// Bus-level errors reported by the underlying message transport.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BusError {
    /// An object is already registered at the requested path.
    #[error("object path already taken: {0}")]
    PathTaken(String),

    /// The requested service name is already claimed on the bus.
    #[error("service name already taken: {0}")]
    NameTaken(String),

    /// The named service is not registered on the bus.
    #[error("service not registered: {0}")]
    ServiceUnknown(String),

    /// No object is registered at the addressed path.
    #[error("no object at path: {0}")]
    NoSuchObject(String),

    /// The remote side failed while handling the call. This is the bus
    /// layer's own error reporting; implementation errors raised behind an
    /// export adapter arrive here.
    #[error("remote call failed: {0}")]
    Remote(String),

    /// The bus connection is gone.
    #[error("bus disconnected")]
    Disconnected,
}

/// String conversion errors raised by a `Wire` codec.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CodecError {
    /// The wire string could not be decoded as the declared type.
    #[error("malformed value for {target}: {input:?}")]
    Decode {
        /// Name of the type the decode was targeting.
        target: &'static str,
        /// The offending wire string.
        input: String,
    },
}

impl CodecError {
    /// Build a decode error for `target` from the offending input.
    #[must_use]
    pub fn decode(target: &'static str, input: impl Into<String>) -> Self {
        Self::Decode {
            target,
            input: input.into(),
        }
    }
}

/// Errors surfaced on the call path, from facade through stub to adapter.
///
/// The three outbound failure classes are mutually distinguishable:
/// `NotAttached` is a lifecycle mistake, `Bus` is a transport-level failure,
/// and `Codec` means the reply arrived but could not be decoded.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CallError {
    /// The facade has no import stub attached; the call never touched the bus.
    #[error("service not connected: {0}")]
    NotAttached(&'static str),

    /// The bus round-trip itself failed.
    #[error("bus error: {0}")]
    Bus(#[from] BusError),

    /// A value failed string conversion.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// The dispatched method name is not part of the service interface.
    #[error("method not found: {0}")]
    MethodNotFound(String),

    /// An inbound call carried the wrong number of arguments.
    #[error("wrong argument count for {method}: got {got}, expected {expected}")]
    BadArity {
        /// The method being dispatched.
        method: &'static str,
        /// Declared parameter count.
        expected: usize,
        /// Argument count actually received.
        got: usize,
    },

    /// The service implementation itself reported a failure.
    #[error("service error: {0}")]
    Service(String),
}

impl CallError {
    /// Create a service-level error with a message.
    #[must_use]
    pub fn service(message: impl Into<String>) -> Self {
        Self::Service(message.into())
    }

    /// True if the failure happened at the bus/transport level, as opposed
    /// to a local conversion or lifecycle failure.
    #[must_use]
    pub fn is_bus_failure(&self) -> bool {
        matches!(self, Self::Bus(_))
    }

    /// True if the reply arrived but a string failed to decode.
    #[must_use]
    pub fn is_codec_failure(&self) -> bool {
        matches!(self, Self::Codec(_))
    }
}

/// Fatal errors constructing an export adapter.
///
/// Both registrations are mandatory; failure of either means the adapter
/// does not exist. No rollback of the path registration is attempted when
/// name registration fails.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RegisterError {
    /// Registering the handler at the object path failed.
    #[error("object registration failed: {0}")]
    Object(#[source] BusError),

    /// Claiming the service name failed.
    #[error("name registration failed: {0}")]
    Name(#[source] BusError),
}

/// Warning-class errors from the connect operations. None of these are
/// process-fatal; the facade is left exactly as it was.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConnectError {
    /// The service name is not currently registered on the bus.
    #[error("service not registered: {0}")]
    NotRegistered(&'static str),

    /// The facade belongs to a different service than the one requested.
    #[error("facade for {got} cannot connect to {expected}")]
    FacadeMismatch {
        /// Service the connect was issued for.
        expected: &'static str,
        /// Service the facade was generated for.
        got: &'static str,
    },

    /// The facade already holds an import stub. The existing binding is
    /// left untouched.
    #[error("service already connected: {0}")]
    AlreadyAttached(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CallError::NotAttached("org.example.Player");
        assert_eq!(err.to_string(), "service not connected: org.example.Player");

        let err = CallError::BadArity {
            method: "play",
            expected: 2,
            got: 1,
        };
        assert_eq!(
            err.to_string(),
            "wrong argument count for play: got 1, expected 2"
        );
    }

    #[test]
    fn test_failure_classes_are_distinct() {
        let bus = CallError::from(BusError::Disconnected);
        assert!(bus.is_bus_failure());
        assert!(!bus.is_codec_failure());

        let codec = CallError::from(CodecError::decode("i32", "abc"));
        assert!(codec.is_codec_failure());
        assert!(!codec.is_bus_failure());

        let unattached = CallError::NotAttached("svc");
        assert!(!unattached.is_bus_failure());
        assert!(!unattached.is_codec_failure());
    }

    #[test]
    fn test_register_error_source() {
        let err = RegisterError::Name(BusError::NameTaken("org.example.Player".into()));
        assert_eq!(
            err.to_string(),
            "name registration failed: service name already taken: org.example.Player"
        );
    }
}
