//! Static service metadata.
//!
//! A `ServiceDescriptor` is created once, at service-definition time, and
//! shared by all three generated roles. Everything in it is `'static` so a
//! descriptor can live in a `static` produced by the `#[remote_service]`
//! macro.

/// Which bus instance a service is addressed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusSelector {
    /// The system-wide bus.
    System,
    /// The per-session bus.
    Session,
    /// A bus instance supplied by the embedding application.
    Custom,
}

/// Signature of one two-way method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodSignature {
    /// Declared method name; identical on the wire.
    pub name: &'static str,
    /// Opaque type tags for the parameters, in declaration order.
    pub params: &'static [&'static str],
    /// Type tag of the return value, or `None` for unit-returning methods.
    pub returns: Option<&'static str>,
}

/// Signature of one one-way notification. Notifications have no return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationSignature {
    /// Declared notification name; identical on the wire.
    pub name: &'static str,
    /// Opaque type tags for the payload, in declaration order.
    pub params: &'static [&'static str],
}

/// Immutable metadata identifying a service's address and signature on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceDescriptor {
    /// Logical bus name the service registers under.
    pub service_name: &'static str,
    /// Object path the export adapter is registered at.
    pub object_path: &'static str,
    /// Interface name used for calls and signals.
    pub interface_name: &'static str,
    /// Which bus instance the service is configured for.
    pub bus: BusSelector,
    /// Two-way methods, in declaration order.
    pub methods: &'static [MethodSignature],
    /// One-way notifications, in declaration order.
    pub notifications: &'static [NotificationSignature],
}

impl ServiceDescriptor {
    /// Look up a method signature by name.
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&MethodSignature> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Look up a notification signature by name.
    #[must_use]
    pub fn notification(&self, name: &str) -> Option<&NotificationSignature> {
        self.notifications.iter().find(|n| n.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static DESCRIPTOR: ServiceDescriptor = ServiceDescriptor {
        service_name: "org.example.Player",
        object_path: "/org/example/Player",
        interface_name: "org.example.Player",
        bus: BusSelector::Session,
        methods: &[
            MethodSignature {
                name: "play",
                params: &["String"],
                returns: Some("u32"),
            },
            MethodSignature {
                name: "stop",
                params: &[],
                returns: None,
            },
        ],
        notifications: &[NotificationSignature {
            name: "track_changed",
            params: &["u32", "String"],
        }],
    };

    #[test]
    fn test_method_lookup() {
        let play = DESCRIPTOR.method("play").unwrap();
        assert_eq!(play.params, &["String"]);
        assert_eq!(play.returns, Some("u32"));

        let stop = DESCRIPTOR.method("stop").unwrap();
        assert!(stop.returns.is_none());

        assert!(DESCRIPTOR.method("seek").is_none());
    }

    #[test]
    fn test_notification_lookup() {
        let sig = DESCRIPTOR.notification("track_changed").unwrap();
        assert_eq!(sig.params.len(), 2);
        assert!(DESCRIPTOR.notification("play").is_none());
    }
}
