//! # wirebus-directory
//!
//! Service registration discovery and connection for the wirebus proxy
//! framework.
//!
//! This crate provides the lifecycle operations between "an export adapter
//! registered a name on the bus" and "a facade holds a live import stub":
//! - `is_registered` - non-blocking existence check
//! - `wait_for_registration` - suspend until a name appears
//! - `connect_service` - bind an import stub to an unattached facade
//! - `wait_and_connect_service` - the two composed
//!
//! None of these operations retry, and none carry a timeout; a caller that
//! needs a bounded wait layers its own.

use tokio::sync::broadcast::error::RecvError;
use wirebus_core::{Bus, ConnectError, ServiceDescriptor, ServiceFacade};

/// Non-blocking check whether `name` is currently registered on `bus`.
pub async fn is_registered(bus: &dyn Bus, name: &str) -> bool {
    bus.is_registered(name).await
}

/// Suspend until `name` is registered on `bus`.
///
/// Returns immediately if the name is already registered. Otherwise the
/// calling task yields to the runtime until the registration watch fires
/// for that exact name. There is no timeout; blocking indefinitely on a
/// name that never appears is accepted behavior.
pub async fn wait_for_registration(bus: &dyn Bus, name: &str) {
    // Subscribe before checking so a registration landing between the check
    // and the wait is not missed.
    let mut watch = bus.watch_registrations();

    if bus.is_registered(name).await {
        return;
    }

    loop {
        match watch.recv().await {
            Ok(registered) if registered == name => return,
            Ok(_) => continue,
            Err(RecvError::Lagged(_)) => {
                // Missed events; the name may have been among them.
                if bus.is_registered(name).await {
                    return;
                }
            }
            Err(RecvError::Closed) => {
                tracing::warn!(name, "registration watch closed while waiting");
                return;
            }
        }
    }
}

/// Bind an import stub to `facade`, completing its Unattached -> Attached
/// transition.
///
/// Fails without touching the facade if the facade was generated for a
/// different service than `expected`, if the service is not currently
/// registered, or if the facade is already attached. All three outcomes are
/// warning-class: logged and returned, never fatal to the process.
pub async fn connect_service(
    expected: &'static ServiceDescriptor,
    facade: &dyn ServiceFacade,
) -> Result<(), ConnectError> {
    let descriptor = facade.descriptor();
    if descriptor.service_name != expected.service_name {
        tracing::warn!(
            expected = expected.service_name,
            got = descriptor.service_name,
            "facade does not belong to the requested service"
        );
        return Err(ConnectError::FacadeMismatch {
            expected: expected.service_name,
            got: descriptor.service_name,
        });
    }

    let bus = facade.bus();
    if !bus.is_registered(expected.service_name).await {
        tracing::warn!(service = expected.service_name, "service is not registered");
        return Err(ConnectError::NotRegistered(expected.service_name));
    }

    match facade.attach().await {
        Ok(()) => Ok(()),
        Err(err) => {
            tracing::warn!(service = expected.service_name, %err, "connect failed");
            Err(err)
        }
    }
}

/// Wait for `expected` to be registered, then connect `facade` to it.
///
/// The wait and the connect are not atomic: a registration disappearing
/// between the two steps surfaces as a `ConnectError::NotRegistered` from
/// the connect. That race is accepted, not compensated for.
pub async fn wait_and_connect_service(
    expected: &'static ServiceDescriptor,
    facade: &dyn ServiceFacade,
) -> Result<(), ConnectError> {
    let bus = facade.bus();
    wait_for_registration(bus.as_ref(), expected.service_name).await;
    connect_service(expected, facade).await
}
