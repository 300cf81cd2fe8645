//! End-to-end call and notification round-trips over the loopback bus.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{Calc, CalcFacade, CalcImpl, CalcService};
use wirebus::{Bus, BusError, CallError, LoopbackBus};

async fn registered_pair() -> (Arc<LoopbackBus>, Arc<CalcImpl>, CalcFacade) {
    let bus = Arc::new(LoopbackBus::new());
    let implementation = Arc::new(CalcImpl::new());
    CalcService::register(bus.clone(), implementation.clone())
        .await
        .unwrap();
    let facade = CalcService::create_and_connect(bus.clone()).await.unwrap();
    (bus, implementation, facade)
}

#[tokio::test]
async fn test_typed_call_round_trip() {
    let (_bus, _implementation, facade) = registered_pair().await;
    assert_eq!(facade.add(2, 3).await.unwrap(), 5);
}

#[tokio::test]
async fn test_void_call_reaches_implementation() {
    let (_bus, implementation, facade) = registered_pair().await;
    facade.reset().await.unwrap();
    facade.reset().await.unwrap();
    assert_eq!(implementation.resets(), 2);
}

#[tokio::test]
async fn test_implementation_error_surfaces_as_bus_failure() {
    let (_bus, _implementation, facade) = registered_pair().await;
    let err = facade.fail().await.unwrap_err();
    assert!(err.is_bus_failure());
    assert!(matches!(err, CallError::Bus(BusError::Remote(_))));
}

#[tokio::test]
async fn test_unknown_method_rejected_by_adapter() {
    let (bus, _implementation, _facade) = registered_pair().await;
    let err = bus
        .call(
            "org.test.Calc",
            "/org/test/Calc",
            "org.test.Calc",
            "mystery",
            vec![],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, BusError::Remote(message) if message.contains("method not found")));
}

#[tokio::test]
async fn test_wrong_arity_rejected_before_decoding() {
    let (bus, _implementation, _facade) = registered_pair().await;
    let err = bus
        .call(
            "org.test.Calc",
            "/org/test/Calc",
            "org.test.Calc",
            "add",
            vec!["1".into()],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, BusError::Remote(message) if message.contains("wrong argument count")));
}

#[tokio::test]
async fn test_malformed_argument_rejected() {
    let (bus, _implementation, _facade) = registered_pair().await;
    let err = bus
        .call(
            "org.test.Calc",
            "/org/test/Calc",
            "org.test.Calc",
            "add",
            vec!["1".into(), "banana".into()],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, BusError::Remote(message) if message.contains("malformed value")));
}

#[tokio::test]
async fn test_notification_reaches_facade_subscribers() {
    let (_bus, implementation, facade) = registered_pair().await;
    let mut rx = facade.notifications().subscribe_computed();

    implementation.computed(1, "x".to_string());

    let (index, label) = tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("notification should arrive")
        .unwrap();
    assert_eq!(index, 1);
    assert_eq!(label, "x");
}

#[tokio::test]
async fn test_notification_crosses_the_bus_as_strings() {
    let (bus, implementation, _facade) = registered_pair().await;
    let mut raw = bus.subscribe("/org/test/Calc", "org.test.Calc", "computed");

    implementation.computed(1, "x".to_string());

    let args = tokio::time::timeout(Duration::from_secs(1), raw.recv())
        .await
        .expect("signal should arrive")
        .unwrap();
    assert_eq!(args, vec!["1".to_string(), "x".to_string()]);
}

#[tokio::test]
async fn test_raw_signal_is_retyped_by_the_stub() {
    let (bus, _implementation, facade) = registered_pair().await;
    let mut rx = facade.notifications().subscribe_computed();

    bus.emit(
        "/org/test/Calc",
        "org.test.Calc",
        "computed",
        vec!["1".into(), "x".into()],
    )
    .await
    .unwrap();

    let (index, label) = tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("notification should arrive")
        .unwrap();
    assert_eq!((index, label.as_str()), (1, "x"));
}

#[tokio::test]
async fn test_malformed_signal_is_dropped_not_fatal() {
    let (bus, _implementation, facade) = registered_pair().await;
    let mut rx = facade.notifications().subscribe_computed();

    bus.emit(
        "/org/test/Calc",
        "org.test.Calc",
        "computed",
        vec!["banana".into(), "x".into()],
    )
    .await
    .unwrap();
    bus.emit(
        "/org/test/Calc",
        "org.test.Calc",
        "computed",
        vec!["2".into(), "y".into()],
    )
    .await
    .unwrap();

    // Only the well-formed event comes through.
    let (index, label) = tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("notification should arrive")
        .unwrap();
    assert_eq!((index, label.as_str()), (2, "y"));
}

#[tokio::test]
async fn test_notifications_arrive_in_emission_order() {
    let (_bus, implementation, facade) = registered_pair().await;
    let mut rx = facade.notifications().subscribe_computed();

    for i in 0..5u32 {
        implementation.computed(i, format!("step-{i}"));
    }

    for i in 0..5u32 {
        let (index, label) = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("notification should arrive")
            .unwrap();
        assert_eq!(index, i);
        assert_eq!(label, format!("step-{i}"));
    }
}

#[test]
fn test_descriptor_reflects_declaration() {
    let descriptor = CalcService::descriptor();
    assert_eq!(descriptor.service_name, "org.test.Calc");
    assert_eq!(descriptor.object_path, "/org/test/Calc");
    assert_eq!(descriptor.interface_name, "org.test.Calc");

    let add = descriptor.method("add").unwrap();
    assert_eq!(add.params, &["i32", "i32"]);
    assert_eq!(add.returns, Some("i32"));

    let reset = descriptor.method("reset").unwrap();
    assert!(reset.returns.is_none());

    let computed = descriptor.notification("computed").unwrap();
    assert_eq!(computed.params, &["u32", "String"]);
}
