//! Integration tests for the signal/slot connection invariants

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use lumen_core::{Value, ValueType};
use lumen_event::{ConnectStatus, Signal, Slot};

fn counting_slot0(hits: &Arc<AtomicU32>) -> Slot {
    let hits = hits.clone();
    Slot::from_fn0(move || {
        hits.fetch_add(1, Ordering::SeqCst);
    })
}

#[test]
fn connect_succeeds_iff_signatures_match() {
    let signal = Signal::action(&[]);

    let matching = Slot::from_fn0(|| {});
    let mismatched = Slot::from_fn1(|_: i64| {});

    assert_eq!(signal.connect(&matching), ConnectStatus::Connected);
    assert!(signal.is_connected(&matching));
    assert_eq!(matching.connected_signal_count(), 1);

    assert_eq!(signal.connect(&mismatched), ConnectStatus::SignatureMismatch);
    assert!(!signal.is_connected(&mismatched));
    assert_eq!(mismatched.connected_signal_count(), 0);
    assert_eq!(signal.slot_count(), 1);
}

#[test]
fn connect_is_idempotent() {
    let signal = Signal::action(&[]);
    let slot = Slot::from_fn0(|| {});

    assert_eq!(signal.connect(&slot), ConnectStatus::Connected);
    assert_eq!(signal.connect(&slot), ConnectStatus::AlreadyConnected);

    assert_eq!(signal.slot_count(), 1);
    assert_eq!(slot.connected_signal_count(), 1);

    // A double-connected slot still fires exactly once per emit.
    let hits = Arc::new(AtomicU32::new(0));
    let counted = counting_slot0(&hits);
    signal.connect(&counted);
    signal.connect(&counted);
    signal.emit(&[]);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn disconnect_is_symmetric() {
    let signal = Signal::action(&[]);
    let slot = Slot::from_fn0(|| {});

    signal.connect(&slot);
    assert!(signal.disconnect(&slot));

    assert!(!signal.is_connected(&slot));
    assert_eq!(signal.slot_count(), 0);
    assert_eq!(slot.connected_signal_count(), 0);
}

#[test]
fn disconnect_of_never_connected_pair_is_a_noop() {
    let signal = Signal::action(&[]);
    let other = Signal::action(&[]);
    let slot = Slot::from_fn0(|| {});

    other.connect(&slot);
    assert!(!signal.disconnect(&slot));

    // The unrelated connection is untouched.
    assert_eq!(other.slot_count(), 1);
    assert_eq!(slot.connected_signal_count(), 1);
}

#[test]
fn dropping_the_signal_disconnects_every_slot() {
    let s1 = Slot::from_fn0(|| {});
    let s2 = Slot::from_fn0(|| {});
    let s3 = Slot::from_fn0(|| {});

    {
        let signal = Signal::action(&[]);
        signal.connect(&s1);
        signal.connect(&s2);
        signal.connect(&s3);
        assert_eq!(s2.connected_signal_count(), 1);
    }

    assert_eq!(s1.connected_signal_count(), 0);
    assert_eq!(s2.connected_signal_count(), 0);
    assert_eq!(s3.connected_signal_count(), 0);

    // Dropping the slots afterwards must be safe.
    drop(s1);
    drop(s2);
    drop(s3);
}

#[test]
fn dropping_one_slot_leaves_the_others_connected() {
    let signal = Signal::action(&[]);
    let s1 = Slot::from_fn0(|| {});
    let s3 = Slot::from_fn0(|| {});

    signal.connect(&s1);
    {
        let s2 = Slot::from_fn0(|| {});
        signal.connect(&s2);
        signal.connect(&s3);
        assert_eq!(signal.slot_count(), 3);
    }

    assert_eq!(signal.slot_count(), 2);
    assert!(signal.is_connected(&s1));
    assert!(signal.is_connected(&s3));

    // Emission after the drop reaches only the survivors.
    let hits = Arc::new(AtomicU32::new(0));
    let counted = counting_slot0(&hits);
    signal.connect(&counted);
    signal.emit(&[]);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn slot_shared_between_signals() {
    let a = Signal::action(&[ValueType::Int]);
    let b = Signal::action(&[ValueType::Int]);

    let seen = Arc::new(AtomicU32::new(0));
    let s = seen.clone();
    let slot = Slot::from_fn1(move |n: i64| {
        s.fetch_add(n as u32, Ordering::SeqCst);
    });

    a.connect(&slot);
    b.connect(&slot);
    assert_eq!(slot.connected_signal_count(), 2);

    a.emit(&[Value::Int(1)]);
    b.emit(&[Value::Int(10)]);
    assert_eq!(seen.load(Ordering::SeqCst), 11);

    drop(a);
    assert_eq!(slot.connected_signal_count(), 1);
    b.emit(&[Value::Int(100)]);
    assert_eq!(seen.load(Ordering::SeqCst), 111);
}
