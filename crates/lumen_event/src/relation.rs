//! Connection bookkeeping shared by signals and slots
//!
//! Every mutation of the signal↔slot relation goes through this module while
//! holding one process-wide lock, so the two sides can never disagree: if a
//! signal lists a slot, that slot lists the signal, and vice versa. Emission
//! does not take this lock; it snapshots under the signal's own list lock.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::signal::{ConnectStatus, SignalCore};
use crate::slot::SlotCore;

/// Serializes all paired list mutations (connect, disconnect, drop)
static RELATION: Mutex<()> = Mutex::new(());

fn contains_slot(list: &[Weak<SlotCore>], slot: &Arc<SlotCore>) -> bool {
    list.iter().any(|w| w.as_ptr() == Arc::as_ptr(slot))
}

pub(crate) fn connect(signal: &Arc<SignalCore>, slot: &Arc<SlotCore>) -> ConnectStatus {
    let _guard = RELATION.lock();

    let mut slots = signal.slots.lock();
    if contains_slot(&slots, slot) {
        return ConnectStatus::AlreadyConnected;
    }
    if signal.signature != slot.signature {
        log::debug!(
            "rejected connect: signal {} vs slot {}",
            signal.signature,
            slot.signature
        );
        return ConnectStatus::SignatureMismatch;
    }

    slots.push(Arc::downgrade(slot));
    slot.signals.lock().push(Arc::downgrade(signal));
    ConnectStatus::Connected
}

pub(crate) fn disconnect(signal: &Arc<SignalCore>, slot: &Arc<SlotCore>) -> bool {
    let _guard = RELATION.lock();

    let mut slots = signal.slots.lock();
    let Some(pos) = slots.iter().position(|w| w.as_ptr() == Arc::as_ptr(slot)) else {
        return false;
    };
    slots.remove(pos);
    slot.signals
        .lock()
        .retain(|w| w.as_ptr() != Arc::as_ptr(signal));
    true
}

/// Forced disconnection when a signal is dropped: every surviving slot
/// forgets this signal before the signal's own list is discarded.
pub(crate) fn drop_signal(signal: &Arc<SignalCore>) {
    let _guard = RELATION.lock();

    let slots = std::mem::take(&mut *signal.slots.lock());
    for weak in slots {
        if let Some(slot) = weak.upgrade() {
            slot.signals
                .lock()
                .retain(|w| w.as_ptr() != Arc::as_ptr(signal));
        }
    }
}

/// Symmetric obligation for slot destruction
pub(crate) fn drop_slot(slot: &Arc<SlotCore>) {
    let _guard = RELATION.lock();

    let signals = std::mem::take(&mut *slot.signals.lock());
    for weak in signals {
        if let Some(signal) = weak.upgrade() {
            signal
                .slots
                .lock()
                .retain(|w| w.as_ptr() != Arc::as_ptr(slot));
        }
    }
}
