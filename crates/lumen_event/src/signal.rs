//! Signals: runtime-wired event sources

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use lumen_core::{Signature, Value, ValueType};

use crate::relation;
use crate::slot::{Slot, SlotCore};

/// Outcome of a connection attempt
///
/// Call sites that keep the fire-and-forget style of engine code can ignore
/// the value; instrumentation and tests can tell the three cases apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectStatus {
    /// The slot is now connected
    Connected,
    /// The slot was already connected; nothing changed
    AlreadyConnected,
    /// The slot's signature does not match; nothing changed
    SignatureMismatch,
}

impl ConnectStatus {
    /// True if the slot is connected after the call (newly or already)
    pub fn is_connected(&self) -> bool {
        !matches!(self, Self::SignatureMismatch)
    }
}

pub(crate) struct SignalCore {
    pub(crate) signature: Signature,
    /// Connected slots in connection order; entries are non-owning
    pub(crate) slots: Mutex<Vec<Weak<SlotCore>>>,
}

/// An event source owned by the object that declares it
///
/// Deliberately not `Clone`: the wrapper is the unique owner, and dropping it
/// forcibly disconnects every slot.
pub struct Signal {
    core: Arc<SignalCore>,
}

impl Signal {
    /// Create a signal with the given signature
    pub fn new(signature: Signature) -> Self {
        Self {
            core: Arc::new(SignalCore {
                signature,
                slots: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Create a void signal with the given parameter types
    pub fn action(params: &[ValueType]) -> Self {
        Self::new(Signature::action(params))
    }

    /// The signal's signature
    pub fn signature(&self) -> &Signature {
        &self.core.signature
    }

    /// Connect a slot
    ///
    /// No-op unless the slot is new to this signal and the signatures match
    /// exactly. Both sides are updated in one critical section.
    pub fn connect(&self, slot: &Slot) -> ConnectStatus {
        relation::connect(&self.core, slot.core())
    }

    /// Disconnect a slot; returns false if it was not connected
    pub fn disconnect(&self, slot: &Slot) -> bool {
        relation::disconnect(&self.core, slot.core())
    }

    /// Check whether a slot is currently connected
    pub fn is_connected(&self, slot: &Slot) -> bool {
        let slots = self.core.slots.lock();
        slots
            .iter()
            .any(|w| w.as_ptr() == Arc::as_ptr(slot.core()))
    }

    /// Number of live connected slots
    pub fn slot_count(&self) -> usize {
        let slots = self.core.slots.lock();
        slots.iter().filter(|w| w.strong_count() > 0).count()
    }

    /// Invoke every connected slot, in connection order
    ///
    /// Arguments must match the signature's parameter tags exactly; a
    /// mismatched payload invokes nothing. The slot list is snapshotted
    /// before the first callback runs, so slots may connect, disconnect or
    /// drop other slots (or themselves) mid-emission.
    pub fn emit(&self, args: &[Value]) {
        if !self.args_match(args) {
            log::debug!(
                "dropped emit on {}: payload does not match",
                self.core.signature
            );
            return;
        }

        let snapshot: Vec<Arc<SlotCore>> = {
            let mut slots = self.core.slots.lock();
            // Prune entries whose slot has been dropped without bookkeeping
            // running yet (drop is in progress on another thread).
            slots.retain(|w| w.strong_count() > 0);
            slots.iter().filter_map(Weak::upgrade).collect()
        };

        for slot in snapshot {
            (slot.callback)(args);
        }
    }

    fn args_match(&self, args: &[Value]) -> bool {
        let params = &self.core.signature.params;
        args.len() == params.len()
            && args
                .iter()
                .zip(params.iter())
                .all(|(arg, param)| arg.value_type() == *param)
    }
}

impl Drop for Signal {
    fn drop(&mut self) {
        relation::drop_signal(&self.core);
    }
}

impl std::fmt::Debug for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("signature", &self.core.signature.to_string())
            .field("slots", &self.slot_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_emit_invokes_in_connection_order() {
        let signal = Signal::action(&[ValueType::Int]);
        let order = Arc::new(Mutex::new(Vec::new()));

        let o1 = order.clone();
        let first = Slot::from_fn1(move |n: i64| o1.lock().push(("first", n)));
        let o2 = order.clone();
        let second = Slot::from_fn1(move |n: i64| o2.lock().push(("second", n)));

        assert_eq!(signal.connect(&first), ConnectStatus::Connected);
        assert_eq!(signal.connect(&second), ConnectStatus::Connected);

        signal.emit(&[Value::Int(7)]);

        let seen = order.lock();
        assert_eq!(*seen, vec![("first", 7), ("second", 7)]);
    }

    #[test]
    fn test_emit_with_mismatched_payload_is_a_noop() {
        let signal = Signal::action(&[ValueType::Int]);
        let hits = Arc::new(AtomicU32::new(0));
        let h = hits.clone();
        let slot = Slot::from_fn1(move |_: i64| {
            h.fetch_add(1, Ordering::SeqCst);
        });
        signal.connect(&slot);

        signal.emit(&[]);
        signal.emit(&[Value::Str("7".into())]);
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        signal.emit(&[Value::Int(7)]);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_slot_disconnecting_itself_during_emit() {
        let signal = Arc::new(Signal::action(&[]));
        let hits = Arc::new(AtomicU32::new(0));

        // The slot needs a handle to itself to disconnect; route through a cell.
        let cell: Arc<Mutex<Option<Slot>>> = Arc::new(Mutex::new(None));
        let h = hits.clone();
        let sig = signal.clone();
        let cell2 = cell.clone();
        let slot = Slot::from_fn0(move || {
            h.fetch_add(1, Ordering::SeqCst);
            if let Some(me) = cell2.lock().as_ref() {
                sig.disconnect(me);
            }
        });
        signal.connect(&slot);
        *cell.lock() = Some(slot);

        signal.emit(&[]);
        signal.emit(&[]);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(signal.slot_count(), 0);
    }
}
