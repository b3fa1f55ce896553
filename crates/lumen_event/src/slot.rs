//! Slots: callbacks that receive signal emissions

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use lumen_core::{ReflectValue, Signature, Value, ValueType};

use crate::relation;
use crate::signal::SignalCore;

pub(crate) struct SlotCore {
    pub(crate) signature: Signature,
    pub(crate) callback: Box<dyn Fn(&[Value]) + Send + Sync>,
    /// Signals this slot is connected to; entries are non-owning
    pub(crate) signals: Mutex<Vec<Weak<SignalCore>>>,
}

/// A callback endpoint for signal connections
///
/// Not `Clone` for the same reason `Signal` is not: dropping the wrapper is
/// the destruction event that forcibly disconnects it everywhere.
pub struct Slot {
    core: Arc<SlotCore>,
}

macro_rules! typed_slot_ctor {
    ($(#[$doc:meta])* $name:ident, $($arg:ident: $ty:ident),*) => {
        $(#[$doc])*
        pub fn $name<$($ty,)* F>(callback: F) -> Self
        where
            $($ty: ReflectValue,)*
            F: Fn($($ty),*) + Send + Sync + 'static,
        {
            let signature = {
                let params: Vec<ValueType> = vec![$(<$ty as ReflectValue>::value_type()),*];
                Signature::new(ValueType::Void, &params)
            };
            Self::new(signature, move |args: &[Value]| {
                let mut args = args.iter();
                $(
                    let Some($arg) = args.next().and_then(|v| <$ty>::from_value(v)) else {
                        return;
                    };
                )*
                let _ = &mut args;
                callback($($arg),*);
            })
        }
    };
}

impl Slot {
    /// Create a slot for the dynamic boundary: explicit signature, raw
    /// parameter bag. The caller's closure sees exactly what was emitted.
    pub fn new(
        signature: Signature,
        callback: impl Fn(&[Value]) + Send + Sync + 'static,
    ) -> Self {
        Self {
            core: Arc::new(SlotCore {
                signature,
                callback: Box::new(callback),
                signals: Mutex::new(Vec::new()),
            }),
        }
    }

    typed_slot_ctor!(
        /// Slot for a nullary void signal
        from_fn0,
    );
    typed_slot_ctor!(
        /// Slot for a unary void signal; signature derives from `A`
        from_fn1, a: A
    );
    typed_slot_ctor!(
        /// Slot for a binary void signal
        from_fn2, a: A, b: B
    );
    typed_slot_ctor!(
        /// Slot for a ternary void signal
        from_fn3, a: A, b: B, c: C
    );

    /// The slot's signature
    pub fn signature(&self) -> &Signature {
        &self.core.signature
    }

    /// Number of live signals this slot is connected to
    pub fn connected_signal_count(&self) -> usize {
        let signals = self.core.signals.lock();
        signals.iter().filter(|w| w.strong_count() > 0).count()
    }

    pub(crate) fn core(&self) -> &Arc<SlotCore> {
        &self.core
    }
}

impl Drop for Slot {
    fn drop(&mut self) {
        relation::drop_slot(&self.core);
    }
}

impl std::fmt::Debug for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slot")
            .field("signature", &self.core.signature.to_string())
            .field("signals", &self.connected_signal_count())
            .finish()
    }
}
