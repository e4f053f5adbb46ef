use std::cell::RefCell;
use std::rc::Rc;

use estopim_protocol::{GameState, GridChanges, StateUpdate};
use yew::Callback;

use crate::service::{StateService, Subscription};

/// Fan-out point between the single upstream change stream and however many
/// grid listeners the current view keeps. Carries live deltas only: a batch
/// dispatched with no listener registered is dropped.
#[derive(Clone, Default)]
pub struct GridChangeBus {
    listeners: Rc<RefCell<Vec<Callback<GridChanges>>>>,
}

impl GridChangeBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Narrow register/unregister handle for leaf views.
    pub fn subscriber(&self) -> GridChangeSubscriber {
        GridChangeSubscriber {
            listeners: Rc::clone(&self.listeners),
        }
    }

    /// Delivers `changes` to every listener registered right now, once each,
    /// synchronously. Listeners registered mid-dispatch only see the next
    /// batch.
    pub fn dispatch(&self, changes: &GridChanges) {
        let snapshot = self.listeners.borrow().clone();
        for listener in &snapshot {
            listener.emit(changes.clone());
        }
    }

    pub fn clear(&self) {
        self.listeners.borrow_mut().clear();
    }
}

/// Register/unregister handle threaded into the board view, deliberately
/// without access to dispatch or the rest of the bridge.
#[derive(Clone)]
pub struct GridChangeSubscriber {
    listeners: Rc<RefCell<Vec<Callback<GridChanges>>>>,
}

impl GridChangeSubscriber {
    /// Registering the same callback twice keeps a single registration.
    pub fn register(&self, listener: Callback<GridChanges>) {
        let mut listeners = self.listeners.borrow_mut();
        if !listeners.contains(&listener) {
            listeners.push(listener);
        }
    }

    /// Unregistering a callback that was never registered is a no-op.
    pub fn unregister(&self, listener: &Callback<GridChanges>) {
        self.listeners.borrow_mut().retain(|l| l != listener);
    }
}

impl PartialEq for GridChangeSubscriber {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.listeners, &other.listeners)
    }
}

/// Owns the one subscription to the remote state source, the current state,
/// and the listener set fed from the change side channel.
///
/// Dropping the bridge cancels the subscription and empties the listener set,
/// so a remount starts clean instead of accumulating stale listeners.
pub struct StateBridge {
    state: Option<GameState>,
    bus: GridChangeBus,
    _subscription: Subscription,
}

impl StateBridge {
    /// Installs exactly one subscription on `service`. The caller routes every
    /// payload the subscription delivers back into [`StateBridge::apply`].
    pub fn connect(service: &dyn StateService, on_update: Callback<StateUpdate>) -> Self {
        Self {
            state: None,
            bus: GridChangeBus::new(),
            _subscription: service.subscribe(on_update),
        }
    }

    /// Processes one update: a present, non-empty delta batch goes out over
    /// the bus first, then the new state replaces the current one wholesale.
    pub fn apply(&mut self, update: StateUpdate) {
        let StateUpdate {
            state,
            grid_changes,
        } = update;

        if let Some(changes) = grid_changes {
            if !changes.is_empty() {
                self.bus.dispatch(&changes);
            }
        }

        log::trace!("state update: {:?}", state.name());
        self.state = Some(state);
    }

    /// `None` until the first update arrives.
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn subscriber(&self) -> GridChangeSubscriber {
        self.bus.subscriber()
    }
}

impl Drop for StateBridge {
    fn drop(&mut self) {
        self.bus.clear();
    }
}
