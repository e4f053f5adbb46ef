use std::cell::RefCell;
use std::rc::Rc;

use estopim_protocol::{Cell, CellCount, Coord, Coord2, GameState, Grid, StateUpdate};
use ndarray::Array2;
use yew::Callback;

use crate::service::{StateService, Subscription};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ServiceCall {
    InitGame(Coord, Coord, CellCount),
    Reset,
    Reveal(Coord2),
    ToggleFlag(Coord2),
}

#[derive(Default)]
struct Inner {
    calls: RefCell<Vec<ServiceCall>>,
    subscribers: RefCell<Vec<Callback<StateUpdate>>>,
    cancelled: std::cell::Cell<usize>,
}

/// Scripted stand-in for the remote side of the service boundary.
#[derive(Clone, Default)]
pub(crate) struct FakeService(Rc<Inner>);

impl FakeService {
    /// Delivers an update through every live subscription, the way the real
    /// transport invokes the installed callback.
    pub(crate) fn push(&self, update: StateUpdate) {
        for subscriber in self.0.subscribers.borrow().iter() {
            subscriber.emit(update.clone());
        }
    }

    pub(crate) fn calls(&self) -> Vec<ServiceCall> {
        self.0.calls.borrow().clone()
    }

    pub(crate) fn subscriber_count(&self) -> usize {
        self.0.subscribers.borrow().len()
    }

    pub(crate) fn cancelled(&self) -> usize {
        self.0.cancelled.get()
    }

    fn record(&self, call: ServiceCall) {
        self.0.calls.borrow_mut().push(call);
    }
}

impl StateService for FakeService {
    fn subscribe(&self, callback: Callback<StateUpdate>) -> Subscription {
        self.0.subscribers.borrow_mut().push(callback);
        let inner = Rc::clone(&self.0);
        Subscription::new(move || inner.cancelled.set(inner.cancelled.get() + 1))
    }

    fn init_game(&self, width: Coord, height: Coord, mines: CellCount) {
        self.record(ServiceCall::InitGame(width, height, mines));
    }

    fn reset(&self) {
        self.record(ServiceCall::Reset);
    }

    fn reveal(&self, coords: Coord2) {
        self.record(ServiceCall::Reveal(coords));
    }

    fn toggle_flag(&self, coords: Coord2) {
        self.record(ServiceCall::ToggleFlag(coords));
    }
}

pub(crate) fn start() -> GameState {
    GameState::Start
}

pub(crate) fn playing(width: usize, height: usize) -> GameState {
    GameState::Playing {
        grid: blank_grid(width, height),
    }
}

pub(crate) fn blank_grid(width: usize, height: usize) -> Grid {
    Array2::from_elem((width, height), Cell::default())
}
