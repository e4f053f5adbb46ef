use std::rc::Rc;

use estopim_protocol::{CellCount, Coord, Coord2, StateUpdate};
use yew::Callback;

/// Handle to the process-remote game-state service.
///
/// Every call is fire-and-forget: outcomes are observed, if at all, as later
/// [`StateUpdate`]s arriving through the subscription callback. Transport
/// failures stay with whichever side owns the transport.
pub trait StateService {
    /// Installs the sole update listener. Delivery stops when the returned
    /// guard is dropped.
    fn subscribe(&self, callback: Callback<StateUpdate>) -> Subscription;

    /// Requests a new game with the given board shape.
    fn init_game(&self, width: Coord, height: Coord, mines: CellCount);

    /// Requests a return to the start state.
    fn reset(&self);

    fn reveal(&self, coords: Coord2);

    fn toggle_flag(&self, coords: Coord2);
}

/// Cancels a remote subscription when dropped.
pub struct Subscription(Option<Box<dyn FnOnce()>>);

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self(Some(Box::new(cancel)))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.0.take() {
            cancel();
        }
    }
}

/// Shared [`StateService`] handle that can ride in component props.
#[derive(Clone)]
pub struct ServiceHandle(Rc<dyn StateService>);

impl ServiceHandle {
    pub fn new(service: Rc<dyn StateService>) -> Self {
        Self(service)
    }
}

impl std::fmt::Debug for ServiceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceHandle").finish_non_exhaustive()
    }
}

impl std::ops::Deref for ServiceHandle {
    type Target = dyn StateService;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

impl PartialEq for ServiceHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn subscription_cancels_exactly_once_on_drop() {
        let cancelled = Rc::new(Cell::new(0));
        let subscription = {
            let cancelled = Rc::clone(&cancelled);
            Subscription::new(move || cancelled.set(cancelled.get() + 1))
        };

        assert_eq!(cancelled.get(), 0);
        drop(subscription);
        assert_eq!(cancelled.get(), 1);
    }

    #[test]
    fn handles_compare_by_service_identity() {
        let service = Rc::new(crate::testutil::FakeService::default());
        let a = ServiceHandle::new(service.clone());
        let b = a.clone();
        let c = ServiceHandle::new(Rc::new(crate::testutil::FakeService::default()));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
