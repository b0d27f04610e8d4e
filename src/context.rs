//! Application Context
//!
//! View state signal and controller provided via Leptos Context API.

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;
use tasknest_client::{ReqwestTransport, ViewController, ViewState};

use crate::storage::SignalState;

pub type UiController = ViewController<ReqwestTransport, SignalState>;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Screen, session and list data - read reactively by components
    pub state: RwSignal<ViewState>,
    controller: StoredValue<UiController, LocalStorage>,
}

impl AppContext {
    pub fn new(state: RwSignal<ViewState>, controller: UiController) -> Self {
        Self { state, controller: StoredValue::new_local(controller) }
    }

    /// Controller for synchronous actions (logout, search, edit mode)
    pub fn controller(&self) -> UiController {
        self.controller.get_value()
    }

    /// Run an async controller flow on the local executor
    pub fn run<F, Fut>(&self, action: F)
    where
        F: FnOnce(UiController) -> Fut,
        Fut: Future<Output = ()> + 'static,
    {
        spawn_local(action(self.controller()));
    }
}
