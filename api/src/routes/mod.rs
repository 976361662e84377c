//! Route handlers and the shared application state

pub mod send_code;
pub mod verify_code;

use std::sync::Arc;

use otc_core::{CodeDispatcher, ExpiringStore, PasscodeService, UserDirectory};

/// Application state that holds shared services
pub struct AppState<D, S, X>
where
    D: UserDirectory + ?Sized,
    S: ExpiringStore + ?Sized,
    X: CodeDispatcher + ?Sized,
{
    pub passcode_service: Arc<PasscodeService<D, S, X>>,
}

impl<D, S, X> AppState<D, S, X>
where
    D: UserDirectory + ?Sized,
    S: ExpiringStore + ?Sized,
    X: CodeDispatcher + ?Sized,
{
    pub fn new(passcode_service: Arc<PasscodeService<D, S, X>>) -> Self {
        Self { passcode_service }
    }
}

/// State with every collaborator chosen at runtime
pub type DynAppState = AppState<dyn UserDirectory, dyn ExpiringStore, dyn CodeDispatcher>;
