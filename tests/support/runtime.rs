//! Tokio runtime and Wiremock server shared across the steps of a scenario.

use std::cell::RefCell;
use std::rc::Rc;

use gitlab_warden::WardenError;
use rstest_bdd::Slot;
use tokio::runtime::Runtime;
use wiremock::MockServer;

/// Runtime handle that can be stored in an `rstest-bdd` Slot.
#[derive(Clone)]
pub struct SharedRuntime(Rc<RefCell<Runtime>>);

impl SharedRuntime {
    fn start() -> Result<Self, WardenError> {
        let runtime = Runtime::new().map_err(|error| WardenError::Io {
            message: format!("failed to create Tokio runtime: {error}"),
        })?;
        Ok(Self(Rc::new(RefCell::new(runtime))))
    }

    pub fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.0.borrow().block_on(future)
    }
}

/// Starts the runtime and mock server on first use and returns the runtime.
///
/// # Errors
///
/// Returns [`WardenError::Io`] if the Tokio runtime cannot be created.
pub fn ensure_runtime_and_server(
    runtime: &Slot<SharedRuntime>,
    server: &Slot<MockServer>,
) -> Result<SharedRuntime, WardenError> {
    let shared = if let Some(existing) = runtime.get() {
        existing
    } else {
        let started = SharedRuntime::start()?;
        runtime.set(started.clone());
        started
    };

    if server.with_ref(|_| ()).is_none() {
        server.set(shared.block_on(MockServer::start()));
    }

    Ok(shared)
}

/// Hands the scenario's runtime and server to `work`.
///
/// # Errors
///
/// Returns [`WardenError::Io`] if the runtime or server was never started.
pub fn on_server<T>(
    runtime: &Slot<SharedRuntime>,
    server: &Slot<MockServer>,
    work: impl FnOnce(&SharedRuntime, &MockServer) -> T,
) -> Result<T, WardenError> {
    let shared = runtime.get().ok_or_else(|| WardenError::Io {
        message: "runtime not initialised".to_owned(),
    })?;
    server
        .with_ref(|mock_server| work(&shared, mock_server))
        .ok_or_else(|| WardenError::Io {
            message: "mock server not initialised".to_owned(),
        })
}
