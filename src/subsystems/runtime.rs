//! Task scaffolding shared by the chat channels.
//!
//! A [`Component`] is one independently running unit (the console, the HTTP
//! server). It captures its shared state when constructed and is handed to
//! [`spawn_components`], which runs every component on its own Tokio task.
//!
//! All components share one [`CancellationToken`]. Ctrl-C cancels it; so does
//! any component that fails, which brings its siblings down with it.

use std::future::Future;
use std::pin::Pin;

use tokio::task::{JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::error::AppError;

/// The boxed future returned by [`Component::run`].
pub type ComponentFuture = Pin<Box<dyn Future<Output = Result<(), AppError>> + Send + 'static>>;

pub trait Component: Send + 'static {
    /// Name used in log fields.
    fn id(&self) -> &str;

    /// Consume the component and return its run loop. The loop should exit
    /// once `shutdown` is cancelled.
    fn run(self: Box<Self>, shutdown: CancellationToken) -> ComponentFuture;
}

/// Resolves when every spawned component has exited.
pub struct SubsystemHandle {
    inner: JoinHandle<Result<(), AppError>>,
}

impl SubsystemHandle {
    /// Wait for all components; returns the first error any of them hit.
    pub async fn join(self) -> Result<(), AppError> {
        match self.inner.await {
            Ok(r) => r,
            Err(e) => Err(AppError::Comms(format!("component supervisor panicked: {e}"))),
        }
    }
}

/// Spawn each component and supervise them as a set.
///
/// The first component to fail or panic cancels `shutdown`; the rest are
/// drained and that first error is returned from [`SubsystemHandle::join`].
pub fn spawn_components(components: Vec<Box<dyn Component>>, shutdown: CancellationToken) -> SubsystemHandle {
    let inner = tokio::spawn(async move {
        let mut set: JoinSet<Result<(), AppError>> = JoinSet::new();
        for component in components {
            debug!(component = component.id(), "spawning component");
            set.spawn(component.run(shutdown.clone()));
        }

        let mut first_err = None;
        while let Some(res) = set.join_next().await {
            let err = match res {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => e,
                Err(e) => AppError::Comms(format!("component panicked: {e}")),
            };
            error!("component failed: {err}");
            shutdown.cancel();
            first_err.get_or_insert(err);
        }

        first_err.map_or(Ok(()), Err)
    });

    SubsystemHandle { inner }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Waits;

    impl Component for Waits {
        fn id(&self) -> &str {
            "waits"
        }

        fn run(self: Box<Self>, shutdown: CancellationToken) -> ComponentFuture {
            Box::pin(async move {
                shutdown.cancelled().await;
                Ok(())
            })
        }
    }

    struct Fails;

    impl Component for Fails {
        fn id(&self) -> &str {
            "fails"
        }

        fn run(self: Box<Self>, _shutdown: CancellationToken) -> ComponentFuture {
            Box::pin(async { Err(AppError::Comms("bind failed".into())) })
        }
    }

    #[tokio::test]
    async fn failure_cancels_siblings_and_is_returned() {
        let shutdown = CancellationToken::new();
        let handle = spawn_components(vec![Box::new(Waits), Box::new(Fails)], shutdown.clone());
        let err = handle.join().await.unwrap_err();
        assert!(err.to_string().contains("bind failed"));
        assert!(shutdown.is_cancelled());
    }

    #[tokio::test]
    async fn cancellation_stops_everything_cleanly() {
        let shutdown = CancellationToken::new();
        let handle = spawn_components(vec![Box::new(Waits), Box::new(Waits)], shutdown.clone());
        shutdown.cancel();
        assert!(handle.join().await.is_ok());
    }

    #[tokio::test]
    async fn no_components_resolves_immediately() {
        let handle = spawn_components(Vec::new(), CancellationToken::new());
        assert!(handle.join().await.is_ok());
    }
}
