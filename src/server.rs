use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{Extension, Router, routing::get};
use tokio::{sync::oneshot, task::JoinHandle, time::timeout};

use crate::{
    api::{self, CallbackResult, CallbackSlot},
    oauth::{LoginError, RedirectTarget},
};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// Short-lived loopback HTTP listener that captures one OAuth redirect.
///
/// The socket is owned by a background task; [`CallbackListener::stop`]
/// (or dropping the listener) shuts that task down and releases the port.
pub struct CallbackListener {
    addr: SocketAddr,
    slot: Arc<CallbackSlot>,
    receiver: Option<oneshot::Receiver<CallbackResult>>,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl CallbackListener {
    /// Binds `target.addr` and starts serving `target.path`.
    ///
    /// # Errors
    ///
    /// [`LoginError::Bind`] when the port is taken, e.g. by a previous
    /// attempt that is still running or by another program.
    pub async fn start(target: &RedirectTarget) -> Result<Self, LoginError> {
        let listener = tokio::net::TcpListener::bind(target.addr)
            .await
            .map_err(|source| LoginError::Bind {
                addr: target.addr.to_string(),
                source,
            })?;
        let addr = listener.local_addr().map_err(|source| LoginError::Bind {
            addr: target.addr.to_string(),
            source,
        })?;

        let (slot, receiver) = CallbackSlot::channel();
        let app = Router::new()
            .route(&target.path, get(api::callback))
            .layer(Extension(Arc::clone(&slot)));

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let served = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await;
            if let Err(e) = served {
                tracing::warn!("callback listener stopped with error: {}", e);
            }
        });

        tracing::debug!("callback listener bound on {}{}", addr, target.path);

        Ok(Self {
            addr,
            slot,
            receiver: Some(receiver),
            shutdown: Some(shutdown_tx),
            task: Some(task),
        })
    }

    /// Address actually bound (relevant when the configured port was `0`).
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Number of requests that reached the callback route so far.
    pub fn hits(&self) -> usize {
        self.slot.hits()
    }

    /// Parks until the first redirect arrives or `wait` elapses.
    ///
    /// # Errors
    ///
    /// - [`LoginError::CallbackTimeout`] if nothing arrived in time
    /// - [`LoginError::ListenerClosed`] if the result was already taken or the
    ///   server task went away
    pub async fn await_callback(&mut self, wait: Duration) -> Result<CallbackResult, LoginError> {
        let receiver = self.receiver.as_mut().ok_or(LoginError::ListenerClosed)?;

        let outcome = match timeout(wait, receiver).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(_)) => Err(LoginError::ListenerClosed),
            Err(_) => Err(LoginError::CallbackTimeout(wait)),
        };

        if !matches!(outcome, Err(LoginError::CallbackTimeout(_))) {
            self.receiver = None;
        }
        outcome
    }

    /// Stops serving and waits until the socket is released. Calling it again
    /// is a no-op.
    pub async fn stop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }

        if let Some(mut task) = self.task.take() {
            // A connection stalled mid-request keeps graceful shutdown open.
            // Aborting drops the accept loop and frees the port, but the
            // per-connection tasks axum spawned live until their peer goes
            // away; closing the slot below leaves them with nothing to deliver.
            if timeout(SHUTDOWN_GRACE, &mut task).await.is_err() {
                tracing::debug!("callback listener on {} did not drain, aborting", self.addr);
                task.abort();
                let _ = task.await;
            }
            tracing::debug!("callback listener on {} stopped", self.addr);
        }
        self.slot.close().await;
        self.receiver = None;
    }

    /// Whether the server task is still owned by this listener.
    ///
    /// # Returns
    ///
    /// `true` from [`CallbackListener::start`] until the first
    /// [`CallbackListener::stop`]; dropping the listener also ends it.
    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }
}

impl Drop for CallbackListener {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
