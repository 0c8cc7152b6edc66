//! Listener lifecycle and receive loop
//!
//! Stopped -> Running -> Stopped. Starting a running listener is an error;
//! stopping a stopped one is a no-op.
//!
//! `stop()` aborts the receive task, which owns the socket. The aborted task is
//! kept until it has been reaped, and the next `start()` or `shutdown()` awaits
//! it first, so the port is free again by the time either one binds or returns.
//!
//! The receive loop is a single task. Each datagram is decoded, dispatched
//! and reported before the next receive, so events follow arrival order.

use std::net::SocketAddr;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use avosc_core::{AvoscError, AvoscResult, ParameterEvent};
use avosc_transport::OscSocket;

use crate::{Dispatcher, ListenerStats, ParameterContext, StatsSnapshot};

/// Listener lifecycle state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListenerState {
    Stopped,
    Running,
}

struct RunningListener {
    local_addr: SocketAddr,
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

/// OSC parameter listener
pub struct Listener {
    context: Arc<ParameterContext>,
    stats: Arc<ListenerStats>,
    running: Mutex<Option<RunningListener>>,
    /// Receive task aborted by `stop()` and not yet reaped
    stopping: Mutex<Option<JoinHandle<()>>>,
}

impl Listener {
    pub fn new(context: Arc<ParameterContext>) -> Self {
        Listener {
            context,
            stats: Arc::new(ListenerStats::new()),
            running: Mutex::new(None),
            stopping: Mutex::new(None),
        }
    }

    /// Bind `port` on the context's host and start the receive loop.
    ///
    /// `on_event` runs on the receive task for every event, in order.
    /// Returns the bound address (useful with port 0). On any failure the
    /// listener stays stopped.
    pub async fn start<F>(&self, port: u16, on_event: F) -> AvoscResult<SocketAddr>
    where
        F: FnMut(ParameterEvent) + Send + 'static,
    {
        if self.running.lock().is_some() {
            return Err(AvoscError::AlreadyRunning);
        }

        // A task stopped from sync code may still hold the socket
        self.reap_stopped().await;

        let addr = SocketAddr::new(self.context.bind_host(), port);
        let socket = OscSocket::bind(addr).await?;
        let local_addr = socket.local_addr();

        let mut running = self.running.lock();
        if running.is_some() {
            // Lost a race with a concurrent start; our socket is dropped here
            return Err(AvoscError::AlreadyRunning);
        }

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let dispatcher = Dispatcher::with_stats(Arc::clone(&self.context), Arc::clone(&self.stats));
        let buffer_size = self.context.max_datagram_size() + 1;

        let task = tokio::spawn(receive_loop(
            socket,
            dispatcher,
            shutdown_rx,
            on_event,
            buffer_size,
        ));

        *running = Some(RunningListener {
            local_addr,
            shutdown: shutdown_tx,
            task,
        });

        tracing::info!(port = local_addr.port(), "Listener started on {}", local_addr);
        Ok(local_addr)
    }

    /// Stop the receive loop. Safe from any thread, including outside a
    /// runtime.
    ///
    /// The task is aborted and the socket closes as soon as the runtime drops
    /// it; `start()` and `shutdown()` wait for that before going further.
    /// Returns `false` if the listener was not running.
    pub fn stop(&self) -> bool {
        let Some(running) = self.running.lock().take() else {
            return false;
        };

        let _ = running.shutdown.send(true);
        running.task.abort();
        *self.stopping.lock() = Some(running.task);

        tracing::info!("Listener on {} stopped", running.local_addr);
        true
    }

    /// Stop and wait for the receive task to finish, releasing the socket
    pub async fn shutdown(&self) {
        let running = self.running.lock().take();
        if let Some(running) = running {
            let _ = running.shutdown.send(true);
            join_receive_task(running.task).await;
            tracing::info!("Listener on {} shut down", running.local_addr);
        }

        self.reap_stopped().await;
    }

    async fn reap_stopped(&self) {
        let pending = self.stopping.lock().take();
        if let Some(task) = pending {
            join_receive_task(task).await;
        }
    }

    pub fn state(&self) -> ListenerState {
        if self.running.lock().is_some() {
            ListenerState::Running
        } else {
            ListenerState::Stopped
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == ListenerState::Running
    }

    /// Bound address while running
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.running.lock().as_ref().map(|r| r.local_addr)
    }

    pub fn context(&self) -> &Arc<ParameterContext> {
        &self.context
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn join_receive_task(task: JoinHandle<()>) {
    match task.await {
        Ok(()) => {}
        Err(e) if e.is_cancelled() => {}
        Err(e) => tracing::warn!("Receive task ended abnormally: {}", e),
    }
}

async fn receive_loop<F>(
    socket: OscSocket,
    dispatcher: Dispatcher,
    mut shutdown: watch::Receiver<bool>,
    mut on_event: F,
    buffer_size: usize,
) where
    F: FnMut(ParameterEvent) + Send + 'static,
{
    // One byte past the limit, so oversized datagrams are seen as such
    let mut buf = vec![0u8; buffer_size];

    loop {
        tokio::select! {
            biased;

            _ = shutdown.changed() => break,

            result = socket.recv_datagram(&mut buf) => match result {
                Ok((len, from)) => {
                    tracing::trace!("Datagram of {} bytes from {}", len, from);
                    for event in dispatcher.handle_datagram(&buf[..len]) {
                        on_event(event);
                    }
                }
                Err(e) => {
                    dispatcher.stats().record_receive_error();
                    tracing::warn!("UDP receive error: {}", e);
                }
            },
        }
    }

    tracing::debug!("Receive loop on {} exited", socket.local_addr());
}
