//! Device actor - runs capability requests in the Tokio runtime

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;

use crate::constants::DEVICE_TIMEOUT_MS;
use crate::device::{Camera, DeviceError, Geolocation};
use crate::messages::{DeviceCommand, DeviceResponse};

/// Tracks a pending request for cancellation
struct ActiveRequest {
    cancel_tx: oneshot::Sender<()>,
}

/// Device actor that processes geolocation and camera commands
pub struct DeviceActor {
    geolocation: Arc<dyn Geolocation>,
    camera: Arc<dyn Camera>,
    response_tx: mpsc::UnboundedSender<DeviceResponse>,
    active_requests: JoinSet<u64>,
    cancel_handles: HashMap<u64, ActiveRequest>,
    timeout: Duration,
}

impl DeviceActor {
    pub fn new(
        geolocation: Arc<dyn Geolocation>,
        camera: Arc<dyn Camera>,
        response_tx: mpsc::UnboundedSender<DeviceResponse>,
    ) -> Self {
        DeviceActor {
            geolocation,
            camera,
            response_tx,
            active_requests: JoinSet::new(),
            cancel_handles: HashMap::new(),
            timeout: Duration::from_millis(DEVICE_TIMEOUT_MS),
        }
    }

    /// Override how long a request may take before it times out
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run the device actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<DeviceCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(DeviceCommand::Locate { id }) => {
                            let cancel_rx = self.track(id);
                            let geolocation = Arc::clone(&self.geolocation);
                            let response_tx = self.response_tx.clone();
                            let timeout = self.timeout;

                            self.active_requests.spawn(async move {
                                tracing::info!(id, "Requesting position");
                                tokio::select! {
                                    result = bounded(timeout, geolocation.current_position()) => {
                                        tracing::info!(id, ok = result.is_ok(), "Position request resolved");
                                        let _ = response_tx.send(DeviceResponse::Position { id, result });
                                    }
                                    _ = cancel_rx => {
                                        tracing::info!(id, "Position request dropped");
                                    }
                                }
                                id
                            });
                        }

                        Some(DeviceCommand::RequestCameraPermission { id }) => {
                            let cancel_rx = self.track(id);
                            let camera = Arc::clone(&self.camera);
                            let response_tx = self.response_tx.clone();
                            let timeout = self.timeout;

                            self.active_requests.spawn(async move {
                                tracing::info!(id, "Requesting camera permission");
                                tokio::select! {
                                    result = bounded(timeout, camera.request_permission()) => {
                                        let _ = response_tx.send(DeviceResponse::CameraPermission { id, result });
                                    }
                                    _ = cancel_rx => {
                                        tracing::info!(id, "Camera permission request dropped");
                                    }
                                }
                                id
                            });
                        }

                        Some(DeviceCommand::Cancel(id)) => {
                            if let Some(active) = self.cancel_handles.remove(&id) {
                                tracing::info!(id, "Cancelling device request");
                                let _ = active.cancel_tx.send(());
                                let _ = self.response_tx.send(DeviceResponse::Cancelled { id });
                            }
                        }

                        Some(DeviceCommand::Shutdown) => {
                            for (_, active) in self.cancel_handles.drain() {
                                let _ = active.cancel_tx.send(());
                            }
                            self.active_requests.abort_all();
                            tracing::info!("Device actor shut down");
                            break;
                        }

                        None => break,
                    }
                }

                // Forget cancel handles of finished requests
                Some(Ok(id)) = self.active_requests.join_next() => {
                    self.cancel_handles.remove(&id);
                }
            }
        }
    }

    fn track(&mut self, id: u64) -> oneshot::Receiver<()> {
        let (cancel_tx, cancel_rx) = oneshot::channel();
        self.cancel_handles.insert(id, ActiveRequest { cancel_tx });
        cancel_rx
    }
}

/// Run a capability call, mapping an elapsed deadline to `Timeout`
async fn bounded<T, F>(timeout: Duration, call: F) -> Result<T, DeviceError>
where
    F: Future<Output = Result<T, DeviceError>>,
{
    tokio::time::timeout(timeout, call)
        .await
        .unwrap_or(Err(DeviceError::Timeout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::config::LocationMode;
    use crate::device::{DeviceError, SimulatedCamera, SimulatedGeolocation};
    use crate::models::Coordinate;

    fn spawn_actor(
        mode: LocationMode,
        delay: Duration,
    ) -> (mpsc::UnboundedSender<DeviceCommand>, mpsc::UnboundedReceiver<DeviceResponse>) {
        spawn_actor_with_timeout(mode, delay, Duration::from_secs(5))
    }

    fn spawn_actor_with_timeout(
        mode: LocationMode,
        delay: Duration,
        timeout: Duration,
    ) -> (mpsc::UnboundedSender<DeviceCommand>, mpsc::UnboundedReceiver<DeviceResponse>) {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (resp_tx, resp_rx) = mpsc::unbounded_channel();
        let actor = DeviceActor::new(
            Arc::new(SimulatedGeolocation::new(mode, Coordinate::new(1.0, 2.0), delay)),
            Arc::new(SimulatedCamera::new(false, Duration::ZERO)),
            resp_tx,
        )
        .with_timeout(timeout);
        tokio::spawn(actor.run(cmd_rx));
        (cmd_tx, resp_rx)
    }

    #[tokio::test]
    async fn test_locate_replies_with_fix() {
        let (cmd_tx, mut resp_rx) = spawn_actor(LocationMode::Located, Duration::ZERO);
        cmd_tx.send(DeviceCommand::Locate { id: 7 }).unwrap();

        let response = resp_rx.recv().await.unwrap();
        assert_eq!(
            response,
            DeviceResponse::Position { id: 7, result: Ok(Coordinate::new(1.0, 2.0)) }
        );
    }

    #[tokio::test]
    async fn test_locate_error_is_forwarded() {
        let (cmd_tx, mut resp_rx) = spawn_actor(LocationMode::Unavailable, Duration::ZERO);
        cmd_tx.send(DeviceCommand::Locate { id: 1 }).unwrap();

        let response = resp_rx.recv().await.unwrap();
        assert_eq!(
            response,
            DeviceResponse::Position { id: 1, result: Err(DeviceError::Unavailable) }
        );
    }

    #[tokio::test]
    async fn test_cancel_suppresses_result() {
        let (cmd_tx, mut resp_rx) = spawn_actor(LocationMode::Located, Duration::from_millis(200));
        cmd_tx.send(DeviceCommand::Locate { id: 3 }).unwrap();
        cmd_tx.send(DeviceCommand::Cancel(3)).unwrap();

        assert_eq!(resp_rx.recv().await.unwrap(), DeviceResponse::Cancelled { id: 3 });
        let late = tokio::time::timeout(Duration::from_millis(400), resp_rx.recv()).await;
        assert!(late.is_err());
    }

    #[tokio::test]
    async fn test_slow_fix_times_out() {
        let (cmd_tx, mut resp_rx) = spawn_actor_with_timeout(
            LocationMode::Located,
            Duration::from_millis(500),
            Duration::from_millis(20),
        );
        cmd_tx.send(DeviceCommand::Locate { id: 9 }).unwrap();

        let response = resp_rx.recv().await.unwrap();
        assert_eq!(
            response,
            DeviceResponse::Position { id: 9, result: Err(DeviceError::Timeout) }
        );
    }

    #[tokio::test]
    async fn test_shutdown_drops_pending_requests() {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (resp_tx, mut resp_rx) = mpsc::unbounded_channel();
        let actor = DeviceActor::new(
            Arc::new(SimulatedGeolocation::new(
                LocationMode::Located,
                Coordinate::new(1.0, 2.0),
                Duration::from_millis(100),
            )),
            Arc::new(SimulatedCamera::new(true, Duration::from_millis(100))),
            resp_tx,
        );
        let handle = tokio::spawn(actor.run(cmd_rx));

        cmd_tx.send(DeviceCommand::Locate { id: 1 }).unwrap();
        cmd_tx.send(DeviceCommand::RequestCameraPermission { id: 2 }).unwrap();
        cmd_tx.send(DeviceCommand::Shutdown).unwrap();
        handle.await.unwrap();

        // Every sender is gone, so the channel closes without a late reply
        let after = tokio::time::timeout(Duration::from_millis(300), resp_rx.recv()).await;
        assert_eq!(after, Ok(None));
    }

    #[tokio::test]
    async fn test_camera_denial() {
        let (cmd_tx, mut resp_rx) = spawn_actor(LocationMode::Located, Duration::ZERO);
        cmd_tx.send(DeviceCommand::RequestCameraPermission { id: 4 }).unwrap();

        let response = resp_rx.recv().await.unwrap();
        assert_eq!(response, DeviceResponse::CameraPermission { id: 4, result: Ok(false) });
    }
}
