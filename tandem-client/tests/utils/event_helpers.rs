use anyhow::{Result, bail};
use std::time::{Duration, Instant};
use tandem_client::{CallEvent, CoordinatorHandle, CoordinatorSnapshot, LinkState};
use tandem_core::ClientEvent;
use tokio::sync::mpsc;

/// Timeout for a coordinator reaction (ms).
pub const EVENT_TIMEOUT_MS: u64 = 2000;

/// Poll interval for snapshot based waits (ms).
const POLL_INTERVAL_MS: u64 = 10;

/// Wait for the first call event matching `pred`, skipping the others.
pub async fn wait_for_event(
    events: &mut mpsc::UnboundedReceiver<CallEvent>,
    pred: impl Fn(&CallEvent) -> bool,
    timeout_ms: u64,
) -> Result<CallEvent> {
    let deadline = tokio::time::Instant::now() + Duration::from_millis(timeout_ms);

    loop {
        match tokio::time::timeout_at(deadline, events.recv()).await {
            Ok(Some(event)) if pred(&event) => return Ok(event),
            Ok(Some(_)) => continue,
            Ok(None) => bail!("Call event channel closed"),
            Err(_) => bail!("Timeout waiting for call event"),
        }
    }
}

/// Wait for the first outbound signal matching `pred`.
pub async fn wait_for_signal(
    signals: &mut mpsc::UnboundedReceiver<ClientEvent>,
    pred: impl Fn(&ClientEvent) -> bool,
    timeout_ms: u64,
) -> Result<ClientEvent> {
    let deadline = tokio::time::Instant::now() + Duration::from_millis(timeout_ms);

    loop {
        match tokio::time::timeout_at(deadline, signals.recv()).await {
            Ok(Some(event)) if pred(&event) => return Ok(event),
            Ok(Some(_)) => continue,
            Ok(None) => bail!("Signal channel closed"),
            Err(_) => bail!("Timeout waiting for signal"),
        }
    }
}

/// Poll the coordinator until its snapshot satisfies `pred`.
pub async fn wait_for_snapshot(
    handle: &CoordinatorHandle,
    pred: impl Fn(&CoordinatorSnapshot) -> bool,
    timeout_ms: u64,
) -> Result<CoordinatorSnapshot> {
    let start = Instant::now();
    let timeout = Duration::from_millis(timeout_ms);

    loop {
        let snapshot = handle.snapshot().await?;
        if pred(&snapshot) {
            return Ok(snapshot);
        }
        if start.elapsed() > timeout {
            bail!("Timeout waiting for snapshot, last: {:?}", snapshot);
        }
        tokio::time::sleep(Duration::from_millis(POLL_INTERVAL_MS)).await;
    }
}

pub async fn wait_for_link_state(
    handle: &CoordinatorHandle,
    state: LinkState,
    timeout_ms: u64,
) -> Result<CoordinatorSnapshot> {
    wait_for_snapshot(handle, |s| s.link_state == state, timeout_ms).await
}

/// Wait until `check` holds, polling.
pub async fn wait_until<F, Fut>(check: F, timeout_ms: u64) -> Result<()>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    let start = Instant::now();
    let timeout = Duration::from_millis(timeout_ms);

    while !check().await {
        if start.elapsed() > timeout {
            bail!("Timeout waiting for condition");
        }
        tokio::time::sleep(Duration::from_millis(POLL_INTERVAL_MS)).await;
    }
    Ok(())
}
