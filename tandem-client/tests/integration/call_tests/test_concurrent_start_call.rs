use std::time::Duration;
use tandem_client::{CallEvent, LinkState};

use crate::integration::{TEST_ROOM, create_test_coordinator_with, init_tracing};
use crate::utils::{
    EVENT_TIMEOUT_MS, EngineBehavior, MockMediaSource, wait_for_event, wait_for_link_state,
};

#[tokio::test]
async fn test_concurrent_start_call() {
    init_tracing();

    // Slow camera so the second intent lands while the first is suspended.
    let media = MockMediaSource::with_delay(Duration::from_millis(100));
    let mut t = create_test_coordinator_with(EngineBehavior::default(), media);

    t.handle.join(TEST_ROOM, "alice").await.expect("Coordinator stopped");
    t.handle.start_call().await.expect("Coordinator stopped");
    t.handle.start_call().await.expect("Coordinator stopped");
    t.handle.start_call().await.expect("Coordinator stopped");

    wait_for_event(
        &mut t.events,
        |e| matches!(e, CallEvent::LocalMediaReady { tracks: 2, .. }),
        EVENT_TIMEOUT_MS,
    )
    .await
    .expect("Local media never became ready");

    let snapshot = wait_for_link_state(&t.handle, LinkState::Negotiating, EVENT_TIMEOUT_MS)
        .await
        .expect("Call did not start");
    assert_eq!(snapshot.link_state, LinkState::Negotiating);

    // Flush the deferred intents before counting.
    t.handle.snapshot().await.expect("Coordinator stopped");

    assert_eq!(t.engines.count().await, 1, "Exactly one peer link");
    assert_eq!(t.media.acquired().await.len(), 1, "Camera acquired once");
}
