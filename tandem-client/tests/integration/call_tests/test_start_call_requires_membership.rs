use tandem_client::LinkState;

use crate::integration::{TEST_ROOM, create_test_coordinator, init_tracing};
use crate::utils::{EVENT_TIMEOUT_MS, is_join, is_leave, wait_for_link_state};

#[tokio::test]
async fn test_start_call_requires_membership() {
    init_tracing();

    let t = create_test_coordinator();

    t.handle.start_call().await.expect("Coordinator stopped");
    t.handle.stop_call().await.expect("Coordinator stopped");

    let snapshot = t.handle.snapshot().await.expect("Coordinator stopped");
    assert_eq!(snapshot.link_state, LinkState::Absent);
    assert!(snapshot.membership.is_none());
    assert_eq!(t.engines.count().await, 0, "No engine without a room");
    assert!(t.media.acquired().await.is_empty(), "No camera without a room");
    assert_eq!(t.signaling.count(is_leave).await, 0);

    // Once joined the same intent goes through.
    t.handle.join(TEST_ROOM, "alice").await.expect("Coordinator stopped");
    t.handle.start_call().await.expect("Coordinator stopped");

    wait_for_link_state(&t.handle, LinkState::Negotiating, EVENT_TIMEOUT_MS)
        .await
        .expect("Call did not start");
    assert_eq!(t.engines.count().await, 1);
    assert_eq!(
        t.signaling.count(is_join).await,
        2,
        "joinRoom is emitted on join and again on call start"
    );
}
