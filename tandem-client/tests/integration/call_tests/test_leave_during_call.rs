use tandem_client::{CallEvent, LinkState};
use tandem_core::{ChatMessage, RelayEvent};

use crate::integration::{TEST_ROOM, create_test_coordinator, init_tracing};
use crate::utils::{
    EVENT_TIMEOUT_MS, is_leave, wait_for_event, wait_for_link_state, wait_for_snapshot,
};

#[tokio::test]
async fn test_leave_during_call() {
    init_tracing();

    let mut t = create_test_coordinator();

    t.handle.join(TEST_ROOM, "alice").await.expect("Coordinator stopped");
    t.handle.start_call().await.expect("Coordinator stopped");
    wait_for_link_state(&t.handle, LinkState::Negotiating, EVENT_TIMEOUT_MS)
        .await
        .expect("Call did not start");

    t.relay(RelayEvent::ReceiveMessage(ChatMessage {
        text: "hi".into(),
        user: "bob".into(),
        timestamp: "10:00:00".into(),
    }))
    .await;
    wait_for_snapshot(&t.handle, |s| s.messages.len() == 1, EVENT_TIMEOUT_MS)
        .await
        .expect("Message never arrived");

    t.handle.leave().await.expect("Coordinator stopped");

    wait_for_event(
        &mut t.events,
        |e| *e == CallEvent::MessagesUpdated(Vec::new()),
        EVENT_TIMEOUT_MS,
    )
    .await
    .expect("Chat not cleared on leave");

    let snapshot = t.handle.snapshot().await.expect("Coordinator stopped");
    assert_eq!(snapshot.link_state, LinkState::Closed);
    assert!(snapshot.membership.is_none());
    assert!(snapshot.messages.is_empty());

    assert_eq!(
        t.signaling.count(is_leave).await,
        1,
        "leaveRoom sent exactly once"
    );
    let engine = t.engines.latest().await.expect("No engine created");
    assert!(engine.is_closed());
    assert!(t.media.acquired().await[0].all_stopped());
}
