use tandem_client::CallEvent;
use tandem_core::{RelayEvent, RoomId};

use crate::integration::{TEST_ROOM, create_test_coordinator, init_tracing};
use crate::utils::{EVENT_TIMEOUT_MS, wait_for_event};

#[tokio::test]
async fn test_room_full() {
    init_tracing();

    let mut t = create_test_coordinator();

    t.handle.join(TEST_ROOM, "carol").await.expect("Coordinator stopped");
    // Commands are handled in order, so the reply means the join is in.
    t.handle.snapshot().await.expect("Coordinator stopped");

    // Another room's rejection is not ours.
    t.relay(RelayEvent::RoomFull {
        room_id: RoomId::from("elsewhere"),
    })
    .await;
    t.relay(RelayEvent::RoomFull {
        room_id: RoomId::from(TEST_ROOM),
    })
    .await;

    let event = wait_for_event(
        &mut t.events,
        |e| matches!(e, CallEvent::RoomFull(_)),
        EVENT_TIMEOUT_MS,
    )
    .await
    .expect("Room full not surfaced");
    assert_eq!(event, CallEvent::RoomFull(RoomId::from(TEST_ROOM)));

    let snapshot = t.handle.snapshot().await.expect("Coordinator stopped");
    assert!(snapshot.membership.is_none());

    // Joining again is allowed after rejection.
    t.handle.join(TEST_ROOM, "carol").await.expect("Coordinator stopped");
    let snapshot = t.handle.snapshot().await.expect("Coordinator stopped");
    assert!(snapshot.membership.is_some());
}
