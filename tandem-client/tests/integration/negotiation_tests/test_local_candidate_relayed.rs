use tandem_client::LinkState;
use tandem_core::{ClientEvent, PeerId, RelayEvent, RoomId};

use crate::integration::{TEST_ROOM, create_test_coordinator, init_tracing};
use crate::utils::{EVENT_TIMEOUT_MS, is_candidate, is_offer, wait_for_link_state, wait_for_signal};

#[tokio::test]
async fn test_local_candidate_relayed() {
    init_tracing();

    let mut t = create_test_coordinator();

    t.handle.join(TEST_ROOM, "alice").await.expect("Coordinator stopped");
    t.handle.start_call().await.expect("Coordinator stopped");
    wait_for_link_state(&t.handle, LinkState::Negotiating, EVENT_TIMEOUT_MS)
        .await
        .expect("Call did not start");

    t.relay(RelayEvent::UserJoined(PeerId::new())).await;

    wait_for_signal(&mut t.signals, is_offer, EVENT_TIMEOUT_MS)
        .await
        .expect("No offer sent");
    let candidate = wait_for_signal(&mut t.signals, is_candidate, EVENT_TIMEOUT_MS)
        .await
        .expect("Local candidate not relayed");

    match candidate {
        ClientEvent::Candidate { candidate, room_id } => {
            assert_eq!(candidate.candidate, "candidate:engine-0");
            assert_eq!(room_id, RoomId::from(TEST_ROOM));
        }
        other => panic!("Unexpected signal {:?}", other),
    }
}
