use tandem_client::LinkState;
use tandem_core::{IceCandidate, RelayEvent, SessionDescription};

use crate::integration::{TEST_ROOM, create_test_coordinator_with, init_tracing};
use crate::utils::{
    EVENT_TIMEOUT_MS, EngineBehavior, EngineCall, MockMediaSource, wait_for_link_state,
    wait_until,
};

#[tokio::test]
async fn test_rejected_candidate_is_logged() {
    init_tracing();

    let behavior = EngineBehavior {
        reject_candidates: true,
        ..Default::default()
    };
    let t = create_test_coordinator_with(behavior, MockMediaSource::new());

    t.handle.join(TEST_ROOM, "bob").await.expect("Coordinator stopped");
    // Commands are handled in order, so the reply means the join is in.
    t.handle.snapshot().await.expect("Coordinator stopped");
    t.relay(RelayEvent::Offer {
        offer: SessionDescription::offer("v=0 offer from alice"),
    })
    .await;
    wait_for_link_state(&t.handle, LinkState::Connected, EVENT_TIMEOUT_MS)
        .await
        .expect("Responder not connected");

    t.relay(RelayEvent::Candidate {
        candidate: IceCandidate::new("candidate:garbage"),
    })
    .await;

    let engine = t.engines.latest().await.expect("No engine created");
    let watched = engine.clone();
    wait_until(
        move || {
            let engine = watched.clone();
            async move {
                engine
                    .has_call(&EngineCall::AddCandidate("candidate:garbage".into()))
                    .await
            }
        },
        EVENT_TIMEOUT_MS,
    )
    .await
    .expect("Candidate never reached the engine");

    let snapshot = t.handle.snapshot().await.expect("Coordinator stopped");
    assert_eq!(snapshot.link_state, LinkState::Connected, "Call survives");
    assert!(!engine.is_closed());
    assert!(engine.applied_candidates().await.is_empty());
}
