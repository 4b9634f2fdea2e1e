use tandem_client::{CallEvent, LinkState};
use tandem_core::{ClientEvent, RelayEvent, SdpKind, SessionDescription};

use crate::integration::{TEST_ROOM, create_test_coordinator, init_tracing};
use crate::utils::{
    EVENT_TIMEOUT_MS, EngineCall, is_answer, is_join, wait_for_event, wait_for_link_state,
    wait_for_signal,
};

#[tokio::test]
async fn test_offer_without_call_sets_up_link() {
    init_tracing();

    let mut t = create_test_coordinator();

    t.handle.join(TEST_ROOM, "bob").await.expect("Coordinator stopped");
    wait_for_signal(&mut t.signals, is_join, EVENT_TIMEOUT_MS)
        .await
        .expect("joinRoom not sent");

    t.relay(RelayEvent::Offer {
        offer: SessionDescription::offer("v=0 offer from alice"),
    })
    .await;

    wait_for_event(
        &mut t.events,
        |e| matches!(e, CallEvent::LocalMediaReady { .. }),
        EVENT_TIMEOUT_MS,
    )
    .await
    .expect("Call was not set up for the offer");

    let answer = wait_for_signal(&mut t.signals, is_answer, EVENT_TIMEOUT_MS)
        .await
        .expect("No answer sent");
    assert!(matches!(
        answer,
        ClientEvent::Answer { ref answer, .. } if answer.kind == SdpKind::Answer
    ));

    wait_for_link_state(&t.handle, LinkState::Connected, EVENT_TIMEOUT_MS)
        .await
        .expect("Responder not connected");

    assert_eq!(t.engines.count().await, 1);
    assert_eq!(t.media.acquired().await.len(), 1);

    let engine = t.engines.latest().await.expect("No engine created");
    let calls = engine.calls().await;
    let remote = calls
        .iter()
        .position(|c| *c == EngineCall::SetRemote(SdpKind::Offer))
        .expect("Offer not applied");
    let create = calls
        .iter()
        .position(|c| *c == EngineCall::CreateAnswer)
        .expect("Answer not created");
    assert!(remote < create, "Remote offer applied before answering");
    assert!(calls.contains(&EngineCall::SetLocal(SdpKind::Answer)));
}
