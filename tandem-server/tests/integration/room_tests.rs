use tandem_client::SignalingOutput;
use tandem_core::{ClientEvent, RelayEvent, RoomId};

use crate::integration::init_tracing;
use crate::utils::{assert_quiet, connect_peer, next_event, spawn_relay, wait_for_members};

#[tokio::test]
async fn test_join_announces_and_third_is_refused() {
    init_tracing();

    let relay = spawn_relay().await;
    let mut alice = connect_peer(&relay).await;
    let mut bob = connect_peer(&relay).await;
    let mut carol = connect_peer(&relay).await;
    let room = RoomId::default();

    alice
        .signaling
        .send(ClientEvent::JoinRoom(room.clone()))
        .await
        .expect("Send failed");
    wait_for_members(&relay, &room, 1).await;
    bob.signaling
        .send(ClientEvent::JoinRoom(room.clone()))
        .await
        .expect("Send failed");

    let joined = next_event(&mut alice).await.expect("No announcement");
    assert_eq!(joined, RelayEvent::UserJoined(bob.peer_id.clone()));

    carol
        .signaling
        .send(ClientEvent::JoinRoom(room.clone()))
        .await
        .expect("Send failed");

    let refused = next_event(&mut carol).await.expect("No refusal");
    assert_eq!(refused, RelayEvent::RoomFull { room_id: room });
    assert_quiet(&mut alice).await;
    assert_quiet(&mut bob).await;
}

#[tokio::test]
async fn test_leave_and_disconnect_announce_user_left() {
    init_tracing();

    let relay = spawn_relay().await;
    let mut alice = connect_peer(&relay).await;
    let bob = connect_peer(&relay).await;
    let room = RoomId::from("call");

    alice
        .signaling
        .send(ClientEvent::JoinRoom(room.clone()))
        .await
        .expect("Send failed");
    wait_for_members(&relay, &room, 1).await;
    bob.signaling
        .send(ClientEvent::JoinRoom(room.clone()))
        .await
        .expect("Send failed");
    next_event(&mut alice).await.expect("No announcement");

    bob.signaling
        .send(ClientEvent::LeaveRoom(room.clone()))
        .await
        .expect("Send failed");
    let left = next_event(&mut alice).await.expect("No departure");
    assert_eq!(left, RelayEvent::UserLeft(bob.peer_id.clone()));

    bob.signaling
        .send(ClientEvent::JoinRoom(room))
        .await
        .expect("Send failed");
    next_event(&mut alice).await.expect("No announcement");

    // Closing bob's socket counts as leaving.
    let bob_id = bob.peer_id.clone();
    drop(bob);
    let left = next_event(&mut alice).await.expect("No departure on close");
    assert_eq!(left, RelayEvent::UserLeft(bob_id));
}
