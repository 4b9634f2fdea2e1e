use crate::chat::{ChatLog, compose_message};
use crate::coordinator::peer_link::PeerLink;
use crate::coordinator::{
    CallCommand, CallEvent, CoordinatorHandle, CoordinatorSnapshot, LinkRole, LinkState,
    Membership,
};
use crate::engine::{EngineEvent, EngineFactory, MediaSource};
use crate::signaling::SignalingOutput;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;
use tandem_core::{
    ChatMessage, ClientEvent, IceCandidate, PeerId, RelayEvent, RoomId, SessionDescription,
};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

const COMMAND_BUFFER: usize = 64;
const ENGINE_EVENT_BUFFER: usize = 256;

/// Call-signaling state machine of one client.
///
/// Owns the room membership, the single peer link and the chat log. All
/// inputs (user intents, relay events, engine events) are handled one at a
/// time on the task running [`Coordinator::run`].
pub struct Coordinator {
    signaling: Arc<dyn SignalingOutput>,
    engines: Arc<dyn EngineFactory>,
    media: Arc<dyn MediaSource>,
    command_rx: mpsc::Receiver<CallCommand>,
    relay_rx: mpsc::Receiver<RelayEvent>,
    events_tx: mpsc::UnboundedSender<CallEvent>,
    membership: Option<Membership>,
    link: Option<PeerLink>,
    link_state: LinkState,
    pending_candidates: VecDeque<IceCandidate>,
    chat: ChatLog,
    deferred: VecDeque<CallCommand>,
    commands_closed: bool,
}

impl Coordinator {
    pub fn new(
        signaling: Arc<dyn SignalingOutput>,
        engines: Arc<dyn EngineFactory>,
        media: Arc<dyn MediaSource>,
        relay_rx: mpsc::Receiver<RelayEvent>,
    ) -> (Self, CoordinatorHandle, mpsc::UnboundedReceiver<CallEvent>) {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let coordinator = Self {
            signaling,
            engines,
            media,
            command_rx,
            relay_rx,
            events_tx,
            membership: None,
            link: None,
            link_state: LinkState::Absent,
            pending_candidates: VecDeque::new(),
            chat: ChatLog::new(),
            deferred: VecDeque::new(),
            commands_closed: false,
        };

        (coordinator, CoordinatorHandle::new(command_tx), events_rx)
    }

    pub async fn run(mut self) {
        info!("Coordinator event loop started");

        loop {
            if let Some(cmd) = self.deferred.pop_front() {
                self.handle_command(cmd).await;
                continue;
            }

            tokio::select! {
                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(c) => self.handle_command(c).await,
                        None => {
                            info!("Command channel closed. Shutting down coordinator.");
                            self.stop_call().await;
                            break;
                        }
                    }
                }

                evt = self.relay_rx.recv() => {
                    match evt {
                        Some(e) => self.handle_relay_event(e).await,
                        None => {
                            warn!("Relay channel closed unexpectedly");
                            self.handle_relay_disconnect().await;
                            break;
                        }
                    }
                }

                Some(evt) = next_engine_event(&mut self.link) => {
                    self.handle_engine_event(evt).await;
                }
            }
        }

        info!("Coordinator event loop finished");
    }

    async fn handle_command(&mut self, cmd: CallCommand) {
        match cmd {
            CallCommand::Join { room, user } => self.join(room, user).await,
            CallCommand::StartCall => {
                self.start_call().await;
            }
            CallCommand::StopCall => {
                self.stop_call().await;
            }
            CallCommand::Leave => self.leave().await,
            CallCommand::SendMessage { text } => self.send_message(text).await,
            CallCommand::Snapshot(reply) => {
                let _ = reply.send(self.snapshot());
            }
        }
    }

    async fn handle_relay_event(&mut self, event: RelayEvent) {
        match event {
            RelayEvent::UserJoined(peer_id) => self.on_user_joined(peer_id).await,
            RelayEvent::UserLeft(peer_id) => self.on_user_left(peer_id).await,
            RelayEvent::Offer { offer } => self.on_offer(offer).await,
            RelayEvent::Answer { answer } => self.on_answer(answer).await,
            RelayEvent::Candidate { candidate } => self.on_candidate(candidate).await,
            RelayEvent::ReceiveMessage(message) => self.on_receive_message(message),
            RelayEvent::RoomFull { room_id } => self.on_room_full(room_id).await,
        }
    }

    async fn handle_engine_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::LocalCandidate(candidate) => {
                let Some(membership) = &self.membership else {
                    debug!("Dropping local candidate: no room membership");
                    return;
                };
                let room_id = membership.room.clone();
                self.send(ClientEvent::Candidate { candidate, room_id }).await;
            }

            EngineEvent::RemoteTrack(track) => {
                info!("Remote {} track attached: {}", track.kind, track.track_id);
                if let Some(link) = self.link.as_mut() {
                    link.remote_tracks.push(track.clone());
                }
                self.emit(CallEvent::RemoteMediaAttached(track));
            }
        }
    }

    async fn join(&mut self, room: RoomId, user: String) {
        if let Some(membership) = &self.membership {
            warn!("Join ignored: already a member of room '{}'", membership.room);
            return;
        }

        let user = user.trim().to_owned();
        if user.is_empty() {
            warn!("Join ignored: empty user name");
            return;
        }

        info!("Joining room '{}' as {}", room, user);
        self.membership = Some(Membership {
            room: room.clone(),
            user,
        });
        self.send(ClientEvent::JoinRoom(room)).await;
    }

    /// Returns whether a peer link is available afterwards.
    async fn start_call(&mut self) -> bool {
        let Some(membership) = self.membership.clone() else {
            warn!("Start call ignored: join a room first");
            return false;
        };

        if self.link.is_some() {
            debug!("Start call ignored: peer link already exists");
            return true;
        }

        if self.link_state == LinkState::Closed {
            self.set_link_state(LinkState::Absent);
        }

        let source = self.media.clone();
        let media = match self.interruptible(async move { source.acquire().await }).await {
            None => {
                info!("Call setup abandoned during media acquisition");
                return false;
            }
            Some(Err(e)) => {
                warn!("Failed to acquire local media: {:?}", e);
                self.set_link_state(LinkState::Absent);
                self.emit(CallEvent::MediaUnavailable(e.to_string()));
                return false;
            }
            Some(Ok(media)) => media,
        };

        let (event_tx, event_rx) = mpsc::channel(ENGINE_EVENT_BUFFER);
        let engine = match self.engines.create(event_tx).await {
            Ok(engine) => engine,
            Err(e) => {
                error!("Failed to create negotiation engine: {:?}", e);
                media.stop_all();
                self.set_link_state(LinkState::Absent);
                self.emit(CallEvent::MediaUnavailable(e.to_string()));
                return false;
            }
        };

        for track in &media.tracks {
            if let Err(e) = engine.add_track(track.clone(), &media.stream_id).await {
                error!("Failed to attach local {} track: {:?}", track.kind(), e);
                if let Err(e) = engine.close().await {
                    warn!("Failed to close negotiation engine: {:?}", e);
                }
                media.stop_all();
                self.set_link_state(LinkState::Absent);
                self.emit(CallEvent::MediaUnavailable(e.to_string()));
                return false;
            }
        }

        self.emit(CallEvent::LocalMediaReady {
            stream_id: media.stream_id.clone(),
            tracks: media.tracks.len(),
        });
        self.link = Some(PeerLink::new(engine, event_rx, media));
        self.set_link_state(LinkState::Negotiating);
        self.send(ClientEvent::JoinRoom(membership.room)).await;

        true
    }

    async fn stop_call(&mut self) -> bool {
        let Some(link) = self.link.take() else {
            debug!("Stop call ignored: no active peer link");
            return false;
        };

        self.release_link(link).await;

        if let Some(membership) = &self.membership {
            let room = membership.room.clone();
            self.send(ClientEvent::LeaveRoom(room)).await;
        }
        true
    }

    async fn leave(&mut self) {
        let left_room = self.stop_call().await;

        if let Some(membership) = self.membership.take() {
            info!("Leaving room '{}'", membership.room);
            if !left_room {
                self.send(ClientEvent::LeaveRoom(membership.room)).await;
            }
        }

        self.pending_candidates.clear();
        self.chat.clear();
        self.emit(CallEvent::MessagesUpdated(Vec::new()));
    }

    async fn send_message(&mut self, text: String) {
        let Some(membership) = &self.membership else {
            warn!("Message dropped: join a room first");
            return;
        };

        let Some(message) = compose_message(&text, &membership.user) else {
            debug!("Ignoring blank chat message");
            return;
        };

        self.send(ClientEvent::SendMessage(message)).await;
    }

    async fn on_user_joined(&mut self, peer_id: PeerId) {
        let Some(membership) = &self.membership else {
            debug!("userJoined({}) ignored: no room membership", peer_id);
            return;
        };
        let room_id = membership.room.clone();

        let Some(link) = self.link.as_mut() else {
            info!("User {} joined; no call active yet", peer_id);
            return;
        };

        match (&link.remote_peer, link.role) {
            (Some(remote), _) if *remote == peer_id => {
                debug!("Duplicate userJoined for {}; offer already sent", peer_id);
                return;
            }
            (Some(remote), _) => {
                warn!(
                    "User {} joined while linked with {}; rooms hold two participants",
                    peer_id, remote
                );
                return;
            }
            (None, Some(_)) => {
                debug!("userJoined({}) ignored: negotiation already under way", peer_id);
                return;
            }
            (None, None) => {}
        }

        link.role = Some(LinkRole::Initiator);
        link.remote_peer = Some(peer_id.clone());
        let engine = link.engine.clone();

        let step = async move {
            let offer = engine.create_offer().await?;
            engine.set_local_description(offer.clone()).await?;
            Ok::<_, anyhow::Error>(offer)
        };

        match self.interruptible(step).await {
            None => {}
            Some(Err(e)) => {
                warn!("Failed to create offer for {}: {:?}", peer_id, e);
                if let Some(link) = self.link.as_mut() {
                    link.role = None;
                    link.remote_peer = None;
                }
            }
            Some(Ok(offer)) => {
                if let Some(link) = self.link.as_mut() {
                    link.awaiting_answer = true;
                }
                info!("Sending offer to {}", peer_id);
                self.send(ClientEvent::Offer { offer, room_id }).await;
            }
        }
    }

    async fn on_user_left(&mut self, peer_id: PeerId) {
        let Some(link) = &self.link else {
            return;
        };

        let engaged = link.role.is_some()
            && link.remote_peer.as_ref().is_none_or(|remote| *remote == peer_id);
        if !engaged {
            debug!("userLeft({}) does not concern the active link", peer_id);
            return;
        }

        info!("Peer {} left; closing peer link", peer_id);
        if let Some(link) = self.link.take() {
            self.release_link(link).await;
        }
    }

    async fn on_offer(&mut self, offer: SessionDescription) {
        let Some(membership) = self.membership.clone() else {
            warn!("Offer ignored: no room membership");
            return;
        };

        if !offer.is_offer() {
            warn!("Offer event carried a {:?} description; ignored", offer.kind);
            return;
        }

        if self.link.is_none() {
            info!("Offer received before call start; setting up call");
            if !self.start_call().await {
                return;
            }
        }

        let Some(link) = self.link.as_mut() else {
            return;
        };
        if link.awaiting_answer {
            warn!("Offer received while our own offer is pending");
        }
        let engine = link.engine.clone();

        let remote_engine = engine.clone();
        let applied = self
            .interruptible(async move { remote_engine.set_remote_description(offer).await })
            .await;
        match applied {
            None => return,
            Some(Err(e)) => {
                warn!("Failed to apply remote offer: {:?}", e);
                return;
            }
            Some(Ok(())) => {}
        }

        if let Some(link) = self.link.as_mut() {
            link.has_remote_description = true;
        }
        if !self.flush_pending_candidates().await {
            return;
        }

        let step = async move {
            let answer = engine.create_answer().await?;
            engine.set_local_description(answer.clone()).await?;
            Ok::<_, anyhow::Error>(answer)
        };

        match self.interruptible(step).await {
            None => {}
            Some(Err(e)) => warn!("Failed to answer remote offer: {:?}", e),
            Some(Ok(answer)) => {
                if let Some(link) = self.link.as_mut() {
                    link.role = Some(LinkRole::Responder);
                    link.awaiting_answer = false;
                }
                info!("Sending answer");
                self.send(ClientEvent::Answer {
                    answer,
                    room_id: membership.room,
                })
                .await;
                self.set_link_state(LinkState::Connected);
            }
        }
    }

    async fn on_answer(&mut self, answer: SessionDescription) {
        let Some(link) = self.link.as_ref() else {
            warn!("Answer ignored: no peer link");
            return;
        };

        if !link.awaiting_answer || link.has_remote_description {
            warn!("Answer ignored: no pending local offer");
            return;
        }

        let engine = link.engine.clone();
        let applied = self
            .interruptible(async move { engine.set_remote_description(answer).await })
            .await;

        match applied {
            None => {}
            Some(Err(e)) => warn!("Failed to apply remote answer: {:?}", e),
            Some(Ok(())) => {
                if let Some(link) = self.link.as_mut() {
                    link.awaiting_answer = false;
                    link.has_remote_description = true;
                }
                self.set_link_state(LinkState::Connected);
                self.flush_pending_candidates().await;
            }
        }
    }

    async fn on_candidate(&mut self, candidate: IceCandidate) {
        let ready = self
            .link
            .as_ref()
            .is_some_and(|link| link.has_remote_description);

        if self.link.is_none() && self.link_state == LinkState::Closed {
            debug!("Dropping ICE candidate: it belongs to a closed peer link");
            return;
        }

        if !ready {
            debug!("Buffering ICE candidate until a remote description is applied");
            self.pending_candidates.push_back(candidate);
            return;
        }

        self.apply_candidate(candidate).await;
    }

    fn on_receive_message(&mut self, message: ChatMessage) {
        debug!("Chat message from {}", message.user);
        self.chat.push(message);
        self.emit(CallEvent::MessagesUpdated(self.chat.messages()));
    }

    async fn on_room_full(&mut self, room_id: RoomId) {
        let is_ours = self
            .membership
            .as_ref()
            .is_some_and(|membership| membership.room == room_id);
        if !is_ours {
            return;
        }

        warn!("Room '{}' is full; dropping membership", room_id);
        if let Some(link) = self.link.take() {
            self.release_link(link).await;
        }
        self.membership = None;
        self.emit(CallEvent::RoomFull(room_id));
    }

    async fn handle_relay_disconnect(&mut self) {
        if let Some(link) = self.link.take() {
            self.release_link(link).await;
        }
        self.membership = None;
        self.pending_candidates.clear();
        self.emit(CallEvent::RelayDisconnected);
    }

    /// Applies buffered candidates in arrival order. Returns `false` when a
    /// teardown interrupted the flush.
    async fn flush_pending_candidates(&mut self) -> bool {
        while let Some(candidate) = self.pending_candidates.pop_front() {
            if !self.apply_candidate(candidate).await {
                return false;
            }
        }
        true
    }

    /// Candidate rejection is expected on real networks and only logged.
    async fn apply_candidate(&mut self, candidate: IceCandidate) -> bool {
        let Some(link) = &self.link else {
            return false;
        };
        let engine = link.engine.clone();

        match self
            .interruptible(async move { engine.add_ice_candidate(candidate).await })
            .await
        {
            None => false,
            Some(Err(e)) => {
                warn!("Error adding received ICE candidate: {:?}", e);
                true
            }
            Some(Ok(())) => {
                debug!("Remote ICE candidate applied");
                true
            }
        }
    }

    async fn release_link(&mut self, link: PeerLink) {
        if let Err(e) = link.engine.close().await {
            warn!("Failed to close peer link: {:?}", e);
        }
        link.media.stop_all();
        self.pending_candidates.clear();
        if !link.remote_tracks.is_empty() {
            self.emit(CallEvent::RemoteMediaCleared);
        }
        self.set_link_state(LinkState::Closed);
    }

    /// Awaits one suspension point of a negotiation.
    ///
    /// Intents arriving meanwhile are queued and handled afterwards in order.
    /// A teardown intent abandons the step: the future is dropped and `None`
    /// is returned.
    async fn interruptible<F>(&mut self, step: F) -> Option<F::Output>
    where
        F: Future,
    {
        tokio::pin!(step);

        loop {
            if self.commands_closed {
                return Some(step.await);
            }

            tokio::select! {
                biased;

                out = &mut step => return Some(out),

                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(CallCommand::Snapshot(reply)) => {
                            let _ = reply.send(self.snapshot());
                        }
                        Some(c) if c.is_teardown() => {
                            info!("Teardown requested mid-negotiation; abandoning step");
                            self.deferred.push_back(c);
                            return None;
                        }
                        Some(c) => self.deferred.push_back(c),
                        None => self.commands_closed = true,
                    }
                }
            }
        }
    }

    fn snapshot(&self) -> CoordinatorSnapshot {
        CoordinatorSnapshot {
            membership: self.membership.clone(),
            link_state: self.link_state,
            messages: self.chat.messages(),
            pending_candidates: self.pending_candidates.len(),
        }
    }

    fn set_link_state(&mut self, state: LinkState) {
        if self.link_state == state {
            return;
        }
        info!("Peer link {} -> {}", self.link_state, state);
        self.link_state = state;
        self.emit(CallEvent::LinkStateChanged(state));
    }

    fn emit(&self, event: CallEvent) {
        let _ = self.events_tx.send(event);
    }

    async fn send(&self, event: ClientEvent) {
        if let Err(e) = self.signaling.send(event).await {
            error!("Failed to send signal to relay: {}", e);
        }
    }
}

async fn next_engine_event(link: &mut Option<PeerLink>) -> Option<EngineEvent> {
    match link {
        Some(link) => link.events.recv().await,
        None => std::future::pending().await,
    }
}
