use dashmap::DashMap;
use tandem_core::{PeerId, RoomId};

/// Result of a `joinRoom`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// Peer is a member; `others` are the members to announce it to.
    Joined { others: Vec<PeerId> },
    Full,
}

/// Room membership, in join order.
pub struct RoomRegistry {
    rooms: DashMap<RoomId, Vec<PeerId>>,
    max_room_size: usize,
}

impl RoomRegistry {
    pub fn new(max_room_size: usize) -> Self {
        Self {
            rooms: DashMap::new(),
            max_room_size,
        }
    }

    /// Adds `peer` unless the room is full. A repeated join by a member is
    /// accepted again so the announcement can be repeated.
    pub fn join(&self, room: &RoomId, peer: &PeerId) -> JoinOutcome {
        let mut members = self.rooms.entry(room.clone()).or_default();

        if !members.contains(peer) {
            if members.len() >= self.max_room_size {
                return JoinOutcome::Full;
            }
            members.push(peer.clone());
        }

        let others = members.iter().filter(|m| *m != peer).cloned().collect();
        JoinOutcome::Joined { others }
    }

    /// Removes `peer` and returns the members left behind, or `None` if it
    /// was not a member.
    pub fn leave(&self, room: &RoomId, peer: &PeerId) -> Option<Vec<PeerId>> {
        let remaining = {
            let mut members = self.rooms.get_mut(room)?;
            let before = members.len();
            members.retain(|m| m != peer);
            if members.len() == before {
                return None;
            }
            members.clone()
        };

        self.rooms.remove_if(room, |_, members| members.is_empty());
        Some(remaining)
    }

    /// Removes `peer` from every room it is in.
    pub fn leave_all(&self, peer: &PeerId) -> Vec<(RoomId, Vec<PeerId>)> {
        let rooms: Vec<RoomId> = self
            .rooms
            .iter()
            .filter(|entry| entry.value().contains(peer))
            .map(|entry| entry.key().clone())
            .collect();

        rooms
            .into_iter()
            .filter_map(|room| {
                let remaining = self.leave(&room, peer)?;
                Some((room, remaining))
            })
            .collect()
    }

    /// Members of `room` other than `peer`. Empty if `peer` is not a member.
    pub fn others(&self, room: &RoomId, peer: &PeerId) -> Vec<PeerId> {
        match self.rooms.get(room) {
            Some(members) if members.contains(peer) => {
                members.iter().filter(|m| *m != peer).cloned().collect()
            }
            _ => Vec::new(),
        }
    }

    pub fn members(&self, room: &RoomId) -> Vec<PeerId> {
        self.rooms
            .get(room)
            .map(|members| members.clone())
            .unwrap_or_default()
    }
}
