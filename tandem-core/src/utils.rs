/// Room every client joins unless configured otherwise.
pub const DEFAULT_ROOM: &str = "default";

pub const DEFAULT_STUN_ADDR: &str = "stun:stun.l.google.com:19302";

/// A room holds at most this many active participants. The offer/answer
/// asymmetry only avoids glare for two parties.
pub const MAX_ROOM_MEMBERS: usize = 2;
