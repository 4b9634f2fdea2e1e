use colored::*;
use tandem_client::{CallEvent, LinkState};
use tandem_core::ChatMessage;

/// Prints only the messages a full log update adds.
#[derive(Debug, Default)]
pub struct ChatView {
    shown: usize,
}

impl ChatView {
    /// `log` is most recent first. Returns the unseen messages oldest first.
    pub fn update<'a>(&mut self, log: &'a [ChatMessage]) -> Vec<&'a ChatMessage> {
        if log.len() < self.shown {
            self.shown = 0;
        }

        let fresh: Vec<&ChatMessage> = log[..log.len() - self.shown].iter().rev().collect();
        self.shown = log.len();
        fresh
    }
}

pub fn render_message(message: &ChatMessage, me: &str) -> String {
    let user = if message.user == me {
        message.user.green().bold()
    } else {
        message.user.cyan().bold()
    };
    format!("{} {}: {}", message.timestamp.dimmed(), user, message.text)
}

/// One status line per call event; chat updates are rendered through
/// [`ChatView`] instead.
pub fn render_event(event: &CallEvent) -> Option<String> {
    let line = match event {
        CallEvent::LinkStateChanged(state) => {
            let text = format!("call {}", state);
            match state {
                LinkState::Connected => text.green().bold(),
                LinkState::Negotiating => text.yellow(),
                LinkState::Closed | LinkState::Absent => text.dimmed(),
            }
        }
        CallEvent::LocalMediaReady { stream_id, tracks } => {
            format!("camera on ({} track(s), stream {})", tracks, stream_id).cyan()
        }
        CallEvent::RemoteMediaAttached(track) => {
            format!("receiving remote {} ({})", track.kind, track.track_id).cyan()
        }
        CallEvent::RemoteMediaCleared => "remote video cleared".dimmed(),
        CallEvent::MediaUnavailable(reason) => {
            format!("camera unavailable: {}", reason).red()
        }
        CallEvent::RoomFull(room) => format!("room '{}' is full", room).red().bold(),
        CallEvent::RelayDisconnected => "lost connection to the relay".red().bold(),
        CallEvent::MessagesUpdated(_) => return None,
    };
    Some(format!("{} {}", "*".bold(), line))
}
