use crate::coordinator::{CallCommand, CoordinatorSnapshot};
use crate::error::CallError;
use tandem_core::RoomId;
use tokio::sync::{mpsc, oneshot};

/// Cloneable entry point for user intents. Every call only enqueues the
/// intent; results surface as `CallEvent`s.
#[derive(Clone)]
pub struct CoordinatorHandle {
    command_tx: mpsc::Sender<CallCommand>,
}

impl CoordinatorHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<CallCommand>) -> Self {
        Self { command_tx }
    }

    pub async fn join(
        &self,
        room: impl Into<RoomId>,
        user: impl Into<String>,
    ) -> Result<(), CallError> {
        self.send(CallCommand::Join {
            room: room.into(),
            user: user.into(),
        })
        .await
    }

    pub async fn start_call(&self) -> Result<(), CallError> {
        self.send(CallCommand::StartCall).await
    }

    pub async fn stop_call(&self) -> Result<(), CallError> {
        self.send(CallCommand::StopCall).await
    }

    pub async fn leave(&self) -> Result<(), CallError> {
        self.send(CallCommand::Leave).await
    }

    pub async fn send_message(&self, text: impl Into<String>) -> Result<(), CallError> {
        self.send(CallCommand::SendMessage { text: text.into() })
            .await
    }

    pub async fn snapshot(&self) -> Result<CoordinatorSnapshot, CallError> {
        let (tx, rx) = oneshot::channel();
        self.send(CallCommand::Snapshot(tx)).await?;
        rx.await.map_err(|_| CallError::CoordinatorStopped)
    }

    async fn send(&self, cmd: CallCommand) -> Result<(), CallError> {
        self.command_tx
            .send(cmd)
            .await
            .map_err(|_| CallError::CoordinatorStopped)
    }
}
