use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::backend::StudioBackend;
use crate::effect::Effect;
use crate::error::{Result, StudioError};
use crate::message::{Command, Message};
use crate::state::SessionState;
use crate::update::update;

/// Inbox capacity; senders wait when the controller falls behind
const INBOX_CAPACITY: usize = 32;

enum Envelope {
    /// User command; `applied` fires once its transition is published
    Command {
        command: Command,
        applied: oneshot::Sender<()>,
    },
    /// Effect completion
    Completion(Message),
}

/// Task that owns the [`SessionState`]
///
/// Commands and effect completions share one inbox, so the state is only
/// ever written by [`update`] on this task.
pub struct StudioRuntime {
    backend: Arc<dyn StudioBackend>,
    state: SessionState,
    inbox: mpsc::Receiver<Envelope>,
    completions: mpsc::WeakSender<Envelope>,
    snapshots: watch::Sender<SessionState>,
}

impl StudioRuntime {
    /// Start the controller on the current tokio runtime
    ///
    /// The task ends once every [`StudioHandle`] is dropped and no effect
    /// is still running.
    pub fn spawn(backend: Arc<dyn StudioBackend>, default_prompt: impl Into<String>) -> (StudioHandle, JoinHandle<()>) {
        let state = SessionState::new(default_prompt);
        let (sender, inbox) = mpsc::channel(INBOX_CAPACITY);
        let (snapshots, receiver) = watch::channel(state.clone());

        let runtime = Self {
            backend,
            state,
            inbox,
            completions: sender.downgrade(),
            snapshots,
        };

        let task = tokio::spawn(runtime.run());

        let handle = StudioHandle {
            commands: sender,
            snapshots: receiver,
        };

        (handle, task)
    }

    async fn run(mut self) {
        tracing::debug!("studio runtime started");

        while let Some(envelope) = self.inbox.recv().await {
            let (message, applied) = match envelope {
                Envelope::Command { command, applied } => (Message::Command(command), Some(applied)),
                Envelope::Completion(message) => (message, None),
            };

            if let Some(effect) = update(&mut self.state, message) {
                self.spawn_effect(effect);
            }

            self.snapshots.send_replace(self.state.clone());

            if let Some(applied) = applied {
                // The dispatcher may have given up waiting
                let _ = applied.send(());
            }
        }

        tracing::debug!("studio runtime stopped");
    }

    fn spawn_effect(&self, effect: Effect) {
        let Some(completions) = self.completions.upgrade() else {
            return;
        };

        let backend = Arc::clone(&self.backend);
        tracing::debug!(token = %effect.token(), "running effect");

        tokio::spawn(async move {
            let message = effect.execute(backend.as_ref()).await;

            if completions.send(Envelope::Completion(message)).await.is_err() {
                tracing::debug!("studio runtime gone, dropping effect result");
            }
        });
    }
}

/// Cloneable front end of a running [`StudioRuntime`]
#[derive(Clone)]
pub struct StudioHandle {
    commands: mpsc::Sender<Envelope>,
    snapshots: watch::Receiver<SessionState>,
}

impl StudioHandle {
    /// Send a command and wait until its transition is visible in [`Self::state`]
    pub async fn dispatch(&self, command: Command) -> Result<()> {
        let (applied, done) = oneshot::channel();

        self.commands
            .send(Envelope::Command { command, applied })
            .await
            .map_err(|_| StudioError::Stopped)?;

        done.await.map_err(|_| StudioError::Stopped)
    }

    /// Latest published state
    pub fn state(&self) -> SessionState {
        self.snapshots.borrow().clone()
    }

    /// Receiver that wakes on every state change
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.snapshots.clone()
    }

    /// Wait until the session is no longer loading
    pub async fn settled(&self) -> Result<SessionState> {
        let mut snapshots = self.snapshots.clone();

        let state = snapshots
            .wait_for(|state| !state.is_loading())
            .await
            .map_err(|_| StudioError::Stopped)?;

        Ok(state.clone())
    }
}
