use std::fmt::Debug;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, instrument};

use crate::error::FrameworkError;
use crate::storage::Repository;

// =============================================================================
// 1. THE ABSTRACTION (Persisted record with lifecycle hooks and actions)
// =============================================================================

/// A record kind persisted under a single key and owned by one [`RecordActor`].
pub trait Record: Clone + Send + Sync + 'static {
    /// Name used in logs and errors.
    const NAME: &'static str;

    type Action: Send + Debug;
    type ActionResult: Send + Debug;
    type Error: std::error::Error + From<FrameworkError> + Send + 'static;

    // --- Persistence hooks ---

    fn load(repo: &dyn Repository) -> Result<Option<Self>, FrameworkError>;
    fn save(&self, repo: &dyn Repository) -> Result<(), FrameworkError>;

    fn clear(_repo: &dyn Repository) -> Result<(), FrameworkError> {
        Err(FrameworkError::Unsupported {
            record: Self::NAME,
            operation: "clear",
        })
    }

    /// What readers and actions see when nothing is stored.
    fn vacant() -> Option<Self> {
        None
    }

    /// A retired record is removed from the store instead of saved.
    fn is_retired(&self) -> bool {
        false
    }

    // --- Action handler ---

    /// Handle a domain-specific action. Runs against a draft; an error leaves
    /// the stored record untouched.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T, E> = oneshot::Sender<Result<T, E>>;

pub enum RecordRequest<R: Record> {
    Get {
        respond_to: Response<Option<R>, R::Error>,
    },
    Replace {
        record: R,
        respond_to: Response<(), R::Error>,
    },
    Clear {
        respond_to: Response<(), R::Error>,
    },
    Action {
        action: R::Action,
        respond_to: Response<R::ActionResult, R::Error>,
    },
    Shutdown,
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct RecordActor<R: Record> {
    receiver: mpsc::Receiver<RecordRequest<R>>,
    repository: Arc<dyn Repository>,
    current: Option<R>,
}

impl<R: Record> RecordActor<R> {
    /// Loads the record through `repository` and returns the actor with its client.
    pub fn new(
        buffer_size: usize,
        repository: Arc<dyn Repository>,
    ) -> Result<(Self, RecordClient<R>), FrameworkError> {
        let current = R::load(repository.as_ref())?;
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            repository,
            current,
        };
        Ok((actor, RecordClient::new(sender)))
    }

    #[instrument(name = "record_actor", skip(self), fields(record = R::NAME))]
    pub async fn run(mut self) {
        info!(stored = self.current.is_some(), "Record actor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                RecordRequest::Get { respond_to } => {
                    let _ = respond_to.send(Ok(self.current.clone().or_else(R::vacant)));
                }
                RecordRequest::Replace { record, respond_to } => {
                    let _ = respond_to.send(self.handle_replace(record));
                }
                RecordRequest::Clear { respond_to } => {
                    let _ = respond_to.send(self.handle_clear());
                }
                RecordRequest::Action { action, respond_to } => {
                    let _ = respond_to.send(self.handle_action(action));
                }
                RecordRequest::Shutdown => {
                    info!("Record actor shutting down");
                    break;
                }
            }
        }
        info!("Record actor stopped");
    }

    fn handle_replace(&mut self, record: R) -> Result<(), R::Error> {
        debug!("Replacing record");
        self.commit(record)?;
        Ok(())
    }

    fn handle_clear(&mut self) -> Result<(), R::Error> {
        debug!("Clearing record");
        R::clear(self.repository.as_ref())?;
        self.current = None;
        Ok(())
    }

    fn handle_action(&mut self, action: R::Action) -> Result<R::ActionResult, R::Error> {
        debug!(?action, "Applying action");
        let mut draft = self
            .current
            .clone()
            .or_else(R::vacant)
            .ok_or(FrameworkError::NotFound(R::NAME))?;
        let result = draft.handle_action(action)?;
        self.commit(draft)?;
        Ok(result)
    }

    /// Persists `record` and only then makes it the in-memory copy.
    fn commit(&mut self, record: R) -> Result<(), FrameworkError> {
        let outcome = if record.is_retired() {
            R::clear(self.repository.as_ref()).map(|()| None)
        } else {
            record.save(self.repository.as_ref()).map(|()| Some(record))
        };
        match outcome {
            Ok(next) => {
                self.current = next;
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Failed to persist record");
                Err(e)
            }
        }
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

pub struct RecordClient<R: Record> {
    sender: mpsc::Sender<RecordRequest<R>>,
}

impl<R: Record> Clone for RecordClient<R> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<R: Record> RecordClient<R> {
    pub fn new(sender: mpsc::Sender<RecordRequest<R>>) -> Self {
        Self { sender }
    }

    pub async fn get(&self) -> Result<Option<R>, R::Error> {
        self.request(|respond_to| RecordRequest::Get { respond_to }).await
    }

    pub async fn replace(&self, record: R) -> Result<(), R::Error> {
        self.request(|respond_to| RecordRequest::Replace { record, respond_to })
            .await
    }

    pub async fn clear(&self) -> Result<(), R::Error> {
        self.request(|respond_to| RecordRequest::Clear { respond_to }).await
    }

    pub async fn perform_action(&self, action: R::Action) -> Result<R::ActionResult, R::Error> {
        self.request(|respond_to| RecordRequest::Action { action, respond_to })
            .await
    }

    pub async fn shutdown(&self) -> Result<(), R::Error> {
        self.sender
            .send(RecordRequest::Shutdown)
            .await
            .map_err(|_| FrameworkError::ActorClosed(R::NAME))?;
        Ok(())
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(Response<T, R::Error>) -> RecordRequest<R>,
    ) -> Result<T, R::Error> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed(R::NAME))?;
        response
            .await
            .map_err(|_| FrameworkError::ActorDropped(R::NAME))?
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
