use crate::framework::{FrameworkError, StateClient, StoreEntity};
use async_trait::async_trait;
use tokio::sync::watch;

/// Trait for state-specific clients to inherit the standard read operations.
///
/// Domain clients only add their typed actions; reading and observing the
/// state works the same way for every actor.
#[async_trait]
pub trait ActorClient<T: StoreEntity>: Send + Sync {
    /// The state-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic StateClient.
    fn inner(&self) -> &StateClient<T>;

    /// Map framework errors to the specific error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch a copy of the committed state.
    #[tracing::instrument(skip(self))]
    async fn snapshot(&self) -> Result<T, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().snapshot().await.map_err(Self::map_error)
    }

    /// Observe every committed state, starting with the current one.
    fn subscribe(&self) -> watch::Receiver<T> {
        self.inner().subscribe()
    }
}

/// Recovers the entity's own error from [`FrameworkError::EntityError`].
///
/// Returns the framework error unchanged when it carries something else.
pub(crate) fn entity_error<E>(e: FrameworkError) -> Result<E, FrameworkError>
where
    E: std::error::Error + Send + Sync + 'static,
{
    match e {
        FrameworkError::EntityError(inner) => inner
            .downcast::<E>()
            .map(|err| *err)
            .map_err(FrameworkError::EntityError),
        other => Err(other),
    }
}
