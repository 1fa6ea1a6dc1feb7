use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{RecordId, StatusAction, User, UserCreate};
use crate::user_actor::UserError;

/// Client for interacting with the User store actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl_basic_client!(UserClient, User, UserError, user);

impl UserClient {
    /// Registers a new user, who starts Active.
    #[instrument(skip(self, params), fields(user_name = %params.name, user_email = %params.email))]
    pub async fn register_user(&self, params: UserCreate) -> Result<User, UserError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(UserError::from)
    }

    #[instrument(skip(self))]
    pub async fn suspend_user(&self, id: RecordId) -> Result<User, UserError> {
        self.transition(id, StatusAction::Suspend).await
    }

    #[instrument(skip(self))]
    pub async fn activate_user(&self, id: RecordId) -> Result<User, UserError> {
        self.transition(id, StatusAction::Activate).await
    }
}
