use crate::actor_framework::{Entity, FrameworkError};
use crate::domain::{EntityKind, RecordId, StatusAction, User, UserCreate, UserStatus};

impl Entity for User {
    const KIND: EntityKind = EntityKind::User;

    type Status = UserStatus;
    type CreateParams = UserCreate;

    fn id(&self) -> RecordId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn email(&self) -> &str {
        &self.email
    }

    fn status(&self) -> UserStatus {
        self.status
    }

    /// Registers a new user. Registered users start Active.
    fn from_create_params(id: RecordId, params: UserCreate) -> Result<Self, FrameworkError> {
        Ok(Self {
            id,
            name: params.name.trim().to_string(),
            email: params.email.trim().to_string(),
            joined_on: params.joined_on,
            status: UserStatus::Active,
        })
    }

    /// User accounts toggle between Active and Suspended. There is no
    /// approval step for users.
    fn next_status(current: UserStatus, action: StatusAction) -> Option<UserStatus> {
        match (current, action) {
            (UserStatus::Active, StatusAction::Suspend) => Some(UserStatus::Suspended),
            (UserStatus::Suspended, StatusAction::Activate) => Some(UserStatus::Active),
            _ => None,
        }
    }

    fn set_status(&mut self, status: UserStatus) {
        self.status = status;
    }
}
