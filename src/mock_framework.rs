//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_create`] or [`expect_transition`] to assert behavior.

use crate::actor_framework::{Entity, FrameworkError, ResourceClient, ResourceRequest};
use crate::domain::{RecordId, StatusAction};
use crate::query::{ListQuery, Page};
use tokio::sync::{mpsc, oneshot};

type Responder<R> = oneshot::Sender<Result<R, FrameworkError>>;

/// Creates a mock client and a receiver for asserting requests.
///
/// The client talks to a channel the test owns instead of a live
/// `ResourceActor`, so the test decides every answer.
pub fn create_mock_client<T: Entity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::CreateParams, Responder<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(RecordId, Responder<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(ListQuery<T::Status>, Responder<Page<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::List { query, respond_to }) => Some((query, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Transition request
pub async fn expect_transition<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(RecordId, StatusAction, Responder<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Transition {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{UserClient, VendorClient};
    use crate::domain::{EntityKind, User, UserCreate, UserStatus, Vendor, VendorStatus};
    use crate::query::ListFilter;
    use crate::user_actor::UserError;
    use crate::vendor_actor::VendorError;
    use chrono::NaiveDate;

    fn joined() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[tokio::test]
    async fn test_mock_client() {
        let (inner, mut receiver) = create_mock_client::<User>(10);
        let client = UserClient::new(inner);

        let create_task = tokio::spawn(async move {
            let params = UserCreate::new("Test", "test@example.com", joined());
            client.register_user(params).await
        });

        let (params, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(params.name, "Test");
        let user = User::new(RecordId::new(1), "Test", "test@example.com", joined(), UserStatus::Active);
        responder.send(Ok(user.clone())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok(user));
    }

    #[tokio::test]
    async fn approve_vendor_sends_approve_action() {
        let (inner, mut receiver) = create_mock_client::<Vendor>(10);
        let client = VendorClient::new(inner);

        let task = tokio::spawn(async move { client.approve_vendor(RecordId::new(4)).await });

        let (id, action, responder) = expect_transition(&mut receiver)
            .await
            .expect("Expected Transition request");
        assert_eq!(id, RecordId::new(4));
        assert_eq!(action, StatusAction::Approve);
        responder
            .send(Err(FrameworkError::InvalidTransition {
                kind: EntityKind::Vendor,
                from: VendorStatus::Active.to_string(),
                action,
            }))
            .unwrap();

        let result = task.await.unwrap();
        assert_eq!(
            result,
            Err(VendorError::InvalidTransition {
                from: "Active".to_string(),
                action: StatusAction::Approve,
            })
        );
    }

    #[tokio::test]
    async fn not_found_maps_to_user_error() {
        let (inner, mut receiver) = create_mock_client::<User>(10);
        let client = UserClient::new(inner);

        let task = tokio::spawn(async move { client.get_user(RecordId::new(999)).await });

        let (id, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        responder
            .send(Err(FrameworkError::NotFound {
                kind: EntityKind::User,
                id,
            }))
            .unwrap();

        assert_eq!(task.await.unwrap(), Err(UserError::NotFound(RecordId::new(999))));
    }

    #[tokio::test]
    async fn list_forwards_query_untouched() {
        let (inner, mut receiver) = create_mock_client::<User>(10);
        let client = UserClient::new(inner);

        let filter = ListFilter::by_status(UserStatus::Suspended).with_text("kim").unwrap();
        let expected = ListQuery::new(filter.clone());
        let task = tokio::spawn(async move { client.list_users(ListQuery::new(filter)).await });

        let (query, responder) = expect_list(&mut receiver).await.expect("Expected List request");
        assert_eq!(query, expected);
        responder.send(Ok(Page::new(Vec::new(), 0, None))).unwrap();

        let page = task.await.unwrap().unwrap();
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn dropped_responder_surfaces_as_communication_error() {
        let (inner, mut receiver) = create_mock_client::<User>(10);
        let client = UserClient::new(inner);

        let task = tokio::spawn(async move { client.suspend_user(RecordId::new(1)).await });

        let (_, _, responder) = expect_transition(&mut receiver)
            .await
            .expect("Expected Transition request");
        drop(responder);

        assert!(matches!(
            task.await.unwrap(),
            Err(UserError::ActorCommunicationError(_))
        ));
    }
}
