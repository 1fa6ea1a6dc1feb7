use std::collections::{BTreeMap, HashSet};
use std::fmt::Debug;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

use crate::domain::{EntityKind, RecordId, RecordStatus, StatusAction};
use crate::query::{ListQuery, Page, StatusCounts};

// =============================================================================
// 1. THE ABSTRACTION (Trait with Hooks and a Transition Table)
// =============================================================================

/// Trait that any directory record must implement to be held by a ResourceActor
pub trait Entity: Clone + Debug + Send + Sync + 'static {
    const KIND: EntityKind;

    type Status: RecordStatus;
    type CreateParams: Send + Sync + Debug;

    fn id(&self) -> RecordId;
    fn name(&self) -> &str;
    fn email(&self) -> &str;
    fn status(&self) -> Self::Status;

    /// Construct the full record from a freshly allocated ID and the intake payload
    fn from_create_params(id: RecordId, params: Self::CreateParams) -> Result<Self, FrameworkError>;

    // --- Lifecycle Hooks ---

    /// Runs before a created or seeded record enters the store.
    fn on_create(&self) -> Result<(), FrameworkError> {
        validate_contact(self.name(), self.email())
    }

    // --- Transition Table ---

    /// Legal-transition table: the status reached by applying `action` to
    /// `current`, or `None` when the pair is not in the table.
    fn next_status(current: Self::Status, action: StatusAction) -> Option<Self::Status>;

    /// Writes the status field. Only the actor calls this, after consulting
    /// [`Entity::next_status`].
    fn set_status(&mut self, status: Self::Status);

    /// Actions legal from `current`, in [`StatusAction::ALL`] order.
    fn allowed_actions(current: Self::Status) -> Vec<StatusAction> {
        StatusAction::ALL
            .iter()
            .copied()
            .filter(|action| Self::next_status(current, *action).is_some())
            .collect()
    }
}

/// Shared intake validation for name and email.
pub fn validate_contact(name: &str, email: &str) -> Result<(), FrameworkError> {
    if name.trim().is_empty() {
        return Err(FrameworkError::Validation("name must not be empty".to_string()));
    }
    let mut parts = email.trim().split('@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();
    if local.is_empty() || domain.is_empty() || parts.next().is_some() {
        return Err(FrameworkError::Validation(format!(
            "malformed email address: {email:?}"
        )));
    }
    Ok(())
}

/// Uniqueness key for an email address: trimmed and lower-cased.
fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Errors reported by the generic store actor and its client.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FrameworkError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: RecordId },
    #[error("cannot {action} a {kind} in status {from}")]
    InvalidTransition {
        kind: EntityKind,
        from: String,
        action: StatusAction,
    },
    #[error("validation error: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T>,
    },
    Seed {
        records: Vec<T>,
        respond_to: Response<usize>,
    },
    Get {
        id: RecordId,
        respond_to: Response<T>,
    },
    List {
        query: ListQuery<T::Status>,
        respond_to: Response<Page<T>>,
    },
    Counts {
        respond_to: Response<StatusCounts<T::Status>>,
    },
    Transition {
        id: RecordId,
        action: StatusAction,
        respond_to: Response<T>,
    },
    Shutdown,
    #[cfg(test)]
    Len {
        respond_to: Response<usize>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// Single owner of one entity kind's records.
///
/// Requests are processed one at a time, so a transition is atomic and every
/// later `List` observes it. Records are kept in identifier order.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<RecordId, T>,
    emails: HashSet<String>,
    next_id: u64,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            emails: HashSet::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    #[instrument(name = "resource_actor", skip(self), fields(kind = %T::KIND))]
    pub async fn run(mut self) {
        info!("Store actor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    let _ = respond_to.send(self.handle_create(params));
                }
                ResourceRequest::Seed { records, respond_to } => {
                    let _ = respond_to.send(self.handle_seed(records));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let _ = respond_to.send(self.handle_get(id));
                }
                ResourceRequest::List { query, respond_to } => {
                    let _ = respond_to.send(Ok(self.handle_list(&query)));
                }
                ResourceRequest::Counts { respond_to } => {
                    let _ = respond_to.send(Ok(StatusCounts::tally(self.store.values())));
                }
                ResourceRequest::Transition {
                    id,
                    action,
                    respond_to,
                } => {
                    let _ = respond_to.send(self.handle_transition(id, action));
                }
                ResourceRequest::Shutdown => {
                    info!("Store actor shutting down");
                    break;
                }
                #[cfg(test)]
                ResourceRequest::Len { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.len()));
                }
            }
        }
        info!(record_count = self.store.len(), "Store actor stopped");
    }

    #[instrument(skip(self, params))]
    fn handle_create(&mut self, params: T::CreateParams) -> Result<T, FrameworkError> {
        debug!("Processing create request");
        let id = RecordId::new(self.next_id);
        let Some(next_id) = self.next_id.checked_add(1) else {
            warn!("Identifier space exhausted");
            return Err(FrameworkError::Conflict(format!(
                "no {} identifiers left to allocate",
                T::KIND
            )));
        };
        let record = T::from_create_params(id, params)?;
        record.on_create()?;
        self.ensure_email_free(record.email())?;

        self.next_id = next_id;
        self.emails.insert(email_key(record.email()));
        self.store.insert(id, record.clone());
        info!(record_id = %id, status = %record.status(), "Record created");
        Ok(record)
    }

    /// Inserts externally supplied records with their own identifiers.
    /// The batch is all-or-nothing.
    #[instrument(skip(self, records), fields(batch_size = records.len()))]
    fn handle_seed(&mut self, records: Vec<T>) -> Result<usize, FrameworkError> {
        debug!("Processing seed request");
        let mut batch_ids = HashSet::new();
        let mut batch_emails = HashSet::new();
        for record in &records {
            let id = record.id();
            if id.get() == 0 {
                return Err(FrameworkError::Validation(
                    "record identifiers start at 1".to_string(),
                ));
            }
            if id.get().checked_add(1).is_none() {
                return Err(FrameworkError::Validation(format!(
                    "record identifiers must be below {}",
                    u64::MAX
                )));
            }
            if self.store.contains_key(&id) || !batch_ids.insert(id) {
                return Err(FrameworkError::Conflict(format!(
                    "{} id {} already exists",
                    T::KIND,
                    id
                )));
            }
            record.on_create()?;
            if record.email() != record.email().trim() {
                return Err(FrameworkError::Validation(format!(
                    "email {:?} has surrounding whitespace",
                    record.email()
                )));
            }
            self.ensure_email_free(record.email())?;
            if !batch_emails.insert(email_key(record.email())) {
                return Err(FrameworkError::Conflict(format!(
                    "email {} appears twice in seed batch",
                    record.email()
                )));
            }
        }

        let inserted = records.len();
        for record in records {
            self.next_id = self.next_id.max(record.id().get().saturating_add(1));
            self.emails.insert(email_key(record.email()));
            self.store.insert(record.id(), record);
        }
        info!(inserted, next_id = self.next_id, "Seed batch loaded");
        Ok(inserted)
    }

    #[instrument(fields(record_id = %id), skip(self))]
    fn handle_get(&self, id: RecordId) -> Result<T, FrameworkError> {
        debug!("Processing get request");
        self.store.get(&id).cloned().ok_or_else(|| {
            debug!("Record not found");
            FrameworkError::NotFound { kind: T::KIND, id }
        })
    }

    #[instrument(skip(self))]
    fn handle_list(&self, query: &ListQuery<T::Status>) -> Page<T> {
        debug!("Processing list request");
        let filter = &query.filter;
        let matching = || self.store.values().filter(move |record| filter.matches(*record));

        let total = matching().count() as u64;
        let items: Vec<T> = match &query.pagination {
            Some(pagination) => matching()
                .skip(pagination.offset())
                .take(pagination.limit())
                .cloned()
                .collect(),
            None => matching().cloned().collect(),
        };
        debug!(total, returned = items.len(), "Listed records");
        Page::new(items, total, query.pagination.as_ref())
    }

    #[instrument(fields(record_id = %id), skip(self))]
    fn handle_transition(&mut self, id: RecordId, action: StatusAction) -> Result<T, FrameworkError> {
        debug!("Processing transition request");
        let record = self
            .store
            .get_mut(&id)
            .ok_or(FrameworkError::NotFound { kind: T::KIND, id })?;

        let from = record.status();
        let Some(to) = T::next_status(from, action) else {
            warn!(from = %from, "Transition rejected");
            return Err(FrameworkError::InvalidTransition {
                kind: T::KIND,
                from: from.to_string(),
                action,
            });
        };

        record.set_status(to);
        info!(from = %from, to = %to, "Status transition applied");
        Ok(record.clone())
    }

    fn ensure_email_free(&self, email: &str) -> Result<(), FrameworkError> {
        if self.emails.contains(&email_key(email)) {
            return Err(FrameworkError::Conflict(format!(
                "{} email {} is already registered",
                T::KIND,
                email
            )));
        }
        Ok(())
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    pub(crate) fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn seed(&self, records: Vec<T>) -> Result<usize, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Seed { records, respond_to })
            .await
    }

    pub async fn get(&self, id: RecordId) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self, query: ListQuery<T::Status>) -> Result<Page<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { query, respond_to })
            .await
    }

    pub async fn status_counts(&self) -> Result<StatusCounts<T::Status>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Counts { respond_to })
            .await
    }

    pub async fn transition(&self, id: RecordId, action: StatusAction) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Transition {
            id,
            action,
            respond_to,
        })
        .await
    }

    /// Asks the actor to stop. Requests sent afterwards fail with `ActorClosed`.
    pub async fn shutdown(&self) -> Result<(), FrameworkError> {
        self.sender
            .send(ResourceRequest::Shutdown)
            .await
            .map_err(|_| FrameworkError::ActorClosed)
    }

    #[cfg(test)]
    pub async fn len(&self) -> Result<usize, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Len { respond_to })
            .await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ParseValueError;
    use crate::query::{ListFilter, Pagination, PageLimits};
    use std::fmt;
    use std::str::FromStr;

    // --- Domain Definition ---

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum BadgeStatus {
        Issued,
        Revoked,
    }

    impl fmt::Display for BadgeStatus {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{self:?}")
        }
    }

    impl FromStr for BadgeStatus {
        type Err = ParseValueError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s {
                "issued" => Ok(BadgeStatus::Issued),
                "revoked" => Ok(BadgeStatus::Revoked),
                _ => Err(ParseValueError::new("badge status", s)),
            }
        }
    }

    impl RecordStatus for BadgeStatus {
        const ALL: &'static [Self] = &[BadgeStatus::Issued, BadgeStatus::Revoked];

        fn as_str(&self) -> &'static str {
            match self {
                BadgeStatus::Issued => "issued",
                BadgeStatus::Revoked => "revoked",
            }
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Badge {
        id: RecordId,
        holder: String,
        email: String,
        status: BadgeStatus,
    }

    #[derive(Debug)]
    struct BadgeCreate {
        holder: String,
        email: String,
    }

    impl Entity for Badge {
        const KIND: EntityKind = EntityKind::User;
        type Status = BadgeStatus;
        type CreateParams = BadgeCreate;

        fn id(&self) -> RecordId {
            self.id
        }
        fn name(&self) -> &str {
            &self.holder
        }
        fn email(&self) -> &str {
            &self.email
        }
        fn status(&self) -> BadgeStatus {
            self.status
        }

        fn from_create_params(id: RecordId, params: BadgeCreate) -> Result<Self, FrameworkError> {
            Ok(Self {
                id,
                holder: params.holder,
                email: params.email,
                status: BadgeStatus::Issued,
            })
        }

        fn next_status(current: BadgeStatus, action: StatusAction) -> Option<BadgeStatus> {
            match (current, action) {
                (BadgeStatus::Issued, StatusAction::Suspend) => Some(BadgeStatus::Revoked),
                _ => None,
            }
        }

        fn set_status(&mut self, status: BadgeStatus) {
            self.status = status;
        }
    }

    fn badge(id: u64, holder: &str, status: BadgeStatus) -> Badge {
        Badge {
            id: RecordId::new(id),
            holder: holder.to_string(),
            email: format!("{}@example.com", holder.to_lowercase()),
            status,
        }
    }

    fn start() -> ResourceClient<Badge> {
        let (actor, client) = ResourceActor::new(10);
        tokio::spawn(actor.run());
        client
    }

    // --- Tests ---

    #[tokio::test]
    async fn test_resource_actor_with_transitions() {
        let client = start();

        let created = client
            .create(BadgeCreate {
                holder: "Alice".into(),
                email: "alice@example.com".into(),
            })
            .await
            .unwrap();
        assert_eq!(created.id, RecordId::new(1));

        let revoked = client.transition(created.id, StatusAction::Suspend).await.unwrap();
        assert_eq!(revoked.status, BadgeStatus::Revoked);

        let again = client.transition(created.id, StatusAction::Suspend).await;
        assert_eq!(
            again,
            Err(FrameworkError::InvalidTransition {
                kind: EntityKind::User,
                from: "Revoked".to_string(),
                action: StatusAction::Suspend,
            })
        );
        assert_eq!(client.get(created.id).await.unwrap(), revoked);
    }

    #[tokio::test]
    async fn seeded_ids_are_never_reallocated() {
        let client = start();
        client
            .seed(vec![badge(7, "Gus", BadgeStatus::Issued), badge(3, "Cy", BadgeStatus::Revoked)])
            .await
            .unwrap();

        let created = client
            .create(BadgeCreate {
                holder: "Dee".into(),
                email: "dee@example.com".into(),
            })
            .await
            .unwrap();
        assert_eq!(created.id, RecordId::new(8));
    }

    #[tokio::test]
    async fn identifier_upper_bound_is_enforced_without_stopping_the_actor() {
        let client = start();
        let result = client.seed(vec![badge(u64::MAX, "Max", BadgeStatus::Issued)]).await;
        assert!(matches!(result, Err(FrameworkError::Validation(_))));
        assert_eq!(client.len().await.unwrap(), 0);

        client
            .seed(vec![badge(u64::MAX - 1, "Last", BadgeStatus::Issued)])
            .await
            .unwrap();
        let result = client
            .create(BadgeCreate {
                holder: "Late".into(),
                email: "late@example.com".into(),
            })
            .await;
        assert!(matches!(result, Err(FrameworkError::Conflict(_))));
        assert_eq!(client.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn seeded_emails_are_unique_after_trimming() {
        let client = start();
        let mut padded = badge(1, "Ann", BadgeStatus::Issued);
        padded.email = " ann@example.com ".to_string();
        let result = client.seed(vec![padded]).await;
        assert!(matches!(result, Err(FrameworkError::Validation(_))));

        client.seed(vec![badge(1, "Ann", BadgeStatus::Issued)]).await.unwrap();
        let result = client
            .create(BadgeCreate {
                holder: "Other Ann".into(),
                email: "  Ann@Example.com ".into(),
            })
            .await;
        assert!(matches!(result, Err(FrameworkError::Conflict(_))));
        assert_eq!(client.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn seed_batch_is_all_or_nothing() {
        let client = start();
        let result = client
            .seed(vec![
                badge(1, "Ann", BadgeStatus::Issued),
                badge(2, "Bo", BadgeStatus::Issued),
                badge(1, "Cat", BadgeStatus::Issued),
            ])
            .await;
        assert!(matches!(result, Err(FrameworkError::Conflict(_))));
        assert_eq!(client.len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict_regardless_of_case() {
        let client = start();
        client.seed(vec![badge(1, "Ann", BadgeStatus::Issued)]).await.unwrap();
        let result = client
            .create(BadgeCreate {
                holder: "Annie".into(),
                email: "ANN@example.com".into(),
            })
            .await;
        assert!(matches!(result, Err(FrameworkError::Conflict(_))));
    }

    #[tokio::test]
    async fn malformed_intake_is_rejected_without_burning_an_id() {
        let client = start();
        let result = client
            .create(BadgeCreate {
                holder: "  ".into(),
                email: "x@example.com".into(),
            })
            .await;
        assert!(matches!(result, Err(FrameworkError::Validation(_))));

        let created = client
            .create(BadgeCreate {
                holder: "Ok".into(),
                email: "ok@example.com".into(),
            })
            .await
            .unwrap();
        assert_eq!(created.id, RecordId::new(1));
    }

    #[tokio::test]
    async fn list_pages_concatenate_to_full_listing() {
        let client = start();
        let records: Vec<Badge> = (1..=7)
            .map(|i| badge(i, &format!("Holder{i}"), BadgeStatus::Issued))
            .collect();
        client.seed(records.clone()).await.unwrap();

        let limits = PageLimits::default();
        let mut collected = Vec::new();
        for page in 1..=3 {
            let query = ListQuery::all().paged(Pagination::new(page, 3, &limits).unwrap());
            let result = client.list(query).await.unwrap();
            assert_eq!(result.total, 7);
            assert_eq!(result.total_pages, 3);
            collected.extend(result.items);
        }
        assert_eq!(collected, records);

        let past_end = ListQuery::all().paged(Pagination::new(9, 3, &limits).unwrap());
        let result = client.list(past_end).await.unwrap();
        assert!(result.is_empty());
        assert_eq!(result.total, 7);
    }

    #[tokio::test]
    async fn list_filters_by_text_and_status() {
        let client = start();
        client
            .seed(vec![
                badge(1, "Alice", BadgeStatus::Issued),
                badge(2, "Malik", BadgeStatus::Revoked),
                badge(3, "Alina", BadgeStatus::Revoked),
            ])
            .await
            .unwrap();

        let filter = ListFilter::by_status(BadgeStatus::Revoked).with_text("ALI").unwrap();
        let page = client.list(ListQuery::new(filter)).await.unwrap();
        assert_eq!(page.len(), 2);
        let ids: Vec<u64> = page.items.iter().map(|b| b.id.get()).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[tokio::test]
    async fn requests_after_shutdown_fail() {
        let client = start();
        client.shutdown().await.unwrap();
        tokio::task::yield_now().await;
        let result = client.get(RecordId::new(1)).await;
        assert!(matches!(
            result,
            Err(FrameworkError::ActorClosed) | Err(FrameworkError::ActorDropped)
        ));
    }

    #[test]
    fn contact_validation() {
        assert!(validate_contact("Ann", "ann@example.com").is_ok());
        assert!(validate_contact("", "ann@example.com").is_err());
        assert!(validate_contact("Ann", "ann.example.com").is_err());
        assert!(validate_contact("Ann", "@example.com").is_err());
        assert!(validate_contact("Ann", "a@b@c").is_err());
    }
}
