macro_rules! impl_client_methods {
    ($client_name:ident, $entity:ty, $error:ty, $entity_name_snake:ident) => {
        paste::paste! {
            impl $client_name {
                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $entity_name_snake>](
                    &self,
                    id: $crate::domain::RecordId,
                ) -> Result<$entity, $error> {
                    tracing::debug!("Sending request");
                    self.inner.get(id).await.map_err(<$error>::from)
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<list_ $entity_name_snake s>](
                    &self,
                    query: $crate::query::ListQuery<<$entity as $crate::actor_framework::Entity>::Status>,
                ) -> Result<$crate::query::Page<$entity>, $error> {
                    tracing::debug!("Sending request");
                    self.inner.list(query).await.map_err(<$error>::from)
                }

                #[tracing::instrument(skip(self))]
                pub async fn status_counts(
                    &self,
                ) -> Result<
                    $crate::query::StatusCounts<<$entity as $crate::actor_framework::Entity>::Status>,
                    $error,
                > {
                    tracing::debug!("Sending request");
                    self.inner.status_counts().await.map_err(<$error>::from)
                }

                #[tracing::instrument(skip(self))]
                pub async fn transition(
                    &self,
                    id: $crate::domain::RecordId,
                    action: $crate::domain::StatusAction,
                ) -> Result<$entity, $error> {
                    tracing::debug!("Sending request");
                    self.inner.transition(id, action).await.map_err(<$error>::from)
                }

                #[tracing::instrument(skip(self, records), fields(record_count = records.len()))]
                pub async fn seed(&self, records: Vec<$entity>) -> Result<usize, $error> {
                    tracing::debug!("Sending request");
                    self.inner.seed(records).await.map_err(<$error>::from)
                }

                #[tracing::instrument(skip(self))]
                pub async fn shutdown(&self) -> Result<(), $error> {
                    tracing::debug!("Sending shutdown request");
                    self.inner.shutdown().await.map_err(<$error>::from)
                }
            }
        }
    };
}

macro_rules! impl_client_new {
    ($client_name:ident, $entity:ty) => {
        impl $client_name {
            pub fn new(inner: $crate::actor_framework::ResourceClient<$entity>) -> Self {
                Self { inner }
            }
        }
    };
}

macro_rules! impl_basic_client {
    ($client_name:ident, $entity:ty, $error:ty, $entity_name_snake:ident) => {
        impl_client_new!($client_name, $entity);
        impl_client_methods!($client_name, $entity, $error, $entity_name_snake);
    };
}
