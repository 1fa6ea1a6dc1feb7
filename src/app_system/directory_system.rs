use tracing::{error, info, warn};

use super::config::DirectoryConfig;
use super::error::SystemError;
use super::seed::{DirectorySeed, SeedSummary};
use crate::actor_framework::ResourceActor;
use crate::clients::{UserClient, VendorClient};
use crate::directory::{DirectoryError, DirectoryService};
use crate::domain::{User, Vendor};
use crate::query::PageLimits;

/// The application system that owns both directory stores.
///
/// Responsible for starting the store actors, seeding them, handing out
/// clients and shutting the actors down.
pub struct DirectorySystem {
    pub user_client: UserClient,
    pub vendor_client: VendorClient,
    page_limits: PageLimits,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl DirectorySystem {
    /// Spawns empty user and vendor stores. Must run inside a tokio runtime.
    pub fn new(config: &DirectoryConfig) -> Self {
        info!("Starting directory system");

        let (user_actor, user_resource_client) =
            ResourceActor::<User>::new(config.channel_capacity());
        let user_client = UserClient::new(user_resource_client);
        let user_handle = tokio::spawn(user_actor.run());

        let (vendor_actor, vendor_resource_client) =
            ResourceActor::<Vendor>::new(config.channel_capacity());
        let vendor_client = VendorClient::new(vendor_resource_client);
        let vendor_handle = tokio::spawn(vendor_actor.run());

        Self {
            user_client,
            vendor_client,
            page_limits: config.page_limits(),
            handles: vec![user_handle, vendor_handle],
        }
    }

    /// Starts the system and loads the configured seed file, if any.
    pub async fn start(config: &DirectoryConfig) -> Result<Self, SystemError> {
        let system = Self::new(config);
        if let Some(path) = config.seed_path() {
            let seed = DirectorySeed::from_path(path).await?;
            if seed.is_empty() {
                warn!(path = %path.display(), "Seed file holds no records");
            }
            let summary = system.seed(seed).await?;
            info!(users = summary.users, vendors = summary.vendors, "Directory seeded");
        }
        Ok(system)
    }

    /// Loads externally supplied records into both stores.
    pub async fn seed(&self, seed: DirectorySeed) -> Result<SeedSummary, DirectoryError> {
        let users = self.user_client.seed(seed.users).await?;
        let vendors = self.vendor_client.seed(seed.vendors).await?;
        Ok(SeedSummary { users, vendors })
    }

    /// Facade over both stores for the presentation layer.
    pub fn service(&self) -> DirectoryService {
        DirectoryService::new(
            self.user_client.clone(),
            self.vendor_client.clone(),
            self.page_limits,
        )
    }

    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down directory system...");

        // Outstanding clones of the clients may still exist, so ask each
        // actor to stop instead of relying on channel closure.
        if let Err(e) = self.user_client.shutdown().await {
            error!(error = %e, "User store already stopped");
        }
        if let Err(e) = self.vendor_client.shutdown().await {
            error!(error = %e, "Vendor store already stopped");
        }

        let mut first_failure = None;
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                first_failure.get_or_insert(SystemError::ActorFailed(e.to_string()));
            }
        }

        match first_failure {
            Some(failure) => Err(failure),
            None => {
                info!("System shutdown complete.");
                Ok(())
            }
        }
    }
}
