use admin_directory::app_system::{setup_tracing, DirectoryConfig, DirectorySystem};
use admin_directory::domain::EntityKind;
use admin_directory::query::RawListQuery;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = DirectoryConfig::init().map_err(|e| e.to_string())?;
    let system = DirectorySystem::start(&config)
        .await
        .map_err(|e| e.to_string())?;
    let service = system.service();

    for kind in [EntityKind::User, EntityKind::Vendor] {
        match service.status_counts(kind).await {
            Ok(summary) => info!(kind = %kind, total = summary.total, counts = ?summary.counts, "Directory summary"),
            Err(e) => error!(kind = %kind, error = %e, code = e.code(), "Summary failed"),
        }
    }

    let span = tracing::info_span!("pending_vendors");
    let pending = async {
        let query = RawListQuery {
            status: Some("pending".to_string()),
            ..Default::default()
        };
        service.list(EntityKind::Vendor, query).await
    }
    .instrument(span)
    .await;

    match pending {
        Ok(listing) => info!(total = listing.total(), ids = ?listing.ids(), "Vendors awaiting approval"),
        Err(e) => error!(error = %e, code = e.code(), "Listing failed"),
    }

    drop(service);
    system.shutdown().await.map_err(|e| e.to_string())?;

    info!("Application completed successfully");
    Ok(())
}
