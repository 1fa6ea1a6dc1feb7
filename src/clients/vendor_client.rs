use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{RecordId, StatusAction, Vendor, VendorCreate};
use crate::vendor_actor::VendorError;

/// Client for interacting with the Vendor store actor.
#[derive(Clone)]
pub struct VendorClient {
    inner: ResourceClient<Vendor>,
}

impl_basic_client!(VendorClient, Vendor, VendorError, vendor);

impl VendorClient {
    /// Files a vendor application. The vendor enters as Pending.
    #[instrument(skip(self, params), fields(vendor_name = %params.name, vendor_email = %params.email))]
    pub async fn apply_vendor(&self, params: VendorCreate) -> Result<Vendor, VendorError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(VendorError::from)
    }

    #[instrument(skip(self))]
    pub async fn approve_vendor(&self, id: RecordId) -> Result<Vendor, VendorError> {
        self.transition(id, StatusAction::Approve).await
    }

    #[instrument(skip(self))]
    pub async fn suspend_vendor(&self, id: RecordId) -> Result<Vendor, VendorError> {
        self.transition(id, StatusAction::Suspend).await
    }

    #[instrument(skip(self))]
    pub async fn activate_vendor(&self, id: RecordId) -> Result<Vendor, VendorError> {
        self.transition(id, StatusAction::Activate).await
    }
}
