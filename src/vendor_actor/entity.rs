use crate::actor_framework::{Entity, FrameworkError};
use crate::domain::{EntityKind, RecordId, StatusAction, Vendor, VendorCreate, VendorStatus};

impl Entity for Vendor {
    const KIND: EntityKind = EntityKind::Vendor;

    type Status = VendorStatus;
    type CreateParams = VendorCreate;

    fn id(&self) -> RecordId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn email(&self) -> &str {
        &self.email
    }

    fn status(&self) -> VendorStatus {
        self.status
    }

    /// Creates a vendor from an application. Applications always enter as
    /// Pending, whatever the caller intended.
    fn from_create_params(id: RecordId, params: VendorCreate) -> Result<Self, FrameworkError> {
        Ok(Self {
            id,
            name: params.name.trim().to_string(),
            email: params.email.trim().to_string(),
            specialty: params.specialty.trim().to_string(),
            joined_on: params.joined_on,
            product_count: params.product_count,
            status: VendorStatus::Pending,
        })
    }

    /// Pending vendors can only be approved; there is no path from Pending
    /// straight to Suspended.
    fn next_status(current: VendorStatus, action: StatusAction) -> Option<VendorStatus> {
        match (current, action) {
            (VendorStatus::Pending, StatusAction::Approve) => Some(VendorStatus::Active),
            (VendorStatus::Active, StatusAction::Suspend) => Some(VendorStatus::Suspended),
            (VendorStatus::Suspended, StatusAction::Activate) => Some(VendorStatus::Active),
            _ => None,
        }
    }

    fn set_status(&mut self, status: VendorStatus) {
        self.status = status;
    }
}
