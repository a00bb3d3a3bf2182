use serde::{Deserialize, Serialize};

use inquiry_core::{Entity, OwnerKey, ValueObject};

/// Postal address embedded in a customer record (no identity of its own).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    pub country: String,
}

impl ValueObject for Address {}

/// Customer profile, keyed by CIF.
///
/// `date_of_birth` and `marital_status` are nullable in the feed (corporate
/// customers have neither) and stay `None` rather than a placeholder string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub cif: OwnerKey,
    pub customer_type: String,
    pub full_name: String,
    pub date_of_birth: Option<String>,
    pub id_type: String,
    pub id_number: String,
    pub tax_id: String,
    pub email: String,
    pub phone: String,
    pub mobile: String,
    pub address: Address,
    pub occupation: String,
    pub marital_status: Option<String>,
    pub nationality: String,
    pub customer_segment: String,
    pub risk_rating: String,
    pub relationship_manager: String,
    pub onboarding_date: String,
    pub kyc_status: String,
    pub kyc_last_updated: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Entity for CustomerRecord {
    type Id = OwnerKey;

    fn id(&self) -> &Self::Id {
        &self.cif
    }
}

impl crate::Record for CustomerRecord {
    const COLLECTION: crate::CollectionKind = crate::CollectionKind::Customers;
}
