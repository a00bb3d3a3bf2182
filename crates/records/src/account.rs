use serde::{Deserialize, Serialize};

use inquiry_core::{AccountNumber, Entity, OwnerKey};

use crate::collection::{CollectionKind, Record};

/// Balance-bearing account, keyed by account number.
///
/// `cif` is the owner reference: a plain string copied at write time, with no
/// guarantee that a matching customer record exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub account_number: AccountNumber,
    pub account_name: String,
    pub cif: OwnerKey,
    pub account_type: String,
    pub currency: String,
    pub available_balance: f64,
    pub hold_balance: f64,
    pub status: String,
    pub branch_code: String,
    pub open_date: String,
    pub last_transaction_date: String,
    pub created_at: String,
    pub updated_at: String,
}

impl AccountRecord {
    /// Key of the owning customer record.
    pub fn owner_key(&self) -> &OwnerKey {
        &self.cif
    }
}

impl Entity for AccountRecord {
    type Id = AccountNumber;

    fn id(&self) -> &Self::Id {
        &self.account_number
    }
}

impl Record for AccountRecord {
    const COLLECTION: CollectionKind = CollectionKind::Accounts;
}
