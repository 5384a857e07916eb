//! Catalog response envelopes.

use crate::catalog::Medicine;
use serde::{Deserialize, Serialize};

/// Body of a medicine listing response.
///
/// The API has shipped both `{"data": [...]}` and
/// `{"data": {"medicines": [...]}}`; both are accepted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicineListResponse {
    pub data: MedicineList,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MedicineList {
    Flat(Vec<Medicine>),
    Wrapped { medicines: Vec<Medicine> },
}

impl MedicineListResponse {
    /// Unwrap into the list of medicines.
    pub fn into_medicines(self) -> Vec<Medicine> {
        match self.data {
            MedicineList::Flat(medicines) => medicines,
            MedicineList::Wrapped { medicines } => medicines,
        }
    }
}

/// Body of a single medicine lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicineResponse {
    pub data: Option<Medicine>,
}
