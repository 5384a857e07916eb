//! Medicine catalog module.
//!
//! Contains the medicine record served by the catalog service and the
//! response envelopes it is wrapped in.

mod medicine;
mod response;

pub use medicine::{related_medicines, Medicine};
pub use response::{MedicineListResponse, MedicineResponse};
