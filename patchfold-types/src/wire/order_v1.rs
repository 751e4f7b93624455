use serde::{Deserialize, Serialize};

use crate::order::PatchOrder;
use crate::schema::ORDER_FILE_VERSION;

/// `{"version": 1, "order": [...]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFileV1 {
    pub version: i64,
    pub order: Vec<String>,
}

impl From<&PatchOrder> for OrderFileV1 {
    fn from(order: &PatchOrder) -> Self {
        Self {
            version: ORDER_FILE_VERSION,
            order: order.ids().to_vec(),
        }
    }
}

impl From<OrderFileV1> for PatchOrder {
    fn from(file: OrderFileV1) -> Self {
        PatchOrder::new(file.order)
    }
}
