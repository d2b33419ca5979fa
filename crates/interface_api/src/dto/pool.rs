//! Pool DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::Currency;

#[derive(Debug, Deserialize, Validate)]
pub struct DepositRequest {
    /// Amount in the network currency's major units
    pub amount: Decimal,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PoolResponse {
    pub balance: Decimal,
    pub currency: Currency,
    /// Base amount of the assessment tables
    pub unit: Decimal,
}
