// src/domain/bids.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::money::Amount;
use super::core::TaxId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    pub bidder: TaxId,
    pub amount: Amount,
    #[serde(rename = "at")]
    pub placed_at: DateTime<Utc>,
}
