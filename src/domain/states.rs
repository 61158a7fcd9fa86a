// src/domain/states.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuctionStatus {
    Inactive,
    Open,
    Finished,
    Expired,
}

/// The state an auction is in at `now`, ignoring what was observed before.
pub fn next_state(
    now: DateTime<Utc>,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    has_bids: bool,
) -> AuctionStatus {
    if now < starts_at {
        AuctionStatus::Inactive
    } else if now < ends_at {
        AuctionStatus::Open
    } else if has_bids {
        AuctionStatus::Finished
    } else {
        AuctionStatus::Expired
    }
}

impl AuctionStatus {
    /// Advances from the last observed state. Never moves back in the
    /// lifecycle: an open auction stays open when asked about an earlier
    /// time, and terminal states never change.
    pub fn inc(
        self,
        now: DateTime<Utc>,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        has_bids: bool,
    ) -> AuctionStatus {
        match self {
            AuctionStatus::Finished | AuctionStatus::Expired => self,
            AuctionStatus::Open => match next_state(now, starts_at, ends_at, has_bids) {
                AuctionStatus::Inactive => AuctionStatus::Open,
                next => next,
            },
            AuctionStatus::Inactive => next_state(now, starts_at, ends_at, has_bids),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, AuctionStatus::Finished | AuctionStatus::Expired)
    }

    /// Inactive and expired auctions may be modified or deleted.
    pub fn accepts_changes(&self) -> bool {
        matches!(self, AuctionStatus::Inactive | AuctionStatus::Expired)
    }
}

impl fmt::Display for AuctionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuctionStatus::Inactive => write!(f, "INACTIVE"),
            AuctionStatus::Open => write!(f, "OPEN"),
            AuctionStatus::Finished => write!(f, "FINISHED"),
            AuctionStatus::Expired => write!(f, "EXPIRED"),
        }
    }
}

impl FromStr for AuctionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "INACTIVE" => Ok(AuctionStatus::Inactive),
            "OPEN" => Ok(AuctionStatus::Open),
            "FINISHED" => Ok(AuctionStatus::Finished),
            "EXPIRED" => Ok(AuctionStatus::Expired),
            _ => Err(format!("Unknown auction state: {}", s)),
        }
    }
}
