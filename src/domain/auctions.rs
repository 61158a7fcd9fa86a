// src/domain/auctions.rs
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use crate::money::Amount;
use super::bids::Bid;
use super::core::{AuctionError, AuctionId, BidError, TaxId};
use super::states::AuctionStatus;

/// Fields supplied when registering an auction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionData {
    pub name: AuctionId,
    #[serde(rename = "minimumBid")]
    pub minimum_bid: Amount,
    #[serde(rename = "startsAt")]
    pub starts_at: DateTime<Utc>,
    #[serde(rename = "endsAt")]
    pub ends_at: DateTime<Utc>,
}

/// Fields to change on an existing auction; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionUpdate {
    #[serde(default)]
    pub name: Option<AuctionId>,
    #[serde(default, rename = "minimumBid")]
    pub minimum_bid: Option<Amount>,
    #[serde(default, rename = "startsAt")]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default, rename = "endsAt")]
    pub ends_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Auction {
    name: AuctionId,
    #[serde(rename = "minimumBid")]
    minimum_bid: Amount,
    #[serde(rename = "startsAt")]
    starts_at: DateTime<Utc>,
    #[serde(rename = "endsAt")]
    ends_at: DateTime<Utc>,
    #[serde(rename = "state")]
    status: AuctionStatus,
    bids: Vec<Bid>,
    #[serde(skip)]
    winner_notified: bool,
}

fn validate_terms(data: &AuctionData) -> Result<(), AuctionError> {
    if data.name.trim().is_empty() {
        return Err(AuctionError::EmptyName);
    }
    if !data.minimum_bid.is_positive() {
        return Err(AuctionError::NonPositiveMinimumBid(data.minimum_bid));
    }
    if data.ends_at <= data.starts_at {
        return Err(AuctionError::InvalidSchedule {
            starts_at: data.starts_at,
            ends_at: data.ends_at,
        });
    }
    Ok(())
}

impl Auction {
    pub fn new(data: AuctionData) -> Result<Auction, AuctionError> {
        validate_terms(&data)?;
        Ok(Auction {
            name: data.name.trim().to_string(),
            minimum_bid: data.minimum_bid,
            starts_at: data.starts_at,
            ends_at: data.ends_at,
            status: AuctionStatus::Inactive,
            bids: Vec::new(),
            winner_notified: false,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn minimum_bid(&self) -> Amount {
        self.minimum_bid
    }

    pub fn starts_at(&self) -> DateTime<Utc> {
        self.starts_at
    }

    pub fn ends_at(&self) -> DateTime<Utc> {
        self.ends_at
    }

    /// The state observed at the last refresh.
    pub fn status(&self) -> AuctionStatus {
        self.status
    }

    /// Bids in the order they were accepted.
    pub fn bids(&self) -> &[Bid] {
        &self.bids
    }

    pub fn last_bid(&self) -> Option<&Bid> {
        self.bids.last()
    }

    pub fn refresh(&mut self, now: DateTime<Utc>) -> AuctionStatus {
        let next = self.status.inc(now, self.starts_at, self.ends_at, !self.bids.is_empty());
        if next != self.status {
            debug!("auction {:?}: {} -> {} at {}", self.name, self.status, next, now);
            self.status = next;
        }
        self.status
    }

    pub fn propose_bid(&mut self, bidder: &TaxId, amount: Amount, now: DateTime<Utc>) -> Result<Bid, BidError> {
        let status = self.refresh(now);
        if status != AuctionStatus::Open {
            return Err(BidError::NotOpen {
                auction: self.name.clone(),
                status,
            });
        }
        if amount <= self.minimum_bid {
            return Err(BidError::BelowMinimum {
                amount,
                minimum: self.minimum_bid,
            });
        }
        if let Some(last) = self.bids.last() {
            if amount <= last.amount {
                return Err(BidError::NotAboveLastBid {
                    amount,
                    last: last.amount,
                });
            }
            if &last.bidder == bidder {
                return Err(BidError::SameBidderTwice(bidder.clone()));
            }
        }

        let bid = Bid {
            bidder: bidder.clone(),
            amount,
            placed_at: now,
        };
        self.bids.push(bid.clone());
        Ok(bid)
    }

    pub fn can_modify(&self) -> bool {
        self.status.accepts_changes()
    }

    pub fn can_delete(&self) -> bool {
        self.status.accepts_changes()
    }

    pub fn highest_bid(&self) -> Option<&Bid> {
        self.bids.iter().max_by_key(|bid| bid.amount)
    }

    pub fn lowest_bid(&self) -> Option<&Bid> {
        self.bids.iter().min_by_key(|bid| bid.amount)
    }

    pub fn bids_by_amount(&self) -> Vec<&Bid> {
        let mut sorted: Vec<&Bid> = self.bids.iter().collect();
        sorted.sort_by_key(|bid| bid.amount);
        sorted
    }

    /// The highest bid, once the auction has finished.
    pub fn winning_bid(&self) -> Option<&Bid> {
        match self.status {
            AuctionStatus::Finished => self.highest_bid(),
            _ => None,
        }
    }

    pub fn winner(&self) -> Option<&TaxId> {
        self.winning_bid().map(|bid| &bid.bidder)
    }

    pub fn has_bid_from(&self, bidder: &TaxId) -> bool {
        self.bids.iter().any(|bid| &bid.bidder == bidder)
    }

    /// True when the start or the end falls inside the inclusive range.
    pub fn scheduled_within(&self, from: Option<DateTime<Utc>>, until: Option<DateTime<Utc>>) -> bool {
        let within = |at: DateTime<Utc>| {
            from.map_or(true, |from| at >= from) && until.map_or(true, |until| at <= until)
        };
        within(self.starts_at) || within(self.ends_at)
    }

    pub fn winner_notified(&self) -> bool {
        self.winner_notified
    }

    pub(crate) fn mark_winner_notified(&mut self) {
        self.winner_notified = true;
    }

    /// Replaces the terms of the auction. The caller checks eligibility first.
    pub(crate) fn apply(&mut self, update: &AuctionUpdate, now: DateTime<Utc>) -> Result<(), AuctionError> {
        let terms = AuctionData {
            name: update.name.clone().unwrap_or_else(|| self.name.clone()),
            minimum_bid: update.minimum_bid.unwrap_or(self.minimum_bid),
            starts_at: update.starts_at.unwrap_or(self.starts_at),
            ends_at: update.ends_at.unwrap_or(self.ends_at),
        };
        validate_terms(&terms)?;

        self.name = terms.name.trim().to_string();
        self.minimum_bid = terms.minimum_bid;
        self.starts_at = terms.starts_at;
        self.ends_at = terms.ends_at;
        self.refresh(now);
        Ok(())
    }
}
