// src/domain/core.rs
use chrono::{DateTime, Utc};
use thiserror::Error;
use crate::money::Amount;
use super::states::AuctionStatus;

pub type TaxId = String;
pub type AuctionId = String;

/// Strips punctuation from a tax-id, keeping only its digits.
pub fn normalize_tax_id(tax_id: &str) -> TaxId {
    tax_id.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Errors {
    #[error("Invalid bidder: {0}")]
    InvalidBidder(#[from] BidderError),

    #[error("Invalid auction: {0}")]
    InvalidAuction(#[from] AuctionError),

    #[error("Invalid bid: {0}")]
    InvalidBid(#[from] BidError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BidderError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("tax-id {0:?} must contain exactly 11 digits")]
    InvalidTaxId(String),

    #[error("email {0:?} is not a valid address")]
    InvalidEmail(String),

    #[error("birth date {0:?} is not a valid date")]
    InvalidBirthDate(String),

    #[error("tax-id {0} is already registered")]
    TaxIdAlreadyRegistered(TaxId),

    #[error("email {0} is already registered")]
    EmailAlreadyRegistered(String),

    #[error("no bidder with tax-id {0}")]
    UnknownBidder(TaxId),

    #[error("bidder {0} has placed bids")]
    HasBids(TaxId),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuctionError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("minimum bid must be positive, got {0}")]
    NonPositiveMinimumBid(Amount),

    #[error("end {ends_at} must be after start {starts_at}")]
    InvalidSchedule {
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    },

    #[error("an auction named {0:?} already exists")]
    NameAlreadyExists(AuctionId),

    #[error("no auction named {0:?}")]
    UnknownAuction(AuctionId),

    #[error("auction {name:?} cannot be modified while {status}")]
    NotModifiable {
        name: AuctionId,
        status: AuctionStatus,
    },

    #[error("auction {name:?} cannot be deleted while {status}")]
    NotDeletable {
        name: AuctionId,
        status: AuctionStatus,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BidError {
    #[error("auction {auction:?} is not open (state: {status})")]
    NotOpen {
        auction: AuctionId,
        status: AuctionStatus,
    },

    #[error("amount {amount} must be above the minimum bid {minimum}")]
    BelowMinimum {
        amount: Amount,
        minimum: Amount,
    },

    #[error("amount {amount} must be above the last bid {last}")]
    NotAboveLastBid {
        amount: Amount,
        last: Amount,
    },

    #[error("bidder {0} placed the last bid")]
    SameBidderTwice(TaxId),
}
