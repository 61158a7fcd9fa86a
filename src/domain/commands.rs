use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::money::Amount;
use super::auctions::{Auction, AuctionData, AuctionUpdate};
use super::bidders::{Bidder, BidderData, BidderUpdate};
use super::bids::Bid;
use super::core::{AuctionId, TaxId};
use super::system::AuctionFilter;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "$type")]
pub enum Command {
    #[serde(rename = "RegisterBidder")]
    RegisterBidder {
        bidder: BidderData,
    },

    #[serde(rename = "UpdateBidder")]
    UpdateBidder {
        #[serde(rename = "taxId")]
        tax_id: TaxId,
        update: BidderUpdate,
    },

    #[serde(rename = "DeleteBidder")]
    DeleteBidder {
        #[serde(rename = "taxId")]
        tax_id: TaxId,
    },

    #[serde(rename = "RegisterAuction")]
    RegisterAuction {
        auction: AuctionData,
    },

    #[serde(rename = "UpdateAuction")]
    UpdateAuction {
        at: DateTime<Utc>,
        auction: AuctionId,
        update: AuctionUpdate,
    },

    #[serde(rename = "DeleteAuction")]
    DeleteAuction {
        at: DateTime<Utc>,
        auction: AuctionId,
    },

    #[serde(rename = "PlaceBid")]
    PlaceBid {
        at: DateTime<Utc>,
        #[serde(rename = "taxId")]
        tax_id: TaxId,
        auction: AuctionId,
        amount: Amount,
    },

    #[serde(rename = "NotifyWinner")]
    NotifyWinner {
        at: DateTime<Utc>,
        auction: AuctionId,
    },

    #[serde(rename = "ListAuctions")]
    ListAuctions {
        at: DateTime<Utc>,
        #[serde(default)]
        filter: AuctionFilter,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "$type")]
pub enum CommandSuccess {
    #[serde(rename = "BidderRegistered")]
    BidderRegistered { bidder: Bidder },

    #[serde(rename = "BidderUpdated")]
    BidderUpdated { bidder: Bidder },

    #[serde(rename = "BidderDeleted")]
    BidderDeleted { bidder: Bidder },

    #[serde(rename = "AuctionRegistered")]
    AuctionRegistered { auction: Auction },

    #[serde(rename = "AuctionUpdated")]
    AuctionUpdated { auction: Auction },

    #[serde(rename = "AuctionDeleted")]
    AuctionDeleted { auction: Auction },

    #[serde(rename = "BidAccepted")]
    BidAccepted { auction: AuctionId, bid: Bid },

    #[serde(rename = "WinnerNotified")]
    WinnerNotified { auction: AuctionId, sent: bool },

    #[serde(rename = "AuctionsListed")]
    AuctionsListed { auctions: Vec<Auction> },
}
