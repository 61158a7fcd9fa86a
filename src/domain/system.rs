// src/domain/system.rs
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use crate::config::Config;
use crate::money::Amount;
use crate::notify::{LogNotifier, Notifier};
use super::auctions::{Auction, AuctionData, AuctionUpdate};
use super::bidders::{Bidder, BidderData, BidderUpdate};
use super::bids::Bid;
use super::core::{normalize_tax_id, AuctionError, BidderError, Errors, TaxId};
use super::states::AuctionStatus;

/// Filters for `AuctionSystem::list_auctions`. Empty matches every auction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionFilter {
    #[serde(default, rename = "state")]
    pub status: Option<AuctionStatus>,
    #[serde(default)]
    pub from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub until: Option<DateTime<Utc>>,
}

impl AuctionFilter {
    pub fn with_status(mut self, status: AuctionStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn since(mut self, from: DateTime<Utc>) -> Self {
        self.from = Some(from);
        self
    }

    pub fn until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(until);
        self
    }

    pub fn matches(&self, auction: &Auction) -> bool {
        if let Some(status) = self.status {
            if auction.status() != status {
                return false;
            }
        }
        if self.from.is_none() && self.until.is_none() {
            return true;
        }
        auction.scheduled_within(self.from, self.until)
    }
}

/// Registry of bidders and auctions.
///
/// Every time-dependent call takes the current time; the system never reads
/// a clock. Auctions are identified by name and kept in registration order.
pub struct AuctionSystem<N: Notifier = LogNotifier> {
    bidders: HashMap<TaxId, Bidder>,
    auctions: Vec<Auction>,
    notifier: N,
    auto_notify: bool,
}

impl AuctionSystem<LogNotifier> {
    pub fn from_config(config: &Config) -> Self {
        AuctionSystem::new(LogNotifier::new(config.sender.clone()))
            .with_auto_notify(config.auto_notify)
    }
}

impl Default for AuctionSystem<LogNotifier> {
    fn default() -> Self {
        AuctionSystem::new(LogNotifier::default())
    }
}

impl<N: Notifier> AuctionSystem<N> {
    pub fn new(notifier: N) -> Self {
        AuctionSystem {
            bidders: HashMap::new(),
            auctions: Vec::new(),
            notifier,
            auto_notify: true,
        }
    }

    /// When disabled, winners are only notified through `notify_winner`.
    pub fn with_auto_notify(mut self, auto_notify: bool) -> Self {
        self.auto_notify = auto_notify;
        self
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    // Bidders

    pub fn register_bidder(&mut self, data: BidderData) -> Result<Bidder, Errors> {
        let bidder = Bidder::new(data)?;
        if self.bidders.contains_key(&bidder.tax_id) {
            return Err(BidderError::TaxIdAlreadyRegistered(bidder.tax_id).into());
        }
        if self.bidders.values().any(|other| other.has_email(&bidder.email)) {
            return Err(BidderError::EmailAlreadyRegistered(bidder.email).into());
        }

        info!("registered bidder {}", bidder);
        self.bidders.insert(bidder.tax_id.clone(), bidder.clone());
        Ok(bidder)
    }

    pub fn find_bidder(&self, tax_id: &str) -> Option<&Bidder> {
        self.bidders.get(&normalize_tax_id(tax_id))
    }

    /// All bidders, ordered by tax-id.
    pub fn bidders(&self) -> Vec<&Bidder> {
        let mut bidders: Vec<&Bidder> = self.bidders.values().collect();
        bidders.sort_by(|a, b| a.tax_id.cmp(&b.tax_id));
        bidders
    }

    pub fn update_bidder(&mut self, tax_id: &str, update: BidderUpdate) -> Result<Bidder, Errors> {
        let current_id = normalize_tax_id(tax_id);
        let current = self
            .bidders
            .get(&current_id)
            .ok_or_else(|| BidderError::UnknownBidder(current_id.clone()))?;
        let updated = current.merged(&update)?;

        if updated.tax_id != current_id {
            if self.bidders.contains_key(&updated.tax_id) {
                return Err(BidderError::TaxIdAlreadyRegistered(updated.tax_id).into());
            }
            if self.has_bids(&current_id) {
                return Err(BidderError::HasBids(current_id).into());
            }
        }
        let email_taken = self
            .bidders
            .values()
            .any(|other| other.tax_id != current_id && other.has_email(&updated.email));
        if email_taken {
            return Err(BidderError::EmailAlreadyRegistered(updated.email).into());
        }

        self.bidders.remove(&current_id);
        self.bidders.insert(updated.tax_id.clone(), updated.clone());
        info!("updated bidder {}", updated);
        Ok(updated)
    }

    pub fn delete_bidder(&mut self, tax_id: &str) -> Result<Bidder, Errors> {
        let tax_id = normalize_tax_id(tax_id);
        if !self.bidders.contains_key(&tax_id) {
            return Err(BidderError::UnknownBidder(tax_id).into());
        }
        if self.has_bids(&tax_id) {
            return Err(BidderError::HasBids(tax_id).into());
        }

        let bidder = self
            .bidders
            .remove(&tax_id)
            .ok_or_else(|| BidderError::UnknownBidder(tax_id.clone()))?;
        info!("deleted bidder {}", bidder);
        Ok(bidder)
    }

    fn has_bids(&self, tax_id: &TaxId) -> bool {
        self.auctions.iter().any(|auction| auction.has_bid_from(tax_id))
    }

    // Auctions

    pub fn register_auction(&mut self, data: AuctionData) -> Result<Auction, Errors> {
        let auction = Auction::new(data)?;
        if self.find_auction(auction.name()).is_some() {
            return Err(AuctionError::NameAlreadyExists(auction.name().to_string()).into());
        }

        info!(
            "registered auction {:?} from {} to {}",
            auction.name(),
            auction.starts_at(),
            auction.ends_at()
        );
        self.auctions.push(auction.clone());
        Ok(auction)
    }

    pub fn find_auction(&self, name: &str) -> Option<&Auction> {
        self.auctions.iter().find(|auction| auction.name() == name)
    }

    /// Auctions in registration order, as last refreshed.
    pub fn auctions(&self) -> &[Auction] {
        &self.auctions
    }

    fn position(&self, name: &str) -> Result<usize, AuctionError> {
        self.auctions
            .iter()
            .position(|auction| auction.name() == name)
            .ok_or_else(|| AuctionError::UnknownAuction(name.to_string()))
    }

    pub fn auction_state(&mut self, name: &str, now: DateTime<Utc>) -> Result<AuctionStatus, Errors> {
        let index = self.position(name)?;
        Ok(self.refresh(index, now))
    }

    pub fn update_auction(&mut self, name: &str, update: AuctionUpdate, now: DateTime<Utc>) -> Result<Auction, Errors> {
        let index = self.position(name)?;
        let status = self.refresh(index, now);
        if !self.auctions[index].can_modify() {
            return Err(AuctionError::NotModifiable {
                name: name.to_string(),
                status,
            }
            .into());
        }
        if let Some(new_name) = update.name.as_deref().map(str::trim) {
            if new_name != name && self.find_auction(new_name).is_some() {
                return Err(AuctionError::NameAlreadyExists(new_name.to_string()).into());
            }
        }

        let auction = &mut self.auctions[index];
        auction.apply(&update, now)?;
        info!("updated auction {:?}", auction.name());
        Ok(auction.clone())
    }

    pub fn delete_auction(&mut self, name: &str, now: DateTime<Utc>) -> Result<Auction, Errors> {
        let index = self.position(name)?;
        let status = self.refresh(index, now);
        if !self.auctions[index].can_delete() {
            return Err(AuctionError::NotDeletable {
                name: name.to_string(),
                status,
            }
            .into());
        }

        let auction = self.auctions.remove(index);
        info!("deleted auction {:?} ({})", auction.name(), status);
        Ok(auction)
    }

    pub fn list_auctions(&mut self, filter: &AuctionFilter, now: DateTime<Utc>) -> Vec<&Auction> {
        for index in 0..self.auctions.len() {
            self.refresh(index, now);
        }
        self.auctions
            .iter()
            .filter(|auction| filter.matches(auction))
            .collect()
    }

    // Bids

    /// Bids of an auction, ascending by amount.
    pub fn list_bids(&self, name: &str) -> Result<Vec<&Bid>, Errors> {
        let index = self.position(name)?;
        Ok(self.auctions[index].bids_by_amount())
    }

    pub fn highest_bid(&self, name: &str) -> Result<Option<&Bid>, Errors> {
        let index = self.position(name)?;
        Ok(self.auctions[index].highest_bid())
    }

    pub fn lowest_bid(&self, name: &str) -> Result<Option<&Bid>, Errors> {
        let index = self.position(name)?;
        Ok(self.auctions[index].lowest_bid())
    }

    pub fn propose_bid(&mut self, tax_id: &str, name: &str, amount: Amount, now: DateTime<Utc>) -> Result<Bid, Errors> {
        let tax_id = normalize_tax_id(tax_id);
        if !self.bidders.contains_key(&tax_id) {
            return Err(BidderError::UnknownBidder(tax_id).into());
        }
        let index = self.position(name)?;

        let result = self.auctions[index].propose_bid(&tax_id, amount, now);
        if self.auto_notify {
            self.send_notification(index);
        }
        let bid = result?;
        info!("bid of {} by {} accepted on {:?}", bid.amount, bid.bidder, name);
        Ok(bid)
    }

    pub fn winner(&mut self, name: &str, now: DateTime<Utc>) -> Result<Option<&Bidder>, Errors> {
        let index = self.position(name)?;
        self.refresh(index, now);
        Ok(self.auctions[index]
            .winner()
            .and_then(|tax_id| self.bidders.get(tax_id)))
    }

    /// Notifies the winner of a finished auction unless that already happened.
    /// Returns whether a notification was sent by this call.
    pub fn notify_winner(&mut self, name: &str, now: DateTime<Utc>) -> Result<bool, Errors> {
        let index = self.position(name)?;
        self.auctions[index].refresh(now);
        Ok(self.send_notification(index))
    }

    fn refresh(&mut self, index: usize, now: DateTime<Utc>) -> AuctionStatus {
        let status = self.auctions[index].refresh(now);
        if self.auto_notify {
            self.send_notification(index);
        }
        status
    }

    fn send_notification(&mut self, index: usize) -> bool {
        let auction = &mut self.auctions[index];
        if auction.winner_notified() {
            return false;
        }
        let Some((tax_id, amount)) = auction
            .winning_bid()
            .map(|bid| (bid.bidder.clone(), bid.amount))
        else {
            return false;
        };
        let Some(winner) = self.bidders.get(&tax_id) else {
            warn!("winner {} of auction {:?} is not registered", tax_id, auction.name());
            return false;
        };

        self.notifier.notify_winner(winner, amount, auction.name());
        auction.mark_winner_notified();
        true
    }
}
