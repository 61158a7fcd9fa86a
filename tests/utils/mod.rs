#![allow(dead_code)]
use auction_house::domain::{
    Auction, AuctionData, AuctionSystem, Bidder, BidderData, TaxId,
};
use auction_house::money::Amount;
use auction_house::notify::Notifier;
use chrono::{DateTime, Duration, TimeZone, Utc};
// See https://users.rust-lang.org/t/sharing-code-and-macros-in-tests-directory/3098/7

// Sample data for tests
pub fn sample_auction_name() -> String {
    "Notebook".to_string()
}

pub fn sample_starts_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 24, 14, 0, 0).unwrap()
}

pub fn sample_ends_at() -> DateTime<Utc> {
    sample_starts_at() + Duration::hours(1)
}

pub fn minutes(n: i64) -> DateTime<Utc> {
    sample_starts_at() + Duration::minutes(n)
}

pub fn money(units: i64) -> Amount {
    Amount::new(units)
}

pub fn auction_data(name: &str, minimum: i64, starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> AuctionData {
    AuctionData {
        name: name.to_string(),
        minimum_bid: money(minimum),
        starts_at,
        ends_at,
    }
}

pub fn sample_auction_data() -> AuctionData {
    auction_data(&sample_auction_name(), 100, sample_starts_at(), sample_ends_at())
}

pub fn sample_auction() -> Auction {
    Auction::new(sample_auction_data()).unwrap()
}

pub fn alice() -> BidderData {
    BidderData {
        name: "Alice".to_string(),
        tax_id: "111.111.111-11".to_string(),
        email: "alice@test.com".to_string(),
        birth_date: "1990-01-01".to_string(),
    }
}

pub fn bob() -> BidderData {
    BidderData {
        name: "Bob".to_string(),
        tax_id: "22222222222".to_string(),
        email: "bob@test.com".to_string(),
        birth_date: "15/08/1985".to_string(),
    }
}

pub fn carol() -> BidderData {
    BidderData {
        name: "Carol".to_string(),
        tax_id: "333.333.333-33".to_string(),
        email: "carol@test.com".to_string(),
        birth_date: "2000-12-31".to_string(),
    }
}

pub fn alice_id() -> TaxId {
    "11111111111".to_string()
}

pub fn bob_id() -> TaxId {
    "22222222222".to_string()
}

pub fn carol_id() -> TaxId {
    "33333333333".to_string()
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub sent: Vec<(TaxId, Amount, String)>,
}

impl Notifier for RecordingNotifier {
    fn notify_winner(&mut self, winner: &Bidder, amount: Amount, auction: &str) {
        self.sent.push((winner.tax_id.clone(), amount, auction.to_string()));
    }
}

pub fn sample_system() -> AuctionSystem<RecordingNotifier> {
    let mut system = AuctionSystem::new(RecordingNotifier::default());
    system.register_bidder(alice()).unwrap();
    system.register_bidder(bob()).unwrap();
    system.register_auction(sample_auction_data()).unwrap();
    system
}
