// src/domain/mod.rs
pub mod auctions;
pub mod bidders;
pub mod bids;
pub mod commands;
pub mod core;
pub mod states;
pub mod system;

use crate::notify::Notifier;

pub use self::auctions::*;
pub use self::bidders::*;
pub use self::bids::*;
pub use self::commands::*;
pub use self::core::*;
pub use self::states::*;
pub use self::system::*;

pub fn handle<N: Notifier>(command: Command, system: &mut AuctionSystem<N>) -> Result<CommandSuccess, Errors> {
    match command {
        Command::RegisterBidder { bidder } => {
            let bidder = system.register_bidder(bidder)?;
            Ok(CommandSuccess::BidderRegistered { bidder })
        }

        Command::UpdateBidder { tax_id, update } => {
            let bidder = system.update_bidder(&tax_id, update)?;
            Ok(CommandSuccess::BidderUpdated { bidder })
        }

        Command::DeleteBidder { tax_id } => {
            let bidder = system.delete_bidder(&tax_id)?;
            Ok(CommandSuccess::BidderDeleted { bidder })
        }

        Command::RegisterAuction { auction } => {
            let auction = system.register_auction(auction)?;
            Ok(CommandSuccess::AuctionRegistered { auction })
        }

        Command::UpdateAuction { at, auction, update } => {
            let auction = system.update_auction(&auction, update, at)?;
            Ok(CommandSuccess::AuctionUpdated { auction })
        }

        Command::DeleteAuction { at, auction } => {
            let auction = system.delete_auction(&auction, at)?;
            Ok(CommandSuccess::AuctionDeleted { auction })
        }

        Command::PlaceBid { at, tax_id, auction, amount } => {
            let bid = system.propose_bid(&tax_id, &auction, amount, at)?;
            Ok(CommandSuccess::BidAccepted { auction, bid })
        }

        Command::NotifyWinner { at, auction } => {
            let sent = system.notify_winner(&auction, at)?;
            Ok(CommandSuccess::WinnerNotified { auction, sent })
        }

        Command::ListAuctions { at, filter } => {
            let auctions = system
                .list_auctions(&filter, at)
                .into_iter()
                .cloned()
                .collect();
            Ok(CommandSuccess::AuctionsListed { auctions })
        }
    }
}
