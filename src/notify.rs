// src/notify.rs
use log::info;
use crate::domain::Bidder;
use crate::money::Amount;

/// Told about the winner of an auction once it has finished.
pub trait Notifier {
    fn notify_winner(&mut self, winner: &Bidder, amount: Amount, auction: &str);
}

/// Simulates the congratulation e-mail by writing it to the log.
#[derive(Debug, Clone)]
pub struct LogNotifier {
    sender: String,
}

impl LogNotifier {
    pub fn new(sender: impl Into<String>) -> Self {
        LogNotifier { sender: sender.into() }
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }
}

impl Default for LogNotifier {
    fn default() -> Self {
        LogNotifier::new(crate::config::DEFAULT_SENDER)
    }
}

impl Notifier for LogNotifier {
    fn notify_winner(&mut self, winner: &Bidder, amount: Amount, auction: &str) {
        info!("To: {}", winner.email);
        info!("Subject: You won the auction {:?}", auction);
        info!(
            "Dear {}, your bid of {} won the auction {:?}. Regards, {}",
            winner.name, amount, auction, self.sender
        );
    }
}
