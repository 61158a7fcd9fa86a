mod utils;

use auction_house::config::{Config, ConfigError};
use auction_house::domain::{
    handle, AuctionStatus, AuctionSystem, Bid, BidError, Command, CommandSuccess, Errors,
};
use auction_house::money::{Amount, MoneyError};
use auction_house::script::{parse_commands, ScriptError};
use serde_json::{json, to_value};
use std::io::Cursor;
use utils::*;

const SCRIPT: &str = r#"
{"$type":"RegisterBidder","bidder":{"name":"Alice","taxId":"111.111.111-11","email":"alice@test.com","birthDate":"1990-01-01"}}
{"$type":"RegisterBidder","bidder":{"name":"Bob","taxId":"22222222222","email":"bob@test.com","birthDate":"15/08/1985"}}
{"$type":"RegisterAuction","auction":{"name":"Notebook","minimumBid":"100","startsAt":"2025-05-24T14:00:00Z","endsAt":"2025-05-24T15:00:00Z"}}

[{"$type":"PlaceBid","at":"2025-05-24T14:10:00Z","taxId":"11111111111","auction":"Notebook","amount":"150"},{"$type":"PlaceBid","at":"2025-05-24T14:20:00Z","taxId":"11111111111","auction":"Notebook","amount":"200"}]
{"$type":"PlaceBid","at":"2025-05-24T14:20:00Z","taxId":"22222222222","auction":"Notebook","amount":"200.50"}
{"$type":"ListAuctions","at":"2025-05-24T15:00:00Z","filter":{"state":"FINISHED"}}
{"$type":"NotifyWinner","at":"2025-05-24T15:00:00Z","auction":"Notebook"}
"#;

#[test]
fn test_parse_script() {
    let commands = parse_commands(Cursor::new(SCRIPT)).unwrap();
    assert_eq!(commands.len(), 8);
    assert_eq!(
        commands[4],
        Command::PlaceBid {
            at: minutes(20),
            tax_id: alice_id(),
            auction: sample_auction_name(),
            amount: money(200),
        }
    );
    assert!(matches!(commands[6], Command::ListAuctions { .. }));
}

#[test]
fn test_parse_script_reports_line() {
    let script = "{\"$type\":\"DeleteBidder\",\"taxId\":\"1\"}\n{\"$type\":\"Unknown\"}\n";
    match parse_commands(Cursor::new(script)) {
        Err(ScriptError::Parse { line, .. }) => assert_eq!(line, 2),
        other => panic!("Expected parse error, got {:?}", other),
    }
}

#[test]
fn test_replay_script() {
    let mut system = AuctionSystem::new(RecordingNotifier::default());
    let results: Vec<Result<CommandSuccess, Errors>> = parse_commands(Cursor::new(SCRIPT))
        .unwrap()
        .into_iter()
        .map(|command| handle(command, &mut system))
        .collect();

    assert!(results[..4].iter().all(Result::is_ok));
    assert_eq!(
        results[4],
        Err(Errors::InvalidBid(BidError::SameBidderTwice(alice_id())))
    );
    assert_eq!(
        results[5],
        Ok(CommandSuccess::BidAccepted {
            auction: sample_auction_name(),
            bid: Bid {
                bidder: bob_id(),
                amount: Amount::from_cents(20050),
                placed_at: minutes(20),
            },
        })
    );

    match &results[6] {
        Ok(CommandSuccess::AuctionsListed { auctions }) => {
            assert_eq!(auctions.len(), 1);
            assert_eq!(auctions[0].status(), AuctionStatus::Finished);
        }
        other => panic!("Expected listing, got {:?}", other),
    }
    // Listing already finalized the auction and told the winner
    assert_eq!(
        results[7],
        Ok(CommandSuccess::WinnerNotified { auction: sample_auction_name(), sent: false })
    );
    assert_eq!(
        system.notifier().sent,
        vec![(bob_id(), Amount::from_cents(20050), sample_auction_name())]
    );
}

#[test]
fn test_results_encode_as_tagged_json() {
    let mut system = sample_system();
    let command = Command::PlaceBid {
        at: minutes(10),
        tax_id: alice_id(),
        auction: sample_auction_name(),
        amount: money(150),
    };

    let success = handle(command, &mut system).unwrap();
    assert_eq!(
        to_value(&success).unwrap(),
        json!({
            "$type": "BidAccepted",
            "auction": "Notebook",
            "bid": {
                "bidder": "11111111111",
                "amount": "150.00",
                "at": "2025-05-24T14:10:00Z"
            }
        })
    );

    let auction = system.find_auction("Notebook").unwrap();
    assert_eq!(
        to_value(auction).unwrap(),
        json!({
            "name": "Notebook",
            "minimumBid": "100.00",
            "startsAt": "2025-05-24T14:00:00Z",
            "endsAt": "2025-05-24T15:00:00Z",
            "state": "OPEN",
            "bids": [
                { "bidder": "11111111111", "amount": "150.00", "at": "2025-05-24T14:10:00Z" }
            ]
        })
    );
}

#[test]
fn test_amount_text() {
    assert_eq!("150".parse::<Amount>(), Ok(Amount::new(150)));
    assert_eq!("150.5".parse::<Amount>(), Ok(Amount::from_cents(15050)));
    assert_eq!("0.07".parse::<Amount>(), Ok(Amount::from_cents(7)));
    assert_eq!("-3.25".parse::<Amount>(), Ok(Amount::from_cents(-325)));
    assert_eq!(Amount::from_cents(15050).to_string(), "150.50");
    assert_eq!(Amount::from_cents(-325).to_string(), "-3.25");

    assert!(matches!("1.234".parse::<Amount>(), Err(MoneyError::InvalidFormat(_))));
    assert!(matches!("R$ 10".parse::<Amount>(), Err(MoneyError::InvalidFormat(_))));
    assert!(matches!(".50".parse::<Amount>(), Err(MoneyError::InvalidFormat(_))));
    assert!(matches!("99999999999999999999".parse::<Amount>(), Err(MoneyError::OutOfRange(_))));
}

#[test]
fn test_config() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config, Config::default());
    assert!(config.auto_notify);

    let config = Config::from_json(r#"{"autoNotify": false, "sender": "Leilões"}"#).unwrap();
    assert!(!config.auto_notify);
    assert_eq!(config.log_level, "info");

    let system = AuctionSystem::from_config(&config);
    assert_eq!(system.notifier().sender(), "Leilões");

    assert!(matches!(Config::from_json("not json"), Err(ConfigError::Parse(_))));
}

#[test]
fn test_parse_script_keeps_field_error() {
    let script = r#"{"$type":"PlaceBid","at":"2025-05-24T14:10:00Z","taxid":"11111111111","auction":"Notebook","amount":"150"}"#;
    match parse_commands(Cursor::new(script)) {
        Err(ScriptError::Parse { line, source }) => {
            assert_eq!(line, 1);
            assert!(source.to_string().contains("taxId"), "unexpected message: {}", source);
        }
        other => panic!("Expected parse error, got {:?}", other),
    }

    let script = r#"[{"$type":"DeleteBidder"}]"#;
    match parse_commands(Cursor::new(script)) {
        Err(ScriptError::Parse { source, .. }) => assert!(source.to_string().contains("taxId")),
        other => panic!("Expected parse error, got {:?}", other),
    }
}

#[test]
fn test_amount_rejects_trailing_dot() {
    assert!(matches!("150.".parse::<Amount>(), Err(MoneyError::InvalidFormat(_))));
    assert!(matches!("-150.".parse::<Amount>(), Err(MoneyError::InvalidFormat(_))));
    assert_eq!("150.0".parse::<Amount>(), Ok(Amount::new(150)));
}
