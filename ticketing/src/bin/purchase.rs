//! Ticket purchase command
//!
//! Validates and prices one order, then runs it against the logging
//! collaborators.
//!
//! # Usage
//!
//! ```bash
//! # Requests on the command line
//! cargo run --bin purchase -- 42 ADULT=2 CHILD=1 INFANT=1
//!
//! # Order as JSON, from a file or stdin
//! echo '{"account_id": 42, "requests": [{"category": "ADULT", "quantity": 2}]}' \
//!     | cargo run --bin purchase -- --json -
//! ```
//!
//! Prices and the seat limit can be overridden with `TICKET_ADULT_PRICE`,
//! `TICKET_CHILD_PRICE`, `TICKET_INFANT_PRICE` and `TICKET_MAX_SEATS`.

use std::io::Read;
use std::process::ExitCode;
use ticketing::{
    AccountId, Config, LoggingPaymentGateway, LoggingSeatReservationGateway, PurchaseEnvironment,
    PurchaseOrder, TicketRequest, TicketService,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: purchase <ACCOUNT_ID> <CATEGORY=QUANTITY>...\n       purchase --json <FILE|->";

fn main() -> ExitCode {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{},ticketing=debug", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let order = match read_order(&args) {
        Ok(order) => order,
        Err(e) => {
            eprintln!("{e}\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    tracing::debug!(pricing = ?config.pricing, "Configuration loaded");

    let service = TicketService::new(
        PurchaseEnvironment::new(
            LoggingPaymentGateway::shared(),
            LoggingSeatReservationGateway::shared(),
        ),
        config.policy(),
    );

    match service.purchase_order(&order) {
        Ok(quote) => {
            println!(
                "account {}: charged {} for {} seat(s) ({} adult, {} child, {} infant)",
                order.account_id,
                quote.total_amount,
                quote.total_seats,
                quote.adults,
                quote.children,
                quote.infants
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("purchase rejected: {e}");
            ExitCode::FAILURE
        }
    }
}

fn read_order(args: &[String]) -> Result<PurchaseOrder, Box<dyn std::error::Error>> {
    match args {
        [flag, source] if flag == "--json" => {
            let json = if source == "-" {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            } else {
                std::fs::read_to_string(source)?
            };
            Ok(serde_json::from_str(&json)?)
        }
        [account, requests @ ..] if !account.starts_with("--") => {
            let account_id = AccountId::new(account.parse()?);
            let requests = requests
                .iter()
                .map(|arg| arg.parse::<TicketRequest>())
                .collect::<Result<Vec<_>, _>>()?;
            Ok(PurchaseOrder::new(account_id, requests))
        }
        _ => Err("missing arguments".into()),
    }
}
