use chrono::TimeDelta;
use clap::{Parser, Subcommand};
use creepto_checkout::application::checkout::CheckoutFlow;
use creepto_checkout::application::policy::{DEFAULT_VERIFICATION_DELAY_SECS, VerificationPolicy};
use creepto_checkout::domain::address::{AddressDirectory, PaymentAddressResolver};
use creepto_checkout::domain::currency::{CurrencyKind, NetworkKind};
use creepto_checkout::infrastructure::clock::SystemClock;
use creepto_checkout::infrastructure::id_source::RandomIdSource;
use creepto_checkout::infrastructure::in_memory::InMemoryTransactionStore;
use creepto_checkout::interfaces::json::directory_reader::AddressDirectoryReader;
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file with deposit addresses. Placeholders are used if omitted.
    #[arg(long, global = true)]
    addresses: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the price for an amount
    Quote {
        #[arg(long)]
        currency: CurrencyKind,
        #[arg(long)]
        amount: Decimal,
    },
    /// Print the deposit address for a currency and network
    Address {
        #[arg(long)]
        currency: CurrencyKind,
        #[arg(long)]
        network: Option<NetworkKind>,
    },
    /// Run the whole purchase flow and poll until a terminal status
    Simulate {
        #[arg(long)]
        currency: CurrencyKind,
        #[arg(long)]
        amount: Decimal,
        #[arg(long)]
        wallet: String,
        #[arg(long)]
        reference: String,
        #[arg(long)]
        network: Option<NetworkKind>,
        #[arg(long, default_value = "standard")]
        plan: String,
        /// Delay between status polls
        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,
        #[arg(long, default_value_t = DEFAULT_VERIFICATION_DELAY_SECS)]
        verification_delay_secs: i64,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value).into_diagnostic()?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let directory = match cli.addresses {
        Some(path) => AddressDirectoryReader::open(path)
            .and_then(|reader| reader.read())
            .into_diagnostic()?,
        None => AddressDirectory::default(),
    };
    let resolver = PaymentAddressResolver::new(directory);

    match cli.command {
        Command::Quote { currency, amount } => {
            let flow = build_flow(resolver, VerificationPolicy::default());
            print_json(&flow.calculate_price(currency, amount).into_diagnostic()?)?;
        }
        Command::Address { currency, network } => {
            print_json(&resolver.resolve(currency, network))?;
        }
        Command::Simulate {
            currency,
            amount,
            wallet,
            reference,
            network,
            plan,
            interval_ms,
            verification_delay_secs,
        } => {
            let policy = VerificationPolicy {
                verification_delay: TimeDelta::seconds(verification_delay_secs),
                ..VerificationPolicy::default()
            };
            let flow = build_flow(resolver, policy);
            let mut session = flow.new_session();

            print_json(&flow.select_plan(&mut session, currency, network, &plan))?;
            print_json(
                &flow
                    .submit_wallet(&mut session, currency, &wallet, amount)
                    .into_diagnostic()?,
            )?;
            let processing = flow
                .verify_payment(&mut session, &reference)
                .await
                .into_diagnostic()?;
            print_json(&processing)?;

            loop {
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                let report = flow
                    .check_status(processing.transaction_id.as_str())
                    .await
                    .into_diagnostic()?;
                print_json(&report)?;
                if report.is_terminal() {
                    break;
                }
            }

            print_json(&flow.success(&mut session).await.into_diagnostic()?)?;
        }
    }

    Ok(())
}

fn build_flow(resolver: PaymentAddressResolver, policy: VerificationPolicy) -> CheckoutFlow {
    CheckoutFlow::new(
        Box::new(InMemoryTransactionStore::new()),
        Arc::new(RandomIdSource),
        Arc::new(SystemClock),
        resolver,
        policy,
    )
}
