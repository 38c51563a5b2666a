mod display;
mod repl;

use addrbook_core::LookupField;
use addrbook_session::Session;
use addrbook_store::AddressBook;
use addrbook_sync::LookupClient;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Find addresses by postcode and house number and save them to an address book.
#[derive(Parser)]
#[command(name = "addrbook", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Base URL of the address-lookup backend
    #[arg(
        long,
        env = "ADDRBOOK_API_URL",
        default_value = "http://localhost:3000",
        global = true
    )]
    api_url: String,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Look up the addresses for a postcode and house number
    Find {
        #[arg(long)]
        postcode: String,

        #[arg(long)]
        house_number: String,
    },

    /// Interactive session: find, select, add personal info, save
    Session,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("addrbook v{}", env!("CARGO_PKG_VERSION"));

    let client = LookupClient::new(cli.api_url);
    match cli.command {
        Command::Find {
            postcode,
            house_number,
        } => {
            let mut session = Session::new(client, AddressBook::new());
            session.lookup_form_mut().set(LookupField::PostCode, postcode);
            session
                .lookup_form_mut()
                .set(LookupField::HouseNumber, house_number);
            session.submit_lookup().await?;
            print!("{}", display::render_candidates(session.candidates(), None));
            Ok(())
        }
        Command::Session => repl::run(Session::new(client, AddressBook::new())).await,
    }
}
