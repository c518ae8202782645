use std::path::PathBuf;

use anyhow::anyhow;
use clap::{
    Parser,
    Subcommand,
    ValueEnum,
};
use tracing_subscriber::EnvFilter;

use tarot_oracle::cards::MAJOR_ARCANA;
use tarot_oracle::config::{
    AppConfig,
    Language,
};
use tarot_oracle::reading::Reading;
use tarot_oracle::session::ReadingSession;
use tarot_oracle::sled_store::SledStore;
use tarot_oracle::wallet::OfflineWallet;

#[derive(Parser)]
#[command(name = "tarot-oracle", about = "Daily tarot divination over a local store")]
struct Args {
    /// Directory for the sled database.
    #[arg(long, default_value = ".tarot")]
    data_dir: PathBuf,

    /// Wallet address the readings are scoped to.
    #[arg(long)]
    address: String,

    /// Mint contract address. Submission is disabled when unset.
    #[arg(long)]
    contract: Option<String>,

    #[arg(long, value_enum, default_value_t = LangArg::Zh)]
    lang: LangArg,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum LangArg {
    Zh,
    En,
}

impl From<LangArg> for Language {
    fn from(lang: LangArg) -> Self {
        match lang {
            LangArg::Zh => Language::Zh,
            LangArg::En => Language::En,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Draw a card for the wallet at the current instant.
    Draw,
    /// Print the current reading.
    Show,
    /// Mint a drawn reading as an NFT. Defaults to the latest draw.
    Submit { index: Option<usize> },
    /// Print the reading history, newest first.
    History,
    /// List the deck.
    Cards,
    /// Clear the current reading.
    Reset,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .ok();
}

fn print_reading(reading: &Reading, language: Language) {
    let position = match language {
        Language::Zh => reading.orientation.label(),
        Language::En => reading.orientation.label_en(),
    };
    match language {
        Language::Zh => {
            println!("{} ({}) {}", reading.card.name, reading.card.name_en, position);
            println!("  {}", reading.interpretation);
            println!("  {}", reading.fortune);
        }
        Language::En => {
            println!("{} ({}) {}", reading.card.name_en, reading.card.name, position);
            println!("  {}", reading.interpretation_en);
            println!("  {}", reading.fortune_en);
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();
    let language = Language::from(args.lang);

    let config = AppConfig {
        contract_address: args.contract.clone().unwrap_or_default(),
        language,
        ..AppConfig::default()
    };
    let store = SledStore::open(&args.data_dir)?;
    let wallet = OfflineWallet::new(args.address.clone());
    let mut session = ReadingSession::new(config, store, wallet)
        .map_err(|error| anyhow!(error.user_message(language)))?;

    let result = match args.command {
        Command::Draw => session.draw().await.map(|reading| {
            print_reading(reading, language);
        }),
        Command::Show => {
            match session.current_reading() {
                Some(reading) => print_reading(reading, language),
                None => println!("no reading yet"),
            }
            Ok(())
        }
        Command::Submit { index } => {
            let index = index.unwrap_or_else(|| session.readings().len().saturating_sub(1));
            session.submit(index).await.map(|tx_hash| {
                println!("minted: {}", session.config().tx_url(&tx_hash));
            })
        }
        Command::History => {
            for entry in session.history().entries() {
                let marker = match &entry.transaction_hash {
                    Some(hash) => session.config().tx_url(hash),
                    None => "unsubmitted".to_string(),
                };
                println!("{} {}", entry.reading.date, marker);
                print_reading(&entry.reading, language);
            }
            Ok(())
        }
        Command::Cards => {
            for card in &MAJOR_ARCANA {
                println!("{:2}  {} - {}", card.id, card.name, card.name_en);
            }
            Ok(())
        }
        Command::Reset => session.reset(),
    };

    result.map_err(|error| anyhow!(error.user_message(language)))
}
