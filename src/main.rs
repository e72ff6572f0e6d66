use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing_subscriber::EnvFilter;
use veicular::favorites::Favorites;
use veicular::notify::{Notifier, NotifyKind};
use veicular::rules::search::{self, SearchPrefill};
use veicular::store::{JsonFileStore, KvStore, MemoryStore};
use veicular::vehicle::{PriceLookup, VehicleQuote};
use veicular::{Field, SubmitOutcome};

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_time().build() {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("error: failed to start runtime: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = runtime.block_on(run(config)) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

struct CliConfig {
    command: Command,
    store_path: Option<String>,
    latency_ms: u64,
}

enum Command {
    Search(SearchPrefill, bool),
    ListFavorites,
    RemoveFavorite(String),
    ClearFavorites,
}

/// Prints engine notifications the way the app's toast stack would.
struct TermNotifier;

impl Notifier for TermNotifier {
    fn notify(&self, message: &str, kind: NotifyKind) {
        println!("[{kind}] {message}");
    }
}

async fn run(config: CliConfig) -> Result<(), veicular::BoxError> {
    let store: Arc<dyn KvStore> = match &config.store_path {
        Some(path) => Arc::new(JsonFileStore::open(path)?),
        None => Arc::new(MemoryStore::new()),
    };
    let favorites = Favorites::new(store);

    match config.command {
        Command::ListFavorites => {
            let saved = favorites.list()?;
            if saved.is_empty() {
                println!("no favorites saved");
            }
            for fav in saved {
                println!(
                    "{}  {} {} {} ({})  R$ {}  FIPE {}  [{}]",
                    fav.id,
                    fav.brand,
                    fav.model,
                    fav.year,
                    fav.fuel,
                    fav.price,
                    fav.fipe_code,
                    fav.reference_month
                );
            }
            Ok(())
        }
        Command::RemoveFavorite(id) => {
            favorites.remove(&id)?;
            println!("favorite {id} removed");
            Ok(())
        }
        Command::ClearFavorites => {
            favorites.clear()?;
            println!("favorites cleared");
            Ok(())
        }
        Command::Search(prefill, save) => {
            run_search(prefill, save, &favorites, config.latency_ms).await
        }
    }
}

async fn run_search(
    prefill: SearchPrefill,
    save: bool,
    favorites: &Favorites,
    latency_ms: u64,
) -> Result<(), veicular::BoxError> {
    let lookup = PriceLookup::with_latency(Duration::from_millis(latency_ms));
    let result: Arc<Mutex<Option<VehicleQuote>>> = Arc::new(Mutex::new(None));

    let captured = result.clone();
    let form = search::builder()
        .notifier(Arc::new(TermNotifier))
        .on_submit(move |values| {
            let lookup = lookup.clone();
            let captured = captured.clone();
            let query = search::query(&values);
            async move {
                let quote = lookup.search(&query).await?;
                *captured.lock() = Some(quote);
                Ok(())
            }
        })
        .build();

    search::apply_prefill(&form, &prefill);

    if form.submit().await == SubmitOutcome::Submitted {
        let quote = result.lock().take().expect("submitted search captures a quote");
        println!();
        println!("{} {} {} ({})", quote.brand, quote.model, quote.year, quote.fuel);
        println!("price:           R$ {}", quote.price);
        println!("FIPE code:       {}", quote.fipe_code);
        println!("reference month: {}", quote.reference_month);

        if save {
            let favorite = favorites.add(&quote)?;
            println!("saved to favorites as {}", favorite.id);
        }
        return Ok(());
    }

    // Validation failed (every field is touched after a submit attempt) or
    // the lookup rejected the query; field problems print here, the
    // top-level notification already did.
    for field in form.fields() {
        if let Some(message) = form.visible_error(field) {
            eprintln!("  {}: {}", field.name(), message);
        }
    }
    std::process::exit(2);
}

fn parse_args() -> Result<CliConfig, String> {
    let mut prefill = SearchPrefill::default();
    let mut save = false;
    let mut store_path: Option<String> = None;
    let mut latency_ms: u64 = 1000;
    let mut command: Option<Command> = None;
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("veicular {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--type" => prefill.vehicle_type = Some(expect_value(&arg, args.next())?),
            "--brand" => prefill.brand = Some(expect_value(&arg, args.next())?),
            "--model" => prefill.model = Some(expect_value(&arg, args.next())?),
            "--year" => prefill.year = Some(expect_value(&arg, args.next())?),
            "--fuel" => prefill.fuel = Some(expect_value(&arg, args.next())?),
            "--favorite" => save = true,
            "--favorites" => command = Some(Command::ListFavorites),
            "--remove-favorite" => {
                command = Some(Command::RemoveFavorite(expect_value(&arg, args.next())?));
            }
            "--clear-favorites" => command = Some(Command::ClearFavorites),
            "--store" => store_path = Some(expect_value(&arg, args.next())?),
            "--latency-ms" => {
                let value = expect_value(&arg, args.next())?;
                latency_ms = value
                    .parse()
                    .map_err(|_| format!("error: --latency-ms expects a number, got '{value}'"))?;
            }
            _ => return Err(format!("error: unknown option '{arg}'\n\n{}", help_text())),
        }
    }

    let command = command.unwrap_or(Command::Search(prefill, save));
    Ok(CliConfig { command, store_path, latency_ms })
}

fn expect_value(flag: &str, value: Option<String>) -> Result<String, String> {
    value.ok_or_else(|| format!("error: {flag} expects a value"))
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "veicular {version}

Vehicle price lookup demo CLI.

Usage:
  veicular --type <cars|motorcycles|trucks> --brand <name> --model <name> --year <YYYY> [--fuel <name>]
  veicular --favorites | --remove-favorite <id> | --clear-favorites

Options:
  --type <kind>            Vehicle type: cars, motorcycles, or trucks.
  --brand <name>           Brand name.
  --model <name>           Model name.
  --year <YYYY>            Four-digit model year.
  --fuel <name>            Fuel type (optional).
  --favorite               Save the returned quote to favorites.
  --favorites              List saved favorites and exit.
  --remove-favorite <id>   Remove one favorite by id and exit.
  --clear-favorites        Remove every favorite and exit.
  --store <path>           JSON file backing the store. Default: in-memory.
  --latency-ms <n>         Simulated lookup latency. Default: 1000.
  -h, --help               Show this help message.
  -V, --version            Print version information.

Exit codes:
  0  Success.
  1  Internal error.
  2  Invalid arguments or form validation failure.
",
        version = env!("CARGO_PKG_VERSION")
    )
}
