use clap::Parser;
use meta_reports::application::{GenerateOptions, GenerateReportsService, PublishSettings, Publisher};
use meta_reports::cli::{format_summary, Cli};
use meta_reports::domain::{TagTranslator, YearMonth};
use meta_reports::error::ReportError;
use meta_reports::infrastructure::config::LoggingSettings;
use meta_reports::infrastructure::{
    BackupStore, Config, HttpTagSource, MediaWikiClient, MySqlPostRepository, ParsoidConverter,
};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn init_tracing(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), ReportError> {
    // Validate the filter before touching any external service
    let month = cli
        .date_prefix
        .as_deref()
        .map(YearMonth::parse)
        .transpose()?;

    let config = Config::load()?;
    init_tracing(&config.logging);

    let config_path = Config::path();
    if config_path.exists() {
        tracing::debug!(path = %config_path.display(), "loaded configuration");
    } else {
        tracing::debug!(path = %config_path.display(), "no config file, using defaults");
    }

    let http = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(config.wiki.timeout_secs))
        .user_agent(concat!("meta-reports/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let translator = TagTranslator::from_source(
        &HttpTagSource::new(http.clone(), config.tags.lookup_url.as_str()),
        config.tags.style(),
    )?;
    let converter = ParsoidConverter::new(http, config.conversion.endpoint.as_str());
    let wiki = MediaWikiClient::connect(&config.wiki)?;
    let posts = MySqlPostRepository::connect(&config.database.url, config.tags.locale_suffix.as_str())?;
    let backup = BackupStore::new(config.backup.dir.clone(), &config.backup.public_url)?;

    let publisher = Publisher::new(&wiki, &backup, PublishSettings::from(&config.wiki));
    let service = GenerateReportsService::new(&posts, &wiki, &converter, &translator, publisher);

    let options = GenerateOptions {
        category: config.database.category.clone(),
        month,
        header_template: config.wiki.header_template.clone(),
    };

    let summary = service.execute(&options)?;
    print!("{}", format_summary(&summary));
    Ok(())
}
