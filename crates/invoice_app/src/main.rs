//! Command-line entry point for the invoice harvester.

use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::Parser;
use engine_logging::LogDestination;
use invoice_core::{Credentials, DateConfig, Locale, Watermark};
use invoice_engine::{
    ensure_output_dir, run, HarvestParams, LocalStore, LogReporter, PollSettings, SessionSettings,
    WebDriverBrowser, WebDriverSettings,
};
use url::Url;

/// Download new invoices from the billing portal.
#[derive(Debug, Parser)]
#[command(name = "invoice-harvest", version, about)]
struct Cli {
    /// Portal base URL.
    #[arg(long)]
    portal_url: Url,

    /// WebDriver endpoint driving the browser.
    #[arg(long, default_value = "http://localhost:9515")]
    webdriver_url: String,

    /// Portal account name.
    #[arg(long, env = "PORTAL_USERNAME")]
    username: String,

    /// Portal account password.
    #[arg(long, env = "PORTAL_PASSWORD", hide_env_values = true)]
    password: String,

    /// Issue date of the most recently downloaded invoice (YYYY-MM-DD).
    /// Only invoices issued strictly after it are fetched.
    #[arg(long, value_parser = parse_date)]
    since: NaiveDate,

    /// Directory invoices are downloaded into.
    #[arg(long, default_value = "./invoices")]
    out: PathBuf,

    /// chrono pattern of the issue dates displayed in the list view.
    #[arg(long, default_value = "%d.%m.%Y")]
    date_format: String,

    /// chrono pattern for the stored filename.
    #[arg(long, default_value = "%d-%m-%y")]
    name_format: String,

    /// Extension of the stored file.
    #[arg(long, default_value = "pdf")]
    extension: String,

    /// Locale of the displayed dates, e.g. pl_PL.
    #[arg(long, default_value = "POSIX", value_parser = parse_locale)]
    locale: Locale,

    /// Run the browser without a visible window.
    #[arg(long)]
    headless: bool,

    /// Where log output goes: terminal, file or both.
    #[arg(long, default_value = "terminal")]
    log: String,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|err| err.to_string())
}

fn parse_locale(value: &str) -> Result<Locale, String> {
    Locale::try_from(value).map_err(|_| format!("unknown locale '{value}'"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match LogDestination::from_name(&cli.log) {
        Some(destination) => engine_logging::initialize(destination),
        None => bail!("unknown log destination '{}'", cli.log),
    }

    // Chrome wants an absolute download path, so resolve before connecting.
    ensure_output_dir(&cli.out)?;
    let output_dir = cli
        .out
        .canonicalize()
        .with_context(|| format!("could not resolve output directory {}", cli.out.display()))?;

    let params = HarvestParams {
        credentials: Credentials::new(cli.username, cli.password),
        watermark: Watermark::new(cli.since),
        output_dir: output_dir.clone(),
        date_config: DateConfig {
            input_format: cli.date_format,
            output_format: cli.name_format,
            extension: cli.extension,
            locale: cli.locale,
        },
        session: SessionSettings::new(cli.portal_url),
        poll: PollSettings::default(),
    };

    let webdriver = WebDriverSettings {
        webdriver_url: cli.webdriver_url,
        headless: cli.headless,
    };
    let browser = WebDriverBrowser::connect(&webdriver, output_dir.clone())
        .await
        .context("could not start the browser session")?;

    let result = run(Box::new(browser), &LocalStore, &LogReporter, &params)
        .await
        .context("harvesting run failed")?;

    log::info!(
        "{} of {} new invoice(s) stored in {}",
        result.downloaded_count,
        result.total_candidates,
        output_dir.display()
    );
    Ok(())
}
