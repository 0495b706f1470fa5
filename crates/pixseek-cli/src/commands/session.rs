//! Arguments and wiring shared by every command.

use std::io::IsTerminal;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use pixseek_adapters::{ImageType, Orientation, PixabayClient, PixabayConfig, PER_PAGE_RANGE};
use pixseek_core::{Gallery, PaginationController, PresentationSink};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::output::{JsonlSink, TerminalSink};

/// How results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing with colored notices
    #[default]
    Text,
    /// JSON Lines (one event object per line)
    Jsonl,
}

/// Hardcoded default values.
mod defaults {
    pub const PER_PAGE: u32 = 40;
    pub const MARGIN_ROWS: f64 = 5.0;
    pub const VIEWPORT_ROWS: u32 = 20;
}

/// Gallery wired to the Pixabay API and a terminal sink.
pub type CliGallery = Gallery<PixabayClient, Box<dyn PresentationSink>>;

/// Parse and validate a page size.
fn parse_per_page(s: &str) -> Result<u32, String> {
    let value: u32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if PER_PAGE_RANGE.contains(&value) {
        Ok(value)
    } else {
        Err(format!(
            "{value} is not in {}..={}",
            PER_PAGE_RANGE.start(),
            PER_PAGE_RANGE.end()
        ))
    }
}

/// Parse and validate a trigger margin in rows.
fn parse_margin(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("{value} must be a non-negative number of rows"))
    }
}

/// Arguments accepted before or after any subcommand.
#[derive(Args, Clone, Default)]
pub struct SessionArgs {
    /// Pixabay API key
    #[arg(long, env = "PIXABAY_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Search endpoint URL
    #[arg(long, value_name = "URL", global = true)]
    pub endpoint: Option<String>,

    /// Results per page (3-200)
    #[arg(long, value_parser = parse_per_page, global = true)]
    pub per_page: Option<u32>,

    /// Rows before the end of results at which the next page loads
    #[arg(long, value_parser = parse_margin, global = true)]
    pub margin: Option<f64>,

    /// Rows scrolled per step in `browse`
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..), global = true)]
    pub viewport_rows: Option<u32>,

    /// Output format
    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Merged config (populated by `with_config`, not from CLI).
    #[arg(skip)]
    config: Option<AppConfig>,
}

impl SessionArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. `PIXABAY_API_KEY` and CLI arguments (already set on self)
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        if args.api_key.is_none() {
            args.api_key.clone_from(&config.api.key);
        }
        if args.endpoint.is_none() {
            args.endpoint.clone_from(&config.api.endpoint);
        }
        args.per_page = args.per_page.or(config.api.per_page);
        args.margin = args.margin.or(config.trigger.margin);
        args.viewport_rows = args.viewport_rows.or(config.trigger.viewport_rows);

        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_ref()
                .and_then(|s| match s.as_str() {
                    "text" => Some(OutputFormat::Text),
                    "jsonl" => Some(OutputFormat::Jsonl),
                    _ => None,
                });
        }

        // CLI --no-color wins, then config
        if !args.no_color {
            args.no_color = config.output.color == Some(false);
        }

        // Filters have no CLI flags; keep the config for `client_config`
        args.config = Some(config.clone());

        args
    }

    /// Page size with fallback to hardcoded default.
    pub fn per_page(&self) -> u32 {
        self.per_page.unwrap_or(defaults::PER_PAGE)
    }

    /// Trigger margin in rows with fallback to hardcoded default.
    pub fn margin(&self) -> f64 {
        self.margin.unwrap_or(defaults::MARGIN_ROWS)
    }

    /// Viewport height in rows with fallback to hardcoded default.
    pub fn viewport_rows(&self) -> u32 {
        self.viewport_rows.unwrap_or(defaults::VIEWPORT_ROWS)
    }

    /// Output format with fallback to text.
    pub fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    /// Whether terminal output is colorized.
    pub fn color(&self) -> bool {
        !self.no_color && std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal()
    }

    /// Build the API client settings from flags and config.
    fn client_config(&self) -> Result<PixabayConfig> {
        let key = self
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .context("No Pixabay API key: pass --api-key, set PIXABAY_API_KEY, or add `key` under [api] in the config file")?;

        let mut client_config = PixabayConfig::new(key);
        if let Some(endpoint) = &self.endpoint {
            client_config.endpoint.clone_from(endpoint);
        }

        if let Some(api) = self.config.as_ref().map(|c| &c.api) {
            if let Some(t) = api.image_type.as_deref() {
                client_config.image_type = t.parse::<ImageType>().map_err(anyhow::Error::msg)?;
            }
            if let Some(o) = api.orientation.as_deref() {
                client_config.orientation =
                    o.parse::<Orientation>().map_err(anyhow::Error::msg)?;
            }
            if let Some(safe) = api.safesearch {
                client_config.safesearch = safe;
            }
        }

        debug!("Client settings: {client_config:?}");
        Ok(client_config)
    }

    /// Build the sink for the selected output format.
    fn sink(&self) -> Box<dyn PresentationSink> {
        match self.format() {
            OutputFormat::Text => Box::new(TerminalSink::new(self.color())),
            OutputFormat::Jsonl => Box::new(JsonlSink::stdout()),
        }
    }

    /// Wire a gallery session from these arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured or a filter value is invalid.
    pub fn build_gallery(&self) -> Result<CliGallery> {
        let client = PixabayClient::new(self.client_config()?)?;
        let per_page = self.per_page();
        info!(
            "Session: per_page={per_page} margin={} rows format={:?}",
            self.margin(),
            self.format()
        );

        let controller = PaginationController::new(client, per_page);
        Ok(Gallery::new(controller, self.sink(), self.margin()))
    }
}
