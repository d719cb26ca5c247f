//! Command-line front end: drives the paginated list and single-resource
//! views against the configured backend and prints what they hold.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use crate::api::{Collection, Fetcher, HttpFetcher, SiteApi};
use crate::config::Config;
use crate::content::{sanitize_value, PageMeta};
use crate::locale::Locale;
use crate::paginate::PaginatedList;
use crate::resource::Resource;

#[derive(Debug, Parser)]
#[command(
    name = "unisite",
    version,
    about = "Read the university site's content from its REST backend"
)]
pub struct Cli {
    /// Config file (default: ~/.config/unisite/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Content language: en, ar or ku
    #[arg(long, global = true)]
    pub lang: Option<Locale>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List a collection, one JSON object per line
    List {
        /// colleges, centers, staff, news, partners or events
        collection: Collection,

        /// Maximum number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,

        /// Items per page (default from config)
        #[arg(long)]
        limit: Option<u32>,

        /// Narrow the collection, e.g. --filter type=scientific
        #[arg(long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, String)>,
    },

    /// Show one item with its page metadata
    Show {
        collection: Collection,
        id: String,
    },
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected key=value, got '{}'", raw)),
    }
}

/// Load configuration, build the HTTP fetcher and run the command.
pub async fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;

    let fetcher: Arc<dyn Fetcher> =
        Arc::new(HttpFetcher::new(&config.api).context("Failed to build HTTP client")?);
    let locale = cli.lang.unwrap_or(config.defaults.locale);

    execute(cli.command, locale, &config, fetcher, out).await
}

pub async fn execute(
    command: Command,
    locale: Locale,
    config: &Config,
    fetcher: Arc<dyn Fetcher>,
    out: &mut impl Write,
) -> Result<()> {
    let api = SiteApi::new(&config.api);
    let policy = config.content.rich_text;

    match command {
        Command::List {
            collection,
            pages,
            limit,
            filters,
        } => {
            let limit = limit.unwrap_or(config.defaults.page_size);
            let mut list: PaginatedList<Value> =
                PaginatedList::new(fetcher, api.list_factory(collection, locale, filters), limit);

            list.start();
            list.settle().await;
            let mut loaded = 1;
            while loaded < pages && list.load_more() {
                list.settle().await;
                loaded += 1;
            }

            for item in list.items() {
                let mut item = item.clone();
                sanitize_value(&mut item, policy);
                writeln!(out, "{}", serde_json::to_string(&item)?)?;
            }
            tracing::info!(
                shown = list.items().len(),
                total = list.total().unwrap_or(0),
                has_more = list.has_more(),
                "listed {}",
                collection
            );

            if let Some(message) = list.error() {
                bail!("Failed to load {}: {}", collection, message);
            }
            Ok(())
        }

        Command::Show { collection, id } => {
            let mut resource: Resource<Value> = Resource::new(fetcher);
            let id = id.trim();
            resource.set_descriptor(api.item(collection, id, locale));
            resource.settle().await;

            if let Some(message) = resource.error() {
                bail!("Failed to load {} '{}': {}", collection, id, message);
            }
            let Some(item) = resource.data() else {
                bail!("Nothing to show: '{}' is not a {} id", id, collection);
            };

            let mut item = item.clone();
            let title = ["title", "name"]
                .iter()
                .find_map(|key| item.get(*key).and_then(Value::as_str));
            let mut meta = PageMeta::new(&config.content.site_name, title, locale);
            if let Some(html) = ["description", "body"]
                .iter()
                .find_map(|key| item.get(*key).and_then(Value::as_str))
            {
                meta = meta.with_description(html);
            }

            sanitize_value(&mut item, policy);
            let page = json!({
                "meta": {
                    "title": meta.title,
                    "description": meta.description,
                    "lang": meta.locale.header_value(),
                    "dir": meta.direction.as_str(),
                },
                "item": item,
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&page)?)?;
            Ok(())
        }
    }
}
