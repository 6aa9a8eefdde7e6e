//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs the logger
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: Convert shell arguments into typed commands via clap
//! 2. **Context Setup**: Resolve the data dir, load configuration, open a
//!    `ListingsApi` session at `--url`
//! 3. **API Dispatch**: Call the matching `ListingsApi` methods
//! 4. **Output Formatting**: Print a `CmdResult` as text or JSON
//!
//! ## Structure
//!
//! - `run()`: main dispatch (called by `main.rs`)
//! - `init_context()`: builds `AppContext` with API and configuration
//! - `handle_*()`: per-command handlers

use super::render::{
    print_chips, print_contact_lines, print_details, print_listings, print_location,
    print_messages, print_panel,
};
use super::setup::{Cli, Commands, OutputMode};
use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use listingsapp::api::ListingsApi;
use listingsapp::commands::{self as app_commands, CmdResult};
use listingsapp::config::{default_data_dir, ListingsConfig};
use listingsapp::filters::label::describe_filter;
use listingsapp::model::{ContactUpdate, FilterValue};
use listingsapp::source::fs::FileSource;
use listingsapp::source::sample_dataset;
use listingsapp::url::{decode_value, PageLocation};
use listingsapp::ListingsError;
use log::{debug, LevelFilter};
use serde::Serialize;
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use std::path::PathBuf;

pub const DATA_ENV: &str = "LISTINGS_DATA";

struct AppContext {
    api: ListingsApi<FileSource>,
    output: OutputMode,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let data_dir = resolve_data_dir(&cli)?;
    debug!("data dir: {}", data_dir.display());
    let config = ListingsConfig::load(Some(&data_dir))?;

    // These two never open a session.
    match &cli.command {
        Some(Commands::Init { force }) => return handle_init(data_dir, *force, cli.output),
        Some(Commands::Config) => return handle_config(&config, cli.output),
        _ => {}
    }

    let mut ctx = init_context(&cli, data_dir, config);
    match cli.command {
        Some(Commands::Search {
            filters,
            remove,
            clear,
            page,
        }) => handle_search(&mut ctx, filters, remove, clear, page),
        Some(Commands::Attributes) => handle_attributes(&mut ctx),
        Some(Commands::View { id }) => handle_view(&mut ctx, id),
        Some(Commands::Contact {
            id,
            name,
            phone,
            notes,
        }) => handle_contact(&mut ctx, id, name, phone, notes),
        Some(Commands::Url { locale }) => handle_url(&mut ctx, locale),
        Some(Commands::Init { .. }) | Some(Commands::Config) => Ok(()),
        None => handle_search(&mut ctx, Vec::new(), Vec::new(), false, 1),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    // A logger may already be installed when run from a test harness.
    let _ = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

fn resolve_data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data {
        return Ok(PathBuf::from(dir));
    }
    if let Some(dir) = std::env::var_os(DATA_ENV) {
        return Ok(PathBuf::from(dir));
    }
    default_data_dir().ok_or_else(|| anyhow!("No data directory; pass --data or set {}", DATA_ENV))
}

fn init_context(cli: &Cli, data_dir: PathBuf, config: ListingsConfig) -> AppContext {
    let url = cli
        .url
        .clone()
        .unwrap_or_else(|| config.home().to_string());
    let source = FileSource::new(data_dir);
    AppContext {
        api: ListingsApi::open(source, &url, config),
        output: cli.output,
    }
}

/// Splits `code=value`; the value uses the URL parameter encoding.
fn parse_filter(raw: &str) -> Result<FilterValue> {
    let (code, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("Filter must look like code=value: {}", raw))?;
    let code = code.trim();
    if code.is_empty() {
        bail!("Filter has no attribute code: {}", raw);
    }
    Ok(FilterValue::new(code, decode_value(value)))
}

fn emit<T: Serialize>(output: OutputMode, value: &T, text: impl FnOnce()) -> Result<()> {
    match output {
        OutputMode::Json => {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        OutputMode::Text => text(),
    }
    Ok(())
}

fn handle_init(data_dir: PathBuf, force: bool, output: OutputMode) -> Result<()> {
    let mut source = FileSource::new(data_dir);
    let dataset = sample_dataset()?;
    let result = app_commands::init::run(&mut source, &dataset, force)?;
    emit(output, &result, || print_messages(&result.messages))
}

fn handle_config(config: &ListingsConfig, output: OutputMode) -> Result<()> {
    emit(output, config, || {
        println!("page_size = {}", config.page_size);
        println!("locale = {}", config.locale);
        println!("listings_path = {}", config.listings_path);
        println!("panel_attributes = {}", config.panel_attributes.join(", "));
    })
}

fn handle_search(
    ctx: &mut AppContext,
    filters: Vec<String>,
    remove: Vec<String>,
    clear: bool,
    page: u32,
) -> Result<()> {
    let api = &mut ctx.api;
    let mut result = api.mount();

    if clear {
        result = result.merge(api.clear_filters());
    }
    for code in &remove {
        result = result.merge(api.remove_applied_filter(code));
    }

    let edits = filters
        .iter()
        .map(|raw| parse_filter(raw))
        .collect::<Result<Vec<_>>>()?;
    for fv in edits {
        if api.catalog().get(&fv.attribute_code).is_none() {
            return Err(ListingsError::UnknownAttribute(fv.attribute_code).into());
        }
        api.set_filter(fv);
    }
    if api.can_apply() {
        result = result.merge(api.apply_filters());
    }
    if page > 1 {
        result = result.merge(api.go_to_page(page));
    }

    let final_result = CmdResult {
        listings: Some(api.session().listings().clone()),
        location: Some(api.location()),
        messages: result.messages,
        refresh: result.refresh,
        ..CmdResult::default()
    };
    let chips = api.session().chips();
    emit(ctx.output, &final_result, || {
        print_chips(&chips);
        if let Some(page) = &final_result.listings {
            print_listings(page);
        }
        print_messages(&final_result.messages);
        if let Some(location) = &final_result.location {
            print_location(location);
        }
    })
}

fn handle_attributes(ctx: &mut AppContext) -> Result<()> {
    let mounted = ctx.api.mount();
    let mut result = ctx.api.status_result();
    result.messages.extend(mounted.messages);
    emit(ctx.output, &result, || {
        if let Some(panel) = &result.panel {
            print_chips(&panel.chips);
            print_panel(panel);
        }
        print_messages(&result.messages);
    })
}

fn handle_view(ctx: &mut AppContext, id: i64) -> Result<()> {
    let result = ctx.api.listing_details(id);
    emit(ctx.output, &result, || {
        if let Some(details) = &result.details {
            print_details(details);
        }
        print_messages(&result.messages);
    })?;
    if result.details.is_none() {
        bail!("Listing {} not found", id);
    }
    Ok(())
}

fn handle_contact(
    ctx: &mut AppContext,
    id: i64,
    name: Option<String>,
    phone: Option<String>,
    notes: Option<String>,
) -> Result<()> {
    let opened = ctx.api.open_contact_editor(id);
    if opened.details.is_none() {
        print_messages(&opened.messages);
        bail!("Listing {} not found", id);
    }

    let update = ContactUpdate {
        author_name: name,
        author_phone: phone,
        notes,
    };
    ctx.api.edit_contact(&update)?;
    let result = ctx
        .api
        .save_contact()
        .with_context(|| format!("Saving contact info for listing {}", id))?;
    ctx.api.close_contact_editor();

    emit(ctx.output, &result, || {
        if let Some(contact) = &result.contact {
            print_contact_lines(contact);
        }
        print_messages(&result.messages);
    })?;
    if result.has_errors() {
        bail!("Contact info for listing {} was not saved", id);
    }
    Ok(())
}

fn handle_url(ctx: &mut AppContext, locale: Option<String>) -> Result<()> {
    let location = match locale {
        Some(locale) => ctx.api.switch_locale(&locale),
        None => ctx.api.location(),
    };
    let parsed = PageLocation::parse(&location);
    let result = CmdResult {
        location: Some(location.clone()),
        ..CmdResult::default()
    };
    emit(ctx.output, &result, || {
        println!("{}", location);
        for fv in parsed.filters().iter() {
            println!("  {}", describe_filter(fv));
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use listingsapp::model::FilterPayload;

    #[test]
    fn parse_filter_decodes_like_the_url() {
        let fv = parse_filter("price=[50000,150000]").unwrap();
        assert_eq!(fv.attribute_code, "price");
        assert_eq!(fv.value, FilterPayload::Range(50000.0, 150000.0));

        let fv = parse_filter("is_furnished=true").unwrap();
        assert_eq!(fv.value, FilterPayload::Bool(true));

        let fv = parse_filter("district=[\"Yunusabad\"]").unwrap();
        assert_eq!(fv.value, FilterPayload::MultiSelect(vec!["Yunusabad".into()]));
    }

    #[test]
    fn parse_filter_keeps_equals_in_value() {
        let fv = parse_filter("landmark=a=b").unwrap();
        assert_eq!(fv.value, FilterPayload::Text("a=b".into()));
    }

    #[test]
    fn parse_filter_rejects_malformed() {
        assert!(parse_filter("price").is_err());
        assert!(parse_filter("=3").is_err());
    }
}
