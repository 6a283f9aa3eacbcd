//! CLI command definitions, routing, and tracing setup.

use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use serde::Serialize;
use storefront_menu::{LocaleTable, Menu, MenuOptions, ResourceType, resolve_menu_tree};
use storefront_search::{
    GroupedResults, ResultItem, SearchInput, SearchSession, SearchView, SearchViewOptions,
    select_result,
};
use storefront_shared::{AppConfig, init_config, load_config, load_config_from};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Storefront: resolve navigation menus and predictive search results.
#[derive(Parser)]
#[command(
    name = "storefront",
    version,
    about = "Resolve Storefront API menus and predictive search results into renderable JSON.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.storefront/storefront.toml.
    #[arg(long, global = true, env = "STOREFRONT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Resolve a Storefront API menu into a renderable tree.
    Menu {
        /// Menu JSON file, or `-` for stdin.
        input: String,

        /// Primary shop domain (overrides config).
        #[arg(long)]
        primary_domain: Option<String>,

        /// Store domain (overrides config and the store domain env var).
        #[arg(long)]
        store_domain: Option<String>,

        /// Route prefix override, e.g. `PRODUCT=items` (repeatable).
        #[arg(long = "prefix", value_name = "TYPE=PREFIX")]
        prefixes: Vec<String>,

        /// Request URL; its locale prefix is applied to internal links.
        #[arg(long)]
        locale: Option<String>,
    },

    /// Build the predictive search view model for a search response.
    Search {
        /// Predictive search JSON file, or `-` for stdin.
        input: String,

        /// Current contents of the search input.
        #[arg(short, long, default_value = "")]
        term: String,

        /// Backend-reported total; used instead of counting items.
        #[arg(long)]
        total: Option<usize>,

        /// Request URL; its locale prefix is applied to result links.
        #[arg(long)]
        locale: Option<String>,
    },

    /// Print the navigation intent for selecting one search result.
    Select {
        /// Result item JSON file, or `-` for stdin.
        input: String,
    },

    /// Print the locale a request URL resolves to.
    Locale {
        /// Absolute request URL.
        url: String,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr so stdout stays JSON.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "storefront=info",
        1 => "storefront=debug",
        _ => "storefront=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    match cli.command {
        Command::Menu {
            input,
            primary_domain,
            store_domain,
            prefixes,
            locale,
        } => cmd_menu(
            &config,
            &input,
            primary_domain.as_deref(),
            store_domain.as_deref(),
            &prefixes,
            locale.as_deref(),
        ),
        Command::Search {
            input,
            term,
            total,
            locale,
        } => cmd_search(&config, &input, &term, total, locale.as_deref()),
        Command::Select { input } => cmd_select(&input),
        Command::Locale { url } => cmd_locale(&config, &url),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(&config),
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_menu(
    config: &AppConfig,
    input: &str,
    primary_domain: Option<&str>,
    store_domain: Option<&str>,
    prefixes: &[String],
    locale_url: Option<&str>,
) -> Result<()> {
    let menu: Menu = serde_json::from_str(&read_input(input)?)
        .map_err(|e| eyre!("invalid menu JSON in '{input}': {e}"))?;

    let mut opts = menu_options(config, primary_domain, store_domain, prefixes)?;
    if let Some(url) = locale_url {
        opts = opts.with_locale(LocaleTable::from_config(config).resolve_url(url)?);
    }

    info!(menu = %menu.id, items = menu.items.as_ref().map_or(0, Vec::len), "resolving menu");

    match resolve_menu_tree(&menu, &opts) {
        Some(resolved) => print_json(&resolved),
        None => Err(eyre!("'{input}' is not a valid menu: it has no items array")),
    }
}

fn cmd_search(
    config: &AppConfig,
    input: &str,
    term: &str,
    total: Option<usize>,
    locale_url: Option<&str>,
) -> Result<()> {
    let locale_prefix = match locale_url {
        Some(url) => LocaleTable::from_config(config).resolve_url(url)?.path_prefix,
        None => String::new(),
    };

    let normalized = SearchInput::from_json(&read_input(input)?)?.into_results(&locale_prefix);
    let total = total.or(Some(normalized.total_results));

    let session = SearchSession::new()
        .with_term(term)
        .with_results(normalized.results, total);
    let opts = SearchViewOptions::from_config(&config.search).with_locale_prefix(&locale_prefix);

    info!(term, total_results = session.total_results, "building search view");

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct SearchOutput {
        session: SearchSession,
        grouped: GroupedResults,
        view: SearchView,
    }

    let grouped = session.grouped();
    let view = SearchView::build(&session, &opts);

    print_json(&SearchOutput {
        session,
        grouped,
        view,
    })
}

fn cmd_select(input: &str) -> Result<()> {
    let item: ResultItem = serde_json::from_str(&read_input(input)?)
        .map_err(|e| eyre!("invalid result item JSON in '{input}': {e}"))?;
    print_json(&select_result(&item))
}

fn cmd_locale(config: &AppConfig, url: &str) -> Result<()> {
    let locale = LocaleTable::from_config(config).resolve_url(url)?;
    print_json(&locale)
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Created config file: {}", path.display());
    Ok(())
}

fn cmd_config_show(config: &AppConfig) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Read a whole input file, or stdin for `-`.
fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    std::fs::read_to_string(input).map_err(|e| eyre!("cannot read '{input}': {e}"))
}

/// Menu options from the config with command-line overrides applied.
///
/// Flags replace the matching config values, so a `--prefix` wins over the
/// same key under `[menu.prefixes]`.
fn menu_options(
    config: &AppConfig,
    primary_domain: Option<&str>,
    store_domain: Option<&str>,
    prefix_flags: &[String],
) -> Result<MenuOptions> {
    let mut config = config.clone();
    if let Some(primary) = primary_domain {
        config.shop.primary_domain = primary.to_string();
    }
    if let Some(store) = store_domain {
        config.shop.store_domain = store.to_string();
    }
    for (resource_type, prefix) in parse_prefix_flags(prefix_flags)? {
        config.menu.prefixes.insert(resource_type.to_string(), prefix);
    }
    Ok(MenuOptions::from_config(&config)?)
}

/// Parse `TYPE=PREFIX` flags.
fn parse_prefix_flags(flags: &[String]) -> Result<Vec<(ResourceType, String)>> {
    flags
        .iter()
        .map(|flag| {
            let (resource_type, prefix) = flag
                .split_once('=')
                .ok_or_else(|| eyre!("invalid --prefix '{flag}': expected TYPE=PREFIX"))?;
            let resource_type = resource_type.trim().to_uppercase();
            if resource_type.is_empty() {
                return Err(eyre!("invalid --prefix '{flag}': empty resource type"));
            }
            Ok((ResourceType::from(resource_type), prefix.trim().to_string()))
        })
        .collect()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_menu::ShopDomains;

    #[test]
    fn prefix_flags_parse() {
        let parsed = parse_prefix_flags(&["product=items".into(), "BLOG= journal ".into()])
            .expect("parse");
        assert_eq!(parsed[0], (ResourceType::Product, "items".into()));
        assert_eq!(parsed[1], (ResourceType::Blog, "journal".into()));
    }

    #[test]
    fn prefix_flags_reject_malformed() {
        assert!(parse_prefix_flags(&["PRODUCT".into()]).is_err());
        assert!(parse_prefix_flags(&["=items".into()]).is_err());
    }

    fn unset_store_env(config: &mut AppConfig) {
        config.shop.store_domain.clear();
        config.shop.store_domain_env = "STOREFRONT_TEST_UNSET_STORE_DOMAIN".into();
    }

    #[test]
    fn prefix_flag_wins_over_config_prefix() {
        let mut config = AppConfig::default();
        unset_store_env(&mut config);
        config.menu.prefixes.insert("PRODUCT".into(), "goods".into());
        config.menu.prefixes.insert("PAGE".into(), "info".into());

        let opts = menu_options(
            &config,
            Some("shop.example.com"),
            Some("example.myshopify.com"),
            &["product=items".into()],
        )
        .expect("options");

        assert_eq!(opts.prefixes.get(&ResourceType::Product), Some("items"));
        assert_eq!(opts.prefixes.get(&ResourceType::Page), Some("info"));
        assert_eq!(
            opts.domains,
            ShopDomains::new("shop.example.com", "example.myshopify.com")
        );
    }

    #[test]
    fn menu_options_need_a_store_domain() {
        let mut config = AppConfig::default();
        unset_store_env(&mut config);
        assert!(menu_options(&config, None, None, &[]).is_err());
        assert!(menu_options(&config, None, Some("example.myshopify.com"), &[]).is_ok());
    }

    #[test]
    fn cli_parses_menu_command() {
        let cli = Cli::try_parse_from([
            "storefront",
            "menu",
            "menu.json",
            "--store-domain",
            "example.myshopify.com",
            "--prefix",
            "PRODUCT=items",
            "-vv",
        ])
        .expect("parse");
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Menu {
                input,
                store_domain,
                prefixes,
                ..
            } => {
                assert_eq!(input, "menu.json");
                assert_eq!(store_domain.as_deref(), Some("example.myshopify.com"));
                assert_eq!(prefixes, ["PRODUCT=items"]);
            }
            _ => panic!("expected menu command"),
        }
    }
}
