mod report;

use sheetwright::{
    Catalog, Context, DialogAction, FilterField, FilterForm, JsonFileStore, MemoryStore, SettingsStore, SystemConfig,
    apply_filter_dialog, parse_items, read_filters, render_details,
};
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

fn main() {
    init_logging();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    if let Err(err) = run(config) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` overrides the default `warn` level.
fn init_logging() {
    let filter = EnvFilter::builder().with_default_directive(LevelFilter::WARN.into()).from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(filter).with_target(true).with_writer(std::io::stderr).init();
}

struct CliConfig {
    items: Option<PathBuf>,
    system: Option<PathBuf>,
    catalog: Option<PathBuf>,
    filters: Option<PathBuf>,
    edits: Vec<(FilterField, bool)>,
    reset_filters: bool,
    json: bool,
    color: bool,
}

fn run(config: CliConfig) -> Result<(), String> {
    let system = match &config.system {
        Some(path) => SystemConfig::load(path).map_err(|e| e.to_string())?,
        None => SystemConfig::builtin().clone(),
    };
    let catalog = match &config.catalog {
        Some(path) => Catalog::builtin().clone().merged(Catalog::load(path).map_err(|e| e.to_string())?),
        None => Catalog::builtin().clone(),
    };
    let ctx = Context::new(&system, &catalog);

    let text = match &config.items {
        Some(path) => std::fs::read_to_string(path).map_err(|e| format!("failed to read {}: {e}", path.display()))?,
        None => read_stdin_input()?,
    };
    let items = parse_items(&text).map_err(|e| e.to_string())?;

    let mut store: Box<dyn SettingsStore> = match &config.filters {
        Some(path) => Box::new(JsonFileStore::new(path)),
        None => Box::new(MemoryStore::new()),
    };

    if config.reset_filters || !config.edits.is_empty() {
        let current = read_filters(store.as_ref()).map_err(|e| e.to_string())?;
        let mut form = FilterForm::open(&current);
        for (field, on) in &config.edits {
            if !form.set(*field, *on) {
                warn!(field = field.name(), "filter input is disabled, edit ignored");
            }
        }
        let action = if config.reset_filters { DialogAction::Reset } else { DialogAction::Save };
        apply_filter_dialog(store.as_mut(), &form, action).map_err(|e| e.to_string())?;
    }

    let economy = render_details(&ctx, &items, store.as_ref());

    if config.json {
        let out = serde_json::to_string_pretty(&economy).map_err(|e| e.to_string())?;
        println!("{out}");
    } else {
        let filters = read_filters(store.as_ref()).unwrap_or_default();
        report::print_economy(&ctx, &filters, &economy, config.color);
    }
    Ok(())
}

fn parse_args() -> Result<CliConfig, String> {
    let mut config = CliConfig {
        items: None,
        system: None,
        catalog: None,
        filters: None,
        edits: Vec::new(),
        reset_filters: false,
        json: false,
        color: io::stdout().is_terminal(),
    };
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };
        let mut value = |name: &str| -> Result<String, String> {
            match inline.clone() {
                Some(v) => Ok(v),
                None => args.next().ok_or_else(|| format!("error: {name} expects a value")),
            }
        };

        match flag.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("sheetwright {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => config.color = true,
            "--no-color" => config.color = false,
            "--json" => config.json = true,
            "--reset-filters" => config.reset_filters = true,
            "--items" | "-i" => config.items = Some(PathBuf::from(value("--items")?)),
            "--system" => config.system = Some(PathBuf::from(value("--system")?)),
            "--catalog" => config.catalog = Some(PathBuf::from(value("--catalog")?)),
            "--filters" => config.filters = Some(PathBuf::from(value("--filters")?)),
            "--filter" => {
                let edit = value("--filter")?;
                config.edits.push(parse_edit(&edit)?);
            }
            _ if arg.starts_with('-') && arg != "-" => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                if config.items.is_some() {
                    return Err("error: items provided multiple times".to_string());
                }
                if arg != "-" {
                    config.items = Some(PathBuf::from(arg));
                }
            }
        }
    }

    Ok(config)
}

/// `name=on|off`, e.g. `weapons=off` or `spellsRitual=on`.
fn parse_edit(edit: &str) -> Result<(FilterField, bool), String> {
    let (name, state) =
        edit.split_once('=').ok_or_else(|| format!("error: invalid --filter '{edit}' (expected name=on|off)"))?;
    let field = FilterField::parse(name).ok_or_else(|| format!("error: unknown filter '{name}'"))?;
    let on = match state {
        "on" | "true" | "1" => true,
        "off" | "false" | "0" => false,
        _ => return Err(format!("error: invalid --filter state '{state}' (expected on or off)")),
    };
    Ok((field, on))
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "sheetwright {version}

Action-economy table for exported character items.

Usage:
  sheetwright [OPTIONS] [items.json]
  sheetwright [OPTIONS] --items <path>

Options:
  -i, --items <path>         Items JSON (a list, or an object with `items`).
                             Reads stdin when omitted or `-`.
  --system <path>            Damage/healing/ability registries JSON.
                             Default: built-in 5e registries.
  --catalog <path>           Translation catalog JSON, layered over English.
  --filters <path>           Settings file holding the filter record.
                             Default: in-memory defaults.
  --filter <name>=on|off     Toggle a filter input as the dialog would, then
                             save. Names: weapons, equipment, features,
                             consumables, tools, other, spellsAll,
                             spellsPrepared, spellsRitual, spellsCantrips.
  --reset-filters            Store the default filters.
  --json                     Print the view-model as JSON.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  RUST_LOG                   Log filter for stderr diagnostics (default: warn).

Exit codes:
  0  Success.
  1  Failed to load input, configuration or settings.
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION"),
    )
}
