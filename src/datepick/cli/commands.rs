//! # CLI Layer
//!
//! One possible UI client for datepick. This is the only place that parses
//! arguments, touches stdout/stderr, reads files for the user and installs a
//! log subscriber.
//!
//! ## Structure
//!
//! - `run()`: dispatch (called by `main.rs`)
//! - `init_logging()`: tracing subscriber with `RUST_LOG` / `-v` levels
//! - `handle_*()`: per-command handlers that call the API and print results

use super::render::{print_messages, render_calendar, render_config};
use super::script::{parse_script, replay, PICKER_NAMES};
use super::setup::{Cli, Commands, ShowArgs};
use clap::Parser;
use console::Term;
use datepick::api::{CmdMessage, DatepickApi};
use datepick::config::{DatepickConfig, CONFIG_KEYS};
use datepick::dates::{parse_date, sibling_date, today};
use datepick::error::{DatepickError, Result};
use datepick::host::{Document, HostId};
use datepick::model::PickerId;
use datepick::render::ViewCache;
use directories::ProjectDirs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const SHOW_HOST: &str = "calendar";
const RANGE_ID: &str = "range";

struct AppContext {
    config: DatepickConfig,
    config_dir: PathBuf,
    use_color: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let ctx = init_context(&cli)?;

    match cli.command {
        Commands::Show(args) => handle_show(&ctx, args),
        Commands::Run {
            script,
            range,
            start,
        } => handle_run(&ctx, &script, range, start),
        Commands::Config { key, value } => handle_config(ctx, key, value),
    }
}

fn init_logging(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "warn,datepick=debug",
        _ => "warn,datepick=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config_dir = match &cli.config_dir {
        Some(dir) => dir.clone(),
        None => ProjectDirs::from("com", "datepick", "datepick")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| {
                DatepickError::InvalidConfiguration(
                    "could not determine a config directory, pass --config-dir".to_string(),
                )
            })?,
    };
    let config = DatepickConfig::load(&config_dir)?;
    debug!(dir = %config_dir.display(), ?config, "config loaded");

    Ok(AppContext {
        config,
        config_dir,
        use_color: !cli.no_color && Term::stdout().features().colors_supported(),
    })
}

fn parse_opt(raw: Option<&str>) -> Result<Option<chrono::NaiveDate>> {
    raw.map(parse_date).transpose()
}

fn handle_show(ctx: &AppContext, args: ShowArgs) -> Result<()> {
    let mut options = ctx.config.base_options();
    options.start_date = Some(parse_opt(args.start.as_deref())?.unwrap_or_else(today));
    options.selected_date = parse_opt(args.select.as_deref())?;
    options.min_date = parse_opt(args.min.as_deref())?;
    options.max_date = parse_opt(args.max.as_deref())?;
    options.disabled_dates = args
        .disabled
        .iter()
        .map(|raw| parse_date(raw))
        .collect::<Result<_>>()?;
    if let Some(day) = args.start_day {
        options.start_day = day;
    }
    options.no_weekends = args.no_weekends;
    options.always_show = true;

    let mut document = Document::new();
    document.add_container(SHOW_HOST);
    let mut api = DatepickApi::new(document, ViewCache::new());

    let result = api.create(SHOW_HOST, options)?;
    let id = result.created.ok_or(DatepickError::UnknownPicker)?;
    if args.overlay {
        api.picker(id).toggle_overlay()?;
    }

    let selected = api
        .picker(id)
        .selected_date()?
        .map(|d| d.format(&ctx.config.date_format).to_string());
    let view = api.renderer().view(id).ok_or(DatepickError::UnknownPicker)?;
    print!("{}", render_calendar(view, None, selected, ctx.use_color));
    Ok(())
}

fn read_script(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

fn handle_run(ctx: &AppContext, script: &Path, range: bool, start: Option<String>) -> Result<()> {
    let steps = parse_script(&read_script(script)?)?;

    let names: &[&str] = if range {
        &PICKER_NAMES
    } else {
        &PICKER_NAMES[..1]
    };
    let mut document = Document::new();
    for name in names {
        document.add_input(name);
    }
    let mut api = DatepickApi::new(document, ViewCache::new());

    let start = parse_opt(start.as_deref())?.unwrap_or_else(today);
    let mut pickers: Vec<PickerId> = Vec::new();
    for (index, name) in names.iter().enumerate() {
        let mut options = ctx.config.base_options();
        options.start_date = Some(if index == 0 {
            start
        } else {
            sibling_date(true, start, options.sibling_offset_months)
        });
        if range {
            options.id = Some(RANGE_ID.to_string());
        }
        let result = api.create(name, options)?;
        print_messages(&result.messages, ctx.use_color);
        pickers.push(result.created.ok_or(DatepickError::UnknownPicker)?);
    }

    let messages = replay(&mut api, &pickers, &steps)?;
    print_messages(&messages, ctx.use_color);

    for (name, id) in names.iter().zip(&pickers) {
        println!();
        match api.renderer().view(*id) {
            Some(view) => {
                let value = api
                    .document()
                    .get(&HostId::new(*name))
                    .map(|el| el.value.clone())
                    .filter(|v| !v.is_empty());
                print!("{}", render_calendar(view, Some(*name), value, ctx.use_color));
            }
            None => println!("{}: removed", name),
        }
    }
    Ok(())
}

fn handle_config(mut ctx: AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    match (key, value) {
        (None, _) => {
            let entries = CONFIG_KEYS
                .iter()
                .map(|k| Ok((k.to_string(), ctx.config.get(k)?)))
                .collect::<Result<Vec<_>>>()?;
            print!("{}", render_config(&entries, ctx.use_color));
        }
        (Some(key), None) => {
            println!("{}", ctx.config.get(&key)?);
        }
        (Some(key), Some(value)) => {
            ctx.config.set(&key, &value)?;
            ctx.config.save(&ctx.config_dir)?;
            print_messages(
                &[CmdMessage::success(format!("{} set to {}", key, value))],
                ctx.use_color,
            );
        }
    }
    Ok(())
}
