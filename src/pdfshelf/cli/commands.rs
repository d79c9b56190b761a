use super::print::{
    print_annotations, print_categories, print_config, print_messages, print_paths, print_records,
    print_settings, print_status,
};
use super::setup::{Cli, Commands, PageSize};
use clap::Parser;
use directories::ProjectDirs;
use log::{info, LevelFilter};
use pdfshelf::api::{ConfigAction, Drag, ListFilter, ListView, SettingsUpdate, ShelfApi};
use pdfshelf::config::ShelfConfig;
use pdfshelf::env::SystemEnvironment;
use pdfshelf::error::{Result, ShelfError};
use pdfshelf::shell::AppShell;
use simplelog::{Config, WriteLogger};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::rc::Rc;

const HOME_VAR: &str = "PDFSHELF_HOME";
const LOG_FILENAME: &str = "pdfshelf.log";

struct AppContext {
    api: ShelfApi<SystemEnvironment>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Upload { files }) => handle_upload(&mut ctx, files),
        Some(Commands::List {
            search,
            category,
            favorites,
            recent,
        }) => handle_list(&ctx, search, category, favorites, recent),
        Some(Commands::Categories) => handle_categories(&ctx),
        Some(Commands::Open { selector }) => handle_open(&mut ctx, &selector),
        Some(Commands::Close) => handle_close(&mut ctx),
        Some(Commands::Status) => handle_status(&ctx),
        Some(Commands::Favorite { selectors }) => {
            let result = ctx.api.favorite(&selectors)?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Unfavorite { selectors }) => {
            let result = ctx.api.unfavorite(&selectors)?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Category {
            category,
            selectors,
        }) => {
            let result = ctx.api.set_category(&category, &selectors)?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Delete { selectors }) => {
            let result = ctx.api.delete(&selectors)?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Move {
            selector,
            position,
            search,
            category,
        }) => handle_move(&mut ctx, &selector, position, search, category),
        Some(Commands::Share { selector }) => {
            let result = ctx.api.share(&selector)?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Export { selectors, out }) => handle_export(&ctx, &selectors, &out),
        Some(Commands::Highlight {
            x1,
            y1,
            x2,
            y2,
            zoom,
            surface,
        }) => handle_highlight(&mut ctx, (x1, y1), (x2, y2), zoom, surface),
        Some(Commands::Annotations { selector }) => {
            let result = ctx.api.annotations(selector.as_deref())?;
            print_annotations(&result.annotations);
            Ok(())
        }
        Some(Commands::Unhighlight { annotations, on }) => {
            let result = ctx.api.unhighlight(on.as_deref(), &annotations)?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Find { query }) => {
            let result = ctx.api.find(&query)?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Settings { theme, primary }) => handle_settings(&ctx, theme, primary),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None => handle_list(&ctx, None, None, false, false),
    }
}

fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_VAR).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "pdfshelf", "pdfshelf")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| ShelfError::Store("Could not determine data directory".to_string()))
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = data_dir()?;
    fs::create_dir_all(&data_dir).map_err(ShelfError::Io)?;

    let config = ShelfConfig::load(&data_dir).unwrap_or_default();
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        config.level_filter()
    };
    init_logging(&data_dir, level);
    info!("pdfshelf {} using {}", env!("CARGO_PKG_VERSION"), data_dir.display());

    let env = Rc::new(SystemEnvironment::new(&data_dir, config.base_url.clone()));
    let shell = AppShell::with_highlight_color(env, &config.highlight_color);
    Ok(AppContext {
        api: ShelfApi::new(shell, data_dir),
    })
}

/// Append to the log file in the data directory. Logging is best-effort.
fn init_logging(data_dir: &Path, level: LevelFilter) {
    if level == LevelFilter::Off {
        return;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join(LOG_FILENAME));
    if let Ok(file) = file {
        let _ = WriteLogger::init(level, Config::default(), file);
    }
}

fn handle_upload(ctx: &mut AppContext, files: Vec<PathBuf>) -> Result<()> {
    let result = ctx.api.upload(&files)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(
    ctx: &AppContext,
    search: Option<String>,
    category: Option<String>,
    favorites: bool,
    recent: bool,
) -> Result<()> {
    let view = if favorites {
        ListView::Favorites
    } else if recent {
        ListView::Recent
    } else {
        ListView::All
    };
    let filter = ListFilter {
        view,
        search,
        category,
    };
    let result = ctx.api.list(&filter)?;
    print_records(&result.listed_records);
    print_messages(&result.messages);
    Ok(())
}

fn handle_categories(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.categories()?;
    print_categories(&result.categories);
    Ok(())
}

fn handle_open(ctx: &mut AppContext, selector: &str) -> Result<()> {
    let result = ctx.api.open(selector)?;
    print_messages(&result.messages);
    if let Some(status) = &result.status {
        println!("  link        {}", status.location);
    }
    Ok(())
}

fn handle_close(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.close()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_status(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.status()?;
    if let Some(status) = &result.status {
        print_status(status);
    }
    Ok(())
}

fn handle_move(
    ctx: &mut AppContext,
    selector: &str,
    position: usize,
    search: Option<String>,
    category: Option<String>,
) -> Result<()> {
    let result = ctx.api.move_record(selector, position, search, category)?;
    print_messages(&result.messages);
    print_records(&result.listed_records);
    Ok(())
}

fn handle_export(ctx: &AppContext, selectors: &[String], out: &Path) -> Result<()> {
    let result = ctx.api.export(selectors, out)?;
    if result.paths.is_empty() {
        print_messages(&result.messages);
    } else {
        print_paths(&result.paths);
    }
    Ok(())
}

fn handle_highlight(
    ctx: &mut AppContext,
    from: (f64, f64),
    to: (f64, f64),
    zoom: f64,
    surface: Option<PageSize>,
) -> Result<()> {
    let drag = Drag {
        from,
        to,
        zoom,
        page: surface.map(|s| (s.width, s.height)),
    };
    let result = ctx.api.highlight(drag)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_settings(ctx: &AppContext, theme: Option<String>, primary: Option<String>) -> Result<()> {
    let result = ctx.api.settings(SettingsUpdate { theme, primary })?;
    print_messages(&result.messages);
    if let Some(settings) = &result.settings {
        print_settings(settings);
    }
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = ctx.api.config(action)?;
    match (&result.config, result.messages.is_empty()) {
        (Some(config), true) => print_config(config),
        _ => print_messages(&result.messages),
    }
    Ok(())
}
