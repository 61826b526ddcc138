//! main.rs
//! Entry point for mdbrowse

use mdbrowse::app::Browser;
use mdbrowse::config::Config;
use mdbrowse::core::formatter::{accessories, detail_rows, sanitize_to_exact_width};
use mdbrowse::core::{
    FolderTreeOptions, HelperProcess, LocalFs, generate_folder_tree, truncate_name,
};
use mdbrowse::utils::cli::Cli;
use mdbrowse::utils::{expand_home_path, logging, shorten_home_path};

use clap::Parser;

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

/// Display width of the name column in listings.
const NAME_COLUMN: usize = 40;
/// Display width of the kind column in listings.
const KIND_COLUMN: usize = 18;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init();

    if cli.init {
        let path = Config::default_path();
        return match Config::generate_default(&path) {
            Ok(()) => {
                println!("Default config generated at {}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => fail(&e),
        };
    }

    let config = Config::load();
    let dir = match &cli.path {
        Some(path) => expand_home_path(&path.to_string_lossy()),
        None => config.general().resolved_start_directory(),
    };
    if !dir.is_dir() {
        return fail(&format!("'{}' is not a directory", dir.display()));
    }

    let tree_options = cli.tree_options(config.tree());
    if cli.tree {
        print_tree(&dir, tree_options).await;
        return ExitCode::SUCCESS;
    }

    let helper = match HelperProcess::locate(config.general().helper()) {
        Ok(helper) => helper,
        Err(e) => return fail(&e),
    };

    let sort = cli.sort.unwrap_or(config.general().sort_mode());
    let mut browser = Browser::new(Arc::new(helper), Arc::new(LocalFs))
        .with_sort(sort)
        .with_tree_options(tree_options);

    if let Err(e) = browser.load(dir).await {
        return fail(&e);
    }

    if let Some(name) = &cli.info {
        let Some(index) = find_entry(&browser, name) else {
            return fail(&format!("no entry named '{}'", name));
        };
        print_info(&browser, index);
        return ExitCode::SUCCESS;
    }

    if let Some(name) = &cli.preview {
        let Some(index) = find_entry(&browser, name) else {
            return fail(&format!("no entry named '{}'", name));
        };
        return match browser.preview(index).await {
            Some(markdown) => {
                println!("{}", markdown);
                ExitCode::SUCCESS
            }
            None => fail(&format!("no preview available for '{}'", name)),
        };
    }

    print_listing(&browser, &config);
    ExitCode::SUCCESS
}

fn fail(err: &dyn std::fmt::Display) -> ExitCode {
    eprintln!("[mdb] Error: {}", err);
    ExitCode::FAILURE
}

/// Looks an entry up by name, or by the file name of a path argument.
fn find_entry(browser: &Browser, name: &str) -> Option<usize> {
    let wanted = Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string());
    browser.entries().iter().position(|e| e.name() == wanted)
}

async fn print_tree(dir: &Path, options: FolderTreeOptions) {
    let tree = generate_folder_tree(&LocalFs, dir, options).await;
    println!("{}", tree.markdown());
}

fn print_info(browser: &Browser, index: usize) {
    let Some(entry) = browser.entries().get(index) else {
        return;
    };
    let rows = detail_rows(entry);
    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, value) in rows {
        println!("{:<width$}  {}", label, value, width = label_width);
    }
}

fn print_listing(browser: &Browser, config: &Config) {
    let toggles = config.display().accessory_toggles();
    println!(
        "{}  ({}, {} entries)",
        shorten_home_path(browser.path()),
        browser.sort_mode().label(),
        browser.entries().len()
    );

    for entry in browser.entries() {
        let name = truncate_name(entry.name(), NAME_COLUMN);
        let kind = entry.kind().unwrap_or(entry.entry_type().as_str());
        let extras = accessories(entry, &toggles).join("  ");
        println!(
            "{} {} {}",
            sanitize_to_exact_width(&name, NAME_COLUMN),
            sanitize_to_exact_width(kind, KIND_COLUMN),
            extras
        );
    }
}
