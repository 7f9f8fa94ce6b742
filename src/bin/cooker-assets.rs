use std::{io::IsTerminal as _, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use cooker_assets::{Config, PatchReport, compose, patch, prompts};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "cooker-assets", version)]
struct Cli {
    /// JSON config overriding default paths, URL bases and the manual mapping table.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log every record and image touched.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print the run summary as JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Overwrite imageUrl for ids listed in the manual mapping table.
    Manual(ManualArgs),
    /// Derive every imageUrl from its id (`rice-noodle` -> `<base>/Rice Noodle.png`).
    Derive(DeriveArgs),
    /// Point imageUrl at local PNG assets where one exists.
    Local(LocalArgs),
    /// Write a Markdown table of AI image prompts, one row per ingredient.
    Prompts(PromptsArgs),
    /// Flatten transparent PNGs onto a white background.
    Whiten(WhitenArgs),
}

#[derive(Parser, Debug)]
struct ManualArgs {
    /// Ingredient JSON file, rewritten in place.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct DeriveArgs {
    /// Ingredient JSON file, rewritten in place.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// URL prefix the derived file name is appended to.
    #[arg(long)]
    base_url: Option<String>,
}

#[derive(Parser, Debug)]
struct LocalArgs {
    /// Ingredient JSON file, rewritten in place.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Directory holding `<id>.png` assets.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// URL prefix written in front of `<id>.png`.
    #[arg(long)]
    prefix: Option<String>,
}

#[derive(Parser, Debug)]
struct PromptsArgs {
    /// Ingredient JSON file, read only.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Markdown output path.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct WhitenArgs {
    /// Source directory of transparent PNGs.
    #[arg(long = "from")]
    from: Option<PathBuf>,

    /// Output directory, created if missing.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.json);

    let cfg = match &cli.config {
        Some(path) => {
            Config::load(path).with_context(|| format!("load config '{}'", path.display()))?
        }
        None => Config::default(),
    };

    match cli.cmd {
        Command::Manual(args) => cmd_manual(args, cfg, cli.json),
        Command::Derive(args) => cmd_derive(args, cfg, cli.json),
        Command::Local(args) => cmd_local(args, cfg, cli.json),
        Command::Prompts(args) => cmd_prompts(args, cfg, cli.json),
        Command::Whiten(args) => cmd_whiten(args, cfg, cli.json),
    }
}

/// Logs go to stdout, or to stderr when stdout carries the JSON summary.
fn init_tracing(verbose: bool, json: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .without_time();
    if json {
        builder
            .with_ansi(std::io::stderr().is_terminal())
            .with_writer(std::io::stderr)
            .init();
    } else {
        builder
            .with_ansi(std::io::stdout().is_terminal())
            .with_writer(std::io::stdout)
            .init();
    }
}

fn print_json(report: &impl Serialize) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(report).context("encode summary JSON")?;
    println!("{s}");
    Ok(())
}

fn cmd_manual(args: ManualArgs, cfg: Config, json: bool) -> anyhow::Result<()> {
    let path = args.in_path.unwrap_or(cfg.ingredients_path);
    let report = patch::manual::run(&path, &cfg.manual_mapping)?;
    if json {
        return print_json(&report);
    }
    println!(
        "Updated {} ingredients based on manual mapping.",
        report.updated
    );
    println!("Done.");
    Ok(())
}

fn cmd_derive(args: DeriveArgs, cfg: Config, json: bool) -> anyhow::Result<()> {
    let path = args.in_path.unwrap_or(cfg.ingredients_path);
    let base_url = args.base_url.unwrap_or(cfg.image_base_url);
    let report = patch::derive::run(&path, &base_url)?;
    if json {
        return print_json(&report);
    }
    println!("Updated {} ingredients.", report.updated);
    println!("Done.");
    Ok(())
}

fn cmd_local(args: LocalArgs, cfg: Config, json: bool) -> anyhow::Result<()> {
    let path = args.in_path.unwrap_or(cfg.ingredients_path);
    let assets = args.assets.unwrap_or(cfg.assets_dir);
    let prefix = args.prefix.unwrap_or(cfg.local_url_prefix);
    let report = patch::local::run(&path, &assets, &prefix)?;
    if json {
        return print_json(&report);
    }
    print_local_summary(&report);
    Ok(())
}

fn print_local_summary(report: &PatchReport) {
    println!("Updated: {} ingredients", report.updated);
    println!("Missing images: {} ingredients", report.missing.len());
    if report.missing.is_empty() {
        return;
    }

    println!("Still using their original URL:");
    for m in &report.missing {
        println!(
            "  - {} ({})",
            m.id.as_deref().unwrap_or("<no id>"),
            m.name.as_deref().unwrap_or("")
        );
    }
}

fn cmd_prompts(args: PromptsArgs, cfg: Config, json: bool) -> anyhow::Result<()> {
    let path = args.in_path.unwrap_or(cfg.ingredients_path);
    let out = args.out.unwrap_or(cfg.prompts_path);
    let report = prompts::run(&path, &out, &cfg.name_translations)?;
    if json {
        return print_json(&report);
    }
    println!(
        "Wrote {} prompts ({} need a manual translation).",
        report.total,
        report.untranslated.len()
    );
    println!("Prompts saved to: {}", out.display());
    Ok(())
}

fn cmd_whiten(args: WhitenArgs, cfg: Config, json: bool) -> anyhow::Result<()> {
    let from = args.from.unwrap_or(cfg.assets_dir);
    let out = args.out.unwrap_or(cfg.white_dir);
    let report = compose::run(&from, &out)?;
    if json {
        return print_json(&report);
    }
    println!("Done. Processed {} images.", report.processed);
    Ok(())
}
