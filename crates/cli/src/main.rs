use anyhow::{bail, Result};
use batch_renamer_core::{
    app_paths, apply_plan, generate_replace_plan, generate_template_plan, load_config,
    load_config_from, save_config, save_config_to, AppConfig, RenamePlan, ReplaceOptions,
    ReplacePlanOptions, TemplatePlanOptions,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::{Color, Colorize};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "batch-renamer")]
#[command(about = "Rename many files at once with templates or pattern replacement")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Read settings from this file instead of the user config.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,
    #[arg(short, long, global = true, default_value_t = false, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Rename files from a template such as 'Episode %n' or 'Data %d'
    ///
    /// Placeholders start with '%': %n is a number sequence, %a an alphabetic
    /// sequence and %d the old name without its extension. Write %% for a literal
    /// '%' and %{n} when the placeholder is followed by letters.
    Rename(RenameArgs),
    /// Replace a substring or regex match in file names
    Replace(ReplaceArgs),
    /// Print the version number and exit
    Version,
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    Show,
    Init,
}

#[derive(Debug, Args)]
struct RenameArgs {
    path: PathBuf,
    template: String,
    /// Start of the numeric sequence
    #[arg(long, allow_negative_numbers = true)]
    start: Option<i64>,
    /// Step between numbers in the sequence
    #[arg(long, allow_negative_numbers = true)]
    step: Option<i64>,
    /// Zero-pad numbers to this many digits
    #[arg(short, long)]
    pad: Option<usize>,
    /// Use an uppercase alphabetic sequence
    #[arg(short, long, default_value_t = false)]
    upper: bool,
    /// Placeholder delimiter
    #[arg(long)]
    delimiter: Option<char>,
    /// Rename without asking for confirmation
    #[arg(short, long, default_value_t = false)]
    yes: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
}

#[derive(Debug, Args)]
struct ReplaceArgs {
    path: PathBuf,
    /// Substring or regex to be replaced
    #[arg(short, long, default_value = "")]
    old: String,
    /// String to replace each match with
    #[arg(short, long, default_value = "")]
    new: String,
    #[arg(short, long, default_value_t = false)]
    match_case: bool,
    /// Maximum replacements per name, 0 for all
    #[arg(short, long)]
    count: Option<usize>,
    /// Treat --old and --new as plain text
    #[arg(long, default_value_t = false)]
    literal: bool,
    /// Rename without asking for confirmation
    #[arg(short, long, default_value_t = false)]
    yes: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli);

    if let Commands::Config(ConfigArgs {
        action: ConfigAction::Init,
    }) = cli.command
    {
        return cmd_config_init(cli.config);
    }
    if let Commands::Version = cli.command {
        return cmd_version();
    }

    let config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    if !config.color {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Rename(args) => cmd_rename(args, &config),
        Commands::Replace(args) => cmd_replace(args, &config),
        Commands::Version => cmd_version(),
        Commands::Config(_) => cmd_config_show(cli.config, &config),
    }
}

fn setup_logging(cli: &Cli) {
    let default_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .compact(),
        )
        .with(filter)
        .init();
}

fn cmd_rename(args: RenameArgs, config: &AppConfig) -> Result<()> {
    let options = TemplatePlanOptions {
        input: args.path,
        template: args.template,
        delimiter: args.delimiter.unwrap_or(config.delimiter),
        start: args.start.unwrap_or(config.start),
        step: args.step.unwrap_or(config.step),
        pad: args.pad.unwrap_or(config.pad),
        upper: args.upper || config.upper,
    };
    debug!(?options, "rename options");

    let plan = generate_template_plan(&options)?;
    print_plan(&plan, args.output, Color::Green)?;
    confirm_and_apply(&plan, args.yes)
}

fn cmd_replace(args: ReplaceArgs, config: &AppConfig) -> Result<()> {
    let options = ReplacePlanOptions {
        input: args.path,
        replace: ReplaceOptions {
            old: args.old,
            new: args.new,
            match_case: args.match_case || config.match_case,
            count: args.count.unwrap_or(config.replace_count),
            literal: args.literal,
        },
    };
    debug!(?options, "replace options");

    let plan = generate_replace_plan(&options)?;
    print_plan(&plan, args.output, Color::Yellow)?;
    confirm_and_apply(&plan, args.yes)
}

fn cmd_version() -> Result<()> {
    println!(
        "{}",
        format!("BatchRenamer {}", env!("CARGO_PKG_VERSION")).yellow()
    );
    Ok(())
}

fn cmd_config_show(path: Option<PathBuf>, config: &AppConfig) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => app_paths()?.config_path,
    };
    println!("config file: {}", path.display());
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

fn cmd_config_init(path: Option<PathBuf>) -> Result<()> {
    let defaults = AppConfig::default();
    let written = match path {
        Some(path) => {
            if path.exists() {
                bail!("config file already exists: {}", path.display());
            }
            save_config_to(&defaults, &path)?;
            path
        }
        None => {
            let existing = app_paths()?.config_path;
            if existing.exists() {
                bail!("config file already exists: {}", existing.display());
            }
            save_config(&defaults)?
        }
    };
    println!("wrote default config: {}", written.display());
    Ok(())
}

fn print_plan(plan: &RenamePlan, format: OutputFormat, color: Color) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(plan)?),
        OutputFormat::Table => {
            println!();
            for candidate in &plan.candidates {
                let line = format!(
                    "  {:16} -->\t {}",
                    candidate.original_name, candidate.new_name
                );
                println!("{}", line.color(color));
            }
        }
    }
    Ok(())
}

fn confirm_and_apply(plan: &RenamePlan, yes: bool) -> Result<()> {
    if plan.changed().next().is_none() {
        eprintln!("\nNothing to rename.");
        return Ok(());
    }

    if !yes && !confirm("Continue to rename files?")? {
        eprintln!("{}", "Operation aborted.".red().bold());
        return Ok(());
    }

    let result = apply_plan(plan);
    for failure in &result.failures {
        eprintln!("{}", failure.to_string().red());
    }
    if !result.is_success() {
        bail!(
            "{} of {} renames failed ({} succeeded)",
            result.failures.len(),
            result.failures.len() + result.applied,
            result.applied
        );
    }

    eprintln!("\n({}) files renamed successfully.", result.applied);
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    eprint!("\n{prompt} [y/N]: ");
    io::stderr().flush()?;

    let mut response = String::new();
    io::stdin().read_line(&mut response)?;
    let answer = response.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}
