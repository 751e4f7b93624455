use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use fs_err as fs;
use patchfold_cli::config::{self, ConfigMerger};
use patchfold_core::adapters::ProfileDirSource;
use patchfold_core::pipeline::{ToolError, run_compose, write_caches};
use patchfold_core::session::ProfileSession;
use patchfold_core::settings::ProfileSettings;
use patchfold_core::{FsStorage, TracingDiagnostics};
use patchfold_decode::{decode_binary, decode_text_as};
use patchfold_render::{render_patch_list_md, render_profile_md_for};
use patchfold_types::{Direction, PatchOrder, Provenance};
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "patchfold",
    version,
    about = "Compose launcher version profiles from ordered patches."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compose the profile and print it.
    Compose(ComposeArgs),
    /// List patches in the order in effect.
    List(ProfileArgs),
    /// Inspect or change the persisted patch order.
    Order(OrderArgs),
    /// Decode a single patch document and print it as JSON.
    Decode(DecodeArgs),
    /// Rewrite binary caches for every materialized version.
    Cache(ProfileArgs),
}

#[derive(Debug, Clone, clap::Args)]
struct ProfileArgs {
    /// Profile directory (default: current directory).
    #[arg(long, default_value = ".")]
    profile: Utf8PathBuf,

    /// Keep whitelisted libraries instead of filtering them out.
    #[arg(long, default_value_t = false)]
    no_filter: bool,

    /// Extra artifact prefixes (`group:name`) to filter out.
    #[arg(long)]
    whitelist: Vec<String>,

    /// Ignore binary caches and always decode text documents.
    #[arg(long, default_value_t = false)]
    no_cache: bool,
}

#[derive(Debug, Parser)]
struct ComposeArgs {
    #[command(flatten)]
    profile: ProfileArgs,

    /// Output format.
    #[arg(long, value_enum, default_value = "markdown")]
    format: OutputFormat,

    /// List only libraries whose rules allow this OS (`linux`, `osx`, `windows`).
    #[arg(long)]
    os: Option<String>,
}

#[derive(Debug, Parser)]
struct OrderArgs {
    #[command(flatten)]
    profile: ProfileArgs,

    #[command(subcommand)]
    action: OrderAction,
}

#[derive(Debug, Subcommand)]
enum OrderAction {
    /// Print the order in effect, one identifier per line.
    Show,
    /// Persist an explicit order; unmentioned patches follow in natural order.
    Set {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Move one patch a single step.
    Move {
        id: String,
        #[arg(long, value_enum)]
        direction: DirectionArg,
    },
    /// Delete the persisted order and fall back to natural order.
    Reset,
}

#[derive(Debug, Parser)]
struct DecodeArgs {
    /// Path to a text (`.json`) or binary cache document.
    path: Utf8PathBuf,

    /// Treat the input as a binary cache.
    #[arg(long, default_value_t = false)]
    binary: bool,

    /// Reject text documents without an `order` key.
    #[arg(long, default_value_t = false)]
    require_order: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Markdown,
    Json,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum DirectionArg {
    Up,
    Down,
}

impl From<DirectionArg> for Direction {
    fn from(d: DirectionArg) -> Self {
        match d {
            DirectionArg::Up => Direction::Up,
            DirectionArg::Down => Direction::Down,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main() {
        error!("{}", e);
        return ExitCode::from(e.exit_code());
    }
    ExitCode::from(0)
}

fn real_main() -> Result<(), ToolError> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::List(args) => cmd_list(args),
        Command::Order(args) => cmd_order(args),
        Command::Decode(args) => cmd_decode(args),
        Command::Cache(args) => cmd_cache(args),
    }
}

fn settings_for(args: &ProfileArgs) -> anyhow::Result<ProfileSettings> {
    let file_config =
        config::load_or_default(&args.profile).context("load patchfold.toml config")?;
    let merged =
        ConfigMerger::new(file_config).merge(args.no_filter, &args.whitelist, args.no_cache);
    debug!(
        "merged config: filter_enabled={}, whitelist={:?}, cache_enabled={}",
        merged.filter_enabled, merged.whitelist, merged.cache_enabled
    );

    Ok(ProfileSettings {
        root: args.profile.clone(),
        filter_enabled: merged.filter_enabled,
        whitelist: merged.whitelist,
        cache_enabled: merged.cache_enabled,
        ..ProfileSettings::default()
    })
}

fn cmd_compose(args: ComposeArgs) -> Result<(), ToolError> {
    let settings = settings_for(&args.profile)?;
    let source =
        ProfileDirSource::new(&FsStorage, settings.layout()).with_cache(settings.cache_enabled);
    let outcome = run_compose(&settings, &source, &FsStorage, &TracingDiagnostics)?;

    match args.format {
        OutputFormat::Markdown => print!(
            "{}",
            render_profile_md_for(&outcome.profile, args.os.as_deref())
        ),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&outcome.profile)
                .context("serialize profile")?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn cmd_list(args: ProfileArgs) -> Result<(), ToolError> {
    let settings = settings_for(&args)?;
    let source =
        ProfileDirSource::new(&FsStorage, settings.layout()).with_cache(settings.cache_enabled);
    let session = ProfileSession::open(settings, &source, &FsStorage, &TracingDiagnostics)?;
    print!(
        "{}",
        render_patch_list_md(session.patch_set(), session.order())
    );
    Ok(())
}

fn cmd_order(args: OrderArgs) -> Result<(), ToolError> {
    let settings = settings_for(&args.profile)?;
    let source =
        ProfileDirSource::new(&FsStorage, settings.layout()).with_cache(settings.cache_enabled);
    let mut session = ProfileSession::open(settings, &source, &FsStorage, &TracingDiagnostics)?;

    match args.action {
        OrderAction::Show => {}
        OrderAction::Set { ids } => {
            let requested: PatchOrder = ids.into_iter().collect();
            session.set_order(&requested)?;
        }
        OrderAction::Move { id, direction } => {
            session.move_patch(&id, direction.into())?;
        }
        OrderAction::Reset => session.reset_order()?,
    }

    for id in session.order().iter() {
        println!("{}", id);
    }
    Ok(())
}

fn cmd_decode(args: DecodeArgs) -> Result<(), ToolError> {
    let bytes = fs::read(&args.path).with_context(|| format!("read {}", args.path))?;
    let patch = if args.binary {
        decode_binary(&bytes, args.path.as_str()).map(|cached| cached.patch)
    } else {
        decode_text_as(
            &bytes,
            args.path.as_str(),
            args.require_order,
            Provenance::Custom,
        )
    }
    .map_err(anyhow::Error::from)?;

    let json = serde_json::to_string_pretty(&patch).context("serialize patch")?;
    println!("{}", json);
    Ok(())
}

fn cmd_cache(args: ProfileArgs) -> Result<(), ToolError> {
    let settings = settings_for(&args)?;
    let summary = write_caches(&FsStorage, &settings.layout(), &TracingDiagnostics)?;
    println!(
        "cached {} version(s), {} failed",
        summary.written, summary.failed
    );
    Ok(())
}
