//! CLI surface for the lifecycle tracker.
//!
//! Thin handlers over the store: parse args, open the store, run one
//! operation, render human or JSON output.

use std::ffi::OsString;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::config::Config;
use crate::core::{ActorId, EntityId, EntityState};
use crate::store::EntityStore;
use crate::{Error, Result};

mod commands;
mod render;

#[derive(Parser, Debug)]
#[command(
    name = "ft",
    version,
    about = "Entity lifecycle tracker",
    infer_subcommands = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Machine-readable JSON output.
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    /// Actor identity attributed to mutations.
    #[arg(long, global = true, value_name = "ACTOR")]
    pub actor: Option<String>,

    /// Errors only.
    #[arg(short = 'q', long, global = true, default_value_t = false)]
    pub quiet: bool,

    /// Debug output (repeat for more).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new entity (starts in draft).
    #[command(alias = "new")]
    Create(CreateArgs),

    /// Show an entity with its versions and transition history.
    Show(ShowArgs),

    /// List entities, most recently updated first.
    #[command(alias = "ls")]
    List(ListArgs),

    /// Submit a draft for validation.
    Submit(MoveArgs),

    /// Validate a submitted entity.
    Validate(MoveArgs),

    /// Reject a submitted entity (reason required).
    Reject(RejectArgs),

    /// Archive a validated entity.
    Archive(MoveArgs),

    /// Send a rejected entity back to draft for resubmission.
    Reopen(MoveArgs),

    /// Append a new content version.
    Revise(ReviseArgs),

    /// Edit name and/or type.
    Update(UpdateArgs),

    /// Permanently delete an entity and its history.
    #[command(alias = "rm")]
    Delete(DeleteArgs),

    /// Collection-level statistics.
    Stats,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Display name.
    pub name: String,

    /// Kind: Document, Contrat, Facture, Rapport, Demande, or free text.
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub kind: String,

    /// Initial content.
    #[arg(short = 'c', long)]
    pub content: String,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    pub id: String,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Filter by current state.
    #[arg(long, value_name = "STATE")]
    pub state: Option<String>,

    /// Filter by kind.
    #[arg(long = "type", value_name = "TYPE")]
    pub kind: Option<String>,
}

#[derive(Args, Debug)]
pub struct MoveArgs {
    pub id: String,

    /// Optional note recorded on the transition.
    #[arg(short = 'r', long)]
    pub reason: Option<String>,
}

#[derive(Args, Debug)]
pub struct RejectArgs {
    pub id: String,

    /// Why the entity was rejected (recorded on the audit trail).
    #[arg(short = 'r', long, required = true)]
    pub reason: String,
}

#[derive(Args, Debug)]
pub struct ReviseArgs {
    pub id: String,

    /// New content snapshot.
    #[arg(short = 'c', long)]
    pub content: String,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long = "type", value_name = "TYPE")]
    pub kind: Option<String>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    pub id: String,
}

/// Shared handler context.
pub struct Ctx {
    pub json: bool,
    pub quiet: bool,
    pub actor: ActorId,
    pub store: EntityStore,
}

impl Ctx {
    fn print(&self, human: String) {
        if !self.quiet {
            println!("{human}");
        }
    }
}

pub fn parse_from<I, T>(args: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::parse_from(args)
}

/// Dispatch a parsed invocation.
pub fn run(cli: Cli, config: &Config) -> Result<()> {
    let actor = resolve_actor(cli.actor.as_deref(), config)?;
    let store = EntityStore::open(config.slot_path())?;
    let mut ctx = Ctx {
        json: cli.json,
        quiet: cli.quiet,
        actor,
        store,
    };

    match cli.command {
        Commands::Create(args) => commands::create::handle(&mut ctx, args),
        Commands::Show(args) => commands::show::handle(&ctx, args),
        Commands::List(args) => commands::list::handle(&ctx, args),
        Commands::Submit(args) => {
            commands::transition::handle(&mut ctx, args, EntityState::Submitted)
        }
        Commands::Validate(args) => {
            commands::transition::handle(&mut ctx, args, EntityState::Validated)
        }
        Commands::Reject(args) => commands::transition::handle(
            &mut ctx,
            MoveArgs {
                id: args.id,
                reason: Some(args.reason),
            },
            EntityState::Rejected,
        ),
        Commands::Archive(args) => {
            commands::transition::handle(&mut ctx, args, EntityState::Archived)
        }
        Commands::Reopen(args) => commands::transition::handle(&mut ctx, args, EntityState::Draft),
        Commands::Revise(args) => commands::revise::handle(&mut ctx, args),
        Commands::Update(args) => commands::update::handle(&mut ctx, args),
        Commands::Delete(args) => commands::delete::handle(&mut ctx, args),
        Commands::Stats => commands::stats::handle(&ctx),
    }
}

fn resolve_actor(flag: Option<&str>, config: &Config) -> Result<ActorId> {
    let raw = flag
        .map(str::to_string)
        .or_else(|| config.defaults.actor.clone())
        .or_else(|| std::env::var("USER").ok())
        .ok_or_else(|| {
            Error::Config("no actor configured; pass --actor or set FT_ACTOR".into())
        })?;
    Ok(ActorId::new(raw)?)
}

fn parse_id(raw: &str) -> Result<EntityId> {
    Ok(EntityId::parse(raw)?)
}

fn parse_state(raw: &str) -> Result<EntityState> {
    Ok(raw.parse::<EntityState>()?)
}
