//! `roster` — command-line client for the Roster contacts server.
//!
//! # Usage
//!
//! ```text
//! roster list
//! roster add --name "John Doe" --number 9999999999 --email john@test.com
//! roster update 3 --email john.doe@test.com
//! roster --url http://contacts.lan:3000 rm 3
//! ```

mod client;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use client::ApiClient;
use roster_core::{ContactId, ContactPatch, NewContact};
use serde::Deserialize;

const DEFAULT_URL: &str = "http://localhost:3000";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "roster", version, about = "Manage contacts on a Roster server")]
struct Args {
  /// Path to a TOML config file (`url = "..."`).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the roster server (default: http://localhost:3000).
  #[arg(long, env = "ROSTER_URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List every contact.
  List,
  /// Show one contact.
  Get { id: ContactId },
  /// Create a contact.
  Add {
    #[arg(long)]
    name:   String,
    #[arg(long)]
    number: String,
    #[arg(long)]
    email:  String,
    #[arg(long)]
    notes:  Option<String>,
  },
  /// Change some fields of a contact; omitted fields are kept.
  Update {
    id:     ContactId,
    #[arg(long)]
    name:   Option<String>,
    #[arg(long)]
    number: Option<String>,
    #[arg(long)]
    email:  Option<String>,
    /// Pass an empty string to clear the notes.
    #[arg(long)]
    notes:  Option<String>,
  },
  /// Delete a contact permanently.
  #[command(alias = "remove")]
  Rm { id: ContactId },
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flag (or env) overrides config file, which overrides the default.
  let base_url = args
    .url
    .or_else(|| (!file_cfg.url.is_empty()).then_some(file_cfg.url))
    .unwrap_or_else(|| DEFAULT_URL.to_string());

  let client = ApiClient::new(base_url)?;
  run(&client, args.command).await
}

async fn run(client: &ApiClient, command: Command) -> Result<()> {
  match command {
    Command::List => {
      print!("{}", render::table(&client.list().await?));
    }
    Command::Get { id } => match client.get(id).await? {
      Some(contact) => print!("{}", render::detail(&contact)),
      None => bail!("Contact not found"),
    },
    Command::Add { name, number, email, notes } => {
      let input = NewContact { name, number, email, notes };
      let contact = client.create(&input).await?;
      print!("{}", render::detail(&contact));
    }
    Command::Update { id, name, number, email, notes } => {
      let patch = ContactPatch { name, number, email, notes };
      if patch.is_empty() {
        bail!("nothing to update; pass at least one of --name, --number, --email, --notes");
      }
      let contact = client.update(id, &patch).await?;
      print!("{}", render::detail(&contact));
    }
    Command::Rm { id } => {
      client.remove(id).await?;
      println!("deleted contact {id}");
    }
  }
  Ok(())
}
