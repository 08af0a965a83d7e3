//! CLI Tooling
//!
//! Terminal host for a tree. `--root DIR` runs hosted mode over a directory;
//! `--data FILE.json` runs local mode over a JSON forest that is written back
//! after every successful mutation.

use crate::config::{ConfigLoader, ForgeConfig};
use crate::engine::{TreeForge, TreeForgeConfig, TreeMountError};
use crate::error::{BuildError, SetupError, TreeError};
use crate::host::FsHost;
use crate::logging::{init_logging, LoggingConfig};
use crate::render::{render_text, AsciiStyle, TextLine, TreeSettings};
use crate::surface::{MemoryDocument, MenuItem, MenuPosition, UiAdapter};
use crate::tree::{Forest, Tree};
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

const MOUNT_ID: &str = "tree";

/// TreeForge CLI - inspect and edit a file tree
#[derive(Parser)]
#[command(name = "treeforge")]
#[command(about = "File/folder tree engine with local and host-backed modes")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory to mirror (hosted mode)
    #[arg(long, conflicts_with = "data")]
    pub root: Option<PathBuf>,

    /// JSON forest file (local mode)
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Answer yes to every confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// List dot-files in hosted mode
    #[arg(long)]
    pub hidden: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the tree
    Tree {
        /// Use ASCII connectors regardless of configuration
        #[arg(long)]
        ascii: bool,
        /// Print one path per line instead
        #[arg(long)]
        paths: bool,
    },
    /// Create a file
    NewFile {
        name: String,
        /// Parent folder path (empty for the top level)
        #[arg(long, default_value = "")]
        parent: String,
    },
    /// Create a folder
    NewFolder {
        name: String,
        #[arg(long, default_value = "")]
        parent: String,
    },
    /// Rename a file or folder
    Rename {
        path: String,
        /// New name; prompted for when omitted
        name: Option<String>,
    },
    /// Delete a file or folder
    Delete { path: String },
    /// Print a file's content
    Cat { path: String },
    /// Replace a file's content (from --content or stdin)
    Write {
        path: String,
        #[arg(long)]
        content: Option<String>,
    },
}

/// CLI failures.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid tree data: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<TreeMountError> for CliError {
    fn from(err: TreeMountError) -> Self {
        match err {
            TreeMountError::Build(e) => CliError::Build(e),
            TreeMountError::Tree(e) => CliError::Tree(e),
        }
    }
}

/// Terminal dialogs via `dialoguer`. Blocking prompts run off the async workers.
pub struct TerminalUi {
    assume_yes: bool,
}

impl TerminalUi {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

#[async_trait]
impl UiAdapter for TerminalUi {
    async fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        let message = message.to_string();
        tokio::task::spawn_blocking(move || {
            dialoguer::Confirm::new()
                .with_prompt(message)
                .default(false)
                .interact()
                .unwrap_or(false)
        })
        .await
        .unwrap_or(false)
    }

    async fn prompt_text(&self, title: &str, _placeholder: &str, default: &str) -> Option<String> {
        let title = title.to_string();
        let default = default.to_string();
        tokio::task::spawn_blocking(move || {
            dialoguer::Input::<String>::new()
                .with_prompt(title)
                .with_initial_text(default)
                .allow_empty(true)
                .interact_text()
                .ok()
        })
        .await
        .ok()
        .flatten()
    }

    fn show_context_menu(&self, _position: MenuPosition, path: &str, items: &[MenuItem]) {
        let labels: Vec<&str> = items
            .iter()
            .filter(|item| item.enabled)
            .map(|item| item.action.label())
            .collect();
        eprintln!("{}: {}", path, labels.join(", "));
    }
}

/// CLI context holding the engine and its runtime.
pub struct CliContext {
    forge: TreeForge,
    data_file: Option<PathBuf>,
    runtime: tokio::runtime::Runtime,
    color: bool,
}

impl CliContext {
    pub fn forge(&self) -> &TreeForge {
        &self.forge
    }

    /// Load configuration, start logging and mount the tree.
    pub fn new(cli: &Cli) -> Result<Self, CliError> {
        let config = match &cli.config {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(None)?,
        };
        match init_logging(Some(&cli_logging(cli, &config))) {
            Ok(()) | Err(SetupError::LoggerAlreadySet(_)) => {}
            Err(e) => return Err(e.into()),
        }

        let runtime = tokio::runtime::Runtime::new()?;
        let document = Arc::new(MemoryDocument::new().with_mount(MOUNT_ID));
        let ui = Arc::new(TerminalUi::new(cli.yes));

        let (forge_config, data_file) = match (&cli.root, &cli.data) {
            (Some(root), _) => {
                let host = Arc::new(FsHost::new(root).with_hidden(cli.hidden));
                let forge_config = TreeForgeConfig::hosted(MOUNT_ID, document, host.clone()).with_hooks(host);
                (forge_config, None)
            }
            (None, Some(data)) => {
                let forest: Forest = serde_json::from_str(&std::fs::read_to_string(data)?)?;
                (TreeForgeConfig::local(MOUNT_ID, document, forest), Some(data.clone()))
            }
            (None, None) => {
                return Err(CliError::Usage(
                    "Either --root DIR or --data FILE.json is required".to_string(),
                ))
            }
        };
        let forge_config = forge_config.with_forge_config(&config).with_ui(ui);
        let forge = runtime.block_on(TreeForge::mount(forge_config))?;
        info!(mode = %forge.mode(), "CLI tree mounted");

        Ok(Self {
            forge,
            data_file,
            runtime,
            color: !cli.no_color && std::env::var_os("NO_COLOR").is_none(),
        })
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, CliError> {
        self.runtime.block_on(self.execute_inner(command))
    }

    async fn execute_inner(&self, command: &Commands) -> Result<String, CliError> {
        match command {
            Commands::Tree { ascii, paths } => {
                if *paths {
                    let lines: Vec<String> = self.forge.text_lines().into_iter().map(|l| l.path).collect();
                    return Ok(lines.join("\n"));
                }
                let mut settings = self.forge.settings().clone();
                if *ascii {
                    settings.ascii_style = AsciiStyle::Ascii;
                }
                Ok(self.format_tree(&settings))
            }
            Commands::NewFile { name, parent } => {
                let done = self.forge.create_file(parent, name).await?;
                self.finish(done, format!("Created file {}", name), format!("Could not create file {:?}", name))
            }
            Commands::NewFolder { name, parent } => {
                let done = self.forge.create_folder(parent, name).await?;
                self.finish(done, format!("Created folder {}", name), format!("Could not create folder {:?}", name))
            }
            Commands::Rename { path, name } => {
                let name = match name {
                    Some(name) => name.clone(),
                    None => self
                        .forge_prompt_name(path)
                        .await
                        .ok_or_else(|| CliError::Rejected("Rename cancelled".to_string()))?,
                };
                let done = self.forge.rename_node(path, &name).await?;
                self.finish(done, format!("Renamed {} to {}", path, name), format!("Could not rename {:?}", path))
            }
            Commands::Delete { path } => {
                let done = self.forge.delete_node(path).await?;
                self.finish(done, format!("Deleted {}", path), format!("Did not delete {:?}", path))
            }
            Commands::Cat { path } => {
                if !self.forge.open(path).await? {
                    return Err(CliError::Rejected(format!("{:?} is not a file", path)));
                }
                Ok(self.forge.cached_content(path).unwrap_or_default())
            }
            Commands::Write { path, content } => {
                let content = match content {
                    Some(content) => content.clone(),
                    None => {
                        let mut buffer = String::new();
                        std::io::stdin().read_to_string(&mut buffer)?;
                        buffer
                    }
                };
                let done = self.forge.save(path, &content).await?;
                self.finish(
                    done,
                    format!("Wrote {} bytes to {}", content.len(), path),
                    format!("Could not write {:?}", path),
                )
            }
        }
    }

    async fn forge_prompt_name(&self, path: &str) -> Option<String> {
        let node = self.forge.node(path)?;
        TerminalUi::new(false)
            .prompt_text("Rename", "Enter new name...", node.name())
            .await
            .filter(|name| !name.trim().is_empty())
    }

    /// Persist local data after a change and pick the message.
    fn finish(&self, done: bool, success: String, failure: String) -> Result<String, CliError> {
        if !done {
            return Err(CliError::Rejected(failure));
        }
        if let Some(path) = &self.data_file {
            std::fs::write(path, serde_json::to_string_pretty(&self.forge.forest())?)?;
        }
        Ok(success)
    }

    fn format_tree(&self, settings: &TreeSettings) -> String {
        let tree = Tree::from_forest(&self.forge.forest());
        render_text(&tree, settings)
            .iter()
            .map(|line| self.format_line(line, settings))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_line(&self, line: &TextLine, settings: &TreeSettings) -> String {
        let slot = if line.is_folder { "folder" } else { "file" };
        let name = match (self.color, settings.color(slot).and_then(parse_hex)) {
            (true, Some((r, g, b))) if line.is_folder => line.name.truecolor(r, g, b).bold().to_string(),
            (true, Some((r, g, b))) => line.name.truecolor(r, g, b).to_string(),
            _ => line.name.clone(),
        };
        format!("{}{} {}", line.prefix, line.icon, name)
    }
}

/// Build the logging configuration: CLI flags over the config file.
fn cli_logging(cli: &Cli, config: &ForgeConfig) -> LoggingConfig {
    let mut logging = config.logging.clone();
    if let Some(level) = &cli.log_level {
        logging.level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        logging.format = format.clone();
    }
    if let Some(output) = &cli.log_output {
        logging.output = output.clone();
    }
    if let Some(file) = &cli.log_file {
        logging.file = Some(file.clone());
    }
    if cli.no_color {
        logging.color = false;
    }
    logging
}

/// `#rrggbb` to RGB.
fn parse_hex(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
