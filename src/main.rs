//! CLI entry point for folio-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_rs::commands::{self, list::PostFilter};
use folio_rs::config::{Credentials, BLOG_VAR, PROJECTS_VAR, TOKEN_VAR};
use folio_rs::Folio;

#[derive(Parser)]
#[command(name = "folio-rs")]
#[command(version)]
#[command(about = "A personal site serving projects and blog posts from Notion", long_about = None)]
struct Cli {
    /// Set the site directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Print records as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Notion integration token
    #[arg(long, env = "NOTION_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// Projects database id
    #[arg(long, env = "PROJECTS_ID", global = true)]
    projects_id: Option<String>,

    /// Blog database id
    #[arg(long, env = "BLOG_DB_ID", global = true)]
    blog_db_id: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all projects
    Projects,

    /// Show a project with its content
    Project {
        /// Notion page id
        id: String,
    },

    /// List blog posts
    Posts {
        /// Only posts with this tag
        #[arg(short, long, conflicts_with = "author")]
        tag: Option<String>,

        /// Only posts by this author
        #[arg(short, long)]
        author: Option<String>,
    },

    /// Show a post with its markdown body
    Post {
        /// Notion page id
        id: String,
    },

    /// Start the site server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to
        #[arg(short, long)]
        ip: Option<String>,
    },

    /// Display version information
    Version,
}

impl Cli {
    /// Flags take precedence; clap falls back to the environment
    fn credentials(&self) -> Result<Credentials> {
        Credentials::from_lookup(|key| match key {
            TOKEN_VAR => self.token.clone(),
            PROJECTS_VAR => self.projects_id.clone(),
            BLOG_VAR => self.blog_db_id.clone(),
            _ => None,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio_rs=debug,info"
    } else {
        "folio_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Commands::Version = cli.command {
        println!("folio-rs version {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let base_dir = match &cli.cwd {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };
    let folio = Folio::new(&base_dir, &cli.credentials()?)?;

    match cli.command {
        Commands::Projects => commands::list::projects(&folio, cli.json).await?,

        Commands::Project { id } => commands::show::project(&folio, &id, cli.json).await?,

        Commands::Posts { tag, author } => {
            let filter = PostFilter::from_args(tag, author);
            commands::list::posts(&folio, &filter, cli.json).await?
        }

        Commands::Post { id } => commands::show::post(&folio, &id, cli.json).await?,

        Commands::Server { port, ip } => {
            let ip = ip.unwrap_or_else(|| folio.config.server.ip.clone());
            let port = port.unwrap_or(folio.config.server.port);
            tracing::info!("Starting server at http://{}:{}", ip, port);
            folio.serve(&ip, port).await?;
        }

        Commands::Version => {}
    }

    Ok(())
}
