use std::sync::Arc;

use anyhow::{bail, Context};
use ap_core::{Article, ArticleStorage, ArticleUpdate, Category, SearchParams};
use ap_inference::{create_backend, ContentGenerator};
use ap_jobs::{ArticleJob, Cadence, JobConfig};
use clap::Parser;
use tracing::info;

mod duration;
mod logging;

use duration::HumanDuration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Keeps a site stocked with generated articles", long_about = None)]
pub struct Cli {
    /// Storage backend: sqlite or memory
    #[arg(long, env = "AUTOPRESS_STORAGE", default_value = "sqlite")]
    storage: String,
    /// SQLite path or sqlite: URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
    #[arg(long, env = "AUTOPRESS_MODEL", default_value = "huggingface", help = "Generation backend. Available models: huggingface (default), deepseek, dummy")]
    model: String,
    /// Base URL of an OpenAI-compatible API, overriding the backend default
    #[arg(long, env = "AUTOPRESS_MODEL_URL")]
    model_url: Option<String>,
    /// Remote model identifier, overriding the backend default
    #[arg(long, env = "AUTOPRESS_MODEL_NAME")]
    model_name: Option<String>,
    /// Bearer credential; falls back to HUGGINGFACE_API_KEY or DEEPSEEK_API_KEY
    #[arg(long, env = "AUTOPRESS_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    /// Timeout for a single backend request (e.g. 30s, 2m)
    #[arg(long, env = "AUTOPRESS_TIMEOUT", default_value = "60s")]
    timeout: HumanDuration,
    /// Articles the startup fill guarantees
    #[arg(long, env = "AUTOPRESS_MIN_ARTICLES", default_value_t = ap_jobs::DEFAULT_MIN_ARTICLES)]
    min_articles: usize,
    /// Cron expression for scheduled generation (5 or 6 fields)
    #[arg(long, env = "AUTOPRESS_SCHEDULE", default_value = ap_jobs::scheduler::DAILY_AT_MIDNIGHT)]
    schedule: String,
    /// IANA timezone for the schedule; server local time when unset
    #[arg(long, env = "AUTOPRESS_TZ")]
    tz: Option<String>,
    /// Generate on a fixed interval instead of the cron schedule (e.g. 1h, 30m, 1d)
    #[arg(long)]
    interval: Option<HumanDuration>,
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Fill the inventory, then generate on schedule until Ctrl-C (default)
    Run,
    /// Generate and store one article now
    Generate,
    /// List stored articles, newest first
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        tag: Option<String>,
    },
    Show {
        id: String,
    },
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        summary: Option<String>,
        #[arg(long)]
        category: Option<Category>,
        #[arg(long, value_delimiter = ',')]
        tags: Option<Vec<String>>,
    },
    Delete {
        id: String,
    },
    Categories,
    Tags,
    /// Report storage health
    Health,
}

impl Cli {
    fn inference_config(&self) -> ap_inference::Config {
        ap_inference::Config {
            api_key: self.resolve_api_key(),
            model: self.model.clone(),
            model_name: self.model_name.clone(),
            model_url: self.model_url.clone(),
            timeout: self.timeout.0,
            ..Default::default()
        }
    }

    fn resolve_api_key(&self) -> Option<String> {
        if self.api_key.is_some() {
            return self.api_key.clone();
        }
        let var = match self.model.to_lowercase().as_str() {
            "deepseek" => "DEEPSEEK_API_KEY",
            _ => "HUGGINGFACE_API_KEY",
        };
        std::env::var(var).ok().filter(|k| !k.trim().is_empty())
    }

    fn job_config(&self) -> anyhow::Result<JobConfig> {
        let cadence = match self.interval {
            Some(interval) => Cadence::every(interval.0),
            None => Cadence::cron(&self.schedule, self.tz.as_deref())?,
        };
        Ok(JobConfig {
            min_articles: self.min_articles,
            cadence,
            ..Default::default()
        })
    }
}

fn print_article(article: &Article) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(article)?);
    Ok(())
}

async fn run(job: ArticleJob) -> anyhow::Result<()> {
    let handle = job.initialize_on_startup().await?;
    info!("🗞️ Article system running, press Ctrl-C to stop");
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    info!("Shutting down article scheduler");
    handle.shutdown().await;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let storage: Arc<dyn ArticleStorage> =
        ap_storage::create_storage(&cli.storage, cli.database_url.as_deref()).await?;
    info!("💾 Storage initialized successfully (using {})", cli.storage);

    match cli.command.as_ref().unwrap_or(&Commands::Run) {
        Commands::Run | Commands::Generate => {
            let backend = create_backend(&cli.inference_config())?;
            info!("🧠 Generation backend initialized (using {})", backend.name());
            let generator = Arc::new(ContentGenerator::new(backend));
            let job = ArticleJob::new(generator, storage, cli.job_config()?);

            if matches!(cli.command, Some(Commands::Generate)) {
                let article = job.generate_on_demand().await?;
                print_article(&article)?;
            } else {
                run(job).await?;
            }
        }
        Commands::List { search, category, tag } => {
            let params = SearchParams {
                search: search.clone(),
                category: category.clone(),
                tag: tag.clone(),
            };
            for article in storage.list_articles(&params).await? {
                println!(
                    "{}  {}  {:<10}  {}",
                    article.id,
                    article.created_at.format("%Y-%m-%d %H:%M"),
                    article.category,
                    article.title
                );
            }
        }
        Commands::Show { id } => match storage.get_article(id).await? {
            Some(article) => print_article(&article)?,
            None => bail!("Article not found: {}", id),
        },
        Commands::Update { id, title, summary, category, tags } => {
            let update = ArticleUpdate {
                title: title.clone(),
                summary: summary.clone(),
                category: *category,
                tags: tags.clone(),
                ..Default::default()
            };
            if update.is_empty() {
                bail!("Nothing to update");
            }
            match storage.update_article(id, &update).await? {
                Some(article) => print_article(&article)?,
                None => bail!("Article not found: {}", id),
            }
        }
        Commands::Delete { id } => {
            if !storage.delete_article(id).await? {
                bail!("Article not found: {}", id);
            }
            println!("Deleted {}", id);
        }
        Commands::Categories => {
            for category in storage.categories().await? {
                println!("{}", category);
            }
        }
        Commands::Tags => {
            for tag in storage.tags().await? {
                println!("{}", tag);
            }
        }
        Commands::Health => {
            let health = storage.health().await;
            println!("{}", serde_json::to_string_pretty(&health)?);
            if !health.database {
                bail!("Storage is degraded");
            }
        }
    }

    Ok(())
}
