use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use glbfind::api::{ApiClient, ApiConfig, DEFAULT_API_BASE, DEFAULT_RESULT_LIMIT, ModelCatalog};
use glbfind::download::{default_download_dir, file_name_from_url};
use glbfind::interactive::InteractiveApp;
use glbfind::logging;
use glbfind::share_link::{DEFAULT_BASE, PARAM_QUERY, PARAM_TASK_ID, ShareLink};
use glbfind::task_id::{is_valid_task_id, short_task_id};
use glbfind::viewer::ExternalViewer;

#[derive(Parser)]
#[command(
    name = "glbfind",
    version,
    about = "Search text-to-3D generations and fetch their GLB assets",
    long_about = None
)]
struct Cli {
    /// Search prompt (omit when using --task-id or --interactive)
    query: Option<String>,

    /// Resolve one generation task instead of searching
    #[arg(short = 't', long)]
    task_id: Option<String>,

    /// Share link to restore; fills in whatever the other arguments leave unset
    #[arg(long)]
    link: Option<String>,

    /// Interactive full-screen mode
    #[arg(short = 'i', long)]
    interactive: bool,

    /// With --task-id: download the GLB asset after resolving it
    #[arg(short = 'd', long)]
    download: bool,

    /// Directory downloads are written to (default: the user's download dir)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Maximum number of search results
    #[arg(short = 'n', long, default_value_t = DEFAULT_RESULT_LIMIT)]
    limit: u32,

    /// Output format for one-shot commands
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Base URL of the generation service
    #[arg(long, env = "GLBFIND_API_URL", default_value = DEFAULT_API_BASE)]
    api_url: String,

    /// Bearer token for the generation service
    #[arg(long, env = "GLBFIND_API_TOKEN", hide_env_values = true)]
    api_token: Option<String>,

    /// External viewer command, run with the cached asset path appended
    #[arg(long, env = "GLBFIND_VIEWER")]
    viewer_cmd: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Jsonl,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if cli.interactive {
        return run_interactive(cli);
    }

    logging::init_tracing(cli.verbose);

    let link = match &cli.link {
        Some(url) => Some(ShareLink::parse(url)?),
        None => None,
    };
    let task_id = cli.task_id.clone().or_else(|| {
        link.as_ref()
            .and_then(|l| l.get(PARAM_TASK_ID).map(str::to_string))
    });
    let query = cli.query.clone().or_else(|| {
        link.as_ref()
            .and_then(|l| l.get(PARAM_QUERY).map(str::to_string))
    });

    if let Some(task_id) = task_id {
        return run_task_lookup(&cli, &task_id);
    }

    let Some(query) = query else {
        bail!("a search prompt is required (or use --task-id / --interactive)");
    };
    run_search(&cli, &query)
}

fn build_client(cli: &Cli) -> Result<ApiClient> {
    let token = cli
        .api_token
        .clone()
        .context("an API token is required; pass --api-token or set GLBFIND_API_TOKEN")?;
    ApiClient::new(ApiConfig {
        base_url: cli.api_url.clone(),
        token,
    })
}

fn run_search(cli: &Cli, prompt: &str) -> Result<()> {
    let client = build_client(cli)?;

    let started = Instant::now();
    let hits = client.search(prompt, cli.limit)?;
    let elapsed = started.elapsed();

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match cli.format {
        OutputFormat::Text => {
            if hits.is_empty() {
                println!("No models found.");
            } else {
                for hit in &hits {
                    let caption = hit.prompt.as_deref().unwrap_or("(no prompt)");
                    println!("{}  {}", short_task_id(&hit.task_id).cyan(), caption.bold());
                    println!("    {} {}", "task".dimmed(), hit.task_id);
                    if let Some(secs) = hit.create_time {
                        println!("    {} {}", "created".dimmed(), format_create_time(secs));
                    }
                }
            }

            eprintln!("\n⏱️  Search completed in {}ms", elapsed.as_millis());
            eprintln!("(Found {} results)", hits.len());
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "results": hits,
                "count": hits.len(),
                "duration_ms": elapsed.as_millis() as u64,
            });
            serde_json::to_writer_pretty(&mut handle, &output)?;
            writeln!(&mut handle)?;
        }
        OutputFormat::Jsonl => {
            for hit in &hits {
                serde_json::to_writer(&mut handle, hit)?;
                writeln!(&mut handle)?;
            }
        }
    }

    Ok(())
}

fn run_task_lookup(cli: &Cli, task_id: &str) -> Result<()> {
    if !is_valid_task_id(task_id) {
        bail!("malformed task id: {task_id}");
    }

    let client = build_client(cli)?;

    let started = Instant::now();
    let detail = client.task(task_id)?;
    let elapsed = started.elapsed();

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match cli.format {
        OutputFormat::Text => {
            println!("{} {}", "task".cyan().bold(), task_id);
            if let Some(prompt) = &detail.prompt {
                println!("{} {}", "prompt".cyan().bold(), prompt);
            }
            if let Some(status) = &detail.status {
                println!("{} {}", "status".cyan().bold(), status);
            }
            println!("{} {}", "asset".cyan().bold(), detail.model);
            if let Some(secs) = detail.create_time {
                println!("{} {}", "created".cyan().bold(), format_create_time(secs));
            }

            eprintln!("\n⏱️  Lookup completed in {}ms", elapsed.as_millis());
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "task_id": task_id,
                "detail": detail,
                "duration_ms": elapsed.as_millis() as u64,
            });
            serde_json::to_writer_pretty(&mut handle, &output)?;
            writeln!(&mut handle)?;
        }
        OutputFormat::Jsonl => {
            serde_json::to_writer(&mut handle, &detail)?;
            writeln!(&mut handle)?;
        }
    }

    if cli.download {
        let dir = cli.output.clone().unwrap_or_else(default_download_dir);
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        let path = dir.join(file_name_from_url(&detail.model));
        let bytes = client.download(&detail.model, &path)?;
        println!("{} {} ({} bytes)", "✓ Saved".green(), path.display(), bytes);
    }

    Ok(())
}

fn run_interactive(cli: Cli) -> Result<()> {
    let log_path = logging::init_tracing_to_file(cli.verbose)?;
    tracing::info!(log = %log_path.display(), "interactive session starting");

    let client = build_client(&cli)?;
    let catalog: Arc<dyn ModelCatalog> = Arc::new(client);

    let link = match &cli.link {
        Some(url) => ShareLink::parse(url)?,
        None => {
            let mut link = ShareLink::new(DEFAULT_BASE);
            if let Some(query) = &cli.query {
                link.set(PARAM_QUERY, query);
            }
            if let Some(task_id) = &cli.task_id {
                link.set(PARAM_TASK_ID, task_id);
            }
            link
        }
    };

    let viewer = Arc::new(ExternalViewer::new(cli.viewer_cmd.clone(), catalog.clone()));
    let download_dir = cli.output.clone().unwrap_or_else(default_download_dir);

    let mut app = InteractiveApp::new(catalog, viewer, link, cli.limit, download_dir);
    app.run()
}

fn format_create_time(secs: i64) -> String {
    match chrono::DateTime::from_timestamp(secs, 0) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M UTC").to_string(),
        None => secs.to_string(),
    }
}
