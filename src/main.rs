mod api;
mod server;

use clap::{Args, Parser, Subcommand};
use std::io::{self, Read};
use std::path::Path;
use threadstorm::config::EngineConfig;
use threadstorm::{
    format_float, format_number, format_percent, format_with_config, Draft, FormattingOptions,
    Tone,
};

#[derive(Parser)]
#[command(name = "threadstorm", about = "Threadstorm content formatter")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    Format(FormatArgs),
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone)]
struct FormatArgs {
    #[arg(long)]
    text: Option<String>,
    #[arg(long, default_value_t = 500)]
    max_chars: usize,
    #[arg(long, default_value = "professional")]
    tone: String,
    #[arg(long)]
    no_numbering: bool,
    #[arg(long)]
    no_hook: bool,
    #[arg(long)]
    no_cta: bool,
    #[arg(long, default_value_t = 3)]
    image_rhythm: usize,
    #[arg(long)]
    json: bool,
}

impl Default for FormatArgs {
    fn default() -> Self {
        Self {
            text: None,
            max_chars: 500,
            tone: "professional".to_string(),
            no_numbering: false,
            no_hook: false,
            no_cta: false,
            image_rhythm: 3,
            json: false,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8787)]
    port: u16,
    #[arg(long, default_value = "webapp/dist")]
    web_root: String,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Format(FormatArgs::default()));

    match command {
        Command::Format(args) => run_format(args),
        Command::Serve(args) => server::serve(args).await,
    }
}

fn run_format(args: FormatArgs) -> Result<(), String> {
    let tone = Tone::from_str(&args.tone).ok_or_else(|| format!("invalid tone: {}", args.tone))?;
    let options = FormattingOptions {
        max_chars_per_post: args.max_chars,
        tone,
        include_numbering: !args.no_numbering,
        enable_hook: !args.no_hook,
        enable_cta: !args.no_cta,
        image_rhythm: args.image_rhythm,
    };

    let raw_content = read_text(args.text)?;
    let draft = Draft {
        raw_content,
        options,
    };

    let (config, _) = EngineConfig::load(None)?;
    let storm = format_with_config(&draft, &config).map_err(|err| err.to_string())?;

    if args.json {
        let payload = serde_json::to_string_pretty(&storm)
            .map_err(|err| format!("failed to serialize result: {}", err))?;
        println!("{}", payload);
        return Ok(());
    }

    println!(
        "Thread {}: {} posts, {} characters",
        storm.draft_id,
        storm.total_posts,
        format_number(storm.total_characters as f64)
    );
    println!(
        "Engagement score: {}",
        format_float(storm.engagement_score, 2)
    );
    let utilization =
        storm.total_characters as f64 / (storm.total_posts as f64 * args.max_chars as f64);
    println!("Average post utilization: {}", format_percent(utilization));

    for post in &storm.posts {
        println!();
        println!("--- Post {} ({} chars) ---", post.index, post.char_count);
        println!("{}", post.text);
        if post.has_image_suggestion {
            println!(
                "[image suggested: {}]",
                post.image_rationale.as_deref().unwrap_or("unspecified")
            );
        }
    }

    if !storm.suggestions.is_empty() {
        println!("\nSuggestions:");
        for suggestion in &storm.suggestions {
            println!("- {}", suggestion);
        }
    }

    Ok(())
}

fn read_text(arg: Option<String>) -> Result<String, String> {
    if let Some(text) = arg {
        if !text.trim().is_empty() {
            return Ok(text);
        }
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|err| format!("failed reading stdin: {}", err))?;
    if buffer.trim().is_empty() {
        return Err("missing draft content: pass --text or pipe stdin".to_string());
    }
    Ok(buffer)
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
