use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "sentiment-cli")]
#[command(about = "Operator CLI for the sentiment gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    /// Admin API key, required by `reset`
    #[arg(short, long, env = "SENTIMENT_ADMIN_KEY")]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show remote service, circuit breaker and fallback status
    Status,
    /// Analyze one text
    Analyze {
        text: String,
        #[arg(short, long)]
        model: Option<String>,
    },
    /// Analyze several texts in one batch
    Batch {
        #[arg(required = true)]
        texts: Vec<String>,
        #[arg(short, long)]
        model: Option<String>,
    },
    /// Force the circuit breaker back to healthy (admin)
    Reset,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Status => {
            client
                .get(format!("{}/api/v1/sentiment/status", base))
                .send()
                .await?
        }
        Commands::Analyze { text, model } => {
            client
                .post(format!("{}/api/v1/sentiment/analyze", base))
                .json(&json!({ "text": text, "model_name": model }))
                .send()
                .await?
        }
        Commands::Batch { texts, model } => {
            client
                .post(format!("{}/api/v1/sentiment/batch", base))
                .json(&json!({ "texts": texts, "model_name": model }))
                .send()
                .await?
        }
        Commands::Reset => {
            client
                .post(format!("{}/admin/circuit-breaker/reset", base))
                .headers(admin_headers(cli.key.as_deref())?)
                .send()
                .await?
        }
    };
    print_response(res).await
}

fn admin_headers(key: Option<&str>) -> Result<HeaderMap, Box<dyn std::error::Error>> {
    let key = match key.map(str::trim) {
        Some(key) if !key.is_empty() => key,
        _ => return Err("admin commands need --key or SENTIMENT_ADMIN_KEY".into()),
    };
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {}", key))?);
    Ok(headers)
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
