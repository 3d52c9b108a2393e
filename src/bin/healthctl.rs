use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "healthctl")]
#[command(about = "Management CLI for the sidecar health agent", long_about = None)]
struct Cli {
    #[arg(short, long, env = "HEALTH_ADMIN_URL", default_value = "http://127.0.0.1:15099")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show agent state and discovery address
    Status,
    /// Exit non-zero unless the control plane is reachable
    Ready,
    /// Force a degrade: remove interception rules now
    ForceFailed,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::builder().no_proxy().build()?;

    match cli.command {
        Commands::Status => {
            let res = client.get(format!("{}/status", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::Ready => {
            let res = client.get(format!("{}/ready", cli.url)).send().await?;
            let ready = res.status().is_success();
            println!("{}", res.text().await?);
            if !ready {
                std::process::exit(1);
            }
        }
        Commands::ForceFailed => {
            let res = client.post(format!("{}/force-failed", cli.url)).send().await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: admin API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let body = res.text().await?;
    let json: Value = serde_json::from_str(&body)?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
