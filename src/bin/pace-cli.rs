use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "pace-cli")]
#[command(about = "Query a running Pace Converter service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:5000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a pace in min/km to km/h
    ToSpeed {
        #[arg(short, long)]
        minutes: u32,
        #[arg(short, long, default_value_t = 0)]
        seconds: u32,
    },
    /// Convert a speed in km/h to min/km
    ToPace {
        #[arg(short, long)]
        kmh: f64,
    },
    /// Project race finish times at a pace in min/km
    Races {
        #[arg(short, long)]
        minutes: u32,
        #[arg(short, long, default_value_t = 0)]
        seconds: u32,
        /// Extra distance in kilometres
        #[arg(short, long)]
        distance: Option<f64>,
    },
    /// Check service liveness
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::ToSpeed { minutes, seconds } => {
            let res = client
                .get(format!(
                    "{}/api/convert?minutes={}&seconds={}",
                    cli.url, minutes, seconds
                ))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::ToPace { kmh } => {
            let res = client
                .get(format!("{}/api/convert?kmh={}", cli.url, kmh))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Races {
            minutes,
            seconds,
            distance,
        } => {
            let mut url = format!(
                "{}/api/races?minutes={}&seconds={}",
                cli.url, minutes, seconds
            );
            if let Some(distance) = distance {
                url.push_str(&format!("&distance={distance}"));
            }
            let res = client.get(url).send().await?;
            print_response(res).await?;
        }
        Commands::Health => {
            let res = client.get(format!("{}/health", cli.url)).send().await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
