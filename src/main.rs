//! Toolsmith CLI entry point

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;
use anyhow::Result;

use toolsmith::tools::ToolRunner;

#[derive(Parser)]
#[command(name = "toolsmith")]
#[command(about = "Personal toolbench: package-manager commands, chat APIs and host diagnostics")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available tools
    List {
        /// Also print each tool's parameter schema
        #[arg(short, long)]
        verbose: bool,
    },

    /// Call a tool by name with JSON parameters
    Call {
        /// Tool name, e.g. npm_command
        name: String,

        /// Tool parameters as a JSON object
        #[arg(short, long, default_value = "{}")]
        params: String,
    },

    /// Show configuration and server status
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // API keys may live in a local .env
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = toolsmith::config::load()?;
    let runner = ToolRunner::new_with_defaults(&config);

    match cli.command {
        Commands::List { verbose } => {
            let mut definitions = runner.definitions();
            definitions.sort_by(|a, b| a.name.cmp(&b.name));

            for def in definitions {
                println!("{}  {}", def.name.cyan().bold(), def.description);
                if verbose {
                    println!("{}", serde_json::to_string_pretty(&def.parameters)?);
                }
            }
        }

        Commands::Call { name, params } => {
            let params: serde_json::Value = serde_json::from_str(&params)?;

            match runner.execute(&name, params).await {
                Ok(output) => println!("{}", output),
                Err(e) => {
                    eprintln!("{} {}", "Error:".red().bold(), e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Status => {
            let config_path = toolsmith::config::config_path();
            let config_state = if config_path.exists() { "present" } else { "defaults" };

            println!("{}\n", "Toolsmith status".bold());
            println!("Config file: {} ({})", config_path.display(), config_state);
            println!("Default command timeout: {}s", config.default_timeout_secs);
            println!("Registered tools: {}", runner.tool_names().len());
            println!();
            println!("{}", runner.execute("debug_info", serde_json::json!({})).await?);
        }
    }

    Ok(())
}
