use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use flagdeck_stacks::{compose, DeployConfig, DomainConfig, DEFAULT_REGION};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "flagdeck")]
#[command(about = "Provision the feature-flag service backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose the deployment and write the synthesized template
    Synth {
        /// Target region
        #[arg(long, env = "FLAGDECK_REGION", default_value = DEFAULT_REGION)]
        region: String,

        /// Custom domain name (e.g. query.example.com)
        #[arg(long, env = "FLAGDECK_DOMAIN_NAME")]
        domain_name: Option<String>,

        /// Hosted DNS zone id for the custom domain
        #[arg(long, env = "FLAGDECK_HOSTED_ZONE_ID")]
        hosted_zone_id: Option<String>,

        /// Hosted DNS zone name (e.g. example.com)
        #[arg(long, env = "FLAGDECK_HOSTED_ZONE_NAME")]
        hosted_zone_name: Option<String>,

        /// Where to write the template JSON
        #[arg(short, long, default_value = "template.json")]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Synth {
            region,
            domain_name,
            hosted_zone_id,
            hosted_zone_name,
            output,
        } => synth(region, domain_name, hosted_zone_id, hosted_zone_name, output),
    }
}

fn synth(
    region: String,
    domain_name: Option<String>,
    hosted_zone_id: Option<String>,
    hosted_zone_name: Option<String>,
    output: PathBuf,
) -> anyhow::Result<()> {
    let domain = DomainConfig::from_parts(domain_name, hosted_zone_id, hosted_zone_name)?;

    let mut config = DeployConfig::new(region);
    if let Some(domain) = domain {
        config = config.with_domain(domain);
    }

    let deployment = compose(&config).context("composition failed")?;

    let json = deployment.template.to_json()?;
    std::fs::write(&output, json)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!(
        "{} {} resources → {}",
        "synthesized".green().bold(),
        deployment.template.resources.len(),
        output.display()
    );

    if !deployment.template.outputs.is_empty() {
        println!("\n{}", "Outputs:".bold());
        for out in deployment.template.outputs.iter() {
            println!("  {} = {}", out.key.cyan(), out.value);
        }
    }

    Ok(())
}
