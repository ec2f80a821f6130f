use std::env;
use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use vmanage_client::{ImportOptions, TemplateImporter, TemplateOutcome, TemplateSet, VManageClient};

/// Import an exported template set into a vManage controller.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// vManage server IP address or hostname
    #[arg(long)]
    server: String,

    #[arg(long, default_value_t = 8443)]
    port: u16,

    #[arg(long, default_value = "admin")]
    username: String,

    /// Password; falls back to VMANAGE_PASSWORD
    #[arg(long)]
    password: Option<String>,

    /// Directory holding the exported *.json template files
    #[arg(long, default_value = "./templates")]
    dir: PathBuf,

    /// Stop at the first failed write
    #[arg(long)]
    raise_on_error: bool,

    #[arg(long)]
    verify_ssl: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Enable logging
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let args = Args::parse();
    let password = match args.password {
        Some(password) => password,
        None => env::var("VMANAGE_PASSWORD")?,
    };

    println!("vManage Template Import");
    println!("=======================");
    println!("Server: {}:{}", args.server, args.port);
    println!("Templates: {}", args.dir.display());

    let client = VManageClient::builder()
        .server(&args.server)
        .port(args.port)
        .username(&args.username)
        .password(password)
        .verify_ssl(args.verify_ssl)
        .build()
        .await?;
    println!("✅ Authentication successful!");

    let set = TemplateSet::from_dir(&args.dir)?;
    let options = ImportOptions {
        raise_on_error: args.raise_on_error,
    };
    let report = TemplateImporter::with_options(&client, options)
        .import(&set)
        .await?;

    println!("\n{:<40} {}", "Device template", "Outcome");
    println!("{}", "-".repeat(60));
    for (name, outcome) in &report.outcomes {
        let outcome = match outcome {
            TemplateOutcome::Created => "created".to_string(),
            TemplateOutcome::AlreadyExists => "already exists".to_string(),
            TemplateOutcome::SkippedNoFeatures => "skipped, no feature templates".to_string(),
            TemplateOutcome::Failed(reason) => format!("failed: {reason}"),
        };
        println!("{:<40} {}", name, outcome);
    }

    if report.is_success() {
        println!("\n✅ {} device templates created", report.created());
    } else {
        println!("\n❌ Import finished with failures");
    }

    Ok(())
}
