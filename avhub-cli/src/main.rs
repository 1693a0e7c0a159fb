//! AV Hub CLI
//!
//! Browse and administer the hub's autonomous-vehicle records from a terminal.
//!
//! ## Usage
//!
//! ```bash
//! avhub summary
//! avhub list deployments --filter status=Active --sort operator --page 2
//! avhub list policies --search robotaxi --client-side
//! avhub show safety 42
//! avhub export-url funding --filter agency=USDOT
//! avhub create resources --json '{"title": "AV Primer", "author_org": "DOT", "resource_type": "Report"}'
//! avhub delete curbside 7 --user admin --password ...
//! ```

mod commands;
mod paths;
mod text;

use std::env;
use std::fs::File;
use std::process::ExitCode;
use std::time::Duration;

use avhub_lib::HubClient;
use avhub_lib::HubConfig;
use avhub_lib::SessionContext;
use avhub_lib::error::Error;
use avhub_lib::resource::ResourceKind;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use log::debug;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::WriteLogger;

use crate::commands::AdminAction;
use crate::commands::ListArgs;

#[derive(Parser)]
#[command(name = "avhub")]
#[command(about = "Browse autonomous-vehicle policy, deployment and safety records", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Hub base URL (overrides AVHUB_URL)
    #[arg(long, global = true, value_name = "URL")]
    url: Option<String>,

    /// Rows per page (overrides AVHUB_PAGE_SIZE)
    #[arg(long, global = true, value_name = "N")]
    page_size: Option<usize>,

    /// Request timeout in seconds (overrides AVHUB_TIMEOUT_SECS)
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    /// Verbosity level (can be repeated)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbosity: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Show record counts and the newest policies and incidents
    Summary,

    /// List records as a table page
    List {
        /// Resource: policies, deployments, funding, safety, resources, curbside
        #[arg(value_name = "RESOURCE")]
        resource: ResourceKind,

        /// Equality filter, e.g. status=Active (repeatable)
        #[arg(short, long = "filter", value_name = "KEY=VALUE")]
        filters: Vec<String>,

        /// Free-text search
        #[arg(short, long)]
        search: Option<String>,

        /// Click a column header (repeat to toggle direction or chain keys)
        #[arg(long, value_name = "COLUMN")]
        sort: Vec<String>,

        /// Page to show, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Fetch everything and filter locally instead of on the server
        #[arg(long)]
        client_side: bool,
    },

    /// Show one record
    Show {
        #[arg(value_name = "RESOURCE")]
        resource: ResourceKind,

        #[arg(value_name = "ID")]
        id: String,
    },

    /// Print the CSV export link for a filtered list
    ExportUrl {
        #[arg(value_name = "RESOURCE")]
        resource: ResourceKind,

        /// Equality filter, e.g. status=Active (repeatable)
        #[arg(short, long = "filter", value_name = "KEY=VALUE")]
        filters: Vec<String>,

        /// Free-text search
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Create a record (admin)
    Create {
        #[arg(value_name = "RESOURCE")]
        resource: ResourceKind,

        #[command(flatten)]
        payload: Payload,

        #[command(flatten)]
        credentials: Credentials,
    },

    /// Replace a record's fields (admin)
    Update {
        #[arg(value_name = "RESOURCE")]
        resource: ResourceKind,

        #[arg(value_name = "ID")]
        id: String,

        #[command(flatten)]
        payload: Payload,

        #[command(flatten)]
        credentials: Credentials,
    },

    /// Delete a record (admin)
    Delete {
        #[arg(value_name = "RESOURCE")]
        resource: ResourceKind,

        #[arg(value_name = "ID")]
        id: String,

        #[command(flatten)]
        credentials: Credentials,
    },
}

#[derive(Args)]
struct Payload {
    /// Record as a JSON object
    #[arg(long, value_name = "JSON")]
    json: Option<String>,

    /// Field override, e.g. status=Enacted (repeatable)
    #[arg(long = "field", value_name = "KEY=VALUE")]
    fields: Vec<String>,
}

#[derive(Args)]
struct Credentials {
    /// Admin username (defaults to AVHUB_ADMIN_USER)
    #[arg(long)]
    user: Option<String>,

    /// Admin password (defaults to AVHUB_ADMIN_PASSWORD)
    #[arg(long)]
    password: Option<String>,
}

impl Credentials {
    /// Signs in with the flags, falling back to the environment.
    fn into_session(self) -> SessionContext {
        let mut ctx = SessionContext::new();
        let user = self.user.or_else(|| env::var("AVHUB_ADMIN_USER").ok());
        let password = self
            .password
            .or_else(|| env::var("AVHUB_ADMIN_PASSWORD").ok());
        if let (Some(user), Some(password)) = (user, password) {
            ctx.sign_in(user, password);
        }
        ctx
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let Some(path) = paths::prepare_log_file() else {
        return;
    };
    match File::create(&path) {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(level, Config::default(), file) {
                eprintln!("Warning: failed to initialize logger: {}", e);
            }
        }
        Err(e) => eprintln!("Warning: cannot write {}: {}", path.display(), e),
    }
}

fn load_config(cli: &Cli) -> Result<HubConfig, Error> {
    let mut config = HubConfig::from_env()?;
    if let Some(url) = &cli.url {
        config.base_url = url.clone();
    }
    if let Some(size) = cli.page_size {
        config.page_size = size.max(1);
    }
    if let Some(secs) = cli.timeout {
        config.timeout = Some(Duration::from_secs(secs));
    }
    Ok(config)
}

async fn run(cli: Cli) -> Result<ExitCode, Error> {
    let config = load_config(&cli)?;
    debug!("Using {:?}", config);

    let client = HubClient::builder()
        .url(config.base_url.clone())
        .timeout_opt(config.timeout)
        .build()?;

    match cli.command {
        Commands::Summary => commands::summary(&client, &config).await?,
        Commands::List {
            resource,
            filters,
            search,
            sort,
            page,
            client_side,
        } => {
            let filters = commands::parse_filters(&filters, search.as_deref())?;
            let args = ListArgs {
                kind: resource,
                filters,
                sort,
                page,
                client_side,
            };
            return Ok(commands::list(&client, &config, args).await);
        }
        Commands::Show { resource, id } => commands::show(&client, resource, &id).await?,
        Commands::ExportUrl {
            resource,
            filters,
            search,
        } => {
            let filters = commands::parse_filters(&filters, search.as_deref())?;
            commands::export_url(&client, resource, &filters)?;
        }
        Commands::Create {
            resource,
            payload,
            credentials,
        } => {
            let record = commands::parse_record(payload.json.as_deref(), &payload.fields)?;
            let ctx = credentials.into_session();
            commands::admin(&client, &ctx, resource, AdminAction::Create(record)).await?;
        }
        Commands::Update {
            resource,
            id,
            payload,
            credentials,
        } => {
            let record = commands::parse_record(payload.json.as_deref(), &payload.fields)?;
            let ctx = credentials.into_session();
            commands::admin(&client, &ctx, resource, AdminAction::Update(id, record)).await?;
        }
        Commands::Delete {
            resource,
            id,
            credentials,
        } => {
            let ctx = credentials.into_session();
            commands::admin(&client, &ctx, resource, AdminAction::Delete(id)).await?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
