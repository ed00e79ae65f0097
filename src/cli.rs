//! Command-line interface
//!
//! One subcommand per managed resource kind, each with the full lifecycle
//! (`create` / `get` / `update` / `delete`), plus the read-only lookups
//! (`asset search`, `asset-type find`). Results print as pretty JSON on
//! stdout.

use anyhow::{bail, Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::Level;

use crate::config::Config;
use crate::fresh::client::FreshClient;
use crate::fresh::query::AssetQuery;
use crate::lookup::asset_search::search_asset;
use crate::lookup::asset_type::{find_asset_type, AssetTypeSelector};
use crate::resource::asset::{AssetHandler, AssetSpec, AssetState};
use crate::resource::asset_type::{AssetTypeHandler, AssetTypeSpec, AssetTypeState};
use crate::resource::aws_account::{self, AwsAccountHandler, AwsAccountSpec};
use crate::resource::azure_subscription::{
    self, AzureSubscriptionHandler, AzureSubscriptionSpec,
};
use crate::resource::gcp_project::{self, GcpProjectHandler, GcpProjectSpec};

/// Manage Freshservice assets from the command line
#[derive(Parser, Debug)]
#[command(name = "freshctl", version, about, long_about = None)]
pub struct Cli {
    /// Freshservice domain, e.g. 'yourdomain' or 'yourdomain.freshservice.com'
    #[arg(short, long, global = true)]
    pub domain: Option<String>,

    /// API key for Freshservice
    #[arg(long, global = true, env = "FRESHSERVICE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Remember the domain for future invocations
    #[arg(long, global = true)]
    pub save_domain: bool,

    /// Log level for debugging
    #[arg(long, value_enum, global = true, default_value = "off")]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage generic assets
    Asset {
        #[command(subcommand)]
        command: AssetCommand,
    },
    /// Manage asset types
    AssetType {
        #[command(subcommand)]
        command: AssetTypeCommand,
    },
    /// Manage AWS account assets
    AwsAccount {
        #[command(subcommand)]
        command: AwsAccountCommand,
    },
    /// Manage Azure subscription assets
    AzureSubscription {
        #[command(subcommand)]
        command: AzureSubscriptionCommand,
    },
    /// Manage GCP project assets
    GcpProject {
        #[command(subcommand)]
        command: GcpProjectCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum AssetCommand {
    /// Create a new asset
    Create(AssetArgs),
    /// Fetch an asset by display id
    Get { display_id: u64 },
    /// Replace an asset with the full declared state
    Update {
        display_id: u64,
        #[command(flatten)]
        args: AssetArgs,
    },
    /// Delete an asset; succeeds when it is already gone
    Delete { display_id: u64 },
    /// Search for exactly one asset by name, display id, or asset tag
    Search(SearchArgs),
}

#[derive(ClapArgs, Debug)]
pub struct AssetArgs {
    /// Name of the asset
    #[arg(long)]
    pub name: String,

    /// Description of the asset
    #[arg(long)]
    pub description: Option<String>,

    /// Asset type id; cannot be changed after creation
    #[arg(long)]
    pub asset_type_id: u64,

    /// Impact level (low, medium, high)
    #[arg(long, default_value = "low")]
    pub impact: String,

    /// Usage type (permanent, loaner)
    #[arg(long, default_value = "permanent")]
    pub usage_type: String,

    /// User id assigned to the asset
    #[arg(long)]
    pub user_id: Option<u64>,

    /// Location id of the asset
    #[arg(long)]
    pub location_id: Option<u64>,

    /// Department id of the asset
    #[arg(long)]
    pub department_id: Option<u64>,

    /// Agent id assigned to the asset
    #[arg(long)]
    pub agent_id: Option<u64>,

    /// Group id assigned to the asset
    #[arg(long)]
    pub group_id: Option<u64>,

    /// Custom type field as NAME=VALUE; repeatable. Names get the asset
    /// type id suffix appended automatically (e.g. 'product' becomes
    /// 'product_25')
    #[arg(long = "field", value_name = "NAME=VALUE", value_parser = parse_field)]
    pub fields: Vec<(String, String)>,
}

impl AssetArgs {
    fn to_spec(&self) -> AssetSpec {
        let mut spec = AssetSpec::new(&self.name, self.asset_type_id);
        spec.description = self.description.clone();
        spec.impact = self.impact.clone();
        spec.usage_type = self.usage_type.clone();
        spec.user_id = self.user_id;
        spec.location_id = self.location_id;
        spec.department_id = self.department_id;
        spec.agent_id = self.agent_id;
        spec.group_id = self.group_id;
        spec.type_fields = self.fields.iter().cloned().collect();
        spec
    }
}

#[derive(ClapArgs, Debug)]
pub struct SearchArgs {
    /// Name of the asset to search for
    #[arg(long)]
    pub name: Option<String>,

    /// Display id of the asset to search for
    #[arg(long)]
    pub display_id: Option<u64>,

    /// Asset tag to search for
    #[arg(long)]
    pub asset_tag: Option<String>,

    /// Include assets in trash
    #[arg(long)]
    pub trashed: bool,
}

#[derive(Subcommand, Debug)]
pub enum AssetTypeCommand {
    /// Create a new asset type
    Create(AssetTypeArgs),
    /// Fetch an asset type by id
    Get { id: u64 },
    /// Replace an asset type with the full declared state
    Update {
        id: u64,
        #[command(flatten)]
        args: AssetTypeArgs,
    },
    /// Delete an asset type; succeeds when it is already gone
    Delete { id: u64 },
    /// Resolve an asset type by id or exact name
    Find {
        /// Id of the asset type to retrieve
        #[arg(long)]
        id: Option<u64>,
        /// Name of the asset type to search for
        #[arg(long)]
        name: Option<String>,
    },
}

#[derive(ClapArgs, Debug)]
pub struct AssetTypeArgs {
    /// Name of the asset type
    #[arg(long)]
    pub name: String,

    /// Short description of the asset type
    #[arg(long)]
    pub description: Option<String>,

    /// Id of the parent asset type
    #[arg(long)]
    pub parent_asset_type_id: Option<u64>,

    /// Visibility of the asset type
    #[arg(long)]
    pub visible: Option<bool>,
}

impl AssetTypeArgs {
    fn to_spec(&self) -> AssetTypeSpec {
        let mut spec = AssetTypeSpec::new(&self.name);
        spec.description = self.description.clone();
        spec.parent_asset_type_id = self.parent_asset_type_id;
        spec.visible = self.visible;
        spec
    }
}

#[derive(Subcommand, Debug)]
pub enum AwsAccountCommand {
    /// Create a new AWS account asset
    Create(AwsAccountArgs),
    /// Fetch an AWS account asset by display id
    Get { display_id: u64 },
    /// Replace an AWS account asset with the full declared state
    Update {
        display_id: u64,
        #[command(flatten)]
        args: AwsAccountArgs,
    },
    /// Delete an AWS account asset; succeeds when it is already gone
    Delete { display_id: u64 },
}

#[derive(ClapArgs, Debug)]
pub struct AwsAccountArgs {
    /// Name of the AWS account
    #[arg(long)]
    pub account_name: String,

    /// AWS account id
    #[arg(long)]
    pub account_id: String,

    /// Purchase order number
    #[arg(long)]
    pub po_number: Option<String>,

    /// Owner of the AWS account
    #[arg(long)]
    pub owner: Option<String>,

    /// Approver for the AWS account
    #[arg(long)]
    pub approver: Option<String>,

    /// Environment type (e.g. Production, Development, Test)
    #[arg(long)]
    pub environment: Option<String>,

    /// Description of the AWS account asset
    #[arg(long)]
    pub description: Option<String>,

    /// Asset type id for AWS accounts
    #[arg(long, default_value_t = aws_account::DEFAULT_ASSET_TYPE_ID)]
    pub asset_type_id: u64,
}

impl AwsAccountArgs {
    fn to_spec(&self) -> AwsAccountSpec {
        let mut spec = AwsAccountSpec::new(&self.account_name, &self.account_id);
        spec.po_number = self.po_number.clone();
        spec.owner = self.owner.clone();
        spec.approver = self.approver.clone();
        spec.environment = self.environment.clone();
        spec.description = self.description.clone();
        spec.asset_type_id = self.asset_type_id;
        spec
    }
}

#[derive(Subcommand, Debug)]
pub enum AzureSubscriptionCommand {
    /// Create a new Azure subscription asset
    Create(AzureSubscriptionArgs),
    /// Fetch an Azure subscription asset by display id
    Get { display_id: u64 },
    /// Replace an Azure subscription asset with the full declared state
    Update {
        display_id: u64,
        #[command(flatten)]
        args: AzureSubscriptionArgs,
    },
    /// Delete an Azure subscription asset; succeeds when it is already gone
    Delete { display_id: u64 },
}

#[derive(ClapArgs, Debug)]
pub struct AzureSubscriptionArgs {
    /// Name of the Azure subscription
    #[arg(long)]
    pub subscription_name: String,

    /// Azure subscription id
    #[arg(long)]
    pub subscription_id: String,

    /// Azure tenant id
    #[arg(long)]
    pub tenant_id: String,

    /// Purchase order number
    #[arg(long)]
    pub po_number: Option<String>,

    /// Owner of the subscription
    #[arg(long)]
    pub owner: Option<String>,

    /// Approver for the subscription
    #[arg(long)]
    pub approver: Option<String>,

    /// Environment type (e.g. Production, Development, Test)
    #[arg(long)]
    pub environment: Option<String>,

    /// Billing relationship (EA or CSP)
    #[arg(long, default_value = "CSP")]
    pub eacsp: String,

    /// Active status
    #[arg(long, default_value = "Yes")]
    pub active: String,

    /// Whether the subscription is scanned by Cloudockit
    #[arg(long, default_value = "Yes")]
    pub cloudockit: String,

    /// Description of the subscription asset
    #[arg(long)]
    pub description: Option<String>,

    /// Asset type id for Azure subscriptions
    #[arg(long, default_value_t = azure_subscription::DEFAULT_ASSET_TYPE_ID)]
    pub asset_type_id: u64,
}

impl AzureSubscriptionArgs {
    fn to_spec(&self) -> AzureSubscriptionSpec {
        let mut spec = AzureSubscriptionSpec::new(
            &self.subscription_name,
            &self.subscription_id,
            &self.tenant_id,
        );
        spec.po_number = self.po_number.clone();
        spec.owner = self.owner.clone();
        spec.approver = self.approver.clone();
        spec.environment = self.environment.clone();
        spec.eacsp = self.eacsp.clone();
        spec.active = self.active.clone();
        spec.cloudockit = self.cloudockit.clone();
        spec.description = self.description.clone();
        spec.asset_type_id = self.asset_type_id;
        spec
    }
}

#[derive(Subcommand, Debug)]
pub enum GcpProjectCommand {
    /// Create a new GCP project asset
    Create(GcpProjectArgs),
    /// Fetch a GCP project asset by display id
    Get { display_id: u64 },
    /// Replace a GCP project asset with the full declared state
    Update {
        display_id: u64,
        #[command(flatten)]
        args: GcpProjectArgs,
    },
    /// Delete a GCP project asset; succeeds when it is already gone
    Delete { display_id: u64 },
}

#[derive(ClapArgs, Debug)]
pub struct GcpProjectArgs {
    /// Name of the GCP project
    #[arg(long)]
    pub project_name: String,

    /// GCP project id
    #[arg(long)]
    pub project_id: String,

    /// Purchase order number
    #[arg(long)]
    pub po_number: Option<String>,

    /// Owner of the project
    #[arg(long)]
    pub owner: Option<String>,

    /// Approver for the project
    #[arg(long)]
    pub approver: Option<String>,

    /// Environment type (e.g. Production, Development, Test)
    #[arg(long)]
    pub environment: Option<String>,

    /// Active status
    #[arg(long, default_value = "Yes")]
    pub active: String,

    /// Description of the project asset
    #[arg(long)]
    pub description: Option<String>,

    /// Asset type id for GCP projects
    #[arg(long, default_value_t = gcp_project::DEFAULT_ASSET_TYPE_ID)]
    pub asset_type_id: u64,
}

impl GcpProjectArgs {
    fn to_spec(&self) -> GcpProjectSpec {
        let mut spec = GcpProjectSpec::new(&self.project_name, &self.project_id);
        spec.po_number = self.po_number.clone();
        spec.owner = self.owner.clone();
        spec.approver = self.approver.clone();
        spec.environment = self.environment.clone();
        spec.active = self.active.clone();
        spec.description = self.description.clone();
        spec.asset_type_id = self.asset_type_id;
        spec
    }
}

/// Parse a NAME=VALUE custom field argument.
fn parse_field(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got '{raw}'")),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Resolve credentials, build the client, and dispatch one operation.
pub async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load();

    let domain = config
        .effective_domain(cli.domain.as_deref())
        .context("No domain configured; pass --domain or set FRESHSERVICE_DOMAIN")?;
    let api_key = cli
        .api_key
        .clone()
        .context("No API key provided; pass --api-key or set FRESHSERVICE_API_KEY")?;

    if cli.save_domain {
        config.set_domain(&domain)?;
    }

    let client = FreshClient::new(&api_key, &domain)?;

    match cli.command {
        Command::Asset { command } => run_asset(&client, command).await,
        Command::AssetType { command } => run_asset_type(&client, command).await,
        Command::AwsAccount { command } => run_aws_account(&client, command).await,
        Command::AzureSubscription { command } => run_azure_subscription(&client, command).await,
        Command::GcpProject { command } => run_gcp_project(&client, command).await,
    }
}

async fn run_asset(client: &FreshClient, command: AssetCommand) -> Result<()> {
    let handler = AssetHandler::new(client);
    match command {
        AssetCommand::Create(args) => print_json(&handler.create(&args.to_spec()).await?),
        AssetCommand::Get { display_id } => match handler.read(display_id).await? {
            Some(state) => print_json(&state),
            None => bail!("Asset {display_id} not found"),
        },
        AssetCommand::Update { display_id, args } => {
            print_json(&handler.update(display_id, &args.to_spec()).await?)
        }
        AssetCommand::Delete { display_id } => {
            handler.delete(display_id).await?;
            println!("Deleted asset {display_id}");
            Ok(())
        }
        AssetCommand::Search(args) => {
            let query = AssetQuery {
                name: args.name,
                display_id: args.display_id,
                asset_tag: args.asset_tag,
            };
            let asset = search_asset(client, &query, args.trashed).await?;
            print_json(&AssetState::from_asset(&asset))
        }
    }
}

async fn run_asset_type(client: &FreshClient, command: AssetTypeCommand) -> Result<()> {
    let handler = AssetTypeHandler::new(client);
    match command {
        AssetTypeCommand::Create(args) => print_json(&handler.create(&args.to_spec()).await?),
        AssetTypeCommand::Get { id } => match handler.read(id).await? {
            Some(state) => print_json(&state),
            None => bail!("Asset type {id} not found"),
        },
        AssetTypeCommand::Update { id, args } => {
            print_json(&handler.update(id, &args.to_spec()).await?)
        }
        AssetTypeCommand::Delete { id } => {
            handler.delete(id).await?;
            println!("Deleted asset type {id}");
            Ok(())
        }
        AssetTypeCommand::Find { id, name } => {
            let selector = AssetTypeSelector { id, name };
            let asset_type = find_asset_type(client, &selector).await?;
            print_json(&AssetTypeState::from_asset_type(&asset_type))
        }
    }
}

async fn run_aws_account(client: &FreshClient, command: AwsAccountCommand) -> Result<()> {
    let handler = AwsAccountHandler::new(client);
    match command {
        AwsAccountCommand::Create(args) => print_json(&handler.create(&args.to_spec()).await?),
        AwsAccountCommand::Get { display_id } => match handler.read(display_id).await? {
            Some(state) => print_json(&state),
            None => bail!("AWS account asset {display_id} not found"),
        },
        AwsAccountCommand::Update { display_id, args } => {
            print_json(&handler.update(display_id, &args.to_spec()).await?)
        }
        AwsAccountCommand::Delete { display_id } => {
            handler.delete(display_id).await?;
            println!("Deleted AWS account asset {display_id}");
            Ok(())
        }
    }
}

async fn run_azure_subscription(
    client: &FreshClient,
    command: AzureSubscriptionCommand,
) -> Result<()> {
    let handler = AzureSubscriptionHandler::new(client);
    match command {
        AzureSubscriptionCommand::Create(args) => {
            print_json(&handler.create(&args.to_spec()).await?)
        }
        AzureSubscriptionCommand::Get { display_id } => match handler.read(display_id).await? {
            Some(state) => print_json(&state),
            None => bail!("Azure subscription asset {display_id} not found"),
        },
        AzureSubscriptionCommand::Update { display_id, args } => {
            print_json(&handler.update(display_id, &args.to_spec()).await?)
        }
        AzureSubscriptionCommand::Delete { display_id } => {
            handler.delete(display_id).await?;
            println!("Deleted Azure subscription asset {display_id}");
            Ok(())
        }
    }
}

async fn run_gcp_project(client: &FreshClient, command: GcpProjectCommand) -> Result<()> {
    let handler = GcpProjectHandler::new(client);
    match command {
        GcpProjectCommand::Create(args) => print_json(&handler.create(&args.to_spec()).await?),
        GcpProjectCommand::Get { display_id } => match handler.read(display_id).await? {
            Some(state) => print_json(&state),
            None => bail!("GCP project asset {display_id} not found"),
        },
        GcpProjectCommand::Update { display_id, args } => {
            print_json(&handler.update(display_id, &args.to_spec()).await?)
        }
        GcpProjectCommand::Delete { display_id } => {
            handler.delete(display_id).await?;
            println!("Deleted GCP project asset {display_id}");
            Ok(())
        }
    }
}
