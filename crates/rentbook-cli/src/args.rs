//! Command-line surface for `rentbook-cli`.

#![deny(clippy::all, clippy::pedantic)]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rentbook::config::ConfigArgs;
use rentbook_api_types::{BillStatus, ContractStatus, RoomStatus};

#[derive(Parser, Debug)]
#[command(name = "rentbook-cli", version, about = "Rentbook rental-property API CLI", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in through the Telegram bot
    Login(LoginArgs),
    /// Forget the stored session
    Logout,
    /// Show the signed-in profile
    Whoami,
    /// House management
    Houses(HousesArgs),
    /// Room management
    Rooms(RoomsArgs),
    /// Tenant management
    Tenants(TenantsArgs),
    /// Recurring billing schedules
    Schedulers(SchedulersArgs),
    /// Bills
    Bills(BillsArgs),
    /// Rental contracts
    Contracts(ContractsArgs),
}

#[derive(Parser, Debug)]
pub struct LoginArgs {
    #[command(subcommand)]
    pub action: LoginCmd,
}

#[derive(Subcommand, Debug)]
pub enum LoginCmd {
    /// Request a one-time code to send to the bot
    Code,
    /// Exchange a confirmed code for a session
    Confirm { code: String },
}

/// Request body, given inline or read from a file (the file wins).
#[derive(Args, Debug, Clone, Default)]
pub struct Payload {
    /// JSON body
    #[arg(long)]
    pub data: Option<String>,
    /// File holding the JSON body
    #[arg(long)]
    pub data_file: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Copy, Default)]
pub struct Paging {
    #[arg(long)]
    pub page: Option<u32>,
    #[arg(long)]
    pub page_size: Option<u32>,
}

#[derive(Parser, Debug)]
pub struct HousesArgs {
    #[command(subcommand)]
    pub action: HousesCmd,
}

#[derive(Subcommand, Debug)]
pub enum HousesCmd {
    /// List houses
    List {
        #[arg(long)]
        search: Option<String>,
        #[command(flatten)]
        paging: Paging,
    },
    /// Get a house by id
    Get { id: String },
    /// Create a house
    Create {
        #[command(flatten)]
        payload: Payload,
    },
    /// Patch a house
    Update {
        id: String,
        #[command(flatten)]
        payload: Payload,
    },
    /// Delete a house
    Delete { id: String },
}

#[derive(Parser, Debug)]
pub struct RoomsArgs {
    #[command(subcommand)]
    pub action: RoomsCmd,
}

#[derive(Subcommand, Debug)]
pub enum RoomsCmd {
    /// List rooms
    List {
        #[arg(long)]
        house: Option<String>,
        #[arg(long)]
        status: Option<RoomStatusArg>,
        #[arg(long)]
        search: Option<String>,
        #[command(flatten)]
        paging: Paging,
    },
    /// Get a room by id
    Get { id: String },
    /// Create a room
    Create {
        #[command(flatten)]
        payload: Payload,
    },
    /// Patch a room
    Update {
        id: String,
        #[command(flatten)]
        payload: Payload,
    },
    /// Delete a room
    Delete { id: String },
}

#[derive(Parser, Debug)]
pub struct TenantsArgs {
    #[command(subcommand)]
    pub action: TenantsCmd,
}

#[derive(Subcommand, Debug)]
pub enum TenantsCmd {
    /// List the tenants of a room
    List {
        #[arg(long)]
        room: String,
        #[arg(long)]
        active: Option<bool>,
        #[arg(long)]
        search: Option<String>,
        #[command(flatten)]
        paging: Paging,
    },
    /// Count the tenants of a room
    Total {
        #[arg(long)]
        room: String,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Get a tenant by id
    Get { id: String },
    /// Create a tenant
    Create {
        #[command(flatten)]
        payload: Payload,
    },
    /// Patch a tenant
    Update {
        id: String,
        #[command(flatten)]
        payload: Payload,
    },
    /// Flip a tenant between active and inactive
    ToggleStatus { id: String },
    /// Delete a tenant
    Delete { id: String },
}

#[derive(Parser, Debug)]
pub struct SchedulersArgs {
    #[command(subcommand)]
    pub action: SchedulersCmd,
}

#[derive(Subcommand, Debug)]
pub enum SchedulersCmd {
    /// List schedulers
    List {
        #[arg(long)]
        room: Option<String>,
        #[arg(long)]
        active: Option<bool>,
        #[command(flatten)]
        paging: Paging,
    },
    /// Count schedulers
    Total {
        #[arg(long)]
        room: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Bills issued by one scheduler
    Bills {
        #[arg(long)]
        scheduler: String,
        #[command(flatten)]
        paging: Paging,
    },
    /// Get a scheduler by id
    Get { id: String },
    /// Create a scheduler
    Create {
        #[command(flatten)]
        payload: Payload,
    },
    /// Patch a scheduler
    Update {
        id: String,
        #[command(flatten)]
        payload: Payload,
    },
    /// Delete a scheduler
    Delete { id: String },
}

#[derive(Parser, Debug)]
pub struct BillsArgs {
    #[command(subcommand)]
    pub action: BillsCmd,
}

#[derive(Subcommand, Debug)]
pub enum BillsCmd {
    /// List bills
    List {
        #[command(flatten)]
        filter: BillFilterArgs,
        #[command(flatten)]
        paging: Paging,
    },
    /// Count bills
    Total {
        #[command(flatten)]
        filter: BillFilterArgs,
    },
    /// Issue a bill
    Create {
        #[command(flatten)]
        payload: Payload,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct BillFilterArgs {
    #[arg(long)]
    pub room: Option<String>,
    #[arg(long)]
    pub tenant: Option<String>,
    #[arg(long)]
    pub status: Option<BillStatusArg>,
    /// Billing period, `YYYY-MM`
    #[arg(long)]
    pub period: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ContractsArgs {
    #[command(subcommand)]
    pub action: ContractsCmd,
}

#[derive(Subcommand, Debug)]
pub enum ContractsCmd {
    /// List contracts
    List {
        #[arg(long)]
        room: Option<String>,
        #[arg(long)]
        tenant: Option<String>,
        #[arg(long)]
        status: Option<ContractStatusArg>,
        #[command(flatten)]
        paging: Paging,
    },
    /// Get a contract by id
    Get { id: String },
    /// Create a contract
    Create {
        #[command(flatten)]
        payload: Payload,
    },
    /// Patch a contract
    Update {
        id: String,
        #[command(flatten)]
        payload: Payload,
    },
    /// Delete a contract
    Delete { id: String },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum RoomStatusArg {
    Available,
    Occupied,
    Maintenance,
}

impl From<RoomStatusArg> for RoomStatus {
    fn from(value: RoomStatusArg) -> Self {
        match value {
            RoomStatusArg::Available => RoomStatus::Available,
            RoomStatusArg::Occupied => RoomStatus::Occupied,
            RoomStatusArg::Maintenance => RoomStatus::Maintenance,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum BillStatusArg {
    Pending,
    Paid,
    Overdue,
}

impl From<BillStatusArg> for BillStatus {
    fn from(value: BillStatusArg) -> Self {
        match value {
            BillStatusArg::Pending => BillStatus::Pending,
            BillStatusArg::Paid => BillStatus::Paid,
            BillStatusArg::Overdue => BillStatus::Overdue,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum ContractStatusArg {
    Draft,
    Active,
    Terminated,
    Expired,
}

impl From<ContractStatusArg> for ContractStatus {
    fn from(value: ContractStatusArg) -> Self {
        match value {
            ContractStatusArg::Draft => ContractStatus::Draft,
            ContractStatusArg::Active => ContractStatus::Active,
            ContractStatusArg::Terminated => ContractStatus::Terminated,
            ContractStatusArg::Expired => ContractStatus::Expired,
        }
    }
}
