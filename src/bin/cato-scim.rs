//! # cato-scim
//!
//! Command-line administration of users and groups on the Cato Networks SCIM
//! service.
//!
//! ## Usage
//!
//! ```bash
//! export CATO_SCIM_URL=https://scimservice.catonetworks.com:4443/scim/v2/<account>/<source>
//! export CATO_SCIM_TOKEN=<bearer token>
//!
//! cato-scim list-users --format csv
//! cato-scim find-group "Engineering"
//! cato-scim create-user joe.chip@example.com Joe Chip 00u3bbaucx0satWBP357
//! cato-scim user-status disable joe.chip@example.com
//! cato-scim group-membership add "Engineering" joe.chip@example.com
//! ```
//!
//! The URL and token may also come from `--url` / `--token` or from a `.env`
//! file (`./.env` unless `--env-file` is given).
//!
//! Progress and errors are written to stderr, results to stdout.
//!
//! ## Exit Codes
//!
//! - `0`: The command succeeded
//! - `1`: Configuration, request or output failure

use cato_scim::admin::{self, AdminError, StatusChange};
use cato_scim::output::{self, DetailFormat, OutputError, OutputFormat};
use cato_scim::{ConfigResolver, ConfigurationError, LogLevel, NewUser, ScimClient, ScimFailure};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "cato-scim")]
#[command(about = "Manage users and groups through the Cato Networks SCIM API")]
#[command(version)]
struct Cli {
    /// SCIM service URL (defaults to CATO_SCIM_URL)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Bearer token (defaults to CATO_SCIM_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Environment file to read CATO_SCIM_URL and CATO_SCIM_TOKEN from
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    insecure: bool,

    /// Increase client logging (-v errors, -vv operations, -vvv requests)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all users
    ListUsers {
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// List all groups
    ListGroups {
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Find a user by username or id
    FindUser {
        /// Username, or user id with --by-id
        identifier: String,

        /// Treat the identifier as a user id
        #[arg(long)]
        by_id: bool,

        #[arg(long, value_enum, default_value_t = DetailFormat::Table)]
        format: DetailFormat,
    },
    /// Find a group by display name or id
    FindGroup {
        /// Display name, or group id with --by-id
        identifier: String,

        /// Treat the identifier as a group id
        #[arg(long)]
        by_id: bool,

        #[arg(long, value_enum, default_value_t = DetailFormat::Table)]
        format: DetailFormat,
    },
    /// Create a user
    CreateUser {
        /// Email address, also used as the username
        email: String,
        given_name: String,
        family_name: String,
        /// Identifier of the user in the source directory
        external_id: String,

        /// Initial password (a random one is generated when omitted)
        #[arg(long)]
        password: Option<String>,

        /// Create the user disabled
        #[arg(long)]
        inactive: bool,
    },
    /// Enable, disable, or report the status of a user
    UserStatus {
        #[arg(value_enum)]
        action: StatusAction,
        username: String,
    },
    /// Set a user's password
    UpdatePassword { username: String, password: String },
    /// Add a user to, remove a user from, or list the members of a group
    GroupMembership {
        #[arg(value_enum)]
        action: MembershipAction,
        group: String,
        /// Required for add and remove
        username: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StatusAction {
    Enable,
    Disable,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MembershipAction {
    Add,
    Remove,
    List,
}

impl MembershipAction {
    fn name(self) -> &'static str {
        match self {
            MembershipAction::Add => "add",
            MembershipAction::Remove => "remove",
            MembershipAction::List => "list",
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Error: {0}")]
    Admin(#[from] AdminError),

    #[error("{context}: {failure}")]
    Request {
        context: &'static str,
        failure: ScimFailure,
    },

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error("Error: a username is required for '{0}'")]
    MissingUsername(&'static str),
}

impl CliError {
    fn request(context: &'static str) -> impl FnOnce(ScimFailure) -> Self {
        move |failure| Self::Request { context, failure }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            if matches!(e, CliError::Configuration(_)) {
                eprintln!("Ensure CATO_SCIM_URL and CATO_SCIM_TOKEN are set");
            }
            ExitCode::FAILURE
        }
    }
}

/// Warnings are always shown; `-v` raises this crate's filter. `RUST_LOG`
/// overrides both.
fn init_logging(verbose: u8) {
    let level = match LogLevel::from_verbosity(verbose) {
        LogLevel::None | LogLevel::Error => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
    };
    let filter = format!("warn,cato_scim={level}");
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_timestamp_millis()
        .init();
}

fn build_client(cli: &Cli) -> Result<ScimClient, CliError> {
    let mut resolver = ConfigResolver::new()
        .verify_tls(!cli.insecure)
        .log_level(LogLevel::from_verbosity(cli.verbose));
    if let Some(url) = &cli.url {
        resolver = resolver.base_url(url);
    }
    if let Some(token) = &cli.token {
        resolver = resolver.token(token);
    }
    if let Some(path) = &cli.env_file {
        resolver = resolver.env_file(path.clone());
    }
    Ok(ScimClient::new(resolver.resolve()?)?)
}

fn run(cli: Cli) -> Result<(), CliError> {
    let client = build_client(&cli)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::ListUsers { format } => {
            eprintln!("Connecting to SCIM service at {}...", client.base_url());
            let users = client
                .get_users()
                .map_err(CliError::request("Error retrieving users"))?;
            eprintln!("Retrieved {} users", users.len());
            output::render_users(&mut out, &users, format)?;
        }
        Commands::ListGroups { format } => {
            eprintln!("Connecting to SCIM service at {}...", client.base_url());
            let groups = client
                .get_groups()
                .map_err(CliError::request("Error retrieving groups"))?;
            eprintln!("Retrieved {} groups", groups.len());
            output::render_groups(&mut out, &groups, format)?;
        }
        Commands::FindUser {
            identifier,
            by_id,
            format,
        } => {
            let kind = if by_id { "ID" } else { "username" };
            eprintln!("Searching for user with {kind} '{identifier}'...");
            let user = admin::lookup_user(&client, &identifier, by_id)?;
            eprintln!("Found user: {}", display_field(&user, "userName"));
            output::render_user_detail(&mut out, &user, format)?;
        }
        Commands::FindGroup {
            identifier,
            by_id,
            format,
        } => {
            let kind = if by_id { "ID" } else { "display name" };
            eprintln!("Searching for group with {kind} '{identifier}'...");
            let group = admin::lookup_group(&client, &identifier, by_id)?;
            eprintln!("Found group: {}", display_field(&group, "displayName"));
            let members = match format {
                DetailFormat::Table => {
                    admin::resolve_member_displays(&client, &admin::group_members(&group))
                }
                DetailFormat::Json => Vec::new(),
            };
            output::render_group_detail(&mut out, &group, &members, format)?;
        }
        Commands::CreateUser {
            email,
            given_name,
            family_name,
            external_id,
            password,
            inactive,
        } => {
            eprintln!("Creating user '{email}'...");
            let user = NewUser::new(email, given_name, family_name, external_id)
                .maybe_password(password)
                .active(!inactive);
            let created = client
                .create_user(&user)
                .map_err(CliError::request("Error creating user"))?;
            eprintln!("Successfully created user: {}", display_field(&created, "userName"));
            eprintln!("User ID: {}", display_field(&created, "id"));
            eprintln!("Active: {}", display_field(&created, "active"));
            output::render_user_detail(&mut out, &created, DetailFormat::Json)?;
        }
        Commands::UserStatus { action, username } => match action {
            StatusAction::Status => {
                eprintln!("Checking status for user '{username}'...");
                let status = admin::user_status(&client, &username)?;
                writeln!(out, "User: {}", status.username).map_err(OutputError::from)?;
                writeln!(out, "Status: {}", status.label()).map_err(OutputError::from)?;
                writeln!(out, "Active: {}", status.active).map_err(OutputError::from)?;
            }
            StatusAction::Enable | StatusAction::Disable => {
                let enable = action == StatusAction::Enable;
                let (progress, past) = if enable {
                    ("Enabling", "enabled")
                } else {
                    ("Disabling", "disabled")
                };
                eprintln!("{progress} user '{username}'...");
                let message = match admin::set_user_active(&client, &username, enable)? {
                    StatusChange::AlreadyInState => format!("User {username} is already {past}"),
                    StatusChange::Changed => {
                        let symbol = if enable { "✓" } else { "✗" };
                        format!("{symbol} User {username} has been {past}")
                    }
                };
                writeln!(out, "{message}").map_err(OutputError::from)?;
            }
        },
        Commands::UpdatePassword { username, password } => {
            eprintln!("Updating password for user '{username}'...");
            admin::update_password(&client, &username, &password)?;
            writeln!(out, "✓ Password updated successfully for {username}")
                .map_err(OutputError::from)?;
        }
        Commands::GroupMembership {
            action,
            group,
            username,
        } => {
            eprintln!(
                "Performing {} operation on group '{group}'...",
                action.name()
            );
            match action {
                MembershipAction::Add => {
                    let username = username.ok_or(CliError::MissingUsername(action.name()))?;
                    admin::add_member(&client, &group, &username)?;
                    writeln!(out, "Successfully added {username} to group {group}")
                        .map_err(OutputError::from)?;
                }
                MembershipAction::Remove => {
                    let username = username.ok_or(CliError::MissingUsername(action.name()))?;
                    admin::remove_member(&client, &group, &username)?;
                    writeln!(out, "Successfully removed {username} from group {group}")
                        .map_err(OutputError::from)?;
                }
                MembershipAction::List => {
                    let listing = admin::list_members(&client, &group)?;
                    if listing.members.is_empty() {
                        writeln!(out, "Group '{group}' has no members").map_err(OutputError::from)?;
                    } else {
                        output::render_member_list(&mut out, &listing.group, &listing.members)?;
                    }
                }
            }
        }
    }

    Ok(())
}

/// String form of a top-level attribute for status lines.
fn display_field(resource: &serde_json::Value, attribute: &str) -> String {
    match resource.get(attribute) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Null) | None => "N/A".to_string(),
        Some(other) => other.to_string(),
    }
}
