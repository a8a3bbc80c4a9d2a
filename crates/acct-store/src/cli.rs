//! CLI module for acct-store.
//!
//! Manages account records directly on disk. It can be used either as a
//! standalone binary or as the `accounts` subcommand of the main acctstore CLI.
//!
//! # Usage
//!
//! ```bash
//! # Add an account
//! acct-store add -l user1234 -n Anonymous -s Male -b 2000-01-01 -p qwerty
//!
//! # Rename an account
//! acct-store update user1234 --login anon
//!
//! # List all accounts
//! acct-store list --format json
//! ```

use std::path::PathBuf;

use acct_core::DEFAULT_DATA_DIR;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use tabled::{Table, Tabled};

use crate::account::{Account, Field};
use crate::codec::{self, Document};
use crate::service::AccountService;
use crate::store::FileStore;

/// Account store management CLI arguments.
#[derive(Parser, Debug, Clone)]
#[command(name = "acct-store", version, about = "Manage stored account records")]
pub struct StoreArgs {
    /// Directory holding the account records.
    #[arg(short, long, env = "ACCT_DATA_DIR", default_value = DEFAULT_DATA_DIR, global = true)]
    pub data_dir: PathBuf,

    #[command(subcommand)]
    pub command: AccountCommands,
}

/// Field values given on the command line.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct FieldArgs {
    /// Login (letters, digits and '_').
    #[arg(short, long)]
    pub login: Option<String>,

    /// Display name.
    #[arg(short, long)]
    pub name: Option<String>,

    /// Sex (Male or Female).
    #[arg(short, long)]
    pub sex: Option<String>,

    /// Birthday (YYYY-MM-DD).
    #[arg(short, long)]
    pub birthday: Option<String>,

    /// Password.
    #[arg(short, long)]
    pub password: Option<String>,
}

impl FieldArgs {
    /// Build a document holding only the fields that were given.
    ///
    /// Values are passed through untouched; the codec validates them.
    pub fn to_document(&self) -> Document {
        let values = [
            (Field::Login, &self.login),
            (Field::Name, &self.name),
            (Field::Sex, &self.sex),
            (Field::Birthday, &self.birthday),
            (Field::Password, &self.password),
        ];
        values
            .into_iter()
            .filter_map(|(field, value)| {
                value
                    .as_ref()
                    .map(|v| (field.as_str().to_owned(), Value::String(v.clone())))
            })
            .collect()
    }
}

/// Account CLI subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum AccountCommands {
    /// Add an account (all fields required).
    Add {
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Print the stored document of an account.
    Show {
        /// Login of the account.
        login: String,
    },

    /// Change some fields of an account. A new login renames it.
    Update {
        /// Current login of the account.
        target: String,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Remove an account.
    Remove {
        /// Login of the account.
        login: String,
    },

    /// List all accounts.
    List {
        /// Output format.
        #[arg(short, long, value_enum, default_value_t = ListFormat::Table)]
        format: ListFormat,
    },
}

/// Output format of `list`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFormat {
    Table,
    Json,
}

/// Account row for display. Passwords are never shown.
#[derive(Tabled)]
struct AccountDisplay {
    #[tabled(rename = "Login")]
    login: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Sex")]
    sex: String,
    #[tabled(rename = "Birthday")]
    birthday: String,
}

impl From<&Account> for AccountDisplay {
    fn from(account: &Account) -> Self {
        let document = codec::encode(account);
        let text = |field: Field| {
            document
                .get(field.as_str())
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned()
        };
        Self {
            login: text(Field::Login),
            name: text(Field::Name),
            sex: text(Field::Sex),
            birthday: text(Field::Birthday),
        }
    }
}

/// Run the account CLI with the given arguments.
///
/// This is the main entry point for the account CLI, used by both the
/// standalone binary and the unified acctstore CLI.
pub fn run(args: StoreArgs) -> Result<(), Box<dyn std::error::Error>> {
    let service = AccountService::new(FileStore::open(&args.data_dir)?);

    match args.command {
        AccountCommands::Add { fields } => {
            let body = serde_json::to_vec(&fields.to_document())?;
            let account = service.create(&body)?;
            println!("Account {} added.", account.login());
        }
        AccountCommands::Show { login } => {
            let account = service.read(&login)?;
            println!("{}", codec::serialize(&account));
        }
        AccountCommands::Update { target, fields } => {
            let body = serde_json::to_vec(&fields.to_document())?;
            let account = service.update(&target, &body)?;
            if account.login() == target {
                println!("Account {target} updated.");
            } else {
                println!("Account {target} renamed to {}.", account.login());
            }
        }
        AccountCommands::Remove { login } => {
            service.delete(&login)?;
            println!("Account {login} removed.");
        }
        AccountCommands::List { format } => {
            let listing = service.list()?;
            for login in &listing.corrupted {
                eprintln!("Warning: record {login} is corrupted and was skipped");
            }
            print!("{}", render_list(&listing.accounts, format)?);
        }
    }
    Ok(())
}

/// Render accounts for `list`.
fn render_list(accounts: &[Account], format: ListFormat) -> Result<String, serde_json::Error> {
    match format {
        ListFormat::Json => {
            let documents: Vec<Value> = accounts
                .iter()
                .map(|a| Value::Object(codec::encode(a)))
                .collect();
            Ok(format!("{}\n", serde_json::to_string_pretty(&documents)?))
        }
        ListFormat::Table if accounts.is_empty() => Ok("No accounts found.\n".to_owned()),
        ListFormat::Table => {
            let rows: Vec<AccountDisplay> = accounts.iter().map(AccountDisplay::from).collect();
            Ok(format!("{}\n", Table::new(rows)))
        }
    }
}
