//! Seed tool: creates missing tables and provisions the accounts the social
//! service depends on.
//!
//! # Usage
//!
//! ```bash
//! # Ensure the sentinel account exists
//! cargo run -p forgexp-seed -- --database-url postgres://localhost/forgexp
//!
//! # Also provision an administrator
//! cargo run -p forgexp-seed -- --admin-username superkai64 --admin-email admin@admin.com
//! ```
//!
//! Existing tables and rows are left in place, so the tool can run on every
//! deploy.

use anyhow::{Context, Result};
use clap::Parser;
use sea_orm::Database;
use tracing::info;

mod provision;
mod schema;

use provision::{Account, Outcome, ensure_account};

#[derive(Parser, Debug)]
#[command(about = "Provision the sentinel and admin accounts")]
struct Args {
    /// Postgres connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Username of the account that inherits posts of deleted users
    #[arg(long, env = "SENTINEL_USERNAME", default_value = "Deleted User")]
    sentinel_username: String,

    #[arg(long, default_value = "deleted@user.com")]
    sentinel_email: String,

    /// Optional administrator to create or promote
    #[arg(long, requires = "admin_email")]
    admin_username: Option<String>,

    #[arg(long)]
    admin_email: Option<String>,
}

impl Args {
    fn accounts(&self) -> Vec<Account> {
        let mut accounts = vec![Account {
            username: self.sentinel_username.clone(),
            email: self.sentinel_email.clone(),
            bio: Some("Grave yard of the fallen".to_owned()),
            is_admin: false,
        }];
        if let (Some(username), Some(email)) = (&self.admin_username, &self.admin_email) {
            accounts.push(Account {
                username: username.clone(),
                email: email.clone(),
                bio: None,
                is_admin: true,
            });
        }
        accounts
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    forgexp_core::tracing::init_tracing();
    let args = Args::parse();

    let db = Database::connect(&args.database_url)
        .await
        .context("failed to connect to database")?;

    let tables = schema::ensure_tables(&db).await?;
    info!(tables, "schema ensured");

    for account in args.accounts() {
        let outcome = ensure_account(&db, &account).await?;
        let action = match outcome {
            Outcome::Created(_) => "created",
            Outcome::Promoted(_) => "promoted",
            Outcome::Unchanged(_) => "unchanged",
        };
        info!(
            username = %account.username,
            user_id = outcome.id(),
            is_admin = account.is_admin,
            action,
            "account provisioned"
        );
    }

    Ok(())
}
