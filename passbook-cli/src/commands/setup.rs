//! Setup command - initialize the passbook directory

use anyhow::Result;
use passbook_core::services::{CredentialHasher, SALT_FILE};
use passbook_core::PassbookContext;

use crate::output;

pub fn run() -> Result<()> {
    let passbook_dir = super::get_passbook_dir();
    std::fs::create_dir_all(&passbook_dir)?;

    let salt_path = passbook_dir.join(SALT_FILE);
    if salt_path.exists() {
        output::info("Passbook is already set up.");
        println!("  Directory: {}", passbook_dir.display());
        return Ok(());
    }

    CredentialHasher::generate_salt_file(&salt_path)?;

    // Opening a context creates the database and runs migrations
    let ctx = PassbookContext::new(&passbook_dir)?;
    ctx.config.save(&passbook_dir)?;

    output::success("Passbook initialized");
    println!("  Directory: {}", passbook_dir.display());
    println!("  Database:  {}", ctx.store.db_path().display());
    println!();
    println!("Run 'pb new account' to create your first account.");

    Ok(())
}
