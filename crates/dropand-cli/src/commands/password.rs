//! Password hashing for configured accounts.

use clap::Args;

use dropand_auth::PasswordHasher;
use dropand_core::error::AppError;

use crate::output;

/// Arguments for the hash-password command
#[derive(Debug, Args)]
pub struct HashPasswordArgs {
    /// Username to print in the config snippet
    #[arg(short, long, default_value = "admin")]
    pub username: String,

    /// Role to print in the config snippet
    #[arg(short, long, default_value = "admin")]
    pub role: String,
}

/// Execute the hash-password command
pub fn execute(args: &HashPasswordArgs) -> Result<(), AppError> {
    let password: String = dialoguer::Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

    if password.is_empty() {
        return Err(AppError::validation("Password cannot be empty"));
    }

    let hash = PasswordHasher::new().hash_password(&password)?;

    output::print_success("Add this account to your configuration:");
    println!();
    println!("[[auth.users]]");
    println!("username = \"{}\"", args.username);
    println!("password_hash = \"{hash}\"");
    println!("role = \"{}\"", args.role);
    Ok(())
}
