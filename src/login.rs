use crate::console::Console;
use crate::db::{self, DbPool};
use crate::errors::Result;
use sha2::{Digest, Sha256};
use std::io::{BufRead, Write};
use tracing::{info, warn};

/// Retry policy for the password prompt. Exhausting the ceiling aborts
/// the login with an explicit outcome instead of re-prompting forever.
#[derive(Debug, Clone, Copy)]
pub struct LoginPolicy {
    pub max_password_attempts: u32,
}

/// Checks the composite password rule: length >= 8, at least one uppercase
/// letter, one lowercase letter, one digit, and one character outside
/// letters/digits. Each character counts toward the first class it matches.
pub fn validate_password(password: &str) -> bool {
    if password.chars().count() < 8 {
        return false;
    }

    let mut has_upper = false;
    let mut has_lower = false;
    let mut has_digit = false;
    let mut has_special = false;

    for ch in password.chars() {
        if ch.is_uppercase() {
            has_upper = true;
        } else if ch.is_lowercase() {
            has_lower = true;
        } else if ch.is_ascii_digit() {
            has_digit = true;
        } else {
            has_special = true;
        }
    }

    has_upper && has_lower && has_digit && has_special
}

/// SHA-256 lowercase hex digest. Credentials are hashed before they reach
/// the gateway; the plaintext never leaves this module.
pub fn hash_password(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

/// Runs the interactive login flow.
///
/// Collects the email, re-prompts for a password until it satisfies the
/// rule or the attempt ceiling is hit, then persists the login record.
///
/// Returns `Ok(Some(email))` on success — the email is the identity token
/// for the rest of the session. `Ok(None)` means the user exhausted the
/// password attempts. A persistence failure is `Err`: the login is
/// unsuccessful even though the password itself was valid.
pub async fn run_login<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    pool: &DbPool,
    policy: LoginPolicy,
) -> Result<Option<String>> {
    console.header("LOGIN WINDOW")?;

    let email = console.read_line("Enter Email: ")?;

    let mut password = None;
    for attempt in 1..=policy.max_password_attempts {
        let candidate = console.read_line("Enter Password: ")?;
        if validate_password(&candidate) {
            password = Some(candidate);
            break;
        }
        warn!("Invalid password shape on attempt {}", attempt);
        console.warn("\nPassword does not meet rules.")?;
        console.line("   It must be at least 8 characters,")?;
        console.line("   contain uppercase, lowercase, digit, and special character.\n")?;
    }

    let Some(password) = password else {
        warn!(
            "Login aborted for '{}' after {} password attempts",
            email, policy.max_password_attempts
        );
        console.warn("\nToo many invalid passwords. Login aborted.")?;
        return Ok(None);
    };

    db::record_login(pool, &email, &hash_password(&password)).await?;
    info!("Login succeeded for '{}'", email);
    console.success("\nLogin details saved successfully.")?;
    Ok(Some(email))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::test_support::scripted;
    use crate::db::test_utils::{init_test_tracing, setup_test_db};
    use crate::errors::Result;

    #[test]
    fn password_rule_vectors() {
        // Too short (7 chars).
        assert!(!validate_password("short1!"));
        // Missing one class each.
        assert!(!validate_password("alllowercase1!"));
        assert!(!validate_password("ALLUPPERCASE1!"));
        assert!(!validate_password("NoDigits!"));
        assert!(!validate_password("NoSpecial123"));
        // All four classes, exactly 8 chars.
        assert!(validate_password("Valid123!"));
    }

    #[test]
    fn hash_is_hex_and_never_the_plaintext() {
        let hash = hash_password("Valid123!");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(hash, "Valid123!");
        // Deterministic, and distinct inputs diverge.
        assert_eq!(hash, hash_password("Valid123!"));
        assert_ne!(hash, hash_password("Valid124!"));
    }

    #[tokio::test]
    async fn successful_login_persists_the_hash() -> Result<()> {
        init_test_tracing();
        let pool = setup_test_db().await?;
        let mut console = scripted("ada@example.com\nweak\nValid123!\n");

        let outcome = run_login(
            &mut console,
            &pool,
            LoginPolicy {
                max_password_attempts: 3,
            },
        )
        .await?;
        assert_eq!(outcome.as_deref(), Some("ada@example.com"));

        let conn = pool.lock().unwrap();
        let (email, stored): (String, String) = conn.query_row(
            "SELECT email, password_hash FROM logins ORDER BY id DESC LIMIT 1",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        assert_eq!(email, "ada@example.com");
        assert_eq!(stored, hash_password("Valid123!"));
        assert_ne!(stored, "Valid123!", "plaintext must never be stored");
        Ok(())
    }

    #[tokio::test]
    async fn exhausting_the_attempt_ceiling_aborts() -> Result<()> {
        init_test_tracing();
        let pool = setup_test_db().await?;
        let mut console = scripted("ada@example.com\nbad\nworse\nstillbad\n");

        let outcome = run_login(
            &mut console,
            &pool,
            LoginPolicy {
                max_password_attempts: 3,
            },
        )
        .await?;
        assert!(outcome.is_none());

        let conn = pool.lock().unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM logins", [], |row| row.get(0))?;
        assert_eq!(count, 0, "aborted logins leave no record");
        Ok(())
    }
}
