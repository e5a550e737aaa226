use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

/// Check password strength rules. Returns the violated rule's message, or
/// `None` when the password is acceptable.
pub fn check_strength(password: &str) -> Option<&'static str> {
    if password.chars().count() < 6 || password.chars().count() > 12 {
        return Some("Password must be between 6 and 12 characters.");
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        return Some("Password must include at least one uppercase letter.");
    }
    if !password.chars().any(|c| c.is_lowercase()) {
        return Some("Password must include at least one lowercase letter.");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Some("Password must include at least one number.");
    }
    if !password.chars().any(|c| !c.is_alphanumeric()) {
        return Some("Password must include at least one special character.");
    }
    None
}

pub fn hash_password(plain: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2.hash_password(plain.as_bytes(), &salt)?.to_string();
    Ok(password_hash)
}

pub fn verify_password(plain: &str, hashed: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hashed)?;
    let ok = Argon2::default()
        .verify_password(plain.as_bytes(), &parsed_hash)
        .is_ok();
    Ok(ok)
}
