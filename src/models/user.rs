use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Validate, Deserialize)]
pub struct RegisterUserRequest {
    #[validate(regex(
        path = "USERNAME_REGEX",
        message = "Username must be at least 3 characters, letters and underscores only"
    ))]
    pub username: String,

    #[validate(custom = "validate_password")]
    pub password: String,

    #[serde(skip)]
    pub password_hash: String,
}

lazy_static::lazy_static! {
    static ref USERNAME_REGEX: Regex = Regex::new(r"^[a-zA-Z_]{3,}$").unwrap();
}

const PASSWORD_SPECIALS: &[char] = &['@', '#', '$', '%', '^', '&', '!'];

pub fn validate_username(username: &str) -> bool {
    USERNAME_REGEX.is_match(username)
}

pub fn validate_password_format(password: &str) -> bool {
    validate_password(password).is_ok()
}

// At least 8 chars drawn from [A-Za-z0-9@#$%^&!] with one lowercase, one
// uppercase, one digit, and one special.
fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.len() < 8 {
        return Err(ValidationError::new("password_too_short"));
    }

    if !password
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SPECIALS.contains(&c))
    {
        return Err(ValidationError::new("password_invalid_characters"));
    }

    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| PASSWORD_SPECIALS.contains(&c));

    if !has_lower || !has_upper || !has_digit || !has_special {
        return Err(ValidationError::new("password_complexity"));
    }

    Ok(())
}

impl RegisterUserRequest {
    pub fn new(username: String, password: String) -> Result<Self, ValidationError> {
        let password_hash =
            hash(&password, DEFAULT_COST).map_err(|_| ValidationError::new("password_hash_failed"))?;

        let request = Self {
            username,
            password,
            password_hash,
        };

        request
            .validate()
            .map_err(|_| ValidationError::new("invalid_format"))?;
        Ok(request)
    }
}

impl User {
    pub fn from_request(request: RegisterUserRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: request.username,
            password_hash: request.password_hash,
            created_at: Utc::now(),
        }
    }

    pub fn verify_password(&self, password: &str) -> bool {
        verify(password, &self.password_hash).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_register_request() {
        let request =
            RegisterUserRequest::new("testuser".to_string(), "Password1!".to_string());
        assert!(request.is_ok());
    }

    #[test]
    fn test_username_too_short() {
        assert!(!validate_username("ab"));
        let request = RegisterUserRequest::new("ab".to_string(), "Password1!".to_string());
        assert!(request.is_err());
    }

    #[test]
    fn test_username_minimum_length_accepted() {
        assert!(validate_username("abc"));
    }

    #[test]
    fn test_username_rejects_digits() {
        // The pattern allows only letters and underscores.
        assert!(!validate_username("user_1"));
        assert!(!validate_username("username1"));
        assert!(validate_username("user_name"));
    }

    #[test]
    fn test_password_too_short() {
        assert!(!validate_password_format("Passw1!"));
    }

    #[test]
    fn test_password_accepted() {
        assert!(validate_password_format("Password1!"));
    }

    #[test]
    fn test_password_missing_character_classes() {
        assert!(!validate_password_format("password1!"));
        assert!(!validate_password_format("PASSWORD1!"));
        assert!(!validate_password_format("Password!!"));
        assert!(!validate_password_format("Password11"));
    }

    #[test]
    fn test_password_rejects_characters_outside_set() {
        assert!(!validate_password_format("Password1?"));
        assert!(!validate_password_format("Pass word1!"));
    }

    #[test]
    fn test_password_verification() {
        let request =
            RegisterUserRequest::new("testuser".to_string(), "Password1!".to_string()).unwrap();
        let user = User::from_request(request);

        assert!(user.verify_password("Password1!"));
        assert!(!user.verify_password("wrongpassword"));
    }
}
