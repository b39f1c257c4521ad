use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::user::{RegisterUserRequest, User};

#[derive(Error, Debug, PartialEq)]
pub enum UserServiceError {
    #[error("Invalid username or password.")]
    AuthenticationFailed,
}

/// In-memory user accounts plus the single current-user session. Users are
/// created at registration and never deleted or mutated; at most one user is
/// logged in at a time.
pub struct UserService {
    users: Vec<User>,
    current: Option<Uuid>,
}

impl UserService {
    pub fn new() -> Self {
        Self {
            users: Vec::new(),
            current: None,
        }
    }

    /// Attempts to register the two stock accounts, ignoring format
    /// rejections. Both stock usernames contain a digit and fail the username
    /// pattern, so this normally stores nothing.
    pub fn seed_defaults(&mut self) {
        for (username, password) in [("username1", "Password1!"), ("username2", "Password2!")] {
            match RegisterUserRequest::new(username.to_string(), password.to_string()) {
                Ok(request) => {
                    self.register(request);
                }
                Err(err) => warn!("skipping seed user {username}: {err}"),
            }
        }
    }

    /// Stores a validated registration. Uniqueness is not enforced; login
    /// scans in insertion order and the first match wins.
    pub fn register(&mut self, request: RegisterUserRequest) -> User {
        let user = User::from_request(request);
        info!("registered user {}", user.username);
        self.users.push(user.clone());
        user
    }

    /// Finds a user by exact username whose password verifies. Does not touch
    /// the session.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<User, UserServiceError> {
        self.users
            .iter()
            .find(|user| user.username == username && user.verify_password(password))
            .cloned()
            .ok_or_else(|| {
                warn!("failed login attempt for {username}");
                UserServiceError::AuthenticationFailed
            })
    }

    /// Authenticates and makes the user the current session.
    pub fn login(&mut self, username: &str, password: &str) -> Result<User, UserServiceError> {
        let user = self.authenticate(username, password)?;
        self.current = Some(user.id);
        info!("user {} logged in", user.username);
        Ok(user)
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.current_user() {
            info!("user {} logged out", user.username);
        }
        self.current = None;
    }

    pub fn current_user(&self) -> Option<&User> {
        let id = self.current?;
        self.users.iter().find(|user| user.id == id)
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }
}

impl Default for UserService {
    fn default() -> Self {
        Self::new()
    }
}
