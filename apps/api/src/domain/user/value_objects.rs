use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length of a username
pub const USERNAME_MAX_LEN: usize = 150;

/// Username value object
///
/// # Invariants
/// - Between 1 and 150 characters
/// - Only letters, digits and `@ . + - _`
/// - Is immutable after construction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
    /// Creates a new Username value object
    ///
    /// # Example
    /// ```
    /// use league_planner_api::domain::user::value_objects::Username;
    ///
    /// let username = Username::new("coach.kowalski").expect("valid username");
    /// assert_eq!(username.as_str(), "coach.kowalski");
    /// ```
    pub fn new(username: impl Into<String>) -> Result<Self, String> {
        let username = username.into();
        if Self::is_valid(&username) {
            Ok(Username(username))
        } else {
            Err(format!("Invalid username: {}", username))
        }
    }

    fn is_valid(username: &str) -> bool {
        let length = username.chars().count();
        (1..=USERNAME_MAX_LEN).contains(&length)
            && username
                .chars()
                .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
    }

    /// Returns the username as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_username() {
        assert!(Username::new("name1").is_ok());
    }

    #[test]
    fn valid_username_with_symbols() {
        assert!(Username::new("first.last+league@club-1_x").is_ok());
    }

    #[test]
    fn invalid_username_empty() {
        assert!(Username::new("").is_err());
    }

    #[test]
    fn invalid_username_with_space() {
        assert!(Username::new("two words").is_err());
    }

    #[test]
    fn invalid_username_too_long() {
        assert!(Username::new("a".repeat(USERNAME_MAX_LEN + 1)).is_err());
        assert!(Username::new("a".repeat(USERNAME_MAX_LEN)).is_ok());
    }

    #[test]
    fn username_display() {
        let username = Username::new("name1").unwrap();
        assert_eq!(format!("{}", username), "name1");
    }
}
