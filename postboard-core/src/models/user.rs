//! User identity fields
//!
//! Username and email are unique across users; uniqueness is the store's job,
//! shape is checked here.

use once_cell::sync::Lazy;
use regex::Regex;

use super::validation::{check_length, collect_errors, ValidationError};

/// Maximum length for usernames
pub const MAX_USERNAME_LEN: usize = 50;

/// Maximum length for email addresses
pub const MAX_EMAIL_LEN: usize = 120;

/// Maximum length for profile image file names
pub const MAX_IMAGE_FILE_LEN: usize = 200;

/// Loose address shape: something@something.tld, no whitespace
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("invalid email regex"));

/// Validated username
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Create a username. Stored exactly as given, 1 to 50 characters.
    ///
    /// ```
    /// use postboard_core::Username;
    ///
    /// assert!(Username::new("alice").is_ok());
    /// assert!(Username::new("").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        check_length("username", s, MAX_USERNAME_LEN)?;
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Validated email address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Create an email address.
    ///
    /// # Rules
    /// - 1 to 120 characters
    /// - `local@domain.tld` shape, no whitespace
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        check_length("email", s, MAX_EMAIL_LEN)?;
        if !EMAIL_RE.is_match(s) {
            return Err(ValidationError::InvalidFormat {
                field: "email",
                reason: "value is not a valid email address",
            });
        }
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Validated profile image file name (relative to the media profile_pics dir)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile(String);

impl ImageFile {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        check_length("image_file", s, MAX_IMAGE_FILE_LEN)?;
        if s.contains('/') || s.contains('\\') || s.chars().all(|c| c == '.') {
            return Err(ValidationError::InvalidFormat {
                field: "image_file",
                reason: "must be a bare file name",
            });
        }
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Everything needed to create a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub email: Email,
}

impl NewUser {
    /// Validate both fields, reporting every failure at once.
    pub fn new(username: &str, email: &str) -> Result<Self, Vec<ValidationError>> {
        match (Username::new(username), Email::new(email)) {
            (Ok(username), Ok(email)) => Ok(Self { username, email }),
            (username, email) => Err(collect_errors([username.err(), email.err()])),
        }
    }
}

/// Partial user update; `None` leaves the stored value untouched
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub username: Option<Username>,
    pub email: Option<Email>,
    pub image_file: Option<ImageFile>,
}

impl UserChanges {
    pub fn new(
        username: Option<&str>,
        email: Option<&str>,
        image_file: Option<&str>,
    ) -> Result<Self, Vec<ValidationError>> {
        let username = username.map(Username::new).transpose();
        let email = email.map(Email::new).transpose();
        let image_file = image_file.map(ImageFile::new).transpose();

        match (username, email, image_file) {
            (Ok(username), Ok(email), Ok(image_file)) => Ok(Self {
                username,
                email,
                image_file,
            }),
            (username, email, image_file) => Err(collect_errors([
                username.err(),
                email.err(),
                image_file.err(),
            ])),
        }
    }

    /// True when no field was supplied.
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.image_file.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_usernames() {
        assert!(Username::new("alice").is_ok());
        assert!(Username::new("Alice Smith").is_ok());
        assert!(Username::new(&"a".repeat(50)).is_ok());
    }

    #[test]
    fn rejects_long_username() {
        let err = Username::new(&"a".repeat(51)).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 50, .. }));
    }

    #[test]
    fn email_shape() {
        assert!(Email::new("a@x.com").is_ok());
        assert!(Email::new("first.last+tag@mail.example.org").is_ok());

        for bad in ["a", "a@x", "@x.com", "a b@x.com", "a@@x.com"] {
            let err = Email::new(bad).unwrap_err();
            assert!(
                matches!(err, ValidationError::InvalidFormat { field: "email", .. }),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn image_file_must_be_bare_name() {
        assert!(ImageFile::new("me.png").is_ok());
        assert!(ImageFile::new("../secret").is_err());
        assert!(ImageFile::new(".").is_err());
        assert!(ImageFile::new("...").is_err());
        assert!(ImageFile::new(".avatar.png").is_ok());
        assert!(ImageFile::new("").is_err());
    }

    #[test]
    fn new_user_collects_all_errors() {
        let errors = NewUser::new("", "nope").unwrap_err();
        let fields: Vec<_> = errors.iter().map(ValidationError::field).collect();
        assert_eq!(fields, vec!["username", "email"]);
    }

    #[test]
    fn changes_keep_absent_fields_absent() {
        let changes = UserChanges::new(None, Some("b@x.com"), None).unwrap();
        assert!(changes.username.is_none());
        assert_eq!(changes.email.unwrap().as_str(), "b@x.com");
        assert!(changes.image_file.is_none());

        assert!(UserChanges::new(None, None, None).unwrap().is_empty());
    }
}
