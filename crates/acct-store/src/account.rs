//! Account record model.

use std::fmt;
use std::str::FromStr;

use time::Date;

/// Sex of an account holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Exact label used in documents.
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the [`Sex`] labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSex;

impl FromStr for Sex {
    type Err = UnknownSex;

    /// Case-sensitive: only `Male` and `Female` are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Sex::Male),
            "Female" => Ok(Sex::Female),
            _ => Err(UnknownSex),
        }
    }
}

/// Document keys of an account, in canonical serialization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Login,
    Name,
    Sex,
    Birthday,
    Password,
}

impl Field {
    /// All fields in canonical order.
    pub const ALL: [Field; 5] = [
        Field::Login,
        Field::Name,
        Field::Sex,
        Field::Birthday,
        Field::Password,
    ];

    /// Document key.
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Login => "login",
            Field::Name => "name",
            Field::Sex => "sex",
            Field::Birthday => "birthday",
            Field::Password => "password",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user account.
///
/// Setters never validate. Untrusted input reaches an `Account` only through
/// the [`codec`](crate::codec), which checks every field first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    login: String,
    name: String,
    password: String,
    birthday: Date,
    sex: Sex,
}

impl Account {
    /// Create an account from already-validated values.
    pub fn new(
        login: impl Into<String>,
        name: impl Into<String>,
        password: impl Into<String>,
        birthday: Date,
        sex: Sex,
    ) -> Self {
        Self {
            login: login.into(),
            name: name.into(),
            password: password.into(),
            birthday,
            sex,
        }
    }

    #[inline]
    pub fn login(&self) -> &str {
        &self.login
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Plaintext password; hashing, if wanted, happens outside this crate.
    #[inline]
    pub fn password(&self) -> &str {
        &self.password
    }

    #[inline]
    pub fn birthday(&self) -> Date {
        self.birthday
    }

    #[inline]
    pub fn sex(&self) -> Sex {
        self.sex
    }

    #[inline]
    pub fn set_login(&mut self, login: impl Into<String>) {
        self.login = login.into();
    }

    #[inline]
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[inline]
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    #[inline]
    pub fn set_birthday(&mut self, birthday: Date) {
        self.birthday = birthday;
    }

    #[inline]
    pub fn set_sex(&mut self, sex: Sex) {
        self.sex = sex;
    }
}
