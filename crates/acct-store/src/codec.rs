//! JSON codec for account records.
//!
//! Converts between [`Account`] and its document form:
//!
//! ```text
//! {"login":"user1234","name":"Anonymous","sex":"Male","birthday":"2000-01-01","password":"qwerty"}
//! ```
//!
//! Some fields are restricted to a format:
//! - `login` - only ASCII letters, digits and `_`
//! - `birthday` - a calendar date written `YYYY-MM-DD`
//! - `sex` - either `Male` or `Female`
//!
//! Both parse modes check fields against the same rule table, and every
//! present field is validated before anything is written to a record.

use serde_json::{Map, Value};
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::account::{Account, Field, Sex};
use crate::error::AccountError;

/// Structured form of an account: a JSON object with string values.
pub type Document = Map<String, Value>;

/// How many fields a document must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// All five fields are required (account creation).
    Full,
    /// Any subset of the fields (account update).
    Partial,
}

const LOGIN_REASON: &str = "should consist only of letters, digits and '_'";
const BIRTHDAY_REASON: &str = "required format is YYYY-MM-DD";
const SEX_REASON: &str = "'Male' and 'Female' are valid values";
const NOT_A_STRING: &str = "expected a string";

const BIRTHDAY_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

type Rule = fn(&str) -> Result<(), &'static str>;

/// Format rule of every field, shared by full and partial validation.
static RULES: [(Field, Rule); 5] = [
    (Field::Login, login_rule),
    (Field::Name, any_string),
    (Field::Sex, sex_rule),
    (Field::Birthday, birthday_rule),
    (Field::Password, any_string),
];

fn any_string(_: &str) -> Result<(), &'static str> {
    Ok(())
}

fn login_rule(value: &str) -> Result<(), &'static str> {
    let valid = !value.is_empty()
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_');
    if valid { Ok(()) } else { Err(LOGIN_REASON) }
}

fn sex_rule(value: &str) -> Result<(), &'static str> {
    value.parse::<Sex>().map(drop).map_err(|_| SEX_REASON)
}

fn birthday_rule(value: &str) -> Result<(), &'static str> {
    parse_birthday(value).map(drop)
}

/// Parse a strict `YYYY-MM-DD` date.
fn parse_birthday(value: &str) -> Result<Date, &'static str> {
    // Exactly ten bytes rules out signed or extended years.
    if value.len() != 10 {
        return Err(BIRTHDAY_REASON);
    }
    let date = Date::parse(value, BIRTHDAY_FORMAT).map_err(|_| BIRTHDAY_REASON)?;
    // Years count from 1; there is no year zero.
    if date.year() < 1 {
        return Err(BIRTHDAY_REASON);
    }
    Ok(date)
}

fn format_birthday(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Check that `login` is usable as an account key.
///
/// The store calls this before every filesystem access, so a login can never
/// name a path outside the data directory.
pub fn check_login(login: &str) -> Result<(), AccountError> {
    login_rule(login).map_err(|reason| AccountError::invalid(Field::Login, reason))
}

/// Decode raw bytes into a [`Document`].
pub fn decode(bytes: &[u8]) -> Result<Document, AccountError> {
    if bytes.is_empty() {
        return Err(AccountError::EmptyInput);
    }
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(document)) => Ok(document),
        Ok(_) => Err(AccountError::Malformed("expected a JSON object".into())),
        Err(e) => Err(AccountError::Malformed(e.to_string())),
    }
}

/// Check a document without touching any record.
///
/// In [`Mode::Full`] all five keys must be present before any of them is
/// format-checked. Keys outside the account schema are ignored.
pub fn validate_format(document: &Document, mode: Mode) -> Result<(), AccountError> {
    if mode == Mode::Full {
        let missing: Vec<Field> = Field::ALL
            .into_iter()
            .filter(|f| !document.contains_key(f.as_str()))
            .collect();
        if !missing.is_empty() {
            return Err(AccountError::MissingFields(missing));
        }
    }

    for (field, rule) in &RULES {
        if let Some(value) = text(document, *field)? {
            rule(value).map_err(|reason| AccountError::invalid(*field, reason))?;
        }
    }
    Ok(())
}

/// Build the document of an account, keys in canonical order.
pub fn encode(account: &Account) -> Document {
    let mut document = Document::new();
    for field in Field::ALL {
        let value = match field {
            Field::Login => account.login().to_owned(),
            Field::Name => account.name().to_owned(),
            Field::Sex => account.sex().as_str().to_owned(),
            Field::Birthday => format_birthday(account.birthday()),
            Field::Password => account.password().to_owned(),
        };
        document.insert(field.as_str().to_owned(), Value::String(value));
    }
    document
}

/// Serialize an account to compact JSON text.
pub fn serialize(account: &Account) -> String {
    Value::Object(encode(account)).to_string()
}

/// Create an account from a complete description.
pub fn parse_full(bytes: &[u8]) -> Result<Account, AccountError> {
    from_document(&decode(bytes)?)
}

/// Create an account from an already decoded complete description.
pub fn from_document(document: &Document) -> Result<Account, AccountError> {
    collect(document, Mode::Full)?.into_account()
}

/// Overwrite the fields of `account` that are present in the description.
///
/// On error `account` is left unchanged.
pub fn parse_partial(bytes: &[u8], account: &mut Account) -> Result<(), AccountError> {
    apply_document(&decode(bytes)?, account)
}

/// Overwrite the fields of `account` present in an already decoded description.
pub fn apply_document(document: &Document, account: &mut Account) -> Result<(), AccountError> {
    collect(document, Mode::Partial)?.apply(account);
    Ok(())
}

fn text(document: &Document, field: Field) -> Result<Option<&str>, AccountError> {
    match document.get(field.as_str()) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(AccountError::invalid(field, NOT_A_STRING)),
    }
}

/// Typed values of the fields present in a validated document.
#[derive(Debug, Default)]
struct Changes {
    login: Option<String>,
    name: Option<String>,
    password: Option<String>,
    birthday: Option<Date>,
    sex: Option<Sex>,
}

fn collect(document: &Document, mode: Mode) -> Result<Changes, AccountError> {
    validate_format(document, mode)?;

    let mut changes = Changes::default();
    for field in Field::ALL {
        let Some(value) = text(document, field)? else {
            continue;
        };
        match field {
            Field::Login => changes.login = Some(value.to_owned()),
            Field::Name => changes.name = Some(value.to_owned()),
            Field::Password => changes.password = Some(value.to_owned()),
            Field::Birthday => {
                let date = parse_birthday(value).map_err(|r| AccountError::invalid(field, r))?;
                changes.birthday = Some(date);
            }
            Field::Sex => {
                let sex = value
                    .parse::<Sex>()
                    .map_err(|_| AccountError::invalid(field, SEX_REASON))?;
                changes.sex = Some(sex);
            }
        }
    }
    Ok(changes)
}

impl Changes {
    fn into_account(self) -> Result<Account, AccountError> {
        match (self.login, self.name, self.password, self.birthday, self.sex) {
            (Some(login), Some(name), Some(password), Some(birthday), Some(sex)) => {
                Ok(Account::new(login, name, password, birthday, sex))
            }
            (login, name, password, birthday, sex) => {
                let present = [
                    login.is_some(),
                    name.is_some(),
                    sex.is_some(),
                    birthday.is_some(),
                    password.is_some(),
                ];
                let missing = Field::ALL
                    .into_iter()
                    .zip(present)
                    .filter_map(|(field, present)| (!present).then_some(field))
                    .collect();
                Err(AccountError::MissingFields(missing))
            }
        }
    }

    fn apply(self, account: &mut Account) {
        if let Some(login) = self.login {
            account.set_login(login);
        }
        if let Some(name) = self.name {
            account.set_name(name);
        }
        if let Some(password) = self.password {
            account.set_password(password);
        }
        if let Some(birthday) = self.birthday {
            account.set_birthday(birthday);
        }
        if let Some(sex) = self.sex {
            account.set_sex(sex);
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::json;
    use time::Month;

    use super::*;

    fn login_strategy() -> impl Strategy<Value = String> {
        proptest::string::string_regex("[A-Za-z0-9_]{1,32}")
            .unwrap_or_else(|e| panic!("regex failed: {e}"))
    }

    fn text_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            any::<String>(),
            proptest::string::string_regex(r#"[a-z "\\\n/]{0,16}"#)
                .unwrap_or_else(|e| panic!("regex failed: {e}")),
        ]
    }

    fn birthday_strategy() -> impl Strategy<Value = Date> {
        let first = Date::from_calendar_date(1, Month::January, 1).unwrap();
        let last = Date::from_calendar_date(9999, Month::December, 31).unwrap();
        (first.to_julian_day()..=last.to_julian_day())
            .prop_map(|day| Date::from_julian_day(day).unwrap())
    }

    fn account_strategy() -> impl Strategy<Value = Account> {
        let sex = prop_oneof![Just(Sex::Male), Just(Sex::Female)];
        (
            login_strategy(),
            text_strategy(),
            text_strategy(),
            birthday_strategy(),
            sex,
        )
            .prop_map(|(login, name, password, birthday, sex)| {
                Account::new(login, name, password, birthday, sex)
            })
    }

    proptest! {
        #[test]
        fn prop_serialized_account_parses_back(account in account_strategy()) {
            let parsed = parse_full(serialize(&account).as_bytes()).unwrap();
            prop_assert_eq!(parsed, account);
        }

        #[test]
        fn prop_single_key_update_keeps_other_fields(
            original in account_strategy(),
            source in account_strategy(),
            index in 0..Field::ALL.len(),
        ) {
            let field = Field::ALL[index];
            let value = encode(&source)[field.as_str()].clone();
            let mut document = Document::new();
            document.insert(field.as_str().to_owned(), value.clone());
            let body = Value::Object(document).to_string();

            let mut updated = original.clone();
            parse_partial(body.as_bytes(), &mut updated).unwrap();

            let before = encode(&original);
            let after = encode(&updated);
            for other in Field::ALL {
                let key = other.as_str();
                if other == field {
                    prop_assert_eq!(&after[key], &value);
                } else {
                    prop_assert_eq!(&after[key], &before[key]);
                }
            }
        }
    }

    fn default_account() -> Account {
        let birthday = Date::from_calendar_date(2000, Month::January, 1).unwrap();
        Account::new("user1234", "Anonymous", "qwerty", birthday, Sex::Male)
    }

    fn default_document() -> Value {
        json!({
            "name": "Anonymous",
            "login": "user1234",
            "password": "qwerty",
            "sex": "Male",
            "birthday": "2000-01-01",
        })
    }

    fn with(key: &str, value: &str) -> Vec<u8> {
        let mut doc = default_document();
        doc[key] = Value::String(value.into());
        doc.to_string().into_bytes()
    }

    fn assert_invalid(result: Result<Account, AccountError>, expected: Field) {
        match result {
            Err(AccountError::InvalidFormat { field, .. }) => assert_eq!(field, expected),
            other => panic!("expected invalid {expected}, got {other:?}"),
        }
    }

    #[test]
    fn test_simple_read() {
        let account = parse_full(default_document().to_string().as_bytes()).unwrap();
        assert_eq!(account.name(), "Anonymous");
        assert_eq!(account.password(), "qwerty");
        assert_eq!(
            account.birthday(),
            Date::from_calendar_date(2000, Month::January, 1).unwrap()
        );
        assert_eq!(account.sex(), Sex::Male);
        assert_eq!(account.login(), "user1234");
        assert_eq!(account, default_account());
    }

    #[test]
    fn test_round_trip() {
        let birthday = Date::from_calendar_date(1988, Month::February, 29).unwrap();
        let original = Account::new("Jane_Doe_7", "Jane \"JD\" Doe", "", birthday, Sex::Female);
        let parsed = parse_full(serialize(&original).as_bytes()).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_canonical_serialization() {
        assert_eq!(
            serialize(&default_account()),
            r#"{"login":"user1234","name":"Anonymous","sex":"Male","birthday":"2000-01-01","password":"qwerty"}"#
        );
    }

    #[test]
    fn test_serialized_document_validates_as_full() {
        let document = decode(serialize(&default_account()).as_bytes()).unwrap();
        validate_format(&document, Mode::Full).unwrap();
    }

    #[test]
    fn test_empty_object_is_missing_everything() {
        match parse_full(b"{}") {
            Err(AccountError::MissingFields(missing)) => assert_eq!(missing, Field::ALL.to_vec()),
            other => panic!("expected missing fields, got {other:?}"),
        }
    }

    #[test]
    fn test_each_key_is_required_in_full_mode() {
        for field in Field::ALL {
            let mut doc = default_document();
            doc.as_object_mut().unwrap().remove(field.as_str());
            match parse_full(doc.to_string().as_bytes()) {
                Err(AccountError::MissingFields(missing)) => assert_eq!(missing, vec![field]),
                other => panic!("expected {field} missing, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_missing_fields_reported_before_format() {
        let doc = json!({"login": "lo g in"});
        assert!(matches!(
            parse_full(doc.to_string().as_bytes()),
            Err(AccountError::MissingFields(_))
        ));
    }

    #[test]
    fn test_wrong_login() {
        assert_invalid(parse_full(&with("login", "lo g in")), Field::Login);
        assert_invalid(parse_full(&with("login", "")), Field::Login);
        assert_invalid(parse_full(&with("login", "../etc/passwd")), Field::Login);
        assert_invalid(parse_full(&with("login", "dot.ted")), Field::Login);
        assert!(parse_full(&with("login", "Snake_Case_09")).is_ok());
    }

    #[test]
    fn test_wrong_birthday() {
        assert_invalid(parse_full(&with("birthday", "1.1.2000")), Field::Birthday);
        assert_invalid(parse_full(&with("birthday", "2000-1-01")), Field::Birthday);
        assert_invalid(parse_full(&with("birthday", "2000-13-01")), Field::Birthday);
        assert_invalid(parse_full(&with("birthday", "2001-02-29")), Field::Birthday);
        assert_invalid(parse_full(&with("birthday", "+2000-01-01")), Field::Birthday);
        assert_invalid(parse_full(&with("birthday", " 2000-01-01")), Field::Birthday);
        assert_invalid(parse_full(&with("birthday", "2000-01-01T00:00")), Field::Birthday);
        assert_invalid(parse_full(&with("birthday", "0000-01-01")), Field::Birthday);
        assert_eq!(
            parse_full(&with("birthday", "0001-01-01")).unwrap().birthday(),
            Date::from_calendar_date(1, Month::January, 1).unwrap()
        );
    }

    #[test]
    fn test_leap_day_birthday() {
        let account = parse_full(&with("birthday", "2004-02-29")).unwrap();
        assert_eq!(
            account.birthday(),
            Date::from_calendar_date(2004, Month::February, 29).unwrap()
        );
    }

    #[test]
    fn test_wrong_sex() {
        assert_invalid(parse_full(&with("sex", "Undefined")), Field::Sex);
        assert_invalid(parse_full(&with("sex", "male")), Field::Sex);
        assert_eq!(parse_full(&with("sex", "Male")).unwrap().sex(), Sex::Male);
        assert_eq!(parse_full(&with("sex", "Female")).unwrap().sex(), Sex::Female);
    }

    #[test]
    fn test_name_and_password_accept_any_string() {
        let account = parse_full(&with("name", "")).unwrap();
        assert_eq!(account.name(), "");
        let account = parse_full(&with("password", "  spaces & ünïcode ")).unwrap();
        assert_eq!(account.password(), "  spaces & ünïcode ");
    }

    #[test]
    fn test_non_string_value() {
        let mut doc = default_document();
        doc["name"] = json!(42);
        assert_invalid(parse_full(doc.to_string().as_bytes()), Field::Name);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut doc = default_document();
        doc["nickname"] = json!("anon");
        assert_eq!(
            parse_full(doc.to_string().as_bytes()).unwrap(),
            default_account()
        );
    }

    #[test]
    fn test_empty_read() {
        assert!(matches!(parse_full(b""), Err(AccountError::EmptyInput)));
        let mut account = default_account();
        assert!(matches!(
            parse_partial(b"", &mut account),
            Err(AccountError::EmptyInput)
        ));
    }

    #[test]
    fn test_malformed_input() {
        assert!(matches!(parse_full(b"not json"), Err(AccountError::Malformed(_))));
        assert!(matches!(parse_full(b"[1, 2]"), Err(AccountError::Malformed(_))));
        assert!(matches!(parse_full(b"   "), Err(AccountError::Malformed(_))));
    }

    #[test]
    fn test_simple_update() {
        let mut account = default_account();
        parse_partial(br#"{"name": "Deanonymous"}"#, &mut account).unwrap();
        assert_eq!(account.name(), "Deanonymous");
        assert_eq!(account.password(), "qwerty");
        assert_eq!(
            account.birthday(),
            Date::from_calendar_date(2000, Month::January, 1).unwrap()
        );
        assert_eq!(account.sex(), Sex::Male);
        assert_eq!(account.login(), "user1234");
    }

    #[test]
    fn test_update_with_empty_object_changes_nothing() {
        let mut account = default_account();
        parse_partial(b"{}", &mut account).unwrap();
        assert_eq!(account, default_account());
    }

    #[test]
    fn test_invalid_update_does_not_mutate() {
        let mut account = default_account();
        let err = parse_partial(
            br#"{"name": "Changed", "login": "new_login", "sex": "Other"}"#,
            &mut account,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AccountError::InvalidFormat {
                field: Field::Sex,
                ..
            }
        ));
        assert_eq!(account, default_account());
    }

    #[test]
    fn test_update_all_fields() {
        let mut account = default_account();
        parse_partial(
            br#"{"login":"other","name":"N","password":"p","birthday":"1999-12-31","sex":"Female"}"#,
            &mut account,
        )
        .unwrap();
        assert_eq!(account.login(), "other");
        assert_eq!(account.name(), "N");
        assert_eq!(account.password(), "p");
        assert_eq!(
            account.birthday(),
            Date::from_calendar_date(1999, Month::December, 31).unwrap()
        );
        assert_eq!(account.sex(), Sex::Female);
    }

    #[test]
    fn test_validate_partial_mode() {
        let document = decode(br#"{"birthday": "2000-02-30"}"#).unwrap();
        assert!(validate_format(&document, Mode::Partial).is_err());

        let document = decode(br#"{"birthday": "2000-02-28"}"#).unwrap();
        validate_format(&document, Mode::Partial).unwrap();
        assert!(matches!(
            validate_format(&document, Mode::Full),
            Err(AccountError::MissingFields(_))
        ));
    }

    #[test]
    fn test_check_login() {
        check_login("user_1").unwrap();
        assert!(check_login("a/b").is_err());
        assert!(check_login("..").is_err());
        assert!(check_login("").is_err());
        assert!(check_login("con\0").is_err());
    }
}
