//! Person search queries: `surname, given middle gender dob|age`.
//!
//! The surname always comes first. A comma after it is optional but lets the
//! surname contain spaces ("van der berg, anna"). Everything else is matched
//! by shape: single letters M/F/U are a gender, `[dd/][mm/]yyyy` is a date of
//! birth, `n` or `n-m` is an age range.

use std::sync::OnceLock;

use chrono::{Local, NaiveDate};
use regex::Regex;
use thiserror::Error;

use super::{ParserDefinition, QueryResult, TokenDefinition};

pub const SURNAME_KEY: &str = "surname";
pub const GIVEN_NAME_KEY: &str = "givenName";
pub const MIDDLE_NAMES_KEY: &str = "middleNames";
pub const GENDER_KEY: &str = "gender";
pub const DATE_OF_BIRTH_KEY: &str = "dateOfBirth";
pub const AGE_RANGE_KEY: &str = "ageRange";

const DEFAULT_MAX_SURNAME_LENGTH: usize = 20;
const DEFAULT_MAX_GIVEN_NAME_LENGTH: usize = 14;
const DEFAULT_MAX_MIDDLE_NAMES_LENGTH: usize = 14;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersonParserError {
    #[error("Potential Surname '{0}' found. Surname must be first. Refer to search help.")]
    SurnameIsNotFirst(String),

    #[error("Surname '{surname}' exceeds maximum length of {max_length} characters.")]
    SurnameExceedsMaxLength { surname: String, max_length: usize },

    #[error("Given name '{given_name}' exceeds maximum length of {max_length} characters.")]
    GivenNameExceedsMaxLength { given_name: String, max_length: usize },

    #[error("Middle name '{0}' exists without a given name.")]
    MiddleNameExistsWithoutGivenName(String),

    #[error("Middle name '{middle_names}' exceeds maximum length of {max_length} characters.")]
    MiddleNamesExceedsMaxLength {
        middle_names: String,
        max_length: usize,
    },

    #[error("Gender '{0}' is invalid.")]
    NameMatchesGenderType(String),

    #[error("Age range '{0}' in wrong order.")]
    AgeRangeWrongOrder(String),

    #[error("'{0}' is in incorrect format.")]
    DobIncorrectFormat(String),

    #[error("'{0}' is not a recognised DOB. Please ensure date is valid.")]
    DobInvalidValues(String),

    #[error("'{0}' must be a past date.")]
    DobDateOutOfBounds(String),
}

fn date_of_birth_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:(\d{1,2})/)?(?:(\d{1,2})/)?(\d{2,4})$")
            .expect("date of birth pattern must compile")
    })
}

fn age_range_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([0-9]+)(?:-([0-9]+))?$").expect("age range pattern must compile")
    })
}

fn is_name(token: &str) -> bool {
    !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_alphabetic() || c.is_whitespace() || matches!(c, '’' | '\'' | '-'))
}

fn is_gender(token: &str) -> bool {
    matches!(token.to_uppercase().as_str(), "M" | "F" | "U")
}

fn check_length(token: &str, max_length: Option<usize>) -> Option<usize> {
    max_length.filter(|&max| token.chars().count() > max)
}

/// Check a date of birth token against the calendar and `today`.
fn validate_date_of_birth(token: &str, today: NaiveDate) -> Result<NaiveDate, PersonParserError> {
    let captures = date_of_birth_pattern()
        .captures(token)
        .ok_or_else(|| PersonParserError::DobIncorrectFormat(token.to_string()))?;

    // With one leading component it is the month: "07/1990".
    let (day, month) = match (captures.get(1), captures.get(2)) {
        (Some(day), Some(month)) => (Some(day.as_str()), Some(month.as_str())),
        (Some(month), None) => (None, Some(month.as_str())),
        _ => (None, None),
    };
    let year = captures.get(3).map(|m| m.as_str()).unwrap_or_default();

    let incorrect = || PersonParserError::DobIncorrectFormat(token.to_string());
    if day.is_some_and(|d| d.len() != 2) || month.is_some_and(|m| m.len() != 2) || year.len() != 4 {
        return Err(incorrect());
    }

    let parse = |part: Option<&str>| part.map_or(Ok(1), |p| p.parse::<u32>());
    let (day, month) = (parse(day).map_err(|_| incorrect())?, parse(month).map_err(|_| incorrect())?);
    let year: i32 = year.parse().map_err(|_| incorrect())?;

    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| PersonParserError::DobInvalidValues(token.to_string()))?;
    if date > today {
        return Err(PersonParserError::DobDateOutOfBounds(token.to_string()));
    }
    Ok(date)
}

fn validate_age_range(token: &str) -> Result<(), PersonParserError> {
    let Some(captures) = age_range_pattern().captures(token) else {
        return Ok(());
    };
    if let (Some(lower), Some(upper)) = (captures.get(1), captures.get(2)) {
        // Overlong digit runs compare by length first.
        let lower = lower.as_str().trim_start_matches('0');
        let upper = upper.as_str().trim_start_matches('0');
        if (lower.len(), lower) > (upper.len(), upper) {
            return Err(PersonParserError::AgeRangeWrongOrder(token.to_string()));
        }
    }
    Ok(())
}

/// Parser definition for person searches.
#[derive(Debug)]
pub struct PersonParserDefinition {
    definitions: Vec<TokenDefinition>,
}

impl Default for PersonParserDefinition {
    fn default() -> Self {
        Self::new()
    }
}

impl PersonParserDefinition {
    pub fn new() -> Self {
        Self::with_reference_date(Local::now().date_naive())
    }

    /// Dates of birth after `today` are rejected.
    pub fn with_reference_date(today: NaiveDate) -> Self {
        Self::with_limits(
            today,
            Some(DEFAULT_MAX_SURNAME_LENGTH),
            Some(DEFAULT_MAX_GIVEN_NAME_LENGTH),
            Some(DEFAULT_MAX_MIDDLE_NAMES_LENGTH),
        )
    }

    /// Build with explicit name length limits. `None` means unlimited.
    pub fn with_limits(
        today: NaiveDate,
        max_surname: Option<usize>,
        max_given_name: Option<usize>,
        max_middle_names: Option<usize>,
    ) -> Self {
        let surname = TokenDefinition::required(SURNAME_KEY, is_name).with_validation(
            move |token, index, _| {
                if index != 0 {
                    return Err(PersonParserError::SurnameIsNotFirst(token.to_string()).into());
                }
                if let Some(max_length) = check_length(token, max_surname) {
                    return Err(PersonParserError::SurnameExceedsMaxLength {
                        surname: token.to_string(),
                        max_length,
                    }
                    .into());
                }
                Ok(())
            },
        );

        let given_name = TokenDefinition::optional(GIVEN_NAME_KEY, is_name).with_validation(
            move |token, _, _| match check_length(token, max_given_name) {
                Some(max_length) => Err(PersonParserError::GivenNameExceedsMaxLength {
                    given_name: token.to_string(),
                    max_length,
                }
                .into()),
                None => Ok(()),
            },
        );

        let middle_names = TokenDefinition::optional(MIDDLE_NAMES_KEY, is_name).with_validation(
            move |token, _, results: &QueryResult| {
                if is_gender(token) && !results.contains_key(GENDER_KEY) {
                    return Err(PersonParserError::NameMatchesGenderType(token.to_string()).into());
                }
                if !results.contains_key(GIVEN_NAME_KEY) {
                    return Err(
                        PersonParserError::MiddleNameExistsWithoutGivenName(token.to_string()).into(),
                    );
                }
                if let Some(max_length) = check_length(token, max_middle_names) {
                    return Err(PersonParserError::MiddleNamesExceedsMaxLength {
                        middle_names: token.to_string(),
                        max_length,
                    }
                    .into());
                }
                Ok(())
            },
        );

        let gender = TokenDefinition::optional(GENDER_KEY, is_gender);

        let date_of_birth = TokenDefinition::optional(DATE_OF_BIRTH_KEY, |token| {
            date_of_birth_pattern().is_match(token)
        })
        .with_validation(move |token, _, _| {
            validate_date_of_birth(token, today)?;
            Ok(())
        });

        let age_range = TokenDefinition::optional(AGE_RANGE_KEY, |token| {
            age_range_pattern().is_match(token)
        })
        .with_validation(|token, _, _| {
            validate_age_range(token)?;
            Ok(())
        });

        Self {
            definitions: vec![
                surname,
                given_name,
                middle_names,
                gender,
                date_of_birth,
                age_range,
            ],
        }
    }

    /// Parse a matched date of birth value into a date. Missing day and
    /// month default to the first.
    pub fn date_of_birth(value: &str) -> Option<NaiveDate> {
        validate_date_of_birth(value, NaiveDate::MAX).ok()
    }
}

impl ParserDefinition for PersonParserDefinition {
    fn tokens(&self, query: &str) -> Vec<String> {
        let is_separator = |c: char| c == ',' || c == ' ';
        let mut tokens = Vec::new();
        let rest = match query.split_once(',') {
            Some((surname, rest)) => {
                tokens.push(surname.trim().to_string());
                rest
            }
            None => query,
        };
        tokens.extend(rest.split(is_separator).map(str::to_string));
        tokens.retain(|token| !token.is_empty());
        tokens
    }

    fn token_definitions(&self) -> &[TokenDefinition] {
        &self.definitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{QueryParser, QueryParserError};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn parser() -> QueryParser<PersonParserDefinition> {
        QueryParser::new(PersonParserDefinition::with_reference_date(today())).unwrap()
    }

    fn person_error(error: &QueryParserError) -> Option<&PersonParserError> {
        error.validation_error()?.downcast_ref::<PersonParserError>()
    }

    #[test]
    fn test_tokenizer_keeps_comma_surname_whole() {
        let definition = PersonParserDefinition::new();
        assert_eq!(
            definition.tokens("van der berg, anna  maree,f"),
            vec!["van der berg", "anna", "maree", "f"]
        );
        assert_eq!(definition.tokens("smith john"), vec!["smith", "john"]);
    }

    #[test]
    fn test_full_query() {
        let result = parser().parse("citizen, john r m 01/02/1980").unwrap();
        assert_eq!(result[SURNAME_KEY], "citizen");
        assert_eq!(result[GIVEN_NAME_KEY], "john");
        assert_eq!(result[MIDDLE_NAMES_KEY], "r");
        assert_eq!(result[GENDER_KEY], "m");
        assert_eq!(result[DATE_OF_BIRTH_KEY], "01/02/1980");
    }

    #[test]
    fn test_gender_letter_after_given_name_is_gender() {
        let result = parser().parse("citizen john f").unwrap();
        assert_eq!(result[GENDER_KEY], "f");
        assert!(!result.contains_key(MIDDLE_NAMES_KEY));
    }

    #[test]
    fn test_short_number_falls_through_to_age_range() {
        let result = parser().parse("citizen 45").unwrap();
        assert_eq!(result[AGE_RANGE_KEY], "45");
        let result = parser().parse("citizen 20-30").unwrap();
        assert_eq!(result[AGE_RANGE_KEY], "20-30");
    }

    #[test]
    fn test_age_range_wrong_order() {
        let error = parser().parse("citizen 30-20").unwrap_err();
        assert_eq!(
            person_error(&error),
            Some(&PersonParserError::AgeRangeWrongOrder("30-20".to_string()))
        );
        assert_eq!(error.user_message(), "Age range '30-20' in wrong order.");
    }

    #[test]
    fn test_surname_is_required() {
        let error = parser().parse("").unwrap_err();
        assert!(matches!(
            error,
            QueryParserError::RequiredValueNotFound { ref key } if key == SURNAME_KEY
        ));
    }

    #[test]
    fn test_surname_must_be_first() {
        let error = parser().parse("1980 citizen").unwrap_err();
        // "citizen" type-checks as a surname and a given name. The surname
        // validator fails first; the given name is accepted, leaving the
        // surname missing.
        assert!(matches!(
            error,
            QueryParserError::RequiredValueNotFound { ref key } if key == SURNAME_KEY
        ));
    }

    #[test]
    fn test_surname_length_limit() {
        let error = parser().parse("abcdefghijklmnopqrstuvwxyz").unwrap_err();
        assert!(matches!(
            person_error(&error),
            Some(PersonParserError::SurnameExceedsMaxLength { max_length: 20, .. })
        ));

        let unlimited =
            QueryParser::new(PersonParserDefinition::with_limits(today(), None, None, None))
                .unwrap();
        assert!(unlimited.parse("abcdefghijklmnopqrstuvwxyz").is_ok());
    }

    #[test]
    fn test_date_of_birth_formats() {
        assert!(parser().parse("citizen 1980").is_ok());
        assert!(parser().parse("citizen 07/1980").is_ok());
        assert!(parser().parse("citizen 29/02/2000").is_ok());

        let error = parser().parse("citizen 1/2/1980").unwrap_err();
        assert!(matches!(
            person_error(&error),
            Some(PersonParserError::DobIncorrectFormat(_))
        ));

        let error = parser().parse("citizen 30/02/1980").unwrap_err();
        assert!(matches!(
            person_error(&error),
            Some(PersonParserError::DobInvalidValues(_))
        ));

        let error = parser().parse("citizen 01/01/2030").unwrap_err();
        assert!(matches!(
            person_error(&error),
            Some(PersonParserError::DobDateOutOfBounds(_))
        ));
    }

    #[test]
    fn test_date_of_birth_value() {
        assert_eq!(
            PersonParserDefinition::date_of_birth("07/1990"),
            NaiveDate::from_ymd_opt(1990, 7, 1)
        );
        assert_eq!(PersonParserDefinition::date_of_birth("31/04/1990"), None);
    }

    #[test]
    fn test_name_characters() {
        assert!(is_name("o'brien"));
        assert!(is_name("smith-jones"));
        assert!(is_name("d’arcy"));
        assert!(!is_name("r2d2"));
        assert!(!is_name(""));
    }
}
