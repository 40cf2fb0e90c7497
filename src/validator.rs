//! Provide variable assertions.
use regex::Regex;

use crate::{DotenvError, Repository};

/// Assertions over a group of variables.
///
/// Every assertion checks all variables and reports all failing ones together.
/// A validator created with `required = false` skips absent variables.
#[allow(missing_debug_implementations)]
pub struct Validator<'a> {
    repository: &'a dyn Repository,
    variables: Vec<String>,
    required: bool,
}

fn is_boolean(value: &str) -> bool {
    match &value.trim().to_lowercase()[..] {
        "1" | "true" | "on" | "yes" | "0" | "false" | "off" | "no" => true,
        _ => false,
    }
}

impl<'a> Validator<'a> {
    /// Create validator, required variables are checked for presence immediately.
    pub fn new<S: AsRef<str>>(
        repository: &'a dyn Repository,
        variables: &[S],
        required: bool,
    ) -> Result<Self, DotenvError> {
        let validator = Validator {
            repository,
            variables: variables.iter().map(|v| v.as_ref().to_owned()).collect(),
            required,
        };
        if required {
            validator.required()?;
        }
        Ok(validator)
    }

    /// Variables under validation.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    fn assert_callback<F: Fn(Option<&str>) -> bool>(
        &self,
        callback: F,
        message: &str,
    ) -> Result<&Self, DotenvError> {
        let failing: Vec<String> = self
            .variables
            .iter()
            .filter(|name| !callback(self.repository.get(name).as_deref()))
            .map(|name| format!("{} {}", name, message))
            .collect();
        if failing.is_empty() {
            Ok(self)
        } else {
            Err(DotenvError::Validation(failing))
        }
    }

    fn assert_nullable<F: Fn(&str) -> bool>(
        &self,
        callback: F,
        message: &str,
    ) -> Result<&Self, DotenvError> {
        let required = self.required;
        self.assert_callback(
            |value| match value {
                Some(v) => callback(v),
                None => !required,
            },
            message,
        )
    }

    /// Assert variables exist.
    pub fn required(&self) -> Result<&Self, DotenvError> {
        self.assert_callback(|value| value.is_some(), "is missing")
    }

    /// Assert variables are not empty or whitespace.
    pub fn not_empty(&self) -> Result<&Self, DotenvError> {
        self.assert_nullable(|value| !value.trim().is_empty(), "is empty")
    }

    /// Assert variables are unsigned integers.
    pub fn is_integer(&self) -> Result<&Self, DotenvError> {
        self.assert_nullable(
            |value| !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()),
            "is not an integer",
        )
    }

    /// Assert variables are booleans, such as `true`, `off`, `yes` or `0`.
    pub fn is_boolean(&self) -> Result<&Self, DotenvError> {
        self.assert_nullable(is_boolean, "is not a boolean")
    }

    /// Assert variables are one of the choices.
    pub fn allowed_values<S: AsRef<str>>(&self, choices: &[S]) -> Result<&Self, DotenvError> {
        let choices: Vec<&str> = choices.iter().map(|c| c.as_ref()).collect();
        self.assert_nullable(
            |value| choices.iter().any(|c| *c == value),
            &format!("is not one of [{}]", choices.join(", ")),
        )
    }

    /// Assert variables match the regular expression.
    pub fn allowed_regex_values(&self, pattern: &str) -> Result<&Self, DotenvError> {
        let regex = Regex::new(pattern)?;
        self.assert_nullable(
            |value| regex.is_match(value),
            &format!("does not match \"{}\"", pattern),
        )
    }
}
