//! Live field validation for the wizard sections

use std::collections::HashMap;

/// Validation rule for one field
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub required: bool,
    /// 0 disables the length check
    pub min_length: usize,
    /// Extra check returning an error message, run after the built-ins
    pub custom: Option<fn(&str) -> Option<String>>,
}

impl FieldRule {
    pub fn required() -> Self {
        FieldRule { required: true, min_length: 0, custom: None }
    }

    pub fn min_length(min: usize) -> Self {
        FieldRule { required: true, min_length: min, custom: None }
    }

    pub fn with_custom(mut self, custom: fn(&str) -> Option<String>) -> Self {
        self.custom = Some(custom);
        self
    }

    /// Check one value; `None` means valid
    pub fn check(&self, value: &str) -> Option<String> {
        if self.required && value.trim().is_empty() {
            return Some("This field is required".to_string());
        }
        if self.min_length > 0 && value.chars().count() < self.min_length {
            return Some(format!("Must be at least {} characters", self.min_length));
        }
        if let Some(custom) = self.custom {
            return custom(value);
        }
        None
    }
}

/// Rule set for one wizard section, keeping declaration order
#[derive(Debug, Clone)]
pub struct FormValidator {
    rules: Vec<(&'static str, FieldRule)>,
    errors: HashMap<&'static str, String>,
}

impl FormValidator {
    pub fn new(rules: Vec<(&'static str, FieldRule)>) -> Self {
        FormValidator { rules, errors: HashMap::new() }
    }

    fn rule(&self, field: &str) -> Option<&FieldRule> {
        self.rules
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, rule)| rule)
    }

    /// Validate one field, recording its error; true when valid.
    /// Unknown fields are valid by definition.
    pub fn validate(&mut self, field: &'static str, value: &str) -> bool {
        let Some(rule) = self.rule(field) else {
            return true;
        };
        match rule.check(value) {
            Some(message) => {
                self.errors.insert(field, message);
                false
            }
            None => {
                self.errors.remove(field);
                true
            }
        }
    }

    /// Validate every declared field; true when all pass
    pub fn validate_all(&mut self, values: &HashMap<&'static str, String>) -> bool {
        let mut all_valid = true;
        let rules = self.rules.clone();
        for (field, rule) in rules {
            let value = values.get(field).map(String::as_str).unwrap_or("");
            match rule.check(value) {
                Some(message) => {
                    self.errors.insert(field, message);
                    all_valid = false;
                }
                None => {
                    self.errors.remove(field);
                }
            }
        }
        all_valid
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn clear_error(&mut self, field: &str) {
        self.errors.remove(field);
    }

    pub fn clear_all_errors(&mut self) {
        self.errors.clear();
    }
}
