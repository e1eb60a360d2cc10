//! Declarative request validation.
//!
//! Each endpoint owns a [`RuleSet`]: an ordered list of `field → check → message`
//! rules evaluated against the raw JSON body before any handler logic runs.
//! Every failing rule contributes one [`FieldError`], so a field may report
//! more than one problem.

use std::borrow::Cow;

use serde::Serialize;
use serde_json::{Map, Value};
use validator::ValidateEmail;

/// A predicate applied to a single body field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// Field is present and a JSON string.
    IsString,
    /// Field's text form is non-empty.
    NotEmpty,
    /// Field is a string in email syntax.
    Email,
    /// Field's text form has at least this many characters.
    MinLength(usize),
}

impl Check {
    /// Whether `value` (absent when `None`) satisfies this check.
    pub fn passes(&self, value: Option<&Value>) -> bool {
        match self {
            Check::IsString => matches!(value, Some(Value::String(_))),
            Check::NotEmpty => !text_of(value).is_empty(),
            Check::Email => match value {
                Some(Value::String(s)) => s.validate_email(),
                _ => false,
            },
            Check::MinLength(min) => text_of(value).chars().count() >= *min,
        }
    }
}

/// Text form used by length checks: scalars stringify, anything else is empty.
fn text_of(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
        Some(Value::Number(n)) => Cow::Owned(n.to_string()),
        Some(Value::Bool(b)) => Cow::Owned(b.to_string()),
        _ => Cow::Borrowed(""),
    }
}

/// One validation rule.
#[derive(Debug, Clone)]
pub struct Rule {
    pub field: &'static str,
    pub check: Check,
    pub message: &'static str,
}

impl Rule {
    /// Evaluate this rule against a body, producing an error when it fails.
    pub fn apply(&self, body: &Map<String, Value>) -> Option<FieldError> {
        let value = body.get(self.field);
        if self.check.passes(value) {
            return None;
        }
        Some(FieldError {
            kind: "field",
            value: value.cloned(),
            msg: self.message.to_string(),
            path: self.field.to_string(),
            location: "body",
        })
    }
}

/// A single failed rule, shaped for API clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    pub msg: String,
    pub path: String,
    pub location: &'static str,
}

/// All failures for one request. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Field paths in rule order, with repeats.
    pub fn fields(&self) -> Vec<&str> {
        self.0.iter().map(|e| e.path.as_str()).collect()
    }
}

/// An ordered, composable collection of rules for one endpoint.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule.
    pub fn rule(mut self, field: &'static str, check: Check, message: &'static str) -> Self {
        self.rules.push(Rule {
            field,
            check,
            message,
        });
        self
    }

    /// Run every rule, collecting all failures.
    pub fn validate(&self, body: &Map<String, Value>) -> Result<(), ValidationErrors> {
        let errors: Vec<FieldError> = self.rules.iter().filter_map(|r| r.apply(body)).collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }
}

/// Rules for `POST /api/signup`.
pub fn signup_rules() -> RuleSet {
    RuleSet::new()
        .rule("email", Check::Email, "Invalid email format")
        .rule(
            "password",
            Check::MinLength(6),
            "Password must be at least 6 characters long",
        )
}

/// Rules for `POST /api/employees`.
pub fn employee_rules() -> RuleSet {
    RuleSet::new()
        .rule("empId", Check::IsString, "Invalid value")
        .rule("empId", Check::NotEmpty, "Employee ID is required")
        .rule("email", Check::Email, "Invalid email format")
        .rule("firstName", Check::IsString, "Invalid value")
        .rule("firstName", Check::NotEmpty, "First name is required")
        .rule("lastName", Check::IsString, "Invalid value")
        .rule("lastName", Check::NotEmpty, "Last name is required")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test body must be an object"),
        }
    }

    #[test]
    fn test_email_check() {
        assert!(Check::Email.passes(Some(&json!("jo@example.com"))));
        assert!(!Check::Email.passes(Some(&json!("jo.example.com"))));
        assert!(!Check::Email.passes(Some(&json!(42))));
        assert!(!Check::Email.passes(None));
    }

    #[test]
    fn test_min_length_counts_characters() {
        let check = Check::MinLength(6);
        assert!(check.passes(Some(&json!("abcdef"))));
        assert!(check.passes(Some(&json!("éééééé"))));
        assert!(!check.passes(Some(&json!("abcde"))));
        assert!(check.passes(Some(&json!(123456))));
        assert!(!check.passes(None));
    }

    #[test]
    fn test_is_string_and_not_empty() {
        assert!(Check::IsString.passes(Some(&json!(""))));
        assert!(!Check::IsString.passes(Some(&json!(7))));
        assert!(!Check::NotEmpty.passes(Some(&json!(""))));
        assert!(Check::NotEmpty.passes(Some(&json!(7))));
        assert!(!Check::NotEmpty.passes(Some(&json!(null))));
    }

    #[test]
    fn test_signup_rules_pass_on_valid_body() {
        let input = body(json!({"email": "jo@example.com", "password": "hunter22"}));
        assert!(signup_rules().validate(&input).is_ok());
    }

    #[test]
    fn test_signup_rules_report_each_field() {
        let input = body(json!({"email": "nope", "password": "123"}));
        let errors = signup_rules().validate(&input).unwrap_err();

        assert_eq!(errors.fields(), vec!["email", "password"]);
        assert_eq!(errors.0[0].msg, "Invalid email format");
        assert_eq!(errors.0[0].value, Some(json!("nope")));
        assert_eq!(
            errors.0[1].msg,
            "Password must be at least 6 characters long"
        );
    }

    #[test]
    fn test_employee_rules_on_empty_body() {
        let errors = employee_rules().validate(&Map::new()).unwrap_err();

        assert_eq!(errors.len(), 7);
        assert!(errors.0.iter().all(|e| e.value.is_none()));
        assert!(errors.0.iter().any(|e| e.msg == "Employee ID is required"));
        assert!(errors.0.iter().any(|e| e.msg == "Last name is required"));
    }

    #[test]
    fn test_employee_rules_reject_numeric_emp_id_once() {
        let input = body(json!({
            "empId": 17,
            "email": "jo@example.com",
            "firstName": "Jo",
            "lastName": "March"
        }));
        let errors = employee_rules().validate(&input).unwrap_err();

        assert_eq!(errors.fields(), vec!["empId"]);
        assert_eq!(errors.0[0].msg, "Invalid value");
    }

    #[test]
    fn test_field_error_shape() {
        let errors = signup_rules()
            .validate(&body(json!({"password": "hunter22"})))
            .unwrap_err();
        let json = serde_json::to_value(&errors).unwrap();

        assert_eq!(
            json,
            json!([{
                "type": "field",
                "msg": "Invalid email format",
                "path": "email",
                "location": "body"
            }])
        );
    }

    #[test]
    fn test_rule_sets_compose() {
        let rules = RuleSet::new()
            .rule("code", Check::IsString, "Code must be text")
            .rule("code", Check::MinLength(3), "Code too short");
        let errors = rules.validate(&body(json!({"code": "ab"}))).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.0[0].msg, "Code too short");

        let errors = rules.validate(&Map::new()).unwrap_err();
        assert_eq!(errors.fields(), vec!["code", "code"]);
    }
}
