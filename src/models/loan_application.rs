//! Loan application models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::{de, not_blank, ReviewStatus};

/// Loan application record
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LoanApplication {
    pub id: Uuid,
    pub name: String,
    pub mobile: String,
    pub email: Option<String>,
    pub city: String,
    pub pin_code: Option<String>,
    pub loan_type: String,
    pub loan_amount: Option<Decimal>,
    pub monthly_salary: Option<Decimal>,
    pub employment_type: Option<String>,
    /// Years
    pub preferred_tenure: Option<i32>,
    pub status: ReviewStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public submission payload
#[derive(Debug, Deserialize, Validate, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewLoanApplication {
    #[validate(custom = "not_blank")]
    pub name: String,

    #[validate(custom = "not_blank")]
    pub mobile: String,

    #[serde(default, deserialize_with = "de::optional_string")]
    #[validate(email)]
    pub email: Option<String>,

    #[validate(custom = "not_blank")]
    pub city: String,

    #[serde(default, deserialize_with = "de::optional_string")]
    pub pin_code: Option<String>,

    /// Category tag such as "home" or "car"
    #[validate(custom = "not_blank")]
    pub loan_type: String,

    #[serde(default, deserialize_with = "de::optional_decimal")]
    #[validate(custom = "non_negative")]
    pub loan_amount: Option<Decimal>,

    #[serde(default, deserialize_with = "de::optional_decimal")]
    #[validate(custom = "non_negative")]
    pub monthly_salary: Option<Decimal>,

    #[serde(default, deserialize_with = "de::optional_string")]
    pub employment_type: Option<String>,

    #[serde(default, deserialize_with = "de::optional_integer")]
    #[validate(range(min = 1, max = 30))]
    pub preferred_tenure: Option<i32>,
}

impl NewLoanApplication {
    /// Trim free-text fields before storage
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.mobile = self.mobile.trim().to_string();
        self.city = self.city.trim().to_string();
        self.loan_type = self.loan_type.trim().to_string();
        self.email = self.email.map(|e| e.to_lowercase());
        self
    }
}

fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::new("negative_amount"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn parse(json: &str) -> NewLoanApplication {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_form_payload_coercion() {
        let app = parse(
            r#"{
                "name": "Asha Verma",
                "mobile": "9876543210",
                "email": "",
                "city": "Pune",
                "pinCode": "411001",
                "loanType": "home",
                "loanAmount": "2500000",
                "monthlySalary": 85000.50,
                "employmentType": "salaried",
                "preferredTenure": "20"
            }"#,
        );
        assert!(app.validate().is_ok());
        assert_eq!(app.email, None);
        assert_eq!(app.loan_amount, Some(Decimal::from(2_500_000)));
        assert_eq!(app.monthly_salary, Some(Decimal::from_str("85000.5").unwrap()));
        assert_eq!(app.preferred_tenure, Some(20));
    }

    #[test]
    fn test_minimal_payload() {
        let app = parse(r#"{"name":"Ravi","mobile":"98200","city":"Mumbai","loanType":"car"}"#);
        assert!(app.validate().is_ok());
        assert_eq!(app.loan_type, "car");
        assert_eq!(app.preferred_tenure, None);
        assert_eq!(app.loan_amount, None);
    }

    #[test]
    fn test_missing_loan_type_is_rejected() {
        let result = serde_json::from_str::<NewLoanApplication>(
            r#"{"name":"Ravi","mobile":"98200","city":"Mumbai"}"#,
        );
        assert!(result.unwrap_err().to_string().contains("loanType"));

        let app = parse(r#"{"name":"Ravi","mobile":"98200","city":"Mumbai","loanType":"  "}"#);
        assert!(app.validate().is_err());
    }

    #[test]
    fn test_missing_required_field() {
        let result = serde_json::from_str::<NewLoanApplication>(r#"{"name":"Ravi","mobile":"98200","loanType":"home"}"#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("city"));
    }

    #[test]
    fn test_validation_names_offending_fields() {
        let app = parse(
            r#"{"name":"  ","mobile":"98200","city":"Delhi","loanType":"home","email":"not-an-email","preferredTenure":45}"#,
        );
        let errors = app.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert_eq!(fields.len(), 3);
    }

    #[test]
    fn test_non_numeric_tenure_is_rejected() {
        let result = serde_json::from_str::<NewLoanApplication>(
            r#"{"name":"Ravi","mobile":"98200","city":"Mumbai","loanType":"home","preferredTenure":"twenty"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_amount_fails_validation() {
        let app = parse(r#"{"name":"Ravi","mobile":"98200","city":"Mumbai","loanType":"home","loanAmount":"-5"}"#);
        assert!(app.validate().is_err());
    }

    #[test]
    fn test_normalized_trims_and_lowercases() {
        let app = parse(
            r#"{"name":" Ravi ","mobile":"98200 ","city":" Mumbai","email":"Ravi@Example.COM","loanType":" car "}"#,
        )
        .normalized();
        assert_eq!(app.name, "Ravi");
        assert_eq!(app.city, "Mumbai");
        assert_eq!(app.loan_type, "car");
        assert_eq!(app.email.as_deref(), Some("ravi@example.com"));
    }
}
