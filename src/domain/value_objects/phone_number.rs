use serde::{Deserialize, Serialize};

use crate::domain::errors::ValidationError;

/// A contact phone number in E.164 form without the leading '+'
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new(value: String) -> Result<Self, ValidationError> {
        let digits = value.trim().trim_start_matches('+');
        if digits.is_empty() {
            return Err(ValidationError::EmptyPhoneNumber);
        }

        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidPhoneNumber(value));
        }

        Ok(Self(digits.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        PhoneNumber::new(value)
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_number() {
        assert_eq!(
            PhoneNumber::new("+553597400527".to_string()).unwrap().as_str(),
            "553597400527"
        );
        assert!(PhoneNumber::new("".to_string()).is_err());
        assert!(PhoneNumber::new("35 9740-0527".to_string()).is_err());
    }
}
