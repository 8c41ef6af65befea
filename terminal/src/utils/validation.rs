/// Validation utilities for user input

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(message.into()),
        }
    }

    /// Convert into a `Result`, for chaining several checks with `?`.
    pub fn into_result(self) -> Result<(), String> {
        match self.error {
            Some(error) if !self.is_valid => Err(error),
            _ => Ok(()),
        }
    }
}

/// Validate email format
pub fn validate_email(email: &str) -> ValidationResult {
    let email = email.trim();
    if email.is_empty() {
        return ValidationResult::err("Email is required");
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return ValidationResult::err("Invalid email format");
    }

    if parts[0].is_empty() {
        return ValidationResult::err("Email username cannot be empty");
    }

    if parts[1].is_empty() || !parts[1].contains('.') {
        return ValidationResult::err("Invalid email domain");
    }

    ValidationResult::ok()
}

pub fn validate_password(password: &str) -> ValidationResult {
    if password.is_empty() {
        return ValidationResult::err("Password is required");
    }

    if password.chars().count() < MIN_PASSWORD_LEN {
        return ValidationResult::err("Password must be at least 8 characters long.");
    }

    ValidationResult::ok()
}

pub fn validate_password_confirmation(password: &str, confirmation: &str) -> ValidationResult {
    if password != confirmation {
        return ValidationResult::err("Passwords do not match");
    }
    ValidationResult::ok()
}

pub fn validate_required(value: &str, field: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return ValidationResult::err(format!("{} is required", field));
    }
    ValidationResult::ok()
}

/// Parse a strictly positive, finite number typed by the user.
pub fn parse_positive_amount(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value > 0.0)
}

/// Validate a deposit or withdrawal amount, returning the parsed value.
pub fn validate_transfer_amount(input: &str) -> Result<f64, String> {
    parse_positive_amount(input).ok_or_else(|| "Please enter a valid amount greater than 0".to_string())
}

/// Validate the trade form, returning the parsed quantity.
pub fn validate_trade_form(symbol: &str, quantity: &str) -> Result<f64, String> {
    match parse_positive_amount(quantity) {
        Some(qty) if !symbol.trim().is_empty() => Ok(qty),
        _ => Err("Please select a trading pair and enter a valid quantity".to_string()),
    }
}

/// Validate a price alert target, returning the parsed price.
pub fn validate_alert_target(symbol: &str, target: &str) -> Result<f64, String> {
    match parse_positive_amount(target) {
        Some(price) if !symbol.trim().is_empty() => Ok(price),
        _ => Err("Please choose a symbol and enter a target price".to_string()),
    }
}

/// Two-factor codes are six digits.
pub fn validate_two_factor_token(token: &str) -> ValidationResult {
    let token = token.trim();
    if token.len() != 6 || !token.chars().all(|c| c.is_ascii_digit()) {
        return ValidationResult::err("Enter the 6-digit code from your authenticator app");
    }
    ValidationResult::ok()
}
