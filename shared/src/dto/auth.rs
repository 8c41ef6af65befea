use serde::{Deserialize, Serialize};

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub phone_no: String,
    pub address: String,
}

/// Authentication response (login/register success)
///
/// Registration may answer without a token; the client then logs in with the
/// same credentials.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    pub user: User,
}

/// User record as returned by the backend and persisted with the session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_no: String,
    #[serde(default)]
    pub address: String,
    /// Balance snapshot taken when the user record was issued
    #[serde(default)]
    pub balance: f64,
}

impl User {
    /// Name to greet the user with; falls back to the email address.
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.email
        } else {
            &self.full_name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_accepts_mongo_id() {
        let json = r#"{"_id":"u1","fullName":"Ada Lovelace","email":"ada@example.com","phoneNo":"555","address":"London","balance":10000}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.full_name, "Ada Lovelace");
        assert_eq!(user.balance, 10_000.0);
    }

    #[test]
    fn test_user_accepts_plain_id_and_missing_optionals() {
        let json = r#"{"id":"u2","email":"bob@example.com"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "u2");
        assert_eq!(user.display_name(), "bob@example.com");
        assert_eq!(user.balance, 0.0);
    }

    #[test]
    fn test_register_request_is_camel_case() {
        let request = RegisterRequest {
            full_name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "secret123".to_string(),
            phone_no: "555".to_string(),
            address: "London".to_string(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["fullName"], "Ada");
        assert_eq!(value["phoneNo"], "555");
    }

    #[test]
    fn test_auth_response_without_token() {
        let json = r#"{"user":{"_id":"u1","email":"ada@example.com"}}"#;
        let response: AuthResponse = serde_json::from_str(json).unwrap();
        assert!(response.access_token.is_none());
    }
}
