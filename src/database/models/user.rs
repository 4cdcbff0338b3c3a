use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{reject_system_fields, ModelError};
use crate::database::document::Document;

pub const EMAIL_FIELD: &str = "email";
pub const ROLE_FIELD: &str = "role";
pub const PASSWORD_FIELD: &str = "password";
pub const PASSWORD_HASH_FIELD: &str = "password_hash";

/// Role stored on a user record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    /// Unknown role names fall back to `User`
    pub fn from_name(name: &str) -> Self {
        match name {
            "admin" => Role::Admin,
            _ => Role::User,
        }
    }

    /// Role of a stored user document; absent means `User`
    pub fn of(user: &Document) -> Self {
        user.get(ROLE_FIELD)
            .and_then(Value::as_str)
            .map(Role::from_name)
            .unwrap_or_default()
    }

    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }
}

/// Stored bcrypt hash, if the user ever set a password
pub fn password_hash(user: &Document) -> Option<&str> {
    user.get(PASSWORD_HASH_FIELD).and_then(Value::as_str)
}

/// User document as returned to clients
pub fn public_view(mut user: Document) -> Document {
    user.remove(PASSWORD_HASH_FIELD);
    user
}

fn take_password(document: &mut Document) -> Result<Option<String>, ModelError> {
    match document.remove(PASSWORD_FIELD) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(password)) if !password.is_empty() => Ok(Some(password)),
        Some(Value::String(_)) => Err(ModelError::InvalidField {
            field: PASSWORD_FIELD,
            reason: "must not be empty".to_string(),
        }),
        Some(_) => Err(ModelError::InvalidField {
            field: PASSWORD_FIELD,
            reason: "must be a string".to_string(),
        }),
    }
}

/// Body of `PUT /user/:email`, split into stored fields and a plaintext password
#[derive(Debug)]
pub struct ProfileUpdate {
    pub fields: Document,
    pub password: Option<String>,
}

impl ProfileUpdate {
    /// Roles are never taken from the profile body and the path email wins
    pub fn from_payload(email: &str, mut payload: Document) -> Result<Self, ModelError> {
        reject_system_fields(&payload)?;
        payload.remove(ROLE_FIELD);
        payload.remove(PASSWORD_HASH_FIELD);
        let password = take_password(&mut payload)?;
        payload.insert(EMAIL_FIELD.to_string(), Value::String(email.to_string()));

        Ok(Self {
            fields: payload,
            password,
        })
    }
}

/// Body of `POST /login`
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Remaining payload fields, carried into the token
    pub claims: Document,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("claims", &self.claims)
            .finish()
    }
}

impl LoginRequest {
    pub fn from_payload(mut payload: Document) -> Result<Self, ModelError> {
        let email = match payload.remove(EMAIL_FIELD) {
            Some(Value::String(email)) if !email.is_empty() => Some(email),
            _ => None,
        };
        let password = take_password(&mut payload).unwrap_or(None);
        payload.remove(PASSWORD_HASH_FIELD);

        match (email, password) {
            (Some(email), Some(password)) => Ok(Self {
                email,
                password,
                claims: payload,
            }),
            (email, password) => {
                let mut missing = Vec::new();
                if email.is_none() {
                    missing.push(EMAIL_FIELD);
                }
                if password.is_none() {
                    missing.push(PASSWORD_FIELD);
                }
                Err(ModelError::MissingRequiredFields(missing))
            }
        }
    }
}
