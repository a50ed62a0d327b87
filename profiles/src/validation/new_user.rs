use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use serde_json::{Map, Value};

use crate::constants::MIN_NAME_LENGTH;
use crate::validation::{Issue, IssueCode, ValidationErrors};

// standard padded base64, non-zero trailing bits allowed ("QR==")
const PICTURE_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::RequireCanonical)
        .with_decode_allow_trailing_bits(true),
);

/// Validated `PUT /user/new` payload. The profile picture is already decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub profile_picture: Vec<u8>,
}

impl NewUser {
    /// Parses a raw request body. An empty body or malformed JSON is reported as a
    /// root-level issue.
    pub fn from_body(body: &[u8]) -> Result<Self, ValidationErrors> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(Issue::root(IssueCode::InvalidType, "request body is required").into());
        }

        let value: Value = serde_json::from_slice(body)
            .map_err(|e| Issue::root(IssueCode::InvalidJson, format!("request body is not valid JSON: {}", e)))?;

        Self::parse(&value)
    }

    pub fn parse(value: &Value) -> Result<Self, ValidationErrors> {
        let fields = value.as_object().ok_or_else(|| {
            Issue::root(
                IssueCode::InvalidType,
                format!("Expected object, received {}", json_type(value)),
            )
        })?;

        let mut errors = ValidationErrors::default();

        let username = min_length(
            fields,
            "username",
            "Invalid type of username",
            "Username is too short",
            &mut errors,
        );
        let first_name = min_length(
            fields,
            "firstName",
            "invalid type of first name",
            "first name too short",
            &mut errors,
        );
        let last_name = min_length(
            fields,
            "lastName",
            "invalid type of last name",
            "last name too short",
            &mut errors,
        );
        let profile_picture = base64_bytes(fields, "profilePicture", &mut errors);

        match (username, first_name, last_name, profile_picture) {
            (Some(username), Some(first_name), Some(last_name), Some(profile_picture)) if errors.is_empty() => {
                Ok(Self {
                    username,
                    first_name,
                    last_name,
                    profile_picture,
                })
            }
            _ => Err(errors),
        }
    }
}

fn min_length(
    fields: &Map<String, Value>,
    field: &str,
    type_message: &str,
    length_message: &str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match fields.get(field) {
        Some(Value::String(value)) if value.chars().count() >= MIN_NAME_LENGTH => Some(value.clone()),
        Some(Value::String(_)) => {
            errors.push(Issue::field(field, IssueCode::TooSmall, length_message));
            None
        }
        _ => {
            errors.push(Issue::field(field, IssueCode::InvalidType, type_message));
            None
        }
    }
}

fn base64_bytes(fields: &Map<String, Value>, field: &str, errors: &mut ValidationErrors) -> Option<Vec<u8>> {
    match fields.get(field) {
        Some(Value::String(encoded)) => match PICTURE_ENGINE.decode(encoded) {
            Ok(bytes) => Some(bytes),
            Err(_) => {
                errors.push(Issue::field(field, IssueCode::InvalidString, "invalid profile image"));
                None
            }
        },
        _ => {
            errors.push(Issue::field(field, IssueCode::InvalidType, "invalid image url"));
            None
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
