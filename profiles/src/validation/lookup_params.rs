use crate::constants::MIN_NAME_LENGTH;
use crate::validation::{Issue, IssueCode, ValidationErrors};

/// Path parameters of `GET /user/{username}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupParams {
    pub username: String,
}

impl LookupParams {
    pub fn parse(username: Option<&str>) -> Result<Self, ValidationErrors> {
        match username {
            Some(username) if username.chars().count() >= MIN_NAME_LENGTH => Ok(Self {
                username: username.to_string(),
            }),
            Some(_) => Err(Issue::field("username", IssueCode::TooSmall, "invalid username").into()),
            None => Err(Issue::field("username", IssueCode::InvalidType, "Invalid type of username").into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_three_characters() {
        let params = LookupParams::parse(Some("bob")).expect("valid username");

        assert_eq!(params.username, "bob");
    }

    #[test]
    fn rejects_short_username() {
        let errors = LookupParams::parse(Some("bo")).unwrap_err();

        assert_eq!(errors.issues, vec![Issue::field("username", IssueCode::TooSmall, "invalid username")]);
    }

    #[test]
    fn rejects_missing_username() {
        let errors = LookupParams::parse(None).unwrap_err();

        assert_eq!(errors.issues[0].code, IssueCode::InvalidType);
    }
}
