use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    InvalidType,
    InvalidJson,
    TooSmall,
    InvalidString,
}

/// Single violation. `path` is empty when the issue concerns the whole input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub path: Vec<String>,
    pub code: IssueCode,
    pub message: String,
}

impl Issue {
    pub fn field(field: &str, code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            path: vec![field.to_string()],
            code,
            message: message.into(),
        }
    }

    pub fn root(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            path: vec![],
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    pub issues: Vec<Issue>,
}

impl ValidationErrors {
    pub fn push(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Fields with at least one issue, in report order.
    #[cfg(test)]
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::with_capacity(self.issues.len());

        for issue in &self.issues {
            if let Some(field) = issue.path.first() {
                if !fields.contains(&field.as_str()) {
                    fields.push(field);
                }
            }
        }

        fields
    }
}

impl From<Issue> for ValidationErrors {
    fn from(issue: Issue) -> Self {
        Self { issues: vec![issue] }
    }
}

impl From<Vec<Issue>> for ValidationErrors {
    fn from(issues: Vec<Issue>) -> Self {
        Self { issues }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self
            .issues
            .iter()
            .map(|issue| {
                if issue.path.is_empty() {
                    issue.message.clone()
                } else {
                    format!("{}: {}", issue.path.join("."), issue.message)
                }
            })
            .collect();

        write!(f, "{}", messages.join(", "))
    }
}
