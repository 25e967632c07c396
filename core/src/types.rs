//! Domain values exchanged with the BADSEC API.

use std::fmt;

use serde::Serialize;

/// Opaque credential returned by `/auth`. Lives for one run only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Ordered user identifiers from `/users`.
///
/// Identifiers are opaque: a line that is empty or oddly formatted is kept as
/// it arrived. Only the trailing empty lines produced by a final newline are
/// dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UserList(Vec<String>);

impl UserList {
    pub fn from_body(body: &str) -> Self {
        let mut ids: Vec<String> = body.split('\n').map(str::to_string).collect();
        while ids.last().is_some_and(|id| id.is_empty()) {
            ids.pop();
        }
        Self(ids)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

/// Renders as a JSON array, e.g. `["1234","5678"]`.
impl fmt::Display for UserList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_body_into_ordered_ids() {
        let users = UserList::from_body("1234\n5678\n9101112\n13141516");
        assert_eq!(
            users.into_inner(),
            vec!["1234", "5678", "9101112", "13141516"]
        );
    }

    #[test]
    fn trailing_newline_does_not_add_an_id() {
        let users = UserList::from_body("1234\n5678\n");
        assert_eq!(users.len(), 2);
    }

    #[test]
    fn interior_empty_lines_pass_through() {
        let users = UserList::from_body("a\n\nb");
        assert_eq!(users.into_inner(), vec!["a", "", "b"]);
    }

    #[test]
    fn empty_body_is_empty_list() {
        assert!(UserList::from_body("").is_empty());
    }

    #[test]
    fn displays_as_json_array() {
        let users = UserList::from_body("1234\n5678");
        assert_eq!(users.to_string(), r#"["1234","5678"]"#);
    }
}
