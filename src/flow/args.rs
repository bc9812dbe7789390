//! Argument-vector builder used by every facade operation.

/// An ordered list of argument tokens for one claude-flow invocation.
///
/// Optional flags are added only when their value is present (or the switch
/// is on), so the resulting vector never carries empty placeholders.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ArgList(Vec<String>);

impl ArgList {
    /// Start a vector with its fixed leading tokens, e.g. `["hive-mind", "spawn"]`.
    pub fn new<I, S>(head: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(head.into_iter().map(Into::into).collect())
    }

    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.0.push(value.into());
        self
    }

    /// Append a positional argument only when present.
    pub fn arg_opt<S: Into<String>>(mut self, value: Option<S>) -> Self {
        if let Some(value) = value {
            self.0.push(value.into());
        }
        self
    }

    /// Append a bare switch when `on` is true.
    pub fn flag(mut self, name: &str, on: bool) -> Self {
        if on {
            self.0.push(name.to_string());
        }
        self
    }

    /// Append `name value`.
    pub fn opt(self, name: &str, value: impl Into<String>) -> Self {
        self.arg(name).arg(value)
    }

    /// Append `name value` only when the value is present.
    pub fn opt_if<S: Into<String>>(self, name: &str, value: Option<S>) -> Self {
        match value {
            Some(value) => self.opt(name, value),
            None => self,
        }
    }

    pub fn extend<I, S>(mut self, rest: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.extend(rest.into_iter().map(Into::into));
        self
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<ArgList> for Vec<String> {
    fn from(list: ArgList) -> Self {
        list.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_parts_are_omitted() {
        let args = ArgList::new(["memory", "query"])
            .arg("auth")
            .opt_if("--namespace", None::<&str>)
            .opt_if("--limit", Some("5"))
            .flag("--verbose", false)
            .into_vec();
        assert_eq!(args, vec!["memory", "query", "auth", "--limit", "5"]);
    }

    #[test]
    fn test_extend_and_positional_option() {
        let args = ArgList::new(["hooks"])
            .arg("pre-task")
            .extend(["--description", "x"])
            .arg_opt(Some("tail"))
            .arg_opt(None::<String>)
            .into_vec();
        assert_eq!(args, vec!["hooks", "pre-task", "--description", "x", "tail"]);
    }
}
