use std::env::var;
use std::fmt::Debug;

/// The environment variable naming the directory that holds `emacs` and `emacsclient`.
pub const EMACS_DIR_VAR: &str = "UNREAL_EMACS_EMACSDIR";

const LOG_FILTER_VARS: &[&str] = &["UEMACS_LOG", "RUST_LOG"];

/// Read access to environment variables.
pub trait EnvironmentLookup: Debug {
    /// Return the value of `name`, or `None` if it is unset or not valid unicode.
    fn get_var(&self, name: &str) -> Option<String>;
}

/// [`EnvironmentLookup`] backed by the environment of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl EnvironmentLookup for SystemEnvironment {
    fn get_var(&self, name: &str) -> Option<String> {
        var(name).ok()
    }
}

/// Like [`EnvironmentLookup::get_var`], but an empty value counts as unset.
pub(crate) fn get_non_empty_var<E>(env: &E, name: &str) -> Option<String>
where
    E: EnvironmentLookup + ?Sized,
{
    env.get_var(name).filter(|value| !value.is_empty())
}

/// Get the log filter directive from `$UEMACS_LOG`, falling back to `$RUST_LOG`.
#[must_use]
pub fn get_log_filter() -> Option<String> {
    check_vars_in_order(&SystemEnvironment, LOG_FILTER_VARS)
}

fn check_vars_in_order<E>(env: &E, vars: &[&str]) -> Option<String>
where
    E: EnvironmentLookup + ?Sized,
{
    vars.iter().find_map(|v| get_non_empty_var(env, v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeEnvironment;

    #[test]
    fn empty_value_counts_as_unset() {
        let env = FakeEnvironment::default().with(EMACS_DIR_VAR, "");
        assert_eq!(get_non_empty_var(&env, EMACS_DIR_VAR), None);
    }

    #[test]
    fn first_set_variable_wins() {
        let env = FakeEnvironment::default()
            .with("RUST_LOG", "info")
            .with("UEMACS_LOG", "debug");
        assert_eq!(
            check_vars_in_order(&env, LOG_FILTER_VARS),
            Some("debug".to_string())
        );

        let env = FakeEnvironment::default().with("RUST_LOG", "info");
        assert_eq!(
            check_vars_in_order(&env, LOG_FILTER_VARS),
            Some("info".to_string())
        );
    }
}
