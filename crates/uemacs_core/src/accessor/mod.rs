mod accessor_trait;
mod actual;
mod iter;
mod state;

pub use accessor_trait::{SourceCodeAccessor, Switches, Text};
pub use actual::emacs::EmacsSettings;
pub use iter::AccessorIter;
pub use state::AccessorState;

use anyhow::Result;
use uemacs_macros::Register;

use crate::errors::Error;
use crate::Config;

/// All source code accessors known to uemacs. Every variant `Foo` is implemented by the type
/// `actual::foo::Foo`.
#[derive(Debug, Clone, Copy, Register)]
pub enum Accessors {
    /// GNU Emacs through `emacsclient`.
    Emacs,
}

impl Accessors {
    /// Construct the accessor whose identifier is `identifier`. The availability of the
    /// returned accessor is not refreshed yet.
    ///
    /// # Errors
    ///
    /// This function returns [`Error::UnknownAccessor`] if no accessor has that identifier.
    pub fn find(identifier: &str, config: &Config) -> Result<Box<dyn SourceCodeAccessor>> {
        Self::iter(config)
            .find(|accessor| accessor.get_identifier() == identifier)
            .ok_or_else(|| Error::UnknownAccessor(identifier.to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_accessor_has_a_distinct_identifier() {
        let config = Config::default();
        let mut identifiers: Vec<_> = Accessors::iter(&config)
            .map(|accessor| accessor.get_identifier())
            .collect();
        let count = identifiers.len();
        identifiers.sort_unstable();
        identifiers.dedup();

        assert!(count > 0);
        assert_eq!(identifiers.len(), count);
    }

    #[test]
    fn find_by_identifier() {
        let config = Config::default();
        let accessor = Accessors::find("UnrealEmacs", &config).expect("emacs is registered");

        assert_eq!(accessor.get_display_name(), "Emacs");
        assert!(!accessor.can_access_source_code());
    }

    #[test]
    fn unknown_identifier_is_an_error() {
        let config = Config::default();
        let error = Accessors::find("VisualStudioCode", &config)
            .err()
            .expect("not registered");

        assert_eq!(
            error.to_string(),
            "no source code accessor named 'VisualStudioCode'"
        );
    }
}
