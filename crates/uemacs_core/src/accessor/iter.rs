use super::{Accessors, SourceCodeAccessor};
use crate::Config;

/// Iterator over freshly constructed instances of every registered accessor.
#[derive(Debug)]
pub struct AccessorIter<'a> {
    pub(crate) next: Option<Accessors>,
    pub(crate) config: &'a Config,
}

impl Iterator for AccessorIter<'_> {
    type Item = Box<dyn SourceCodeAccessor>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        let result = current.get_accessor(self.config);
        self.next = current.next();
        Some(result)
    }
}
