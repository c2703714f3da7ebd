use std::fmt::{Display, Formatter, Result};

/// Write the items of an iterator to a formatter with a separator between
/// them, without allocating an intermediate string.
pub trait IteratorJoin {
    fn join(self, sep: &str, f: &mut Formatter<'_>) -> Result;
}

impl<T, I> IteratorJoin for T
where
    T: Iterator<Item = I>,
    I: Display,
{
    fn join(mut self, sep: &str, f: &mut Formatter<'_>) -> Result {
        if let Some(first) = self.next() {
            first.fmt(f)?;
        }

        for item in self {
            f.write_str(sep)?;
            item.fmt(f)?;
        }

        Ok(())
    }
}

/// Write `s` surrounded by `quote`, doubling every embedded `quote`.
pub(crate) fn write_escaped(f: &mut Formatter<'_>, s: &str, quote: char) -> Result {
    use std::fmt::Write as _;

    f.write_char(quote)?;

    for (idx, part) in s.split(quote).enumerate() {
        if idx > 0 {
            f.write_char(quote)?;
            f.write_char(quote)?;
        }

        f.write_str(part)?;
    }

    f.write_char(quote)
}
