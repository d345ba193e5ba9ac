//! Formatting helpers.

use core::fmt;

use manyfmt::Fmt;

/// Format type for [`manyfmt::Fmt`] which is similar to [`fmt::Debug`], but uses an
/// alternate concise format.
///
/// This format may be on one line despite the pretty-printing option, and may lose
/// precision or Rust syntax in favor of a short at-a-glance representation.
#[expect(clippy::exhaustive_structs)]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct ConciseDebug;

/// Writes a vector of any dimension as a parenthesized, signed, fixed-precision tuple.
impl Fmt<ConciseDebug> for [f64] {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, _: &ConciseDebug) -> fmt::Result {
        write!(fmt, "(")?;
        for (i, component) in self.iter().enumerate() {
            if i > 0 {
                write!(fmt, ", ")?;
            }
            write!(fmt, "{component:+.3}")?;
        }
        write!(fmt, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString as _;

    struct V<'a>(&'a [f64]);
    impl fmt::Display for V<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            Fmt::fmt(self.0, f, &ConciseDebug)
        }
    }

    #[test]
    fn vector_format() {
        assert_eq!(V(&[1.0, -0.5]).to_string(), "(+1.000, -0.500)");
        assert_eq!(V(&[]).to_string(), "()");
        assert_eq!(V(&[-0.0004, 2.5e3]).to_string(), "(-0.000, +2500.000)");
    }
}
