//! Selects the regex back-end: `regex` by default, `regex-lite` with the `lite` feature.

#[cfg(feature = "lite")]
pub(crate) use regex_lite::{Captures, Regex};
#[cfg(all(feature = "regex", not(feature = "lite")))]
pub(crate) use regex::{Captures, Regex};

#[cfg(not(any(feature = "regex", feature = "lite")))]
compile_error!("pubcite requires the \"regex\" or \"lite\" feature to be enabled");
