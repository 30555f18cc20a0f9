//! Tags name the component a record came from.
//!
//! By default a tag is the simple name of a value's type: `Tag::of(&server)`
//! for a `my_app::net::Server` yields `Server`. Types whose name is not
//! meaningful (closures, or an absent tag source) get [`FALLBACK_TAG`].

use std::borrow::Cow;
use std::fmt;

/// Used whenever no non-empty name can be derived.
pub const FALLBACK_TAG: &str = "AnonymousClass";

/// A non-empty label for the source of a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag(Cow<'static, str>);

impl Tag {
    /// Uses `name` verbatim, or the fallback when it is empty.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        let name = name.into();
        if name.is_empty() {
            Self::fallback()
        } else {
            Tag(name)
        }
    }

    pub const fn fallback() -> Self {
        Tag(Cow::Borrowed(FALLBACK_TAG))
    }

    /// Tag derived from the static type of `value`.
    pub fn of<T: ?Sized>(_value: &T) -> Self {
        Self::of_type::<T>()
    }

    /// Like [`Tag::of`], but `None` yields the fallback.
    pub fn of_opt<T: ?Sized>(value: Option<&T>) -> Self {
        match value {
            Some(value) => Self::of(value),
            None => Self::fallback(),
        }
    }

    pub fn of_type<T: ?Sized>() -> Self {
        Self::new(simple_type_name(std::any::type_name::<T>()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Reduces a full type path to its last segment without generic arguments.
///
/// `alloc::vec::Vec<u8>` becomes `Vec`, `&app::Worker` becomes `Worker` and
/// `dyn app::Handler + core::marker::Send` becomes `Handler`. Tuples, slices,
/// arrays and compiler-generated names such as `{{closure}}` have no single
/// name and reduce to the empty string.
pub fn simple_type_name(full: &'static str) -> &'static str {
    let name = full.trim_start_matches(['&', '*']);
    let name = name
        .strip_prefix("mut ")
        .or_else(|| name.strip_prefix("const "))
        .unwrap_or(name);
    let name = name.strip_prefix("dyn ").unwrap_or(name);
    if name.starts_with(['(', '[']) {
        return "";
    }

    let name = match name.find('<') {
        Some(generic_start) => &name[..generic_start],
        None => name,
    };
    let name = match name.find(" + ") {
        Some(bound_start) => &name[..bound_start],
        None => name,
    };
    let last = match name.rfind("::") {
        Some(sep) => &name[sep + 2..],
        None => name,
    };
    if last.starts_with('{') {
        ""
    } else {
        last
    }
}
