use std::sync::Arc;

/// Outcome of fetching one piece of repository data.
#[derive(Debug, Clone)]
pub enum Fetched<T> {
    /// The fetch succeeded and data was found.
    Found(T),

    /// The host answered but the item does not exist.
    Missing,

    /// The fetch failed for reasons other than the item not existing.
    /// Scores derived from this data must report themselves unavailable.
    Unavailable(Arc<ohno::AppError>),
}

impl<T> Fetched<T> {
    /// Returns `true` if the result is `Found`.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Returns `true` if the fetch failed outright.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }

    /// Converts this result into an `Option`, returning `Some` only for `Found`.
    #[must_use]
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(data) => Some(data),
            _ => None,
        }
    }

    /// Borrows the payload when present.
    #[must_use]
    pub const fn as_found(&self) -> Option<&T> {
        match self {
            Self::Found(data) => Some(data),
            _ => None,
        }
    }

    /// Maps the payload, leaving the other variants untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetched<U> {
        match self {
            Self::Found(data) => Fetched::Found(f(data)),
            Self::Missing => Fetched::Missing,
            Self::Unavailable(e) => Fetched::Unavailable(e),
        }
    }

    /// Returns a string describing the status of this result.
    #[must_use]
    pub const fn status_str(&self) -> &'static str {
        match self {
            Self::Found(_) => "Found",
            Self::Missing => "Missing",
            Self::Unavailable(_) => "Unavailable",
        }
    }
}
