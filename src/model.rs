use crate::query::QueryString;

/// The decomposed pieces of a URI under construction.
///
/// A `UriParts` is only ever populated through a
/// [`Builder`](crate::Builder), which upholds the invariants: stored path
/// segments are non-empty and carry no slashes, and a password is only
/// present when the options allowed it at the time it was set.
///
/// Absent and blank are distinct here: a component may hold an empty or
/// whitespace-only string, which the renderer then treats as absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UriParts {
    pub(crate) scheme: Option<String>,
    pub(crate) host: Option<String>,
    pub(crate) port: Option<u16>,
    pub(crate) path_segments: Vec<String>,
    pub(crate) query: QueryString,
    pub(crate) username: Option<String>,
    pub(crate) password: Option<String>,
    pub(crate) fragment: Option<String>,
}

impl UriParts {
    /// Returns the scheme, if set.
    #[inline]
    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// Returns the host, if set.
    #[inline]
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Returns the port, if set.
    #[inline]
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Returns the stored path segments.
    #[inline]
    pub fn path_segments(&self) -> &[String] {
        &self.path_segments
    }

    /// Returns the query collection.
    #[inline]
    pub fn query(&self) -> &QueryString {
        &self.query
    }

    /// Returns the username, if set.
    #[inline]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Returns the password, if set.
    #[inline]
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Returns the fragment, if set, without a leading "#".
    #[inline]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }
}
