#![allow(missing_debug_implementations)]

pub mod state;

use crate::{
    error::{BuildError, BuildErrorKind, ParseError},
    model::UriParts,
    options::UriOptions,
    query::QueryString,
};
use state::{Initial, Ready, SchemeSet};
use std::{marker::PhantomData, str::FromStr};

/// A staged builder for absolute URIs.
///
/// Create one with [`builder`](crate::builder) or
/// [`builder_with`](crate::builder_with), or obtain a fully populated one
/// from [`parse`](crate::parse).
///
/// # Examples
///
/// ```
/// let uri = uriforge::builder()
///     .scheme("https")
///     .host("example.com")
///     .add_path_segment("over/there")
///     .add_query_param("name", "ferret")
///     .fragment("nose")
///     .as_string();
///
/// assert_eq!(uri, "https://example.com/over/there/?name=ferret#nose");
/// ```
///
/// # Staging
///
/// Typestates enforce the two required components: a fresh builder only
/// accepts [`scheme`], a builder with a scheme only accepts [`host`], and
/// everything else is set on the [`Ready`] stage in any order, repetition
/// allowed. Each call consumes the builder and hands back the same
/// underlying model; nothing is copied between stages.
///
/// [`scheme`]: Self::scheme
/// [`host`]: Self::host
#[must_use]
pub struct Builder<S> {
    inner: BuilderInner,
    state: PhantomData<S>,
}

struct BuilderInner {
    parts: UriParts,
    options: UriOptions,
}

impl Builder<Initial> {
    pub(crate) fn new(options: UriOptions) -> Builder<Initial> {
        Builder {
            inner: BuilderInner {
                parts: UriParts::default(),
                options,
            },
            state: PhantomData,
        }
    }

    /// Sets the scheme, stored verbatim without validation.
    pub fn scheme(mut self, scheme: impl Into<String>) -> Builder<SchemeSet> {
        self.inner.parts.scheme = Some(scheme.into());
        self.cast()
    }
}

impl Builder<SchemeSet> {
    /// Sets the host, stored verbatim without validation.
    ///
    /// A malformed host is not rejected; it reappears as-is in the
    /// rendered string.
    pub fn host(mut self, host: impl Into<String>) -> Builder<Ready> {
        self.inner.parts.host = Some(host.into());
        self.cast()
    }
}

impl<S> Builder<S> {
    fn cast<T>(self) -> Builder<T> {
        Builder {
            inner: self.inner,
            state: PhantomData,
        }
    }

    /// Applies a mutation to the options and hands the builder back,
    /// unchanged in stage.
    ///
    /// ```
    /// let uri = uriforge::parse("http://example.com/a")
    ///     .unwrap()
    ///     .with_options(|o| o.always_slash_terminate_path = false)
    ///     .as_string();
    ///
    /// assert_eq!(uri, "http://example.com/a");
    /// ```
    pub fn with_options(mut self, f: impl FnOnce(&mut UriOptions)) -> Builder<S> {
        f(&mut self.inner.options);
        self
    }

    /// Returns the options of this build session.
    pub fn options(&self) -> &UriOptions {
        &self.inner.options
    }
}

impl Builder<Ready> {
    /// Appends path segments from one input string.
    ///
    /// The input is split on "/" and every non-empty piece is stored as
    /// its own segment, so `"a/b"`, `"/a/b/"`, and two calls with `"a"`
    /// then `"b"` all leave the same path behind. An input that holds no
    /// non-empty piece is silently dropped.
    pub fn add_path_segment(mut self, segment: impl AsRef<str>) -> Builder<Ready> {
        self.inner.parts.path_segments.extend(
            segment
                .as_ref()
                .split('/')
                .filter(|piece| !piece.is_empty())
                .map(str::to_owned),
        );
        self
    }

    /// Appends path segments from a sequence of input strings; equivalent
    /// to repeated [`add_path_segment`](Self::add_path_segment).
    pub fn add_path_segments<I>(mut self, segments: I) -> Builder<Ready>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for segment in segments {
            self = self.add_path_segment(segment);
        }
        self
    }

    /// Sets the port.
    ///
    /// Port 80 never appears in rendered output; any other port always
    /// does.
    pub fn port(mut self, port: u16) -> Builder<Ready> {
        self.inner.parts.port = Some(port);
        self
    }

    /// Sets the username, stored verbatim.
    pub fn username(mut self, username: impl Into<String>) -> Builder<Ready> {
        self.inner.parts.username = Some(username.into());
        self
    }

    /// Sets the password.
    ///
    /// # Errors
    ///
    /// Fails whenever [`allow_password_in_userinfo`] is not set, whatever
    /// the supplied value; an empty password is rejected all the same.
    ///
    /// [`allow_password_in_userinfo`]: UriOptions::allow_password_in_userinfo
    pub fn password(mut self, password: impl Into<String>) -> Result<Builder<Ready>, BuildError> {
        if !self.inner.options.allow_password_in_userinfo {
            return Err(BuildError(BuildErrorKind::PasswordNotAllowed));
        }
        self.inner.parts.password = Some(password.into());
        Ok(self)
    }

    /// Appends one query parameter.
    pub fn add_query_param(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Builder<Ready> {
        self.inner.parts.query.add(key, value);
        self
    }

    /// Appends a query parameter that carries no value.
    pub fn add_query_key(mut self, key: impl Into<String>) -> Builder<Ready> {
        self.inner.parts.query.add_key(key);
        self
    }

    /// Appends query parameters from any pair sequence, map types
    /// included.
    pub fn add_query_params<I, K, V>(mut self, pairs: I) -> Builder<Ready>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.inner.parts.query.add_all(pairs);
        self
    }

    /// Appends every pair of an existing [`QueryString`], valueless keys
    /// included.
    pub fn add_query(mut self, query: QueryString) -> Builder<Ready> {
        for (key, value) in query {
            match value {
                Some(value) => self.inner.parts.query.add(key, value),
                None => self.inner.parts.query.add_key(key),
            }
        }
        self
    }

    /// Sets the fragment, stored verbatim without a leading "#".
    pub fn fragment(mut self, fragment: impl Into<String>) -> Builder<Ready> {
        self.inner.parts.fragment = Some(fragment.into());
        self
    }

    /// Renders the URI to its canonical string form.
    ///
    /// Rendering never fails; a blank component is simply left out,
    /// except that the "://" separator is always emitted.
    pub fn as_string(&self) -> String {
        crate::fmt::render(&self.inner.parts, &self.inner.options)
    }

    /// Returns a view of the accumulated parts.
    pub fn parts(&self) -> &UriParts {
        &self.inner.parts
    }

    /// Consumes the builder, yielding the accumulated parts.
    pub fn into_parts(self) -> UriParts {
        self.inner.parts
    }
}

impl FromStr for Builder<Ready> {
    type Err = ParseError;

    /// Parses an absolute URI with default options; shorthand for
    /// [`parse`](crate::parse).
    fn from_str(s: &str) -> Result<Builder<Ready>, ParseError> {
        crate::parse(s)
    }
}
