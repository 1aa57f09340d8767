/// Configuration for building, parsing and rendering URIs.
///
/// Options belong to a build session and may be mutated between calls
/// through [`Builder::with_options`]; a render or parse call reads them
/// once and applies them throughout.
///
/// [`Builder::with_options`]: crate::Builder::with_options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct UriOptions {
    /// Always terminate the rendered path with "/", even when no path
    /// segments are set. Defaults to `true`.
    pub always_slash_terminate_path: bool,

    /// Allow a password in the userinfo component of the URI.
    ///
    /// Defaults to `false`. Exercise caution enabling this: the password
    /// becomes part of the rendered URI and may end up being recorded in
    /// logs or browser history.
    pub allow_password_in_userinfo: bool,
}

impl Default for UriOptions {
    fn default() -> UriOptions {
        UriOptions {
            always_slash_terminate_path: true,
            allow_password_in_userinfo: false,
        }
    }
}
