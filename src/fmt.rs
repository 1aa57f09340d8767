use crate::{
    builder::{state::Ready, Builder},
    error::{BuildError, BuildErrorKind, ParseError, ParseErrorKind},
    model::UriParts,
    options::UriOptions,
};
use std::fmt::{self, Write};

/// Returns the field's value with an empty or whitespace-only string
/// counting as absent.
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

/// Renders the accumulated parts under the given options.
///
/// The output is deterministic and byte-exact for a given input: every
/// conditional piece below either appears fully or not at all.
pub(crate) fn render(parts: &UriParts, options: &UriOptions) -> String {
    let mut out = String::new();

    // The separator is emitted even without a scheme; an unset scheme
    // yields a visibly malformed "://...", never an error.
    if let Some(scheme) = &parts.scheme {
        out.push_str(scheme);
    }
    out.push_str("://");

    let mut has_credentials = false;
    if let Some(username) = present(&parts.username) {
        out.push_str(username);
        has_credentials = true;
    }
    if let Some(password) = present(&parts.password) {
        out.push(':');
        out.push_str(password);
        has_credentials = true;
    }

    let mut has_authority = has_credentials;
    if has_credentials {
        out.push('@');
    }

    if let Some(host) = present(&parts.host) {
        out.push_str(host);
        has_authority = true;
    }

    if let Some(port) = parts.port {
        if port != 80 {
            write!(out, ":{port}").unwrap();
            has_authority = true;
        }
    }

    if !parts.path_segments.is_empty() {
        if has_authority {
            out.push('/');
        }
        out.push_str(&parts.path_segments.join("/"));
    }

    if options.always_slash_terminate_path {
        out.push('/');
    }

    if !parts.query.is_empty() {
        out.push('?');
        write!(out, "{}", parts.query).unwrap();
    }

    if let Some(fragment) = present(&parts.fragment) {
        out.push('#');
        out.push_str(fragment);
    }

    out
}

impl fmt::Display for Builder<Ready> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl fmt::Debug for Builder<Ready> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("parts", self.parts())
            .field("options", self.options())
            .finish()
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.kind {
            ParseErrorKind::UnexpectedChar => "unexpected character at index ",
            ParseErrorKind::InvalidPort => "port value out of range at index ",
            ParseErrorKind::MalformedQuery => "query parameter with an empty key at index ",
            ParseErrorKind::PasswordNotAllowed => "password in userinfo disallowed at index ",
        };
        write!(f, "{}{}", msg, self.index)
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.0 {
            BuildErrorKind::PasswordNotAllowed => {
                "password cannot be included in userinfo \
                 unless the allow_password_in_userinfo option is set"
            }
        };
        f.write_str(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slashless() -> UriOptions {
        UriOptions {
            always_slash_terminate_path: false,
            ..UriOptions::default()
        }
    }

    #[test]
    fn renders_separator_without_scheme() {
        let parts = UriParts::default();
        assert_eq!(render(&parts, &slashless()), "://");
        assert_eq!(render(&parts, &UriOptions::default()), ":///");
    }

    #[test]
    fn blank_components_count_as_absent() {
        let parts = UriParts {
            scheme: Some("http".into()),
            host: Some("aHost".into()),
            username: Some("   ".into()),
            password: Some("".into()),
            fragment: Some(" \t".into()),
            ..UriParts::default()
        };
        assert_eq!(render(&parts, &slashless()), "http://aHost");
    }

    #[test]
    fn path_without_authority_has_no_leading_slash() {
        let parts = UriParts {
            scheme: Some("file".into()),
            path_segments: vec!["etc".into(), "hosts".into()],
            ..UriParts::default()
        };
        assert_eq!(render(&parts, &slashless()), "file://etc/hosts");
    }

    #[test]
    fn port_80_never_renders() {
        let parts = UriParts {
            scheme: Some("https".into()),
            host: Some("aHost".into()),
            port: Some(80),
            ..UriParts::default()
        };
        assert_eq!(render(&parts, &slashless()), "https://aHost");
    }

    #[test]
    fn port_alone_forms_an_authority() {
        // A port with a blank host still makes the path absolute.
        let parts = UriParts {
            scheme: Some("http".into()),
            port: Some(8080),
            path_segments: vec!["a".into()],
            ..UriParts::default()
        };
        assert_eq!(render(&parts, &slashless()), "http://:8080/a");
    }
}
