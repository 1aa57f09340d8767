use crate::{
    builder::{state::Ready, Builder},
    error::{ParseError, ParseErrorKind},
    options::UriOptions,
    query::QueryString,
};

/// Returns immediately with an error.
macro_rules! err {
    ($index:expr, $kind:ident) => {
        return Err(ParseError {
            index: $index,
            kind: ParseErrorKind::$kind,
        })
    };
}

/// Well-known scheme default ports; an explicit port equal to its
/// scheme's default is dropped during reassembly.
const DEFAULT_PORTS: &[(&str, u16)] = &[
    ("ftp", 21),
    ("gopher", 70),
    ("http", 80),
    ("https", 443),
    ("ldap", 389),
    ("news", 119),
    ("nntp", 119),
    ("telnet", 23),
    ("ws", 80),
    ("wss", 443),
];

fn default_port(scheme: &str) -> Option<u16> {
    DEFAULT_PORTS
        .iter()
        .find(|(s, _)| scheme.eq_ignore_ascii_case(s))
        .map(|&(_, port)| port)
}

/// Parses an absolute URI and reassembles it into a [`Ready`] builder.
pub(crate) fn parse(uri: &str, options: UriOptions) -> Result<Builder<Ready>, ParseError> {
    let c = split(uri)?;

    let mut builder = Builder::new(options)
        .scheme(c.scheme)
        .host(c.host.unwrap_or(""));

    if !c.path.is_empty() {
        builder = builder.add_path_segment(c.path);
    }

    if let Some(fragment) = c.fragment {
        if !fragment.is_empty() {
            builder = builder.fragment(fragment);
        }
    }

    if let Some((query, offset)) = c.query {
        if !query.is_empty() {
            let query = QueryString::parse(query).map_err(|e| e.offset(offset))?;
            builder = builder.add_query(query);
        }
    }

    if let Some((userinfo, offset)) = c.userinfo {
        if !userinfo.is_empty() {
            match userinfo.find(':') {
                None => builder = builder.username(userinfo),
                Some(i) => {
                    // The same gate as direct construction: a disallowed
                    // password aborts the whole parse.
                    builder = builder
                        .username(&userinfo[..i])
                        .password(&userinfo[i + 1..])
                        .map_err(|_| ParseError {
                            index: offset + i,
                            kind: ParseErrorKind::PasswordNotAllowed,
                        })?;
                }
            }
        }
    }

    if let Some((port, offset)) = c.port {
        let port: u16 = port.parse().map_err(|_| ParseError {
            index: offset,
            kind: ParseErrorKind::InvalidPort,
        })?;
        if default_port(c.scheme) != Some(port) {
            builder = builder.port(port);
        }
    }

    Ok(builder)
}

/// Component slices of a decomposed absolute URI.
///
/// Sliced components that feed error reporting carry their byte offset
/// into the original input.
#[derive(Debug)]
struct Components<'a> {
    scheme: &'a str,
    userinfo: Option<(&'a str, usize)>,
    host: Option<&'a str>,
    port: Option<(&'a str, usize)>,
    path: &'a str,
    query: Option<(&'a str, usize)>,
    fragment: Option<&'a str>,
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Reader<'a> {
        Reader { bytes, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip(&mut self, n: usize) {
        self.pos += n;
        debug_assert!(self.pos <= self.bytes.len());
    }

    fn read_str(&mut self, s: &str) -> bool {
        if self.bytes[self.pos..].starts_with(s.as_bytes()) {
            self.skip(s.len());
            true
        } else {
            false
        }
    }

    /// Advances until a byte of `delims` or the end of input.
    fn skip_until(&mut self, delims: &[u8]) {
        while let Some(x) = self.peek() {
            if delims.contains(&x) {
                break;
            }
            self.skip(1);
        }
    }
}

/// Decomposes `scheme ":" ["//" authority] path ["?" query] ["#" fragment]`.
///
/// Only the scheme and an explicit port are validated; the host is taken
/// verbatim, malformed or not, and so are path, query, and fragment. All
/// delimiters are ASCII, so every slice boundary falls on a character
/// boundary.
fn split(s: &str) -> Result<Components<'_>, ParseError> {
    let mut r = Reader::new(s.as_bytes());

    // scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
    match r.peek() {
        Some(x) if x.is_ascii_alphabetic() => r.skip(1),
        _ => err!(0, UnexpectedChar),
    }
    loop {
        match r.peek() {
            Some(b':') => break,
            Some(x) if x.is_ascii_alphanumeric() || matches!(x, b'+' | b'-' | b'.') => r.skip(1),
            _ => err!(r.pos, UnexpectedChar),
        }
    }
    let scheme = &s[..r.pos];
    r.skip(1);

    let mut userinfo = None;
    let mut host = None;
    let mut port = None;

    if r.read_str("//") {
        let auth_start = r.pos;
        r.skip_until(b"/?#");
        let auth = &s[auth_start..r.pos];

        // Userinfo ends at the first "@"; the rest is host and port.
        let (rest, rest_off) = match auth.find('@') {
            Some(i) => {
                userinfo = Some((&auth[..i], auth_start));
                (&auth[i + 1..], auth_start + i + 1)
            }
            None => (auth, auth_start),
        };

        let (h, p) = split_host_port(rest, rest_off)?;
        host = Some(h);
        // An empty port, as in "host:", counts as absent.
        if let Some((p_str, _)) = p {
            if !p_str.is_empty() {
                port = p;
            }
        }
    }

    let path_start = r.pos;
    r.skip_until(b"?#");
    let path = &s[path_start..r.pos];

    let mut query = None;
    if r.read_str("?") {
        let query_start = r.pos;
        r.skip_until(b"#");
        query = Some((&s[query_start..r.pos], query_start));
    }

    let mut fragment = None;
    if r.read_str("#") {
        fragment = Some(&s[r.pos..]);
    }

    Ok(Components {
        scheme,
        userinfo,
        host,
        port,
        path,
        query,
        fragment,
    })
}

/// Splits `host [":" port]`, bracket-aware so an IP literal may carry
/// colons. Port characters must be ASCII digits; the host itself is not
/// validated.
fn split_host_port(rest: &str, off: usize) -> Result<(&str, Option<(&str, usize)>), ParseError> {
    let (host, port) = if rest.starts_with('[') {
        match rest.find(']') {
            Some(i) => {
                let after = &rest[i + 1..];
                if after.is_empty() {
                    (rest, None)
                } else if let Some(p) = after.strip_prefix(':') {
                    (&rest[..i + 1], Some((p, off + i + 2)))
                } else {
                    err!(off + i + 1, UnexpectedChar)
                }
            }
            // An unmatched bracket is accepted verbatim.
            None => (rest, None),
        }
    } else {
        let mut colons = rest.match_indices(':');
        match (colons.next(), colons.next()) {
            (None, _) => (rest, None),
            (Some((i, _)), None) => (&rest[..i], Some((&rest[i + 1..], off + i + 1))),
            (Some(_), Some((j, _))) => err!(off + j, UnexpectedChar),
        }
    };

    if let Some((p, p_off)) = port {
        if let Some(bad) = p.bytes().position(|x| !x.is_ascii_digit()) {
            err!(p_off + bad, UnexpectedChar);
        }
    }
    Ok((host, port))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn components(s: &str) -> Components<'_> {
        split(s).unwrap()
    }

    #[test]
    fn splits_full_uri() {
        let c = components("foo://user:pw@example.com:8042/over/there?name=ferret#nose");
        assert_eq!(c.scheme, "foo");
        assert_eq!(c.userinfo.unwrap().0, "user:pw");
        assert_eq!(c.host, Some("example.com"));
        assert_eq!(c.port.unwrap().0, "8042");
        assert_eq!(c.path, "/over/there");
        assert_eq!(c.query.unwrap().0, "name=ferret");
        assert_eq!(c.fragment, Some("nose"));
    }

    #[test]
    fn splits_without_authority() {
        let c = components("mailto:John.Doe@example.com");
        assert_eq!(c.scheme, "mailto");
        assert_eq!(c.host, None);
        assert_eq!(c.path, "John.Doe@example.com");
    }

    #[test]
    fn splits_empty_authority() {
        let c = components("file:///etc/hosts");
        assert_eq!(c.host, Some(""));
        assert_eq!(c.path, "/etc/hosts");
    }

    #[test]
    fn keeps_ip_literal_intact() {
        let c = components("ldap://[2001:db8::7]:389/c=GB");
        assert_eq!(c.host, Some("[2001:db8::7]"));
        assert_eq!(c.port.unwrap().0, "389");
    }

    #[test]
    fn empty_port_counts_as_absent() {
        let c = components("ssh://device.local:/");
        assert_eq!(c.host, Some("device.local"));
        assert!(c.port.is_none());
    }

    #[test]
    fn rejects_scheme_starting_with_a_digit() {
        let e = split("1ttp://example.com").unwrap_err();
        assert_eq!(e.kind(), ParseErrorKind::UnexpectedChar);
        assert_eq!(e.index(), 0);
    }

    #[test]
    fn rejects_input_without_a_scheme() {
        assert_eq!(split("/path/to/file").unwrap_err().index(), 0);
        assert_eq!(split("not a uri").unwrap_err().index(), 3);
    }

    #[test]
    fn rejects_non_digit_port() {
        let e = split("http://example.com:8a42/").unwrap_err();
        assert_eq!(e.kind(), ParseErrorKind::UnexpectedChar);
        assert_eq!(e.index(), 20);
    }

    #[test]
    fn rejects_second_colon_in_authority() {
        let e = split("http://a:1:2/").unwrap_err();
        assert_eq!(e.kind(), ParseErrorKind::UnexpectedChar);
        assert_eq!(e.index(), 10);
    }

    #[test]
    fn knows_default_ports_case_insensitively() {
        assert_eq!(default_port("http"), Some(80));
        assert_eq!(default_port("HTTPS"), Some(443));
        assert_eq!(default_port("zzz"), None);
    }
}
