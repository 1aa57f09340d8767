use crate::{
    encoding::{decode_value, encode_value},
    error::{ParseError, ParseErrorKind},
};
use std::{fmt, slice, vec};

#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// An ordered collection of query string parameters.
///
/// Keys may repeat; insertion order is preserved and governs rendering,
/// so a parsed query renders back in its original pair order. A parameter
/// may carry no value at all, which renders as `key=` and parses back
/// from a token without "=".
///
/// Lookup by [`get`] and [`has_key`] is ASCII-case-insensitive, while
/// [`get_all`] matches keys exactly; stored keys keep their case either
/// way.
///
/// [`get`]: Self::get
/// [`has_key`]: Self::has_key
/// [`get_all`]: Self::get_all
///
/// # Examples
///
/// ```
/// use uriforge::QueryString;
///
/// let mut query = QueryString::new();
/// query.add("lang", "rust");
/// query.add_key("verbose");
/// query.add("lang", "c");
///
/// assert_eq!(query.get("LANG"), Some("rust"));
/// assert_eq!(query.to_string(), "lang=rust&verbose=&lang=c");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryString {
    pairs: Vec<(String, Option<String>)>,
}

impl QueryString {
    /// Creates an empty collection.
    pub fn new() -> QueryString {
        QueryString::default()
    }

    /// Parses a raw query string, without the leading "?".
    ///
    /// The input is split on "&". A token without "=" becomes a key with
    /// no value; otherwise the part after the first "=" is percent-decoded,
    /// with "+" standing for a space, and stored as the value. Malformed
    /// percent octets are kept verbatim.
    ///
    /// # Errors
    ///
    /// Returns a [`MalformedQuery`] error when a token starts with "=",
    /// since a parameter cannot have an empty key.
    ///
    /// [`MalformedQuery`]: crate::ParseErrorKind::MalformedQuery
    ///
    /// # Examples
    ///
    /// ```
    /// use uriforge::QueryString;
    ///
    /// let query = QueryString::parse("lang=Rust&mascot=Ferris%20the%20crab")?;
    /// assert_eq!(query.get("mascot"), Some("Ferris the crab"));
    /// assert_eq!(query.to_string(), "lang=Rust&mascot=Ferris+the+crab");
    /// # Ok::<_, uriforge::ParseError>(())
    /// ```
    pub fn parse(query: &str) -> Result<QueryString, ParseError> {
        let mut out = QueryString::new();
        let mut start = 0;

        for token in query.split('&') {
            match token.find('=') {
                None => out.add_key(token),
                Some(0) => {
                    return Err(ParseError {
                        index: start,
                        kind: ParseErrorKind::MalformedQuery,
                    })
                }
                Some(i) => out.add(&token[..i], decode_value(&token[i + 1..])),
            }
            start += token.len() + 1;
        }
        Ok(out)
    }

    /// Appends a key/value pair.
    ///
    /// Existing pairs with the same key are kept; nothing is ever
    /// overwritten.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), Some(value.into())));
    }

    /// Appends a key that carries no value.
    pub fn add_key(&mut self, key: impl Into<String>) {
        self.pairs.push((key.into(), None));
    }

    /// Appends every pair of an iterator, in iteration order.
    ///
    /// Accepts any pair sequence, map types included; two parallel
    /// iterables can be combined with [`zip`](Iterator::zip) first.
    pub fn add_all<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in pairs {
            self.add(key, value);
        }
    }

    /// Returns the value of the first pair whose key matches
    /// ASCII-case-insensitively, or `None` if no key matches.
    ///
    /// A key added without a value also yields `None`; the two cases
    /// cannot be told apart through this method. Use [`get_all`] to
    /// observe the pairs themselves.
    ///
    /// [`get_all`]: Self::get_all
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .and_then(|(_, v)| v.as_deref())
    }

    /// Returns the values of all pairs whose key matches exactly, in
    /// insertion order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = Option<&'a str>> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_deref())
    }

    /// Returns `true` if any pair's key matches ASCII-case-insensitively.
    pub fn has_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k.eq_ignore_ascii_case(key))
    }

    /// Returns `true` if the collection holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns the number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns an iterator over the pairs in insertion order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.pairs.iter(),
        }
    }
}

/// An iterator over the pairs of a [`QueryString`].
///
/// Created by [`QueryString::iter`].
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    inner: slice::Iter<'a, (String, Option<String>)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, Option<&'a str>);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a QueryString {
    type Item = (&'a str, Option<&'a str>);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl IntoIterator for QueryString {
    type Item = (String, Option<String>);
    type IntoIter = vec::IntoIter<(String, Option<String>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            // Keys are never encoded.
            f.write_str(key)?;
            f.write_str("=")?;
            if let Some(value) = value {
                encode_value(value, f)?;
            }
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl Serialize for QueryString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for QueryString {
    fn deserialize<D>(deserializer: D) -> Result<QueryString, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        QueryString::parse(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_empty_key_with_index() {
        let e = QueryString::parse("aKey=aValue&=orphan").unwrap_err();
        assert_eq!(e.kind(), ParseErrorKind::MalformedQuery);
        assert_eq!(e.index(), 12);
    }

    #[test]
    fn keeps_lookup_modes_distinct() {
        let mut query = QueryString::new();
        query.add("aKey", "aValue");

        // Case-insensitive first-match lookup...
        assert_eq!(query.get("AKEY"), Some("aValue"));
        assert!(query.has_key("akey"));
        // ...but exact-match enumeration.
        assert_eq!(query.get_all("AKEY").count(), 0);
        assert_eq!(query.get_all("aKey").collect::<Vec<_>>(), [Some("aValue")]);
    }

    #[test]
    fn empty_token_adds_empty_key() {
        let query = QueryString::parse("a=1&&b=2").unwrap();
        assert_eq!(query.len(), 3);
        assert_eq!(query.to_string(), "a=1&=&b=2");
    }
}
