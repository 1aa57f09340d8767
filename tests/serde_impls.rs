#![cfg(feature = "serde")]

use uriforge::{QueryString, UriOptions};

#[test]
fn options_round_trip_as_json() {
    let options = UriOptions {
        always_slash_terminate_path: false,
        allow_password_in_userinfo: true,
    };
    let json = serde_json::to_string(&options).unwrap();
    assert_eq!(
        json,
        r#"{"always_slash_terminate_path":false,"allow_password_in_userinfo":true}"#
    );
    assert_eq!(serde_json::from_str::<UriOptions>(&json).unwrap(), options);
}

#[test]
fn options_missing_fields_fall_back_to_defaults() {
    let options: UriOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(options, UriOptions::default());
}

#[test]
fn query_string_serializes_in_rendered_form() {
    let query = QueryString::parse("a=1&b=x%20y").unwrap();
    assert_eq!(serde_json::to_string(&query).unwrap(), r#""a=1&b=x+y""#);
}

#[test]
fn query_string_deserializes_via_parse() {
    let query: QueryString = serde_json::from_str(r#""a=1&flag""#).unwrap();
    assert_eq!(query.get("a"), Some("1"));
    assert!(query.has_key("flag"));

    assert!(serde_json::from_str::<QueryString>(r#""=bad""#).is_err());
}
