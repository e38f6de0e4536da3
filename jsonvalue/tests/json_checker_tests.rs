// SPDX-License-Identifier: Apache-2.0

//! JSON_checker style conformance corpus.
//!
//! Documents that must parse, and one generated test per document that
//! must be rejected. The cases follow the json.org JSON_checker suite,
//! embedded inline. `fail1` (scalar root) and `fail18` (depth 20) are
//! accepted by this parser and live in `known_deviations`.

use jsonvalue::{parse, JsonValue, ParseError};

fn assert_rejected(name: &str, input: &str) {
    match parse(input) {
        Err(ParseError::Lex(_)) | Err(ParseError::UnexpectedToken { .. }) => {}
        other => panic!("{name} should fail to parse, got {other:?}. Content: {input:?}"),
    }
}

mod should_pass {
    use super::*;

    const PASS1: &str = r##"
[
    "JSON Test Pattern pass1",
    {"object with 1 member":["array with 1 element"]},
    {},
    [],
    -42,
    true,
    false,
    null,
    {
        "integer": 1234567890,
        "real": -9876.543210,
        "e": 0.123456789e-12,
        "E": 1.234567890E+34,
        "":  23456789012E66,
        "zero": 0,
        "one": 1,
        "space": " ",
        "quote": "\"",
        "backslash": "\\",
        "controls": "\b\f\n\r\t",
        "slash": "/ & \/",
        "alpha": "abcdefghijklmnopqrstuvwyz",
        "ALPHA": "ABCDEFGHIJKLMNOPQRSTUVWYZ",
        "digit": "0123456789",
        "0123456789": "digit",
        "special": "`1~!@#$%^&*()_+-={':[,]}|;.</>?",
        "hex": "\u0123\u4567\u89AB\uCDEF\uabcd\uef4A",
        "true": true,
        "false": false,
        "null": null,
        "array":[  ],
        "object":{  },
        "address": "50 St. James Street",
        "url": "http://www.JSON.org/",
        "comment": "// /* <!-- --",
        "# -- --> */": " ",
        " s p a c e d " :[1,2 , 3

,

4 , 5        ,          6           ,7        ],"compact":[1,2,3,4,5,6,7],
        "jsontext": "{\"object with 1 member\":[\"array with 1 element\"]}",
        "quotes": "&#34; \u0022 %22 0x22 034 &#x22;",
        "\/\\\"\uCAFE\uBABE\uAB98\uFCDE\ubcda\uef4A\b\f\n\r\t`1~!@#$%^&*()_+-=[]{}|;:',./<>?"
: "A key can be any string"
    },
    0.5 ,98.6
,
99.44
,

1066,
1e1,
0.1e1,
1e-1,
1e00,2e+00,2e-00
,"rosebud"]
"##;

    const PASS2: &str = r#"[[[[[[[[[[[[[[[[[[["Not too deep"]]]]]]]]]]]]]]]]]]]"#;

    const PASS3: &str = r#"
{
    "JSON Test Pattern pass3": {
        "The outermost value": "must be an object or array.",
        "In this test": "It is an object."
    }
}
"#;

    #[test]
    fn test_pass1_comprehensive() {
        let value = parse(PASS1).unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 20);

        let members = array.get(8).and_then(JsonValue::as_object).unwrap();
        assert_eq!(members.get("slash").and_then(JsonValue::as_str), Some("/ & /"));
        assert_eq!(
            members.get("controls").and_then(JsonValue::as_str),
            Some("\u{8}\u{c}\n\r\t")
        );
        assert_eq!(members.get("compact").map(JsonValue::size), Some(7));
        assert_eq!(members.keys().next().map(String::as_str), Some("integer"));
    }

    #[test]
    fn test_pass1_reparses_from_its_own_output() {
        let value = parse(PASS1).unwrap();
        let text = value.to_string();
        assert_eq!(parse(&text).unwrap(), value);
        assert_eq!(parse(&text).unwrap().to_string(), text);
    }

    #[test]
    fn test_pass2_deep_nesting() {
        let value = parse(PASS2).unwrap();
        let mut depth = 0;
        let mut current = &value;
        while let Some(inner) = current.get_index(0) {
            depth += 1;
            current = inner;
        }
        assert_eq!(depth, 19);
        assert_eq!(current.as_str(), Some("Not too deep"));
    }

    #[test]
    fn test_pass3_simple_object() {
        let value = parse(PASS3).unwrap();
        let inner = value.get("JSON Test Pattern pass3").unwrap();
        assert_eq!(inner.size(), 2);
    }
}

mod should_fail {
    use super::*;

    macro_rules! generate_fail_tests {
        ($($name:ident => $input:expr),* $(,)?) => {
            $(
                paste::paste! {
                    #[test]
                    fn [<test_ $name>]() {
                        assert_rejected(stringify!($name), $input);
                    }
                }
            )*
        };
    }

    generate_fail_tests!(
        unclosed_object => "{",
        fail2 => r#"["Unclosed array""#,
        fail3 => r#"{unquoted_key: "keys must be quoted"}"#,
        fail4 => r#"["extra comma",]"#,
        fail5 => r#"["double extra comma",,]"#,
        fail6 => r#"[   , "<-- missing value"]"#,
        fail7 => r#"["Comma after the close"],"#,
        fail8 => r#"["Extra close"]]"#,
        fail9 => r#"{"Extra comma": true,}"#,
        fail10 => r#"{"Extra value after close": true} "misplaced quoted value""#,
        fail11 => r#"{"Illegal expression": 1 + 2}"#,
        fail12 => r#"{"Illegal invocation": alert()}"#,
        fail13 => r#"{"Numbers cannot have leading zeroes": 013}"#,
        fail14 => r#"{"Numbers cannot be hex": 0x14}"#,
        fail15 => r#"["Illegal backslash escape: \x15"]"#,
        fail16 => r#"[\naked]"#,
        fail17 => r#"["Illegal backslash escape: \017"]"#,
        fail19 => r#"{"Missing colon" null}"#,
        fail20 => r#"{"Double colon":: null}"#,
        fail21 => r#"{"Comma instead of colon", null}"#,
        fail22 => r#"["Colon instead of comma": false]"#,
        fail23 => r#"["Bad value", truth]"#,
        fail24 => "['single quote']",
        fail25 => "[\"\ttab\tcharacter\tin\tstring\t\"]",
        fail26 => r#"["tab\   character\   in\  string\  "]"#,
        fail27 => "[\"line\nbreak\"]",
        fail28 => "[\"line\\\nbreak\"]",
        fail29 => "[0e]",
        fail30 => "[0e+]",
        fail31 => "[0e+-1]",
        fail32 => r#"{"Comma instead if closing brace": true,"#,
        fail33 => r#"["mismatch"}"#,
        empty_document => "",
        whitespace_only => " \n\t ",
        lone_high_surrogate => r#"["\uD800"]"#,
        lone_low_surrogate => r#"["\uDC00x"]"#,
        truncated_unicode_escape => r#"["\u12"]"#,
        plus_sign => "[+1]",
        bare_fraction => "[.5]",
        trailing_decimal_point => "[1.]",
    );
}

mod known_deviations {
    use super::*;

    #[test]
    fn test_fail1_scalar_root_allowed() {
        let value = parse(r#""A JSON payload should be an object or array, not a string.""#).unwrap();
        assert!(value.is_string());
    }

    #[test]
    fn test_fail18_depth_20_allowed() {
        let value = parse(r#"[[[[[[[[[[[[[[[[[[[["Too deep"]]]]]]]]]]]]]]]]]]]]"#).unwrap();
        assert!(value.is_array());
    }
}
