use jsonom_core::{decode, encode_to_string, Node};

/// Assert that decode → encode reproduces `json` exactly.
fn assert_roundtrip(json: &str) {
    let node = decode(json.as_bytes(), None)
        .expect("decode failed")
        .expect("input was empty");
    let output = encode_to_string(&node).expect("encode failed");
    assert_eq!(output, json, "Roundtrip failed for input: {json}");
}

/// Assert that decode → encode of `json` gives `expected`.
fn assert_reencodes(json: &str, expected: &str) {
    let node = decode(json.as_bytes(), None).unwrap().unwrap();
    assert_eq!(encode_to_string(&node).unwrap(), expected, "input: {json:?}");
}

// ============================================================================
// Primitive Roundtrips
// ============================================================================

#[test]
fn roundtrip_null() {
    assert_roundtrip("null");
}

#[test]
fn roundtrip_bools() {
    assert_roundtrip("true");
    assert_roundtrip("false");
}

#[test]
fn roundtrip_strings() {
    assert_roundtrip(r#""""#);
    assert_roundtrip(r#""hello world""#);
    assert_roundtrip(r#""line\nbreak \"quoted\" back\\slash""#);
    assert_roundtrip("\"caf\u{e9} \u{4f60}\u{597d} \u{1F600}\"");
}

// ============================================================================
// Number literals
// ============================================================================

#[test]
fn roundtrip_trailing_zero() {
    assert_roundtrip("1.50");
    assert_roundtrip("[0.000,10.0]");
}

#[test]
fn roundtrip_integer_beyond_64_bits() {
    assert_roundtrip("100000000000000000001");
    assert_roundtrip("-98765432109876543210987654321");
}

#[test]
fn roundtrip_exponent_forms() {
    assert_roundtrip("[1E+2,1e2,1e-7,6.02E23]");
}

#[test]
fn roundtrip_negative_zero() {
    assert_roundtrip("-0");
    assert_roundtrip("-0.0");
}

#[test]
fn roundtrip_high_precision_decimal() {
    assert_roundtrip("3.14159265358979323846264338327950288419716939937510");
}

// ============================================================================
// Order
// ============================================================================

#[test]
fn roundtrip_key_order() {
    assert_roundtrip(r#"{"z":1,"y":2,"x":3,"a":4}"#);
}

#[test]
fn roundtrip_nested_key_order() {
    assert_roundtrip(r#"{"outer":{"b":[{"d":1,"c":2}],"a":null},"first":true}"#);
}

#[test]
fn roundtrip_array_order() {
    assert_roundtrip(r#"[3,"b",null,1,{"k":[]},false]"#);
}

// ============================================================================
// Whitespace and escapes
// ============================================================================

#[test]
fn whitespace_is_dropped() {
    assert_reencodes(
        "{\n  \"a\" : [ 1 , 2 ],\r\n\t\"b\" : { }\n}\n",
        r#"{"a":[1,2],"b":{}}"#,
    );
}

#[test]
fn escaped_slash_is_written_plain() {
    assert_reencodes(r#""a\/b""#, r#""a/b""#);
}

#[test]
fn unicode_escapes_are_written_as_text() {
    assert_reencodes(r#""\u00e9\ud83d\ude00""#, "\"\u{e9}\u{1F600}\"");
    assert_reencodes(r#""\u0041""#, r#""A""#);
}

#[test]
fn control_escapes_use_short_forms() {
    assert_reencodes(r#""\u0008\u000a\u0001""#, r#""\b\n\u0001""#);
}

#[test]
fn duplicate_keys_collapse() {
    assert_reencodes(r#"{"a":1,"b":2,"a":3}"#, r#"{"a":3,"b":2}"#);
}

// ============================================================================
// Edit then encode
// ============================================================================

#[test]
fn untouched_members_survive_an_edit() {
    let mut node = decode(br#"{"price":1.50,"qty":100000000000000000001,"tag":"x"}"#, None)
        .unwrap()
        .unwrap();
    node.as_object_mut().unwrap().set("tag", "y");
    assert_eq!(
        encode_to_string(&node).unwrap(),
        r#"{"price":1.50,"qty":100000000000000000001,"tag":"y"}"#
    );
}

#[test]
fn parse_and_display_roundtrip() {
    let text = r#"{"a":[1.50,{"b":null}],"c":"d"}"#;
    let node: Node = text.parse().unwrap();
    assert_eq!(node.to_string(), text);
}

// ============================================================================
// Generic projections
// ============================================================================

#[test]
fn marshal_keeps_number_text() {
    let node = decode(br#"{"n":1.50,"big":100000000000000000001}"#, None)
        .unwrap()
        .unwrap();
    let projected = node.marshal();
    assert_eq!(projected["n"].to_string(), "1.50");
    assert_eq!(projected["big"].to_string(), "100000000000000000001");
}

#[test]
fn marshal_matches_serde_json_value() {
    let text = r#"{"a":[true,null,"s"],"b":{"c":2}}"#;
    let node = decode(text.as_bytes(), None).unwrap().unwrap();
    let expected: serde_json::Value = serde_json::from_str(text).unwrap();
    assert_eq!(node.marshal(), expected);
}

#[test]
fn serialize_keeps_member_order() {
    let text = r#"{"z":1.5,"a":[null,"x"],"m":{"y":true,"b":false}}"#;
    let node = decode(text.as_bytes(), None).unwrap().unwrap();
    assert_eq!(serde_json::to_string(&node).unwrap(), text);
}
