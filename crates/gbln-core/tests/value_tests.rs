use gbln_core::{parse, Map, TypeTag, Value};

// ============================================================================
// Accessors
// ============================================================================

#[test]
fn integer_accessors_cross_signedness() {
    assert_eq!(Value::U64(u64::MAX).as_i64(), None);
    assert_eq!(Value::U64(7).as_i64(), Some(7));
    assert_eq!(Value::I8(-1).as_u64(), None);
    assert_eq!(Value::I32(40).as_u64(), Some(40));
    assert_eq!(Value::F64(1.0).as_i64(), None);
}

#[test]
fn float_accessor_widens_f32() {
    assert_eq!(Value::F32(0.5).as_f64(), Some(0.5));
    assert_eq!(Value::I8(1).as_f64(), None);
}

#[test]
fn type_names() {
    let doc = parse("a<i16>(1) b<s8>(x) c<b>(t) d<n>() e{} f[]").unwrap();
    let names: Vec<&str> = doc.as_object().unwrap().values().map(Value::type_name).collect();
    assert_eq!(names, ["i16", "str", "bool", "null", "object", "array"]);
}

#[test]
fn get_and_get_index() {
    let doc = parse("list<u8>[10 20 30] obj{k<b>(f)}").unwrap();
    let list = doc.get("list").unwrap();
    assert_eq!(list.get_index(1), Some(&Value::U8(20)));
    assert_eq!(list.get_index(3), None);
    assert_eq!(list.get("k"), None);
    assert_eq!(doc.get("obj").and_then(|o| o.get("k")).and_then(Value::as_bool), Some(false));
}

#[test]
fn get_path_edge_cases() {
    let doc = parse("a{b[{c<i8>(1)}]}").unwrap();
    assert_eq!(doc.get_path(""), Some(&doc));
    assert_eq!(doc.get_path("a.b.0.c"), Some(&Value::I8(1)));
    assert_eq!(doc.get_path("a.b.x"), None);
    assert_eq!(doc.get_path("a.b.0.c.d"), None);
    assert_eq!(doc.get_path("missing"), None);
}

#[test]
fn from_conversions() {
    assert_eq!(Value::from(5u16), Value::U16(5));
    assert_eq!(Value::from(-5i64), Value::I64(-5));
    assert_eq!(Value::from("hi"), Value::Str("hi".to_string()));
    assert_eq!(Value::from(()), Value::Null);
    assert!(Value::from(()).is_null());
    assert_eq!(Value::from(vec![Value::Bool(true)]), Value::Array(vec![Value::Bool(true)]));
    assert_eq!(Value::from(Map::new()), Value::Object(Map::new()));
}

#[test]
fn type_tag_classification() {
    assert!(TypeTag::U8.is_integer() && !TypeTag::U8.is_signed());
    assert!(TypeTag::I64.is_signed());
    assert!(TypeTag::F32.is_float() && !TypeTag::F32.is_integer());
    assert_eq!(TypeTag::Str(4).integer_bounds(), None);
    assert_eq!(TypeTag::U16.integer_bounds(), Some((0, 65535)));
}

// ============================================================================
// serde
// ============================================================================

#[test]
fn serializes_to_json_in_source_order() {
    let doc = parse("z<u8>(1) a{list<s8>[x y] none<n>() ok<b>(t) pi<f64>(3.5)}").unwrap();
    let json = serde_json::to_string(&doc).unwrap();
    assert_eq!(json, r#"{"z":1,"a":{"list":["x","y"],"none":null,"ok":true,"pi":3.5}}"#);
}

#[test]
fn extreme_integers_serialize_exactly() {
    let doc = parse("max<u64>(18446744073709551615) min<i64>(-9223372036854775808)").unwrap();
    let json = serde_json::to_string(&doc).unwrap();
    assert_eq!(json, r#"{"max":18446744073709551615,"min":-9223372036854775808}"#);
}
