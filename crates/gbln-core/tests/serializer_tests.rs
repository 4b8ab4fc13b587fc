use gbln_core::{parse, serialize, serialize_pretty, Map, Value};

/// Helper: build an object value from key/value pairs, preserving order.
fn object<const N: usize>(pairs: [(&str, Value); N]) -> Value {
    let mut map = Map::new();
    for (k, v) in pairs {
        map.insert(k.to_string(), v);
    }
    Value::Object(map)
}

fn compact(src: &str) -> String {
    serialize(&parse(src).unwrap())
}

// ============================================================================
// Compact primitives
// ============================================================================

#[test]
fn serialize_integers() {
    let doc = object([
        ("a", Value::I8(-5)),
        ("b", Value::U16(65535)),
        ("c", Value::I64(i64::MIN)),
        ("d", Value::U64(u64::MAX)),
    ]);
    assert_eq!(
        serialize(&doc),
        "a<i8>(-5)b<u16>(65535)c<i64>(-9223372036854775808)d<u64>(18446744073709551615)"
    );
}

#[test]
fn serialize_floats() {
    let doc = object([
        ("a", Value::F64(3.14)),
        ("b", Value::F32(0.5)),
        ("c", Value::F64(f64::NEG_INFINITY)),
        ("d", Value::F64(2.0)),
    ]);
    assert_eq!(serialize(&doc), "a<f64>(3.14)b<f32>(0.5)c<f64>(-inf)d<f64>(2)");
}

#[test]
fn serialize_bool_and_null() {
    let doc = object([("t", Value::Bool(true)), ("f", Value::Bool(false)), ("n", Value::Null)]);
    assert_eq!(serialize(&doc), "t<b>(true)f<b>(false)n<n>()");
}

#[test]
fn serialize_string_bound_rounds_up() {
    let doc = object([
        ("short", Value::from("hi")),
        ("exact", Value::from("12345678")),
        ("nine", Value::from("123456789")),
        ("empty", Value::from("")),
    ]);
    assert_eq!(
        serialize(&doc),
        "short<s8>(hi)exact<s8>(12345678)nine<s16>(123456789)empty<s8>()"
    );
}

#[test]
fn serialize_string_bound_counts_characters() {
    let doc = object([("city", Value::from("北京市北京市北京市"))]);
    assert_eq!(serialize(&doc), "city<s16>(北京市北京市北京市)");
}

#[test]
fn serialize_escapes_special_characters() {
    let doc = object([("s", Value::from("a(b)\\c\nd\te\rf"))]);
    assert_eq!(serialize(&doc), r"s<s16>(a\(b\)\\c\nd\te\rf)");
}

#[test]
fn serialize_keeps_angle_brackets_and_spaces() {
    let doc = object([("s", Value::from(" a < b > c "))]);
    assert_eq!(serialize(&doc), "s<s16>( a < b > c )");
}

// ============================================================================
// Compact containers
// ============================================================================

#[test]
fn serialize_object() {
    assert_eq!(
        compact("user {\n  id<u32>(1)\n  name<s8>(Ann)\n}"),
        "user{id<u32>(1)name<s8>(Ann)}"
    );
}

#[test]
fn serialize_empty_containers() {
    assert_eq!(compact("o{} a[] t<i8>[]"), "o{}a[]t[]");
}

#[test]
fn serialize_homogeneous_array() {
    assert_eq!(compact("ids<u32>[1 2 3]"), "ids<u32>[1 2 3]");
    assert_eq!(compact("flags<b>[t f 1]"), "flags<b>[true false true]");
    assert_eq!(compact("nothing<n>[() n]"), "nothing<n>[null null]");
}

#[test]
fn serialize_string_array_uses_longest_item_for_bound() {
    assert_eq!(
        compact("tags<s64>[rust (hello world) ()]"),
        "tags<s16>[rust (hello world) ()]"
    );
}

#[test]
fn serialize_string_array_parenthesises_unsafe_items() {
    let doc = object([("t", Value::Array(vec![
        Value::from("a]b"),
        Value::from("x(y"),
        Value::from("tab\there"),
        Value::from("plain"),
    ]))]);
    assert_eq!(serialize(&doc), r"t<s8>((a]b) (x\(y) (tab\there) plain)");
}

#[test]
fn serialize_mixed_array() {
    let doc = object([("m", Value::Array(vec![Value::I32(1), Value::from("two"), Value::Null]))]);
    assert_eq!(serialize(&doc), "m[<i32>(1)<s8>(two)<n>()]");
}

#[test]
fn serialize_array_of_objects() {
    assert_eq!(
        compact("users[{id<u8>(1)} {id<u8>(2)}]"),
        "users[{id<u8>(1)}{id<u8>(2)}]"
    );
}

#[test]
fn serialize_nested_arrays() {
    let doc = object([(
        "grid",
        Value::Array(vec![
            Value::Array(vec![Value::I8(1), Value::I8(2)]),
            Value::Array(vec![Value::I8(3), Value::from("x")]),
            Value::Array(vec![]),
        ]),
    )]);
    assert_eq!(serialize(&doc), "grid[<i8>[1 2][<i8>(3)<s8>(x)][]]");
}

#[test]
fn serialize_non_object_root_as_item() {
    assert_eq!(serialize(&Value::U8(7)), "<u8>(7)");
    assert_eq!(serialize(&Value::Array(vec![Value::Bool(true)])), "<b>[true]");
}

// ============================================================================
// Pretty output
// ============================================================================

#[test]
fn pretty_object() {
    let src = "user{id<u32>(1) name<s8>(Ann) tags<s8>[a b] meta{} addr{city<s8>(Oslo)}}";
    let expected = "\
user{
  id<u32>(1)
  name<s8>(Ann)
  tags<s8>[a b]
  meta{}
  addr{
    city<s8>(Oslo)
  }
}";
    assert_eq!(serialize_pretty(&parse(src).unwrap(), 2), expected);
}

#[test]
fn pretty_array_items_one_per_line() {
    let src = "items[{a<i8>(1)} <u8>(2) []]";
    let expected = "\
items[
    {
        a<i8>(1)
    }
    <u8>(2)
    []
]";
    assert_eq!(serialize_pretty(&parse(src).unwrap(), 4), expected);
}

#[test]
fn pretty_top_level_records_on_separate_lines() {
    let doc = parse("a<i8>(1) b<i8>(2)").unwrap();
    assert_eq!(serialize_pretty(&doc, 2), "a<i8>(1)\nb<i8>(2)");
}

#[test]
fn pretty_zero_indent() {
    let doc = parse("o{x<i8>(1)}").unwrap();
    assert_eq!(serialize_pretty(&doc, 0), "o{\nx<i8>(1)\n}");
}

#[test]
fn pretty_has_no_trailing_newline_or_spaces() {
    let doc = parse("a{b{c[<i8>(1) {d<b>(t)}]}}").unwrap();
    let out = serialize_pretty(&doc, 2);
    assert!(!out.ends_with('\n'));
    for line in out.lines() {
        assert!(!line.ends_with(' '), "trailing space in {line:?}");
    }
}

#[test]
fn empty_document_serializes_to_empty_string() {
    let doc = parse("").unwrap();
    assert_eq!(serialize(&doc), "");
    assert_eq!(serialize_pretty(&doc, 2), "");
}
