// Copyright 2023 Datafuse Labs.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::borrow::Cow;

use mysql_jsonb::tags::*;
use mysql_jsonb::{
    decode, from_slice, to_string, DecodeOptions, Decoder, Error, Number, TemporalKind, Value,
    JSON_DOCUMENT_MAX_DEPTH,
};
use serde_json::json;

use crate::encoder::{encode_document, encode_json, Node};

fn pack_datetime(y: i64, mo: i64, d: i64, h: i64, mi: i64, s: i64, us: i64) -> i64 {
    let ymd = ((y * 13 + mo) << 5) | d;
    let hms = (h << 12) | (mi << 6) | s;
    (((ymd << 17) | hms) << 24) + us
}

fn nested_arrays(levels: usize, innermost: Node) -> Node {
    let mut node = innermost;
    for _ in 0..levels {
        node = Node::Array(vec![node]);
    }
    node
}

#[test]
fn test_decode_small_object() {
    let data = b"\x01\x00\x0C\x00\x0B\x00\x01\x00\x05\x01\x00a";
    let value = decode(SMALL_OBJECT_TAG, data).unwrap();
    assert_eq!(value.to_string(), r#"{"a":1}"#);
    assert_eq!(
        value,
        Value::Object(vec![(Cow::Borrowed("a"), Value::Number(Number::Int64(1)))])
    );
}

#[test]
fn test_decode_empty_containers() {
    let data = b"\x00\x00\x04\x00";
    assert_eq!(decode(SMALL_OBJECT_TAG, data).unwrap().to_string(), "{}");
    assert_eq!(decode(SMALL_ARRAY_TAG, data).unwrap().to_string(), "[]");
    let data = b"\x00\x00\x00\x00\x08\x00\x00\x00";
    assert_eq!(decode(LARGE_OBJECT_TAG, data).unwrap().to_string(), "{}");
    assert_eq!(decode(LARGE_ARRAY_TAG, data).unwrap().to_string(), "[]");
}

#[test]
fn test_decode_corrupt_header() {
    let data = b"\x01\x00\x04\x00\x0B\x00\x01\x00\x05\x01\x00a";
    assert_eq!(decode(SMALL_OBJECT_TAG, data), Err(Error::CorruptHeader));
    // element count far beyond what the byte length can hold
    let data = b"\xFF\xFF\xFF\xFF\x08\x00\x00\x00";
    assert_eq!(decode(LARGE_ARRAY_TAG, data), Err(Error::CorruptHeader));
}

#[test]
fn test_decode_literals() {
    let tests = vec![
        (b"\x04\x00".to_vec(), Value::Null),
        (b"\x04\x01".to_vec(), Value::Bool(true)),
        (b"\x04\x02".to_vec(), Value::Bool(false)),
    ];
    for (s, v) in tests {
        assert_eq!(from_slice(&s).unwrap(), v);
    }
    assert_eq!(from_slice(b"\x04\x03"), Err(Error::CorruptLiteral(0x03)));
    assert_eq!(from_slice(b"\x04"), Err(Error::Truncated));
}

#[test]
fn test_decode_integers() {
    let tests = vec![
        (b"\x05\x00\x80".to_vec(), "-32768"),
        (b"\x06\xFF\xFF".to_vec(), "65535"),
        (b"\x07\x00\x00\x00\x80".to_vec(), "-2147483648"),
        (b"\x08\xFF\xFF\xFF\xFF".to_vec(), "4294967295"),
        (
            b"\x09\x00\x00\x00\x00\x00\x00\x00\x80".to_vec(),
            "-9223372036854775808",
        ),
        (
            b"\x0A\xFF\xFF\xFF\xFF\xFF\xFF\xFF\xFF".to_vec(),
            "18446744073709551615",
        ),
    ];
    for (s, expected) in tests {
        let value = from_slice(&s).unwrap();
        assert!(value.is_number());
        assert_eq!(value.to_string(), expected);
    }
    assert_eq!(
        from_slice(b"\x0A\xFF\xFF\xFF\xFF\xFF\xFF\xFF\xFF")
            .unwrap()
            .as_u64(),
        Some(u64::MAX)
    );
    assert_eq!(from_slice(b"\x09\x01\x00"), Err(Error::Truncated));
}

#[test]
fn test_decode_double() {
    let mut data = vec![DOUBLE_TAG];
    data.extend_from_slice(&1.5f64.to_le_bytes());
    let value = from_slice(&data).unwrap();
    assert_eq!(value.as_f64(), Some(1.5));
    assert_eq!(value.to_string(), "1.5");

    let mut data = vec![DOUBLE_TAG];
    data.extend_from_slice(&(-2.0f64).to_le_bytes());
    assert_eq!(to_string(&data).unwrap(), "-2.0");
}

#[test]
fn test_decode_non_finite_double() {
    let node = Node::Array(vec![
        Node::Double(f64::NAN),
        Node::Double(f64::INFINITY),
        Node::Double(f64::NEG_INFINITY),
    ]);
    let data = encode_document(&node, false);
    let text = to_string(&data).unwrap();
    assert_eq!(text, "[null,null,null]");
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, json!([null, null, null]));

    let value = from_slice(&data).unwrap();
    assert_eq!(serde_json::to_string(&value).unwrap(), text);
    assert_eq!(serde_json::Value::from(value), parsed);
}

#[cfg(feature = "arbitrary_precision")]
#[test]
fn test_decode_wide_decimal() {
    // DECIMAL(20,0) 12345678901234567891: two leading digits then two words
    let node = Node::Opaque(
        FIELD_TYPE_NEWDECIMAL,
        b"\x14\x00\x8C\x14\x9A\xA4\x35\x0D\xFB\x38\xD3".to_vec(),
    );
    let data = encode_document(&node, false);
    let value = from_slice(&data).unwrap();
    assert_eq!(value.to_string(), "12345678901234567891");
    assert_eq!(
        serde_json::to_string(&value).unwrap(),
        "12345678901234567891"
    );
    assert_eq!(
        serde_json::Value::from(value).to_string(),
        "12345678901234567891"
    );
}

#[test]
fn test_decode_strings() {
    let value = from_slice(b"\x0C\x03abc").unwrap();
    assert!(matches!(value.as_str(), Some(Cow::Borrowed("abc"))));

    let value = from_slice(b"\x0C\x06\xE6\xB5\x8B\xE8\xAF\x95").unwrap();
    assert_eq!(value.as_str().unwrap(), "测试");

    let value = from_slice(b"\x0C\x02\n\"").unwrap();
    assert_eq!(value.to_string(), r#""\n\"""#);

    // invalid UTF-8 is replaced rather than rejected
    let value = from_slice(b"\x0C\x02\xFF\xFE").unwrap();
    assert_eq!(value.as_str().unwrap(), "\u{FFFD}\u{FFFD}");

    let long = "x".repeat(300);
    let data = encode_document(&Node::String(long.clone()), false);
    assert_eq!(&data[1..3], b"\xAC\x02");
    assert_eq!(from_slice(&data).unwrap().as_str().unwrap(), &long);

    assert_eq!(from_slice(b"\x0C\x05abc"), Err(Error::Truncated));
    assert_eq!(
        from_slice(b"\x0C\xFF\xFF\xFF\xFF\x7F"),
        Err(Error::LengthOverflow)
    );
}

#[test]
fn test_decode_unknown_type() {
    assert_eq!(from_slice(b"\x0D\x00"), Err(Error::UnknownType(0x0D)));
    // out of line entry with an unknown tag
    let data = b"\x01\x00\x08\x00\x0D\x07\x00\x00";
    assert_eq!(decode(SMALL_ARRAY_TAG, data), Err(Error::UnknownType(0x0D)));
}

#[test]
fn test_decode_inlined_entries() {
    // [null, true, -2] with inlined literals and int16
    let data = b"\x03\x00\x0D\x00\x04\x00\x00\x04\x01\x00\x05\xFE\xFF";
    assert_eq!(
        decode(SMALL_ARRAY_TAG, data).unwrap().to_string(),
        "[null,true,-2]"
    );

    let data = b"\x01\x00\x07\x00\x04\x03\x00";
    assert_eq!(
        decode(SMALL_ARRAY_TAG, data),
        Err(Error::CorruptLiteral(0x03))
    );
}

#[test]
fn test_decode_int32_inlining_by_layout() {
    let node = Node::Array(vec![Node::Int(100_000), Node::UInt(3_000_000_000)]);

    let small = encode_document(&node, false);
    // int32 values are stored out of line in small containers
    assert_eq!(small.len(), 1 + 4 + 2 * 3 + 2 * 4);
    assert_eq!(to_string(&small).unwrap(), "[100000,3000000000]");

    let large = encode_document(&node, true);
    // and inside the value entry in large ones
    assert_eq!(large.len(), 1 + 8 + 2 * 5);
    assert_eq!(to_string(&large).unwrap(), "[100000,3000000000]");
}

#[test]
fn test_decode_nested_document() {
    let json = json!({
        "id": 42,
        "name": "Ünïcödé \"quoted\"",
        "tags": ["a", "b", null, false],
        "score": -0.25,
        "big": 9007199254740993u64,
        "neg": -9007199254740993i64,
        "nested": {"empty_obj": {}, "empty_arr": [], "deep": [[[1]]]},
    });
    for large in [false, true] {
        let data = encode_json(&json, large);
        let value = from_slice(&data).unwrap();
        assert_eq!(value.to_string(), json.to_string());
        assert_eq!(serde_json::Value::from(value), json);
    }
}

#[test]
fn test_decode_large_container() {
    let long = "y".repeat(70_000);
    let node = Node::Object(vec![
        ("long".to_string(), Node::String(long.clone())),
        ("n".to_string(), Node::Int(7)),
    ]);
    let data = encode_document(&node, true);
    assert_eq!(data[0], LARGE_OBJECT_TAG);
    let value = from_slice(&data).unwrap();
    assert_eq!(value.get_by_name("long").unwrap().as_str().unwrap(), &long);
    assert_eq!(value.get_by_name("n").unwrap().as_i64(), Some(7));
}

#[test]
fn test_decode_duplicate_keys() {
    let node = Node::Object(vec![
        ("k".to_string(), Node::Int(1)),
        ("j".to_string(), Node::Bool(true)),
        ("k".to_string(), Node::String("two".to_string())),
    ]);
    let data = encode_document(&node, false);
    let value = from_slice(&data).unwrap();
    assert_eq!(value.to_string(), r#"{"k":1,"j":true,"k":"two"}"#);
    assert_eq!(value.object_keys(), Some(vec!["k", "j", "k"]));
    assert_eq!(value.get_by_name("k").unwrap().as_i64(), Some(1));
}

#[test]
fn test_decode_unsorted_keys() {
    let node = Node::Object(vec![
        ("zeta".to_string(), Node::Int(1)),
        ("alpha".to_string(), Node::Int(2)),
    ]);
    let data = encode_document(&node, false);
    assert_eq!(to_string(&data).unwrap(), r#"{"zeta":1,"alpha":2}"#);
}

#[test]
fn test_decode_depth_limit() {
    let at_limit = encode_document(
        &nested_arrays(JSON_DOCUMENT_MAX_DEPTH - 1, Node::Array(vec![])),
        false,
    );
    let value = from_slice(&at_limit).unwrap();
    assert!(value.is_array());

    let over_limit = encode_document(
        &nested_arrays(JSON_DOCUMENT_MAX_DEPTH, Node::Array(vec![])),
        false,
    );
    assert_eq!(from_slice(&over_limit), Err(Error::DepthExceeded));

    let decoder = Decoder::new(DecodeOptions::default().with_max_depth(1000));
    assert!(decoder.decode_document(&over_limit).is_ok());
}

#[test]
fn test_decode_depth_ignores_scalar_layout() {
    let decoder = Decoder::new(DecodeOptions::default().with_max_depth(2));

    // int32 is out of line in small containers and inlined in large ones
    let node = nested_arrays(2, Node::Int(100_000));
    for large in [false, true] {
        let data = encode_document(&node, large);
        assert_eq!(
            decoder.decode_document(&data).unwrap().to_string(),
            "[[100000]]"
        );
    }

    let data = encode_document(&nested_arrays(2, Node::String("x".to_string())), false);
    assert_eq!(
        decoder.decode_document(&data).unwrap().to_string(),
        r#"[["x"]]"#
    );

    let data = encode_document(&nested_arrays(3, Node::Null), false);
    assert_eq!(decoder.decode_document(&data), Err(Error::DepthExceeded));

    // a temporal payload nests like a container
    let packed = pack_datetime(2020, 1, 1, 0, 0, 0, 0);
    let date = Node::Opaque(FIELD_TYPE_DATE, packed.to_le_bytes().to_vec());
    let data = encode_document(&nested_arrays(2, date), false);
    assert_eq!(decoder.decode_document(&data), Err(Error::DepthExceeded));

    let decoder = Decoder::new(DecodeOptions::default().with_max_depth(0));
    assert_eq!(decoder.decode_document(b"\x04\x00"), Ok(Value::Null));
    assert_eq!(
        decoder.decode_document(b"\x02\x00\x00\x04\x00"),
        Err(Error::DepthExceeded)
    );
}

#[test]
fn test_decode_truncated_document() {
    assert_eq!(from_slice(b""), Err(Error::Truncated));
    let data = b"\x00\x01\x00\x0C\x00\x0B\x00\x01\x00\x05\x01\x00a";
    for len in 1..data.len() {
        let result = from_slice(&data[..len]);
        assert!(
            matches!(result, Err(Error::Truncated) | Err(Error::CorruptHeader)),
            "prefix of {} bytes decoded to {:?}",
            len,
            result
        );
    }
}

#[test]
fn test_decode_offset_past_byte_length() {
    // value offset 9 is inside the buffer but past byte_length 8
    let data = b"\x01\x00\x08\x00\x0C\x09\x00\x00\x01a";
    assert_eq!(decode(SMALL_ARRAY_TAG, data), Err(Error::Truncated));
}

#[test]
fn test_decode_temporal() {
    let date = pack_datetime(2024, 2, 29, 0, 0, 0, 0);
    let datetime = pack_datetime(2015, 1, 15, 23, 24, 25, 123456);
    let time = -(((12i64 << 12) | (30 << 6) | 5) << 24);
    let node = Node::Array(vec![
        Node::Opaque(FIELD_TYPE_DATE, date.to_le_bytes().to_vec()),
        Node::Opaque(FIELD_TYPE_DATETIME, datetime.to_le_bytes().to_vec()),
        Node::Opaque(FIELD_TYPE_TIMESTAMP, datetime.to_le_bytes().to_vec()),
        Node::Opaque(FIELD_TYPE_TIME, time.to_le_bytes().to_vec()),
    ]);
    let data = encode_document(&node, false);
    let value = from_slice(&data).unwrap();
    assert_eq!(
        value.to_string(),
        r#"["2024-02-29","2015-01-15 23:24:25.123456","2015-01-15 23:24:25.123456","-12:30:05.000000"]"#
    );
    let first = value.get_by_index(0).unwrap().as_temporal().unwrap();
    assert_eq!(first.kind, TemporalKind::Date);
    assert_eq!((first.year, first.month, first.day), (2024, 2, 29));

    let node = Node::Opaque(FIELD_TYPE_DATE, vec![0; 4]);
    assert_eq!(
        from_slice(&encode_document(&node, false)),
        Err(Error::CorruptTemporal)
    );
}

#[test]
fn test_decode_decimal() {
    let node = Node::Object(vec![(
        "price".to_string(),
        Node::Opaque(FIELD_TYPE_NEWDECIMAL, b"\x05\x02\x80\x7B\x2D".to_vec()),
    )]);
    let data = encode_document(&node, false);
    let value = from_slice(&data).unwrap();
    assert_eq!(value.to_string(), r#"{"price":123.45}"#);
    let price = value.get_by_name("price").unwrap().as_number().unwrap();
    assert_eq!(price.as_decimal().unwrap().scale, 2);

    let node = Node::Opaque(FIELD_TYPE_NEWDECIMAL, b"\x05\x02\x80".to_vec());
    assert_eq!(
        from_slice(&encode_document(&node, false)),
        Err(Error::CorruptDecimal)
    );
}

#[test]
fn test_decode_raw_opaque() {
    // a BLOB column stored as opaque
    let node = Node::Opaque(252, b"hello".to_vec());
    let data = encode_document(&node, false);
    let value = from_slice(&data).unwrap();
    assert!(value.is_opaque());
    assert_eq!(value.to_string(), r#""base64:type252:aGVsbG8=""#);
    assert_eq!(value.as_opaque().unwrap().data.as_ref(), b"hello");

    assert_eq!(from_slice(b"\x0F"), Err(Error::Truncated));
    assert_eq!(from_slice(b"\x0F\xFC\x05hel"), Err(Error::Truncated));
}

#[test]
fn test_decode_is_deterministic() {
    let json = json!({"a": [1, 2.5, "s", {"b": null}], "c": true});
    let data = encode_json(&json, false);
    let first = to_string(&data).unwrap();
    for _ in 0..3 {
        assert_eq!(to_string(&data).unwrap(), first);
    }
}

#[test]
fn test_decoded_value_outlives_decoder() {
    let data = encode_json(&json!({"k": "v"}), false);
    let value = {
        let decoder = Decoder::default();
        decoder.decode_document(&data).unwrap()
    };
    let owned: Value<'static> = value.into_owned();
    drop(data);
    assert_eq!(owned.to_string(), r#"{"k":"v"}"#);
}
