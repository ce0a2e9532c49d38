//! Integration tests for sequence encoding and decoding

use seqjson::*;

fn encode<T: DefaultCodec>(value: &T) -> String {
    to_string(&Config::default(), value).unwrap()
}

fn decode<T: DefaultCodec>(input: &str) -> Result<T> {
    let mut value = T::default();
    from_str(&Config::default(), input, &mut value)?;
    Ok(value)
}

fn round_trip<T: DefaultCodec + PartialEq + std::fmt::Debug>(value: T) {
    let text = encode(&value);
    let decoded: T = decode(&text).unwrap();
    assert_eq!(decoded, value, "wire text: {text}");
}

#[test]
fn test_encode_absent_sequence() {
    assert_eq!(encode(&SequenceBuffer::<i64>::absent()), "null");
}

#[test]
fn test_encode_empty_sequence() {
    assert_eq!(encode(&SequenceBuffer::<i64>::with_capacity(4)), "[]");
    assert_eq!(encode(&SequenceBuffer::<i64>::from_vec(vec![])), "[]");
}

#[test]
fn test_encode_and_decode_three_elements() {
    assert_eq!(encode(&SequenceBuffer::from_vec(vec![1i64, 2, 3])), "[1,2,3]");

    let decoded: SequenceBuffer<i64> = decode("[1,2,3]").unwrap();
    assert_eq!(decoded.len(), 3);
    assert_eq!(decoded.as_slice(), &[1, 2, 3]);
}

#[test]
fn test_decode_five_elements_grows() {
    let decoded: SequenceBuffer<i64> = decode("[1,2,3,4,5]").unwrap();
    assert_eq!(decoded.len(), 5);
    assert!(decoded.capacity() >= 5);
    assert_eq!(decoded.as_slice(), &[1, 2, 3, 4, 5]);
}

#[test]
fn test_decode_null_into_populated_buffer() {
    let config = Config::default();
    let mut value = SequenceBuffer::from_vec(vec![9i64, 8, 7]);
    from_str(&config, "null", &mut value).unwrap();
    assert_eq!(value.len(), 0);
    assert_eq!(value.capacity(), 0);
    assert!(value.is_absent());

    let mut other = SequenceBuffer::from_vec(vec![9i64, 8, 7]);
    from_str(&config, "[]", &mut other).unwrap();
    assert!(!other.is_absent());
    assert_ne!(value, other);
    assert_eq!(encode(&value), "null");
    assert_eq!(encode(&other), "[]");
}

#[test]
fn test_decode_missing_closing_bracket() {
    for input in ["[1,2,3", "[1,2,3,4,5,6", "[", "[1,"] {
        let err = decode::<SequenceBuffer<i64>>(input).unwrap_err();
        assert!(!err.is_eof(), "input {input}");
        assert!(err.to_string().starts_with("[]i64: "), "input {input}: {err}");
    }
}

#[test]
fn test_decode_rejects_malformed_framing() {
    for input in ["[1 null", "[1 2]", "]", ",1]", "[1,,2]", "[,]"] {
        let err = decode::<SequenceBuffer<i64>>(input).unwrap_err();
        assert!(!err.is_eof(), "input {input}");
        assert!(err.to_string().starts_with("[]i64: "), "input {input}: {err}");
    }
}

#[test]
fn test_decode_float_out_of_range_names_type() {
    let err = decode::<SequenceBuffer<f32>>("[1.5,1e40]").unwrap_err();
    assert_eq!(
        err.to_string(),
        "[]f32: ReadFloat: value out of range for f32, error found at byte offset 5"
    );
    let decoded: SequenceBuffer<f64> = decode("[1e40]").unwrap();
    assert_eq!(decoded.as_slice(), &[1e40]);
}

#[test]
fn test_decode_wrong_token_names_type() {
    let err = decode::<SequenceBuffer<String>>(r#"{"a":1}"#).unwrap_err();
    assert!(err.to_string().starts_with("[]String: ReadArray:"), "{err}");

    let err = decode::<SequenceBuffer<bool>>("[true,1]").unwrap_err();
    assert!(err.to_string().starts_with("[]bool: ReadBool:"), "{err}");
    assert!(matches!(err.root_cause(), Error::Syntax { context: "ReadBool", .. }));
}

#[test]
fn test_decode_empty_input_is_not_attributed() {
    let err = decode::<SequenceBuffer<i64>>("  ").unwrap_err();
    assert!(err.is_eof());
}

#[test]
fn test_round_trip_states() {
    round_trip(SequenceBuffer::<i64>::absent());
    round_trip(SequenceBuffer::<i64>::from_vec(vec![]));
    round_trip(SequenceBuffer::from_vec(vec![-1i64]));
    round_trip(SequenceBuffer::from_vec(vec![i64::MIN, 0, i64::MAX]));
}

#[test]
fn test_round_trip_long_sequences() {
    for len in [4usize, 5, 1023, 1024, 1025, 3000] {
        let value: SequenceBuffer<u32> = (0..len as u32).collect();
        round_trip(value);
    }
}

#[test]
fn test_round_trip_floats() {
    round_trip(SequenceBuffer::from_vec(vec![
        0.0f64,
        -0.5,
        1e-7,
        123456.789,
        f64::MAX,
        f64::MIN_POSITIVE,
    ]));
    round_trip(SequenceBuffer::from_vec(vec![1.5f32, -3.25]));
}

#[test]
fn test_round_trip_strings() {
    round_trip(SequenceBuffer::from_vec(
        ["", "plain", "quote \" backslash \\", "tab\tnewline\n", "<html>&", "日本語 😀", "\u{1}"]
            .map(String::from)
            .to_vec(),
    ));
}

#[test]
fn test_round_trip_nested() {
    let value = SequenceBuffer::from_vec(vec![
        SequenceBuffer::absent(),
        SequenceBuffer::from_vec(vec![]),
        SequenceBuffer::from_vec(vec![1i64, 2]),
        (0..10).collect(),
    ]);
    assert_eq!(
        encode(&value),
        "[null,[],[1,2],[0,1,2,3,4,5,6,7,8,9]]"
    );
    round_trip(value);
}

#[test]
fn test_nested_error_attribution() {
    let err = decode::<SequenceBuffer<SequenceBuffer<i64>>>("[[1],[2,3.5]]").unwrap_err();
    assert!(err.to_string().starts_with("[][]i64: []i64: "), "{err}");
}

#[test]
fn test_decode_tolerates_whitespace() {
    let decoded: SequenceBuffer<i64> = decode(" [ 1 ,\n 2 ,\t3 ] \n").unwrap();
    assert_eq!(decoded.as_slice(), &[1, 2, 3]);
}

#[test]
fn test_decode_null_elements_use_default() {
    let decoded: SequenceBuffer<i64> = decode("[1,null,3]").unwrap();
    assert_eq!(decoded.as_slice(), &[1, 0, 3]);
}

#[test]
fn test_decode_reuses_buffer_across_calls() {
    let config = Config::default();
    let codec = SequenceCodec::<i64>::for_type(&config);
    let mut buffer = SequenceBuffer::absent();

    codec
        .decode(&mut buffer, &mut Reader::from_text("[1,2,3,4,5,6,7,8,9]"))
        .unwrap();
    let capacity = buffer.capacity();
    assert!(capacity >= 9);

    codec
        .decode(&mut buffer, &mut Reader::from_text("[10,20]"))
        .unwrap();
    assert_eq!(buffer.as_slice(), &[10, 20]);
    assert_eq!(buffer.capacity(), capacity);
}

#[test]
fn test_decode_sequence_of_values_from_one_reader() {
    let codec = SequenceCodec::<u8>::for_type(&Config::default());
    let mut reader = Reader::from_text("[1] null [] [2,3]");
    let mut results = Vec::new();
    loop {
        let mut buffer = SequenceBuffer::absent();
        match codec.decode(&mut buffer, &mut reader) {
            Ok(()) => results.push(buffer),
            Err(err) if err.is_eof() => break,
            Err(err) => panic!("unexpected error: {err}"),
        }
    }
    assert_eq!(
        results,
        vec![
            SequenceBuffer::from_vec(vec![1]),
            SequenceBuffer::absent(),
            SequenceBuffer::from_vec(vec![]),
            SequenceBuffer::from_vec(vec![2, 3]),
        ]
    );
}

#[test]
fn test_encode_error_names_type() {
    let value = SequenceBuffer::from_vec(vec![SequenceBuffer::from_vec(vec![1.0f64, f64::NAN])]);
    let err = to_string(&Config::default(), &value).unwrap_err();
    assert_eq!(err.to_string(), "[][]f64: []f64: unsupported value: NaN");
}

#[test]
fn test_indented_output_round_trips() {
    let config = Config::builder().indent_step(4).build();
    let value = SequenceBuffer::from_vec(vec![
        SequenceBuffer::from_vec(vec![1i32]),
        SequenceBuffer::from_vec(vec![]),
    ]);
    let text = to_string(&config, &value).unwrap();
    assert_eq!(text, "[\n    [\n        1\n    ],\n    []\n]");

    let mut decoded = SequenceBuffer::absent();
    from_str(&config, &text, &mut decoded).unwrap();
    assert_eq!(decoded, value);
}

#[test]
fn test_flush_to_writer() {
    let config = Config::default();
    let codec = SequenceCodec::<bool>::for_type(&config);
    let mut stream = Stream::new(&config);
    codec
        .encode(&SequenceBuffer::from_vec(vec![true, false]), &mut stream)
        .unwrap();

    let mut out = Vec::new();
    stream.flush_to(&mut out).unwrap();
    assert_eq!(out, b"[true,false]");
}

#[test]
fn test_custom_element_codec() {
    /// Encodes `(u8, u8)` pairs as `"a.b"` strings.
    struct PairCodec;

    impl ElementCodec<(u8, u8)> for PairCodec {
        fn type_name(&self) -> &str {
            "Pair"
        }

        fn encode(&self, value: &(u8, u8), stream: &mut Stream) -> Result<()> {
            stream.write_string(&format!("{}.{}", value.0, value.1), false);
            Ok(())
        }

        fn decode(&self, slot: &mut (u8, u8), reader: &mut Reader<'_>) -> Result<()> {
            let offset = reader.offset();
            let text = reader.read_string()?;
            let bad = || Error::Syntax {
                context: "Pair",
                message: format!("invalid pair {text:?}"),
                offset,
            };
            let (a, b) = text.split_once('.').ok_or_else(bad)?;
            *slot = (a.parse().map_err(|_| bad())?, b.parse().map_err(|_| bad())?);
            Ok(())
        }

        fn is_empty(&self, value: &(u8, u8)) -> bool {
            *value == (0, 0)
        }
    }

    let codec = SequenceCodec::new(PairCodec);
    let mut buffer = SequenceBuffer::absent();
    codec
        .decode(&mut buffer, &mut Reader::from_text(r#"["1.2","3.4","5.6","7.8","9.10"]"#))
        .unwrap();
    assert_eq!(buffer.as_slice(), &[(1, 2), (3, 4), (5, 6), (7, 8), (9, 10)]);

    let err = codec
        .decode(&mut buffer, &mut Reader::from_text(r#"["1.2","x"]"#))
        .unwrap_err();
    assert!(err.to_string().starts_with("[]Pair: Pair: invalid pair"), "{err}");
}
