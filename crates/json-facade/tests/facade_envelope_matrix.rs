use json_facade::{ErrorKind, JsonFacade, Record, RecordDescriptor};

#[derive(Debug, Default, Clone, PartialEq)]
struct MessageRecord {
    name: String,
    message: String,
}

impl MessageRecord {
    fn new(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            message: message.to_string(),
        }
    }
}

impl Record for MessageRecord {
    fn descriptor() -> RecordDescriptor<Self> {
        Self::builder("MessageRecord")
            .field("name", |m| &m.name, |m| &mut m.name)
            .field("message", |m| &m.message, |m| &mut m.message)
            .build()
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Counter {
    count: Option<i32>,
}

impl Record for Counter {
    fn descriptor() -> RecordDescriptor<Self> {
        Self::builder("Counter")
            .field("count", |c| &c.count, |c| &mut c.count)
            .build()
    }
}

fn facade() -> JsonFacade {
    JsonFacade::default()
}

#[test]
fn envelope_object_matrix() {
    let decoded: MessageRecord = facade()
        .decode_envelope(r#"{"data":{"name":"a","message":"b"}}"#, None, false)
        .unwrap();
    assert_eq!(decoded, MessageRecord::new("a", "b"));

    let decoded: MessageRecord = facade()
        .decode_envelope(
            r#"{"code":0,"data":{"msg":{"name":"n","message":null}}}"#,
            Some("msg"),
            false,
        )
        .unwrap();
    assert_eq!(decoded, MessageRecord::new("n", ""));
}

#[test]
fn envelope_list_matrix() {
    let decoded: Vec<MessageRecord> = facade()
        .decode_envelope_list(
            r#"{"data":{"list":[{"name":"a"},{"name":"b"}]}}"#,
            Some("list"),
            false,
        )
        .unwrap();
    assert_eq!(
        decoded,
        vec![MessageRecord::new("a", ""), MessageRecord::new("b", "")]
    );

    let decoded: Vec<MessageRecord> = facade()
        .decode_envelope_list(r#"{"data":[{"name":"x","message":"y"}]}"#, None, false)
        .unwrap();
    assert_eq!(decoded, vec![MessageRecord::new("x", "y")]);

    let decoded: Vec<MessageRecord> = facade()
        .decode_envelope_list(r#"{"data":{"list":[]}}"#, Some("list"), false)
        .unwrap();
    assert!(decoded.is_empty());
}

#[test]
fn envelope_shape_errors_matrix() {
    for input in ["", "   ", r#"{"data":null}"#, "{}", r#"{"data":[]}"#, r#"{"data":"x"}"#, "[]"] {
        let err = facade()
            .decode_envelope::<MessageRecord>(input, None, false)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EnvelopeShape, "input: {input:?}");
    }

    for (input, key) in [
        (r#"{"data":{}}"#, Some("list")),
        (r#"{"data":{"list":null}}"#, Some("list")),
        (r#"{"data":[]}"#, Some("list")),
        (r#"{"data":{}}"#, None),
        ("", None),
    ] {
        let err = facade()
            .decode_envelope_list::<MessageRecord>(input, key, false)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EnvelopeShape, "input: {input:?}");
    }
}

#[test]
fn envelope_payload_errors_keep_their_kind() {
    let err = facade()
        .decode_envelope::<MessageRecord>(r#"{"data":{"name":[1]}}"#, None, false)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);

    let err = facade()
        .decode_envelope::<Counter>(r#"{"data":{"count":"many"}}"#, None, false)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedValue);

    let err = facade()
        .decode_envelope::<Counter>(r#"{"data":{"#, None, false)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedJson);
}

#[test]
fn absent_integer_encodes_as_zero() {
    let text = facade().encode(&Counter { count: None }, false).unwrap();
    assert_eq!(text, r#"{"count":0}"#);

    let text = facade().encode(&Counter { count: Some(9) }, false).unwrap();
    assert_eq!(text, r#"{"count":9}"#);
}

#[test]
fn decode_list_matrix() {
    let decoded: Vec<MessageRecord> = facade()
        .decode_list(r#"[{"name":"a","message":"1"},{"name":null,"message":""}]"#, false)
        .unwrap();
    assert_eq!(
        decoded,
        vec![MessageRecord::new("a", "1"), MessageRecord::new("", "")]
    );

    assert!(facade().decode_list::<MessageRecord>("", false).unwrap().is_empty());
    assert!(facade().decode_list::<i64>("", true).unwrap().is_empty());

    let numbers: Vec<i64> = facade().decode_list(r#"[1,"2",null,""]"#, false).unwrap();
    assert_eq!(numbers, vec![1, 2, 0, 0]);
}

#[test]
fn deep_copy_zero_fills_absent_values() {
    let copy = facade().deep_copy(&Counter { count: None }, false).unwrap();
    assert_eq!(copy, Counter { count: Some(0) });

    let original = MessageRecord::new("a", "b");
    let copy = facade().deep_copy(&original, false).unwrap();
    assert_eq!(copy, original);
}
