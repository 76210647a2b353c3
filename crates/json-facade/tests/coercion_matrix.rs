use json_facade::{ErrorKind, JsonFacade, Record, RecordDescriptor};

#[derive(Debug, Default, PartialEq)]
struct Covered {
    text: String,
    int: i32,
    long: i64,
    double: f64,
}

impl Record for Covered {
    fn descriptor() -> RecordDescriptor<Self> {
        Self::builder("Covered")
            .field("text", |c| &c.text, |c| &mut c.text)
            .field("int", |c| &c.int, |c| &mut c.int)
            .field("long", |c| &c.long, |c| &mut c.long)
            .field("double", |c| &c.double, |c| &mut c.double)
            .build()
    }
}

#[test]
fn absent_spellings_decode_to_zero_matrix() {
    let facade = JsonFacade::default();
    for absent in ["null", r#""""#, r#""null""#] {
        let input = format!(
            r#"{{"text":{absent},"int":{absent},"long":{absent},"double":{absent}}}"#
        );
        for exclude_marked in [false, true] {
            let decoded: Covered = facade.decode(&input, exclude_marked).unwrap();
            assert_eq!(decoded, Covered::default(), "input: {input}");
        }
    }
}

#[test]
fn missing_keys_decode_to_zero() {
    let decoded: Covered = JsonFacade::default().decode("{}", false).unwrap();
    assert_eq!(decoded, Covered::default());
}

#[test]
fn zero_values_are_written_not_nulls() {
    let text = JsonFacade::default().encode(&Covered::default(), false).unwrap();
    assert_eq!(text, r#"{"text":"","int":0,"long":0,"double":0.0}"#);
}

#[test]
fn lenient_scalars_matrix() {
    let decoded: Covered = JsonFacade::default()
        .decode(r#"{"text":15,"int":"7","long":12.9,"double":"-0.5"}"#, false)
        .unwrap();
    assert_eq!(
        decoded,
        Covered {
            text: "15".into(),
            int: 7,
            long: 12,
            double: -0.5,
        }
    );
}

#[test]
fn malformed_values_matrix() {
    let facade = JsonFacade::default();
    for input in [
        r#"{"int":"seven"}"#,
        r#"{"int":2147483648}"#,
        r#"{"long":"1e3"}"#,
        r#"{"double":"abc"}"#,
        r#"{"double":true}"#,
    ] {
        let err = facade.decode::<Covered>(input, false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedValue, "input: {input}");
    }
}

#[test]
fn shape_mismatch_matrix() {
    let facade = JsonFacade::default();
    for input in [r#"{"text":{}}"#, r#"{"int":[1]}"#, "[]", "null", "3"] {
        let err = facade.decode::<Covered>(input, false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch, "input: {input}");
    }
}

#[test]
fn top_level_scalars_use_the_same_codecs() {
    let facade = JsonFacade::default();
    assert_eq!(facade.decode::<i32>("null", false).unwrap(), 0);
    assert_eq!(facade.decode::<String>(r#""null""#, false).unwrap(), "");
    assert_eq!(facade.decode::<f64>(r#""""#, false).unwrap(), 0.0);
    assert_eq!(facade.encode(&Some(3_i64), false).unwrap(), "3");
    assert_eq!(facade.encode(&None::<f64>, false).unwrap(), "0.0");
}
