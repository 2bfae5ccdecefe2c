// textmask-core/tests/sanitizer_properties_tests.rs
//! Behavioural properties of the sanitizer that hold for any input:
//! shape preservation, no leaked placeholders, protected-span fidelity,
//! stability on already-masked text, and the Chinese fallback.

use std::sync::Arc;

use serde_json::{json, Value};
use test_log::test;

use textmask_core::languages::bookmark::PLACEHOLDER_PREFIX;
use textmask_core::{
    LanguageSelector, ProcessorOptions, ProcessorRegistry, SanitizeText, TextSanitizer, TextmaskError,
};

fn sanitizer(selector: &str) -> TextSanitizer {
    TextSanitizer::new(selector.parse().unwrap(), Arc::new(ProcessorRegistry::default()))
}

/// Replaces every string leaf with a marker so documents can be compared
/// by shape alone.
fn shape(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(map.iter().map(|(k, v)| (k.clone(), shape(v))).collect()),
        Value::Array(items) => Value::Array(items.iter().map(shape).collect()),
        Value::String(_) => Value::String(String::new()),
        other => other.clone(),
    }
}

const CORPUS: &[&str] = &[
    "2025-08-07",
    "有123辆车",
    "《星际公元5102年消费者权益保护测试》",
    "Today is 2025-08-07",
    "I have 123 cars",
    "他在“2024年的报告”中提到《第5卷》有300人",
    "She said \"meet at 10\" and 'room 42' on 3/14/2025",
    "增长率 12.5，达到 3000 人",
    "  mixed   whitespace\t2024\n",
    "The price is $123.45 for 2 items",
    "空的《》和“”",
];

#[test]
fn test_scenarios() {
    assert_eq!(sanitizer("zh").sanitize_text("2025-08-07").unwrap(), "X年X月X日");
    assert_eq!(sanitizer("zh").sanitize_text("有123辆车").unwrap(), "有X辆车");
    assert_eq!(
        sanitizer("zh").sanitize_text("《星际公元5102年消费者权益保护测试》").unwrap(),
        "《星际公元5102年消费者权益保护测试》"
    );
    assert_eq!(sanitizer("en").sanitize_text("Today is 2025-08-07").unwrap(), "Today is YYYY-MM-DD");
    assert_eq!(sanitizer("en").sanitize_text("I have 123 cars").unwrap(), "I have X cars");
}

#[test]
fn test_unsupported_language_at_factory_and_orchestrator() {
    let registry = ProcessorRegistry::default();
    assert!(matches!(
        registry.create("xx", &ProcessorOptions::default()),
        Err(TextmaskError::UnsupportedLanguage(code)) if code == "xx"
    ));

    for text in CORPUS {
        assert_eq!(
            sanitizer("xx").sanitize_text(text).unwrap(),
            sanitizer("zh").sanitize_text(text).unwrap()
        );
    }
}

#[test]
fn test_no_placeholder_leaks() {
    for selector in ["zh", "en", "auto"] {
        let mut s = sanitizer(selector);
        for text in CORPUS {
            let out = s.sanitize_text(text).unwrap();
            assert!(!out.contains(PLACEHOLDER_PREFIX), "{selector}: leaked placeholder in {out:?}");
        }
    }
}

#[test]
fn test_masked_output_is_stable() {
    for selector in ["zh", "en"] {
        let mut s = sanitizer(selector);
        for text in CORPUS {
            let once = s.sanitize_text(text).unwrap();
            let twice = s.sanitize_text(&once).unwrap();
            assert_eq!(once, twice, "{selector}: second pass changed {text:?}");
        }
    }
}

#[test]
fn test_protected_spans_are_verbatim() {
    let zh = sanitizer("zh").sanitize_text("他在“2024年的报告”中提到《第5卷》有300人").unwrap();
    assert!(zh.contains("“2024年的报告”"));
    assert!(zh.contains("《第5卷》"));
    assert!(!zh.contains("300"));

    let en = sanitizer("en")
        .sanitize_text("She said \"meet at 10\" and 'room 42' on 3/14/2025")
        .unwrap();
    assert_eq!(en, "She said \"meet at 10\" and 'room 42' on MM/DD/YYYY");
}

#[test]
fn test_shape_is_preserved() {
    let doc = json!({
        "a": CORPUS,
        "b": {"nested": {"deep": ["2025-08-07", 1, true, null, {"k": "有123辆车"}]}},
        "c": 3.25,
        "d": [],
        "e": {},
        "f": ""
    });
    for selector in ["zh", "en", "auto"] {
        let out = sanitizer(selector).sanitize_json_data(doc.clone()).unwrap();
        assert_eq!(shape(&out), shape(&doc));
    }
}

#[test]
fn test_pipeline_trait_is_shared_by_registered_processors() {
    let registry = ProcessorRegistry::default();
    let processor = registry.create("en", &ProcessorOptions::default()).unwrap();
    assert_eq!(processor.sanitize_text("  Report   2024 ").unwrap(), "Report YYYY");
    assert_eq!(processor.sanitize_text("").unwrap(), "");
}

#[test]
fn test_selector_round_trips_through_string() {
    let selector: LanguageSelector = "auto".parse().unwrap();
    assert_eq!(String::from(selector), "auto");
}
