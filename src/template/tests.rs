//! Tests for template scanning and rendering.

use super::*;

/// Sorted field names, for order-insensitive comparison.
fn sorted_fields(source: &str) -> Vec<String> {
    let template = Template::parse(source);
    let mut fields: Vec<String> = template.fields().into_iter().map(String::from).collect();
    fields.sort();
    fields
}

fn no_values() -> HashMap<String, String> {
    HashMap::new()
}

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_parse_cases() {
    // (name, source, expected fields with the raw field text; `None` means `{name}`)
    let cases: &[(&str, &str, &[(&str, Option<&str>)])] = &[
        (
            "simple",
            "test {tenant} sample {nonna}",
            &[("nonna", None), ("tenant", None)],
        ),
        (
            "not closed",
            "test {tenant} sample {nonna",
            &[("tenant", None)],
        ),
        ("not open", "test tenant} sample {nonna}", &[("nonna", None)]),
        (
            "escaped open",
            "test {{tenant} sample {nonna}",
            &[("nonna", None)],
        ),
        (
            "escaped close",
            "test {tenant}} sample {nonna}",
            &[("tenant} sample {nonna", Some("{tenant}} sample {nonna}"))],
        ),
        (
            "escaped repeated",
            "test {{{tenant} sample {nonna}",
            &[("nonna", None), ("tenant", None)],
        ),
        (
            "escaped repeated 4",
            "test {{{{tenant} sample {nonna}",
            &[("nonna", None)],
        ),
    ];

    for (name, source, expected) in cases {
        let template = Template::parse(*source);
        let expected_names: Vec<String> = expected.iter().map(|(n, _)| n.to_string()).collect();
        assert_eq!(sorted_fields(source), expected_names, "case '{}'", name);

        for (field, text) in expected.iter() {
            let expected_text = match text {
                Some(text) => text.to_string(),
                None => format!("{{{}}}", field),
            };
            assert_eq!(
                template.field_text(field),
                Some(expected_text.as_str()),
                "case '{}', field '{}'",
                name,
                field
            );
        }
    }
}

#[test]
fn test_brace_runs_in_open_position() {
    let cases: &[(&str, &[&str])] = &[
        ("{x}", &["x"]),
        ("{{x}", &[]),
        ("{{{x}", &["x"]),
        ("{{{{x}", &[]),
        ("{{{{{x}", &["x"]),
    ];

    for (source, expected) in cases {
        assert_eq!(sorted_fields(source), *expected, "source {:?}", source);
    }
}

#[test]
fn test_brace_runs_in_close_position() {
    let cases: &[(&str, &[&str])] = &[
        ("{x}", &["x"]),
        ("{x}}", &[]),
        ("{x}}}", &["x}"]),
        ("{x}}}}", &[]),
        ("{x}}}}}", &["x}}"]),
    ];

    for (source, expected) in cases {
        assert_eq!(sorted_fields(source), *expected, "source {:?}", source);
    }
}

#[test]
fn test_brace_runs_without_open_field() {
    for source in ["x}", "x}}", "x}}}", "x}}}}", "x}}}}}"] {
        assert!(Template::parse(source).is_static(), "source {:?}", source);
    }
}

#[test]
fn test_close_run_span_covers_escapes() {
    let template = Template::parse("a {x}}} b");
    let span = template.span("x}").unwrap();
    assert_eq!((span.start, span.end), (2, 7));
    assert_eq!(template.field_text("x}"), Some("{x}}}"));
}

#[test]
fn test_open_brace_inside_field_is_part_of_name() {
    assert_eq!(sorted_fields("{a{b}"), vec!["a{b"]);
    assert_eq!(sorted_fields("{a{{b}"), vec!["a{{b"]);
}

#[test]
fn test_empty_field_name() {
    let template = Template::parse("before {} after");
    assert_eq!(template.fields(), vec![""]);
    assert_eq!(template.field_text(""), Some("{}"));
}

#[test]
fn test_duplicate_name_keeps_last_span() {
    let template = Template::parse("{a} and {a}");
    assert_eq!(template.fields(), vec!["a"]);
    let span = template.span("a").unwrap();
    assert_eq!((span.start, span.end), (8, 11));
}

#[test]
fn test_fields_in_position_order() {
    let template = Template::parse("{c} {a} {b}");
    assert_eq!(template.fields(), vec!["c", "a", "b"]);
}

#[test]
fn test_no_braces_means_no_fields() {
    for source in ["", "plain text", "multi\nline", "unicode 日本語 🎉"] {
        let template = Template::parse(source);
        assert!(template.is_static());
        assert!(template.fields().is_empty());
        assert_eq!(template.replace(&no_values()).unwrap(), source);
    }
}

#[test]
fn test_parse_is_idempotent() {
    for source in [
        "test {tenant} sample {nonna}",
        "test {tenant}} sample {nonna}",
        "{{{a}}}} {b",
    ] {
        assert_eq!(Template::parse(source), Template::parse(source));
    }
}

#[test]
fn test_multibyte_offsets_are_slice_boundaries() {
    let template = Template::parse("héllo {wörld} ✓");
    let span = template.span("wörld").unwrap();
    assert_eq!(span.start, 7);
    assert_eq!(template.field_text("wörld"), Some("{wörld}"));
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_replace_simple() {
    let values = values([("tenant", "666"), ("nonna", "888")]);
    let result = replace("test {tenant} sample {nonna}", &values).unwrap();
    assert_eq!(result, "test 666 sample 888");
}

#[test]
fn test_replace_missing() {
    let values = values([("tenant", "666")]);
    let err = replace("test {tenant} sample {nonna}", &values).unwrap_err();
    assert_eq!(
        err,
        TemplateError::MissingField {
            name: "nonna".to_string()
        }
    );
}

#[test]
fn test_replace_escape_left_is_verbatim() {
    let values = values([("nonna", "888")]);
    let result = replace("test {{tenant} sample {nonna}", &values).unwrap();
    assert_eq!(result, "test {{tenant} sample 888");
}

#[test]
fn test_replace_escape_right() {
    let values = values([("tenant} sample {nonna", "666")]);
    let result = replace("test {tenant}} sample {nonna}", &values).unwrap();
    assert_eq!(result, "test 666");
}

#[test]
fn test_replace_reports_first_missing_field_by_position() {
    let err = replace("x {b} y {a}", &no_values()).unwrap_err();
    assert_eq!(
        err,
        TemplateError::MissingField {
            name: "b".to_string()
        }
    );
}

#[test]
fn test_replace_leaves_other_text_untouched() {
    let values = values([("x", "VALUE")]);
    for (prefix, suffix) in [("", ""), ("a ", " b"), ("}} ", " {"), ("日本 ", " 🎉")] {
        let source = format!("{}{{x}}{}", prefix, suffix);
        let result = replace(&source, &values).unwrap();
        assert_eq!(result, format!("{}VALUE{}", prefix, suffix));
    }
}

#[test]
fn test_replace_unterminated_field_is_verbatim() {
    let values = values([("a", "1")]);
    let result = replace("{a} and {b", &values).unwrap();
    assert_eq!(result, "1 and {b");
}

#[test]
fn test_replace_duplicate_only_substitutes_last() {
    let values = values([("a", "1")]);
    let result = replace("{a} and {a}", &values).unwrap();
    assert_eq!(result, "{a} and 1");
}

#[test]
fn test_replace_renders_display_values() {
    let values: HashMap<&str, i64> = HashMap::from([("tenant", 666), ("nonna", -888)]);
    let result = replace("test {tenant} sample {nonna}", &values).unwrap();
    assert_eq!(result, "test 666 sample -888");
}

#[test]
fn test_replace_with_btreemap() {
    let values: BTreeMap<String, f64> = BTreeMap::from([("ratio".to_string(), 0.5)]);
    let result = replace("ratio={ratio}", &values).unwrap();
    assert_eq!(result, "ratio=0.5");
}

#[test]
fn test_replace_adjacent_fields() {
    let values = values([("a", "A"), ("b", "B")]);
    assert_eq!(replace("{a}{b}", &values).unwrap(), "AB");
}

#[test]
fn test_replace_braces_in_value_are_not_rescanned() {
    let values = values([("code", "{inner}")]);
    assert_eq!(replace("<{code}>", &values).unwrap(), "<{inner}>");
}

#[test]
fn test_replace_empty_value() {
    let values = values([("empty", "")]);
    assert_eq!(replace("before{empty}after", &values).unwrap(), "beforeafter");
}

#[test]
fn test_replace_ignores_extra_values() {
    let values = values([("a", "1"), ("unused", "2")]);
    assert_eq!(replace("{a}", &values).unwrap(), "1");
}

#[test]
fn test_replace_is_shareable_across_threads() {
    let template = Template::parse("id={id}");

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let template = &template;
                scope.spawn(move || {
                    let values = HashMap::from([("id", i)]);
                    template.replace(&values).unwrap()
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), format!("id={}", i));
        }
    });
}

#[test]
fn test_error_display() {
    let err = TemplateError::MissingField {
        name: "foo".to_string(),
    };
    assert_eq!(err.to_string(), "field 'foo' not set");
}

#[test]
fn test_values_helper() {
    let values = values([("a", "1"), ("b", "2")]);
    assert_eq!(values.get("a"), Some(&"1".to_string()));
    assert_eq!(values.get("b"), Some(&"2".to_string()));
}

#[test]
fn test_replace_escaped_open_without_fields_is_verbatim() {
    let template = Template::parse("a {{b} c");
    assert!(template.is_static());
    assert_eq!(template.replace(&no_values()).unwrap(), "a {{b} c");
}

#[test]
fn test_replace_missing_single_field() {
    let err = replace("x {a} y", &no_values()).unwrap_err();
    assert_eq!(
        err,
        TemplateError::MissingField {
            name: "a".to_string()
        }
    );
}
