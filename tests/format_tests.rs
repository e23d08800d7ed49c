//! Tests for the placeholder templating engine.

use pretty_assertions::assert_eq;
use rand::{rngs::StdRng, Rng, SeedableRng};
use retext::{format_named, format_positional, FormatError};
use std::collections::HashMap;
use std::fmt;

fn fmt_pos(template: &str, args: &[&str]) -> Result<String, FormatError> {
    format_positional(template, args)
}

#[test]
fn test_anonymous_order_preservation() {
    assert_eq!(fmt_pos("{} and {}", &["x", "y"]).unwrap(), "x and y");
    assert_eq!(fmt_pos("{}, {}, {}", &["a", "b", "c"]).unwrap(), "a, b, c");
    // Extra arguments are ignored.
    assert_eq!(fmt_pos("{}", &["a", "b"]).unwrap(), "a");
}

#[test]
fn test_length_drift() {
    assert_eq!(fmt_pos("{}!", &["verylongvalue"]).unwrap(), "verylongvalue!");
    assert_eq!(fmt_pos("a{}b", &[""]).unwrap(), "ab");
    assert_eq!(fmt_pos("{}{}{}", &["aaaa", "", "bb"]).unwrap(), "aaaabb");
    assert_eq!(
        fmt_pos("<{}> then <{}>", &["long-long-long", "x"]).unwrap(),
        "<long-long-long> then <x>"
    );
}

#[test]
fn test_indexed_reordering_and_reuse() {
    assert_eq!(fmt_pos("{1}-{0}", &["a", "b"]).unwrap(), "b-a");
    assert_eq!(fmt_pos("{0}-{0}", &["a"]).unwrap(), "a-a");
    assert_eq!(
        fmt_pos("{2} {1} {0} {2}", &["c", "b", "a"]).unwrap(),
        "a b c a"
    );
}

#[test]
fn test_escape_collapsing_without_placeholder_consumption() {
    assert_eq!(fmt_pos("{{}}", &[]).unwrap(), "{}");
    assert_eq!(fmt_pos("{{}} {}", &["v"]).unwrap(), "{} v");
    assert_eq!(fmt_pos("{{0}}", &[]).unwrap(), "{0}");
    assert_eq!(
        fmt_pos("{{esc}} {} {{esc}}", &["v"]).unwrap(),
        "{esc} v {esc}"
    );
}

#[test]
fn test_mixed_style_rejection() {
    assert_eq!(
        fmt_pos("{} {0}", &["a", "b"]),
        Err(FormatError::InconsistentPlaceholderStyle)
    );
    assert_eq!(
        fmt_pos("{word}", &["a"]),
        Err(FormatError::InconsistentPlaceholderStyle)
    );
    assert_eq!(
        fmt_pos("{1a}", &["a", "b"]),
        Err(FormatError::InconsistentPlaceholderStyle)
    );
}

#[test]
fn test_index_out_of_range() {
    assert_eq!(fmt_pos("{}", &[]), Err(FormatError::IndexOutOfRange(0)));
    assert_eq!(
        fmt_pos("{} {} {}", &["a", "b"]),
        Err(FormatError::IndexOutOfRange(2))
    );
    assert_eq!(
        fmt_pos("{2}", &["a", "b"]),
        Err(FormatError::IndexOutOfRange(2))
    );
    // An index too large for usize is out of range, not a crash.
    assert!(matches!(
        fmt_pos("{99999999999999999999999}", &["a"]),
        Err(FormatError::IndexOutOfRange(_))
    ));
}

#[test]
fn test_named_formatting() {
    let mut vals = HashMap::new();
    vals.insert("n", "Peter");
    vals.insert("a", "21");
    assert_eq!(
        format_named("name: {n}, age: {a}", &vals).unwrap(),
        "name: Peter, age: 21"
    );

    // Keys may be reused, and escaped braces stay literal.
    assert_eq!(
        format_named("{{literal}} {n} {n}", &vals).unwrap(),
        "{literal} Peter Peter"
    );
}

#[test]
fn test_missing_key() {
    let empty: HashMap<&str, &str> = HashMap::new();
    assert_eq!(
        format_named("{missing}", &empty),
        Err(FormatError::MissingKey("missing".to_string()))
    );

    // Every key is validated before anything is substituted.
    let mut vals = HashMap::new();
    vals.insert("present", "v");
    assert_eq!(
        format_named("{present} {absent}", &vals),
        Err(FormatError::MissingKey("absent".to_string()))
    );
}

#[test]
fn test_display_arguments() {
    assert_eq!(
        format_positional("{} + {} = {}", &[&1 as &dyn fmt::Display, &2, &3]).unwrap(),
        "1 + 2 = 3"
    );
    assert_eq!(
        format_positional("{}", &[3.25_f64]).unwrap(),
        "3.25"
    );

    let mut vals: HashMap<String, u32> = HashMap::new();
    vals.insert("count".to_string(), 42);
    assert_eq!(format_named("n={count}", &vals).unwrap(), "n=42");
}

#[test]
fn test_unicode_templates_and_arguments() {
    // The cluster before the placeholder spans several scalars; the token
    // window must still land exactly on the braces.
    assert_eq!(fmt_pos("👍🏽{}!", &["🦧"]).unwrap(), "👍🏽🦧!");
    assert_eq!(
        fmt_pos("🦧🔥{}🚅î", &["🎭"]).unwrap(),
        "🦧🔥🎭🚅î"
    );

    let mut vals = HashMap::new();
    vals.insert("flag", "🇺🇸");
    assert_eq!(format_named("({flag})", &vals).unwrap(), "(🇺🇸)");
}

#[test]
fn test_no_placeholder_passthrough() {
    assert_eq!(fmt_pos("plain text", &[]).unwrap(), "plain text");
    let empty: HashMap<&str, &str> = HashMap::new();
    assert_eq!(format_named("plain text", &empty).unwrap(), "plain text");

    // An unbalanced brace pair never scans as a placeholder; the doubled
    // half still collapses.
    assert_eq!(fmt_pos("a{}}b", &["x"]).unwrap(), "a{}b");
}

#[test]
fn test_collapse_runs_over_substituted_values() {
    // The collapse pass sees the fully rewritten text, substituted values
    // included.
    assert_eq!(fmt_pos("{}", &["{{x}}"]).unwrap(), "{x}");
    assert_eq!(fmt_pos("{}", &["{}"]).unwrap(), "{}");
}

#[test]
fn test_mid_cluster_template_boundary_is_refused() {
    // A combining mark directly after the closing brace merges with it into
    // one cluster, so the token boundary cannot be expressed.
    let mut vals = HashMap::new();
    vals.insert("k", "v");
    assert!(matches!(
        format_named("{k}\u{301}", &vals),
        Err(FormatError::Translation(_))
    ));
}

#[test]
fn test_offset_stability_against_oracle() {
    // Random replacement lengths, including empty and much longer than the
    // placeholder, checked against straightforward sequential
    // string-building.
    let literals = ["", "a", "xy ", "🎭", "lit-", "👍🏽", " end"];
    let values = ["", "v", "verylongvalue", "🦧🔥", "🇺🇸", "0"];

    let mut rng = StdRng::seed_from_u64(0x7e57_ab1e);
    for _ in 0..100 {
        let count = rng.gen_range(1..=6);
        let mut template = String::new();
        let mut expected = String::new();
        let mut args = Vec::with_capacity(count);
        for _ in 0..count {
            let literal = literals[rng.gen_range(0..literals.len())];
            template.push_str(literal);
            expected.push_str(literal);

            let value = values[rng.gen_range(0..values.len())];
            template.push_str("{}");
            expected.push_str(value);
            args.push(value);
        }
        let tail = literals[rng.gen_range(0..literals.len())];
        template.push_str(tail);
        expected.push_str(tail);

        assert_eq!(format_positional(&template, &args).unwrap(), expected);
    }
}
