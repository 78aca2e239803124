//! Property tests for the built-in converters.
//!
//! - Boolean: lenient conversion never fails and is `true` only for the
//!   true tokens, in any case.
//! - Integer: every in-range base-10 literal parses exactly; anything else
//!   is recoverable with default `0`.
//! - Enum: every member round-trips through its name.
//! - Idempotence: identical inputs yield identical outcomes.

use bindery_convert::prelude::*;
use proptest::prelude::*;

named_enum! {
    enum Suit {
        Clubs => "CLUBS",
        Diamonds => "DIAMONDS",
        Hearts => "HEARTS",
        Spades => "SPADES",
    }
}

/// Outcome with the error reduced to comparable parts.
type Outcome<T> = Result<Option<T>, (Option<T>, &'static str, String)>;

fn outcome<T>(result: Conversion<T>) -> Outcome<T> {
    result.map_err(|err| {
        let code = err.code();
        let message = err.to_string();
        (err.into_default(), code, message)
    })
}

fn convert_bool(raw: Option<&str>) -> Conversion<bool> {
    BooleanConverter::new().convert(&EmptyContext, raw, None, &TargetType::of::<bool>())
}

fn convert_i64(raw: Option<&str>) -> Conversion<i64> {
    IntegerConverter::<i64>::new().convert(&EmptyContext, raw, None, &TargetType::of::<i64>())
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// A true token with arbitrary ASCII casing.
fn arb_true_token() -> impl Strategy<Value = String> {
    (prop::sample::select(TRUE_TOKENS.to_vec()), prop::collection::vec(any::<bool>(), 4))
        .prop_map(|(token, upper)| {
            token
                .chars()
                .zip(upper)
                .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
                .collect()
        })
}

fn arb_suit() -> impl Strategy<Value = Suit> {
    prop::sample::select(Suit::variants().to_vec())
}

// ---------------------------------------------------------------------------
// Boolean
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn lenient_boolean_never_fails(raw in any::<Option<String>>()) {
        prop_assert!(convert_bool(raw.as_deref()).is_ok());
    }

    #[test]
    fn true_tokens_in_any_case(token in arb_true_token()) {
        prop_assert_eq!(convert_bool(Some(&token)).unwrap(), Some(true));
    }

    #[test]
    fn other_strings_are_false(raw in "\\PC*") {
        let expected = TRUE_TOKENS.iter().any(|t| t.eq_ignore_ascii_case(&raw));
        prop_assert_eq!(convert_bool(Some(&raw)).unwrap(), Some(expected));
    }
}

// ---------------------------------------------------------------------------
// Integer grammar
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn decimal_literals_parse_exactly(n in any::<i64>()) {
        prop_assert_eq!(convert_i64(Some(&n.to_string())).unwrap(), Some(n));
    }

    #[test]
    fn leading_zeros_and_plus_sign(n in 0_i64..1_000_000, zeros in 0_usize..4) {
        let raw = format!("+{}{n}", "0".repeat(zeros));
        prop_assert_eq!(convert_i64(Some(&raw)).unwrap(), Some(n));
    }

    #[test]
    fn non_numeric_recovers_to_zero(raw in "[a-zA-Z .,_]{1,12}") {
        let err = convert_i64(Some(&raw)).unwrap_err();
        prop_assert_eq!(err.default_value(), Some(&0));
        prop_assert_eq!(err.input(), raw.as_str());
    }

    #[test]
    fn narrow_types_reject_out_of_range(n in (i64::from(i16::MAX) + 1)..i64::MAX) {
        let err = IntegerConverter::<i16>::new()
            .convert(&EmptyContext, Some(&n.to_string()), None, &TargetType::of::<i16>())
            .unwrap_err();
        prop_assert!(err.is_recoverable());
    }
}

// ---------------------------------------------------------------------------
// Enum round-trip
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn enum_member_round_trips(suit in arb_suit()) {
        let converted = EnumConverter::<Suit>::new()
            .convert(&EmptyContext, Some(suit.name()), None, &TargetType::of::<Suit>())
            .unwrap();
        prop_assert_eq!(converted, Some(suit));
    }

    #[test]
    fn non_member_names_are_hard_errors(raw in "[a-z]{1,10}") {
        let err = EnumConverter::<Suit>::new()
            .convert(&EmptyContext, Some(&raw), None, &TargetType::of::<Suit>())
            .unwrap_err();
        prop_assert!(!err.is_recoverable());
    }
}

// ---------------------------------------------------------------------------
// Idempotence
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn integer_is_idempotent(raw in any::<Option<String>>()) {
        prop_assert_eq!(outcome(convert_i64(raw.as_deref())), outcome(convert_i64(raw.as_deref())));
    }

    #[test]
    fn float_is_idempotent(raw in any::<Option<String>>()) {
        let convert = || {
            FloatConverter::<f64>::new()
                .convert(&EmptyContext, raw.as_deref(), None, &TargetType::of::<f64>())
                .map(|v| v.map(f64::to_bits))
                .map_err(|e| e.map_default(f64::to_bits))
        };
        prop_assert_eq!(outcome(convert()), outcome(convert()));
    }

    #[test]
    fn named_path_agrees_with_typed_path(raw in any::<Option<String>>()) {
        let registry = ConverterRegistry::default();
        let typed = registry.convert::<i32>(&EmptyContext, raw.as_deref(), None).unwrap();
        let named = registry.convert_named("int", &EmptyContext, raw.as_deref(), None).unwrap();

        match (typed, named) {
            (Ok(t), Ok(n)) => prop_assert_eq!(t.map(serde_json::Value::from), n),
            (Err(t), Err(n)) => {
                prop_assert_eq!(t.code(), n.code());
                prop_assert_eq!(t.to_string(), n.to_string());
                prop_assert_eq!(t.into_default().map(serde_json::Value::from), n.into_default());
            }
            (t, n) => prop_assert!(false, "paths disagree: {t:?} vs {n:?}"),
        }
    }
}
