//! # End-to-End Validation Tests
//!
//! Drives [`Validator`] over structures declared with `structure!` and checks
//! the reported messages, paths and error kinds.

use std::collections::BTreeMap;

use tagval_core::{structure, ValidatorConfig};
use tagval_engine::{validate, ErrorKind, ValidateError, ValidationErrors, Validator};
use tagval_rules::Registry;

fn failures(result: Result<(), ValidateError>) -> ValidationErrors {
    match result {
        Err(ValidateError::Invalid(errors)) => errors,
        Err(other) => panic!("expected field failures, got {other}"),
        Ok(()) => panic!("expected field failures, got success"),
    }
}

// ---- basic rules ----

struct Person {
    name: String,
    age: i64,
}

structure!(Person {
    name => { json: "Name", is: "required" },
    age => { json: "Age", is: "required" },
});

#[test]
fn zero_required_field_is_the_only_error() {
    let errors = failures(validate(&Person {
        name: "John".into(),
        age: 0,
    }));
    assert_eq!(errors.len(), 1);
    let error = errors.iter().next().unwrap();
    assert_eq!(error.message(), "Age is a required field");
    assert_eq!(error.field(), "Age");
    assert_eq!(error.kind(), &ErrorKind::Required);
    assert!(!error.has_custom_message());
}

struct Code {
    value: String,
}

structure!(Code {
    value => { json: "Value", is: "length(3|5)" },
});

#[test]
fn length_out_of_bounds_reports_both_bounds() {
    let errors = failures(validate(&Code {
        value: "123456".into(),
    }));
    assert_eq!(errors.len(), 1);
    let error = errors.iter().next().unwrap();
    assert_eq!(error.message(), "Value must be between 3 and 5");
    assert_eq!(error.rule(), Some("length"));
    assert!(validate(&Code { value: "1234".into() }).is_ok());
}

struct Car {
    year: u32,
    engine: String,
}

structure!(Car {
    year => { json: "Year", is: "min(2000)" },
    engine => { json: "Engine", is: "in(V8|V6)" },
});

#[test]
fn min_is_inclusive() {
    let errors = failures(validate(&Car {
        year: 1999,
        engine: "V8".into(),
    }));
    assert_eq!(errors.to_string(), "Year must be at least 2000");
    assert!(validate(&Car {
        year: 2000,
        engine: "V8".into(),
    })
    .is_ok());
}

#[test]
fn in_accepts_only_listed_values() {
    let errors = failures(validate(&Car {
        year: 2010,
        engine: "V2".into(),
    }));
    assert_eq!(errors.to_string(), "Engine must be one of allowed values");
    assert!(validate(&Car {
        year: 2010,
        engine: "V6".into(),
    })
    .is_ok());
}

struct Ratio {
    value: f32,
}

structure!(Ratio {
    value => { json: "Value", is: "max(1.1)" },
});

struct Choice {
    value: f32,
}

structure!(Choice {
    value => { json: "Value", is: "in(0.1|0.2)" },
});

#[test]
fn single_precision_values_meet_their_written_bounds() {
    assert!(validate(&Ratio { value: 1.1 }).is_ok());
    assert!(validate(&Choice { value: 0.1 }).is_ok());
    assert!(validate(&Choice { value: 0.2 }).is_ok());

    let errors = failures(validate(&Ratio { value: 1.2 }));
    assert_eq!(errors.to_string(), "Value must be at most 1.1");
    let errors = failures(validate(&Choice { value: 0.3 }));
    assert_eq!(errors.to_string(), "Value must be one of allowed values");
}

// ---- paths ----

struct Leaf {
    bar: String,
}

structure!(Leaf {
    bar => { json: "Bar", is: "alpha" },
});

fn leaf(bar: &str) -> Leaf {
    Leaf { bar: bar.into() }
}

struct Outer {
    nested: Leaf,
    slice: Vec<Leaf>,
    map: BTreeMap<String, Leaf>,
}

structure!(Outer {
    nested => { json: "Nested" },
    slice => { json: "Slice" },
    map => { json: "Map" },
});

#[test]
fn errors_carry_paths_through_fields_indices_and_keys() {
    let mut map = BTreeMap::new();
    map.insert("Foo".to_string(), leaf("3"));
    map.insert("Ok".to_string(), leaf("fine"));
    let outer = Outer {
        nested: leaf("1"),
        slice: vec![leaf("2"), leaf("good")],
        map,
    };

    let errors = failures(validate(&outer));
    let paths: Vec<String> = errors.iter().map(|e| e.path()).collect();
    assert_eq!(paths, vec!["Outer.Nested.Bar", "Outer.Slice.0.Bar", "Outer.Map.Foo.Bar"]);
    assert_eq!(
        errors.iter().next().unwrap().segments(),
        &["Outer".to_string(), "Nested".to_string(), "Bar".to_string()]
    );
    assert_eq!(errors.for_path("Outer.Slice.0.Bar").count(), 1);
}

// ---- evaluation order and stopping ----

struct Ordered {
    first: String,
    second: String,
    third: String,
}

structure!(Ordered {
    first => { json: "First", is: "alpha,length(5|10)" },
    second => { json: "Second", is: "length(5|10),alpha" },
    third => { json: "Third", is: "numeric" },
});

#[test]
fn first_failing_rule_stops_only_its_field() {
    let errors = failures(validate(&Ordered {
        first: "ab1".into(),
        second: "ab1".into(),
        third: "x".into(),
    }));
    let rules: Vec<_> = errors.iter().map(|e| (e.field(), e.rule())).collect();
    assert_eq!(
        rules,
        vec![
            ("First", Some("alpha")),
            ("Second", Some("length")),
            ("Third", Some("numeric")),
        ]
    );
}

struct Negated {
    word: String,
}

structure!(Negated {
    word => { json: "Word", is: "!alpha" },
});

#[test]
fn negated_rules_invert_predicate_and_message() {
    let errors = failures(validate(&Negated {
        word: "letters".into(),
    }));
    let error = errors.iter().next().unwrap();
    assert_eq!(error.rule(), Some("!alpha"));
    assert!(error.message().starts_with("Word must not "), "{}", error.message());
    assert!(validate(&Negated { word: "l3tters".into() }).is_ok());
}

struct Custom {
    code: String,
    label: String,
}

structure!(Custom {
    code => { json: "Code", is: "alpha~{field} needs letters" },
    label => { json: "Label", is: "required~please fill in {field}" },
});

#[test]
fn custom_messages_replace_templates() {
    let errors = failures(validate(&Custom {
        code: "123".into(),
        label: String::new(),
    }));
    let messages: Vec<_> = errors.iter().map(|e| e.message().to_string()).collect();
    assert_eq!(messages, vec!["Code needs letters", "please fill in Label"]);
    assert!(errors.iter().all(|e| e.has_custom_message()));
}

struct Misconfigured {
    broken: String,
    fine: String,
}

structure!(Misconfigured {
    broken => { json: "Broken", is: "nosuchrule,alpha" },
    fine => { json: "Fine", is: "numeric" },
});

#[test]
fn unknown_rule_is_reported_and_siblings_continue() {
    let errors = failures(validate(&Misconfigured {
        broken: "123".into(),
        fine: "abc".into(),
    }));
    let kinds: Vec<_> = errors.iter().map(|e| e.kind().clone()).collect();
    assert_eq!(
        kinds,
        vec![
            ErrorKind::UnknownRule {
                rule: "nosuchrule".into()
            },
            ErrorKind::RuleFailed {
                rule: "numeric".into()
            },
        ]
    );
}

// ---- emptiness ----

struct Optional {
    nickname: Option<String>,
    motto: Option<String>,
    tags: Vec<String>,
    grid: [u8; 3],
    home: Leaf,
}

structure!(Optional {
    nickname => { json: "Nickname", is: "required" },
    motto => { json: "Motto", is: "alpha" },
    tags => { json: "Tags", is: "required" },
    grid => { json: "Grid", is: "required" },
    home => { json: "Home", is: "required" },
});

#[test]
fn emptiness_covers_pointers_collections_arrays_and_structures() {
    let errors = failures(validate(&Optional {
        nickname: Some(String::new()),
        motto: Some(String::new()),
        tags: Vec::new(),
        grid: [0, 0, 0],
        home: leaf(""),
    }));
    let fields: Vec<_> = errors.iter().map(|e| e.field()).collect();
    assert_eq!(fields, vec!["Nickname", "Tags", "Grid", "Home"]);
    assert!(errors.iter().all(|e| e.kind() == &ErrorKind::Required));
}

#[test]
fn populated_pointer_is_checked_once() {
    let result = validate(&Optional {
        nickname: Some("nick".into()),
        motto: Some("123".into()),
        tags: vec!["a".into()],
        grid: [0, 1, 0],
        home: leaf("home"),
    });
    let errors = failures(result);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.iter().next().unwrap().path(), "Optional.Motto");
}

// ---- structures without rules ----

struct Plain {
    a: String,
    b: Vec<i32>,
    hidden: String,
}

structure!(Plain { a, b, priv hidden });

#[test]
fn untagged_structures_always_pass() {
    let plain = Plain {
        a: String::new(),
        b: vec![],
        hidden: String::new(),
    };
    assert!(validate(&plain).is_ok());
}

struct Hidden {
    shown: String,
    secret: String,
}

structure!(Hidden {
    shown => { json: "Shown", is: "required" },
    priv secret,
});

#[test]
fn private_fields_are_never_validated() {
    let hidden = Hidden {
        shown: "x".into(),
        secret: String::new(),
    };
    assert!(validate(&hidden).is_ok());
}

struct Skipped {
    ignored: String,
    unnamed: String,
}

structure!(Skipped {
    ignored => { is: "-" },
    unnamed => { json: "-", is: "numeric" },
});

#[test]
fn skip_tag_and_suppressed_names() {
    let errors = failures(validate(&Skipped {
        ignored: "anything".into(),
        unnamed: "abc".into(),
    }));
    let error = errors.iter().next().unwrap();
    assert_eq!(errors.len(), 1);
    // Suppressed names keep the identifier for messages but add no segment.
    assert_eq!(error.field(), "unnamed");
    assert_eq!(error.path(), "Skipped");
}

// ---- arguments and configuration ----

#[test]
fn root_must_lead_to_a_structure() {
    assert!(matches!(validate(&"text"), Err(ValidateError::InvalidArgument(_))));
    let nil: Option<Box<Person>> = None;
    assert!(matches!(validate(&nil), Err(ValidateError::InvalidArgument(_))));
    let boxed = Box::new(Person {
        name: "a".into(),
        age: 1,
    });
    assert!(validate(&boxed).is_ok());
}

struct Chain {
    label: String,
    next: Option<Box<Chain>>,
}

structure!(Chain {
    label => { json: "Label", is: "alpha" },
    next => { json: "Next" },
});

fn chain(len: usize) -> Chain {
    let mut head = Chain {
        label: "end".into(),
        next: None,
    };
    for _ in 1..len {
        head = Chain {
            label: "link".into(),
            next: Some(Box::new(head)),
        };
    }
    head
}

#[test]
fn depth_limit_is_enforced() {
    let config = ValidatorConfig {
        max_depth: 8,
        ..ValidatorConfig::default()
    };
    let validator = Validator::new().with_config(config);
    assert!(validator.validate(&chain(2)).is_ok());
    match validator.validate(&chain(50)) {
        Err(ValidateError::DepthExceeded { limit, path }) => {
            assert_eq!(limit, 8);
            assert!(path.starts_with("Chain.Next"), "{path}");
        }
        other => panic!("expected depth error, got {other:?}"),
    }
}

struct Even {
    count: u32,
}

structure!(Even {
    count => { json: "Count", is: "even" },
});

#[test]
fn private_registries_are_isolated() {
    let registry = Registry::new();
    registry
        .register("even", "{field} must be even", |value| {
            value.parse::<u64>().is_ok_and(|n| n % 2 == 0)
        })
        .unwrap();

    let validator = Validator::with_registry(&registry);
    assert!(validator.validate(&Even { count: 4 }).is_ok());
    let errors = failures(validator.validate(&Even { count: 3 }));
    assert_eq!(errors.to_string(), "Count must be even");

    // The global registry does not know the rule.
    let errors = failures(validate(&Even { count: 4 }));
    assert!(matches!(
        errors.iter().next().unwrap().kind(),
        ErrorKind::UnknownRule { .. }
    ));
}

#[test]
fn verify_rejects_unknown_rules() {
    let validator = Validator::new();
    assert!(validator.verify(&Even { count: 0 }).is_err());
    assert!(validator
        .verify(&Car {
            year: 0,
            engine: String::new(),
        })
        .is_ok());
}

#[test]
fn validation_is_idempotent() {
    let outer = Outer {
        nested: leaf("1"),
        slice: vec![leaf("2")],
        map: BTreeMap::new(),
    };
    let first = failures(validate(&outer));
    let second = failures(validate(&outer));
    assert_eq!(first, second);
}

#[test]
fn report_serializes_to_json() {
    let errors = failures(validate(&Car {
        year: 1,
        engine: "V6".into(),
    }));
    let json = serde_json::to_value(&errors).unwrap();
    assert_eq!(json[0]["path"], "Car.Year");
    assert_eq!(json[0]["field"], "Year");
    assert_eq!(json[0]["type"], "rule_failed");
    assert_eq!(json[0]["rule"], "min");
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn length_rule_matches_char_count(value in "[a-z]{1,10}") {
            let result = validate(&Code { value: value.clone() });
            let expected = (3..=5).contains(&value.chars().count());
            prop_assert_eq!(result.is_ok(), expected);
        }

        #[test]
        fn min_rule_matches_comparison(year in 1u32..5000, engine in prop::sample::select(vec!["V8", "V6"])) {
            let result = validate(&Car { year, engine: engine.to_string() });
            prop_assert_eq!(result.is_ok(), year >= 2000);
        }

        #[test]
        fn repeated_validation_is_identical(words in prop::collection::vec("[a-z0-9]{0,6}", 0..6)) {
            let outer = Outer {
                nested: leaf("nested"),
                slice: words.iter().map(|w| leaf(w)).collect(),
                map: BTreeMap::new(),
            };
            let first = validate(&outer).err().map(|e| e.to_string());
            let second = validate(&outer).err().map(|e| e.to_string());
            prop_assert_eq!(first, second);
        }
    }
}
