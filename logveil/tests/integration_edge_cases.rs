//! Edge-case coverage for the redaction engine.
//!
//! These tests focus on shapes and failure paths: unit and tuple structs,
//! empty enums, recursive types, scope boundaries, `Dynamic` payloads, and
//! errors raised by misbehaving user implementations.

use std::borrow::Cow;

use logveil::{
    cached_descriptor, might_contain_secured, redact, Concealable, Dynamic, RedactError,
    RedactionConfig, Redactor, ScopeFilter, Securable, Walk, SECURED_PLACEHOLDER,
};

#[test]
fn test_unit_and_tuple_structs() {
    #[derive(Clone, Securable)]
    struct Marker;

    #[derive(Clone, Securable)]
    struct Pair(String, #[hide] String);

    assert!(!might_contain_secured::<Marker>());
    assert!(matches!(redact(&Marker).unwrap(), Cow::Borrowed(_)));

    let pair = Pair("visible".to_string(), "hidden".to_string());
    let redacted = redact(&pair).unwrap();
    assert_eq!(redacted.0, "visible");
    assert_eq!(redacted.1, SECURED_PLACEHOLDER);
}

#[test]
fn test_empty_enum_is_never_secured() {
    #[derive(Clone, Securable)]
    enum Never {}

    assert!(!might_contain_secured::<Never>());
    assert!(!might_contain_secured::<Option<Never>>());
}

#[test]
fn test_array_fields() {
    #[derive(Clone, Securable)]
    struct Keys {
        #[hide]
        pins: [u16; 3],
        slots: [Option<Token>; 2],
    }

    #[derive(Clone, Securable)]
    struct Token {
        #[hide]
        value: String,
    }

    let keys = Keys {
        pins: [1, 2, 3],
        slots: [
            None,
            Some(Token {
                value: "t".to_string(),
            }),
        ],
    };
    let redacted = redact(&keys).unwrap();
    assert_eq!(redacted.pins, [0, 0, 0]);
    assert!(redacted.slots[0].is_none());
    assert_eq!(
        redacted.slots[1].as_ref().unwrap().value,
        SECURED_PLACEHOLDER
    );
}

#[derive(Clone, Securable)]
struct Chain {
    next: Option<Box<Chain>>,
    leaf: Leaf,
}

#[derive(Clone, Securable)]
struct Leaf {
    #[hide]
    secret: String,
}

#[test]
fn test_recursive_occurrence_is_redacted() {
    let chain = Chain {
        next: Some(Box::new(Chain {
            next: None,
            leaf: Leaf {
                secret: "inner-secret".to_string(),
            },
        })),
        leaf: Leaf {
            secret: "outer-secret".to_string(),
        },
    };
    let redacted = redact(&chain).unwrap();
    assert_eq!(redacted.leaf.secret, SECURED_PLACEHOLDER);
    assert_eq!(
        redacted.next.as_ref().unwrap().leaf.secret,
        SECURED_PLACEHOLDER
    );
    assert_eq!(cached_descriptor::<Option<Box<Chain>>>(), Some(true));
}

#[derive(Clone, Securable)]
struct Node {
    name: String,
    children: Vec<Node>,
    creds: Creds,
}

#[derive(Clone, Securable)]
struct Creds {
    #[hide]
    password: String,
}

fn node(name: &str, password: &str, children: Vec<Node>) -> Node {
    Node {
        name: name.to_string(),
        children,
        creds: Creds {
            password: password.to_string(),
        },
    }
}

#[test]
fn test_secret_only_in_child_node_is_redacted() {
    let tree = node("root", "", vec![node("child", "child-pw", Vec::new())]);
    let redacted = redact(&tree).unwrap();

    assert!(matches!(redacted, Cow::Owned(_)));
    assert_eq!(redacted.creds.password, "");
    assert_eq!(redacted.children[0].creds.password, SECURED_PLACEHOLDER);
    assert_eq!(redacted.children[0].name, "child");
}

#[test]
fn test_secrets_at_every_level_of_a_tree_are_redacted() {
    let tree = node(
        "root",
        "root-pw",
        vec![node("child", "child-pw", vec![node("leaf", "leaf-pw", Vec::new())])],
    );
    let redacted = redact(&tree).unwrap();

    assert_eq!(redacted.creds.password, SECURED_PLACEHOLDER);
    let child = &redacted.children[0];
    assert_eq!(child.creds.password, SECURED_PLACEHOLDER);
    assert_eq!(child.children[0].creds.password, SECURED_PLACEHOLDER);
    assert_eq!(tree.children[0].children[0].creds.password, "leaf-pw");
}

mod app {
    use logveil::Securable;

    #[derive(Clone, Securable)]
    pub struct Order {
        pub id: u64,
        #[hide]
        pub card: String,
        pub vendor: super::vendor::Receipt,
    }
}

mod vendor {
    use logveil::Securable;

    #[derive(Clone, Securable)]
    pub struct Receipt {
        #[hide]
        pub token: String,
    }
}

fn order() -> app::Order {
    app::Order {
        id: 1,
        card: "4111".to_string(),
        vendor: vendor::Receipt {
            token: "vendor-token".to_string(),
        },
    }
}

#[test]
fn test_out_of_scope_children_are_skipped() {
    let redactor = Redactor::new(ScopeFilter::new([format!("{}::app", module_path!())]));
    let original = order();
    let redacted = redactor.redact(&original).unwrap();

    assert_eq!(redacted.card, SECURED_PLACEHOLDER);
    assert_eq!(redacted.vendor.token, "vendor-token");
}

#[test]
fn test_scope_matches_whole_segments() {
    let redactor = Redactor::new(ScopeFilter::new([format!("{}::ap", module_path!())]));
    let original = order();
    assert!(matches!(
        redactor.redact(&original).unwrap(),
        Cow::Borrowed(_)
    ));
}

#[test]
fn test_empty_scope_admits_only_built_in_types() {
    let redactor = Redactor::new(ScopeFilter::new(Vec::<String>::new()));
    let orders = vec![order()];
    let redacted = redactor.redact(&orders).unwrap();
    assert!(matches!(redacted, Cow::Borrowed(_)));

    let payload = Dynamic::List(vec![Dynamic::secured("x")]);
    let redacted = redactor.redact(&payload).unwrap();
    assert_eq!(
        redacted.into_owned(),
        Dynamic::List(vec![Dynamic::secured(SECURED_PLACEHOLDER)])
    );
}

#[test]
fn test_redactor_from_config() {
    let config: RedactionConfig = serde_json::from_str(r#"{ "scope": ["elsewhere"] }"#).unwrap();
    let redactor = Redactor::from_config(&config);
    let original = order();
    assert_eq!(redactor.redact(&original).unwrap().card, "4111");
}

#[test]
fn test_dynamic_field_inside_struct() {
    #[derive(Clone, Securable)]
    struct Event {
        name: String,
        context: Dynamic,
    }

    let event = Event {
        name: "login".to_string(),
        context: Dynamic::from(serde_json::json!({ "ip": "10.0.0.1" })),
    };
    assert!(matches!(redact(&event).unwrap(), Cow::Borrowed(_)));

    let mut with_secret = event.clone();
    if let Dynamic::Map(entries) = &mut with_secret.context {
        entries.insert("password".to_string(), Dynamic::secured("pw"));
    }
    let redacted = redact(&with_secret).unwrap();
    let Dynamic::Map(entries) = &redacted.context else {
        panic!("context should stay a map");
    };
    assert_eq!(entries["password"], Dynamic::secured(SECURED_PLACEHOLDER));
    assert_eq!(entries["ip"], Dynamic::from("10.0.0.1"));
}

/// A `Concealable` whose `conceal` has no effect.
#[derive(Clone, Debug)]
struct Stubborn;

impl Concealable for Stubborn {
    fn is_concealed(&self) -> bool {
        false
    }

    fn conceal(&mut self) {}
}

#[test]
fn test_concealment_that_does_not_take_is_reported() {
    #[derive(Clone, Debug, Securable)]
    struct Inner {
        #[hide]
        flag: Stubborn,
    }

    #[derive(Clone, Debug, Securable)]
    struct Outer {
        inner: Inner,
    }

    let err = redact(&Outer {
        inner: Inner { flag: Stubborn },
    })
    .unwrap_err();

    match err {
        RedactError::Mutation { path, type_name } => {
            assert_eq!(path, "inner.flag");
            assert!(type_name.ends_with("Stubborn"));
        }
        other => panic!("expected a mutation error, got {other:?}"),
    }
}

#[test]
fn test_enum_variant_path_in_errors() {
    #[derive(Clone, Debug, Securable)]
    enum Slot {
        Empty,
        Filled {
            #[hide]
            flag: Stubborn,
        },
    }

    let err = redact(&vec![Slot::Empty, Slot::Filled { flag: Stubborn }]).unwrap_err();
    assert!(matches!(
        err,
        RedactError::Mutation { ref path, .. } if path == "[1].Filled::flag"
    ));
}

#[derive(Clone, Debug)]
struct Exploding {
    in_detect: bool,
}

impl Securable for Exploding {
    fn analyze() -> bool {
        true
    }

    fn has_populated_secured(&self, _scope: &ScopeFilter) -> bool {
        assert!(!self.in_detect, "detector exploded");
        true
    }

    fn hide_secured(&mut self, _walk: &mut Walk<'_>) -> Result<(), RedactError> {
        panic!("walker exploded")
    }
}

#[test]
fn test_panics_become_errors() {
    let err = redact(&Exploding { in_detect: true }).unwrap_err();
    assert!(matches!(
        err,
        RedactError::Panic { ref message, .. } if message == "detector exploded"
    ));

    let err = redact(&Exploding { in_detect: false }).unwrap_err();
    assert!(matches!(
        err,
        RedactError::Panic { ref message, .. } if message == "walker exploded"
    ));
    assert!(err.type_name().ends_with("Exploding"));
}
