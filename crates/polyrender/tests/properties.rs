//! Property-based tests for the render contract.

use proptest::prelude::*;
use polyrender::{render, EngineKind, Environment, TemplateSpec, Value};

// ============================================================================
// Strategies
// ============================================================================

fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        (-1_000_000i64..1_000_000).prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,16}".prop_map(Value::from),
    ]
}

fn value_strategy() -> impl Strategy<Value = Value> {
    scalar_strategy().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::List),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..4).prop_map(Value::Map),
        ]
    })
}

fn environment_strategy() -> impl Strategy<Value = Environment> {
    prop::collection::btree_map("v_[a-z0-9_]{0,7}", value_strategy(), 0..6)
        .prop_map(Environment::from)
}

/// A spec whose populated bodies each render a distinct, engine-naming string.
fn marker_spec(script: bool, template: bool, expression: bool) -> TemplateSpec {
    TemplateSpec {
        script: if script { r#""script""#.into() } else { String::new() },
        template: if template { "template".into() } else { String::new() },
        expression: if expression {
            r#""expression""#.into()
        } else {
            String::new()
        },
    }
}

fn body_for(kind: EngineKind, body: &str) -> TemplateSpec {
    match kind {
        EngineKind::Script => TemplateSpec::script(body),
        EngineKind::Template => TemplateSpec::template(body),
        EngineKind::Expression => TemplateSpec::expression(body),
    }
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// The first populated body wins; an empty spec renders to "".
    #[test]
    fn first_populated_engine_wins(
        script in any::<bool>(),
        template in any::<bool>(),
        expression in any::<bool>(),
        env in environment_strategy(),
    ) {
        let spec = marker_spec(script, template, expression);
        let expected = match (script, template, expression) {
            (true, _, _) => "script",
            (false, true, _) => "template",
            (false, false, true) => "expression",
            (false, false, false) => "",
        };

        prop_assert_eq!(render(&env, &spec).unwrap(), expected);
    }

    /// Rendering is a pure function of environment and spec.
    #[test]
    fn rendering_is_deterministic(
        env in environment_strategy(),
        kind in prop::sample::select(EngineKind::ALL.to_vec()),
    ) {
        let names: Vec<&str> = env.names().collect();
        let body = match kind {
            EngineKind::Script => names
                .iter()
                .fold(String::from(r#""""#), |acc, n| format!("{} + type_of({})", acc, n)),
            EngineKind::Template => names.iter().map(|n| format!("{{{{ {} }}}};", n)).collect(),
            EngineKind::Expression => format!("[{}]", names.join(", ")),
        };
        let spec = body_for(kind, &body);

        let first = render(&env, &spec).unwrap();
        let second = render(&env, &spec).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Template output is trimmed of surrounding whitespace.
    #[test]
    fn template_output_is_trimmed(
        lead in "[ \t\n]{0,5}",
        text in "[a-zA-Z0-9 ,.]{0,40}",
        trail in "[ \t\n]{0,5}",
    ) {
        let out = render(
            &Environment::new(),
            &TemplateSpec::template(format!("{}{}{}", lead, text, trail)),
        )
        .unwrap();
        prop_assert_eq!(out, text.trim());
    }

    /// A bound string comes back unchanged from a script that returns it.
    #[test]
    fn script_echoes_bound_string(s in "\\PC{0,32}") {
        let env = Environment::new().with("s", s.clone());
        prop_assert_eq!(render(&env, &TemplateSpec::script("s")).unwrap(), s);
    }

    /// Templates and expressions agree on a bound scalar, up to trimming.
    #[test]
    fn template_and_expression_agree_on_strings(s in "[a-zA-Z0-9 ]{0,24}") {
        let env = Environment::new().with("s", s.clone());
        let template = render(&env, &TemplateSpec::template("{{ s }}")).unwrap();
        let expression = render(&env, &TemplateSpec::expression("s")).unwrap();

        prop_assert_eq!(template.as_str(), s.trim());
        prop_assert_eq!(expression, s);
    }

    /// Expression arithmetic is stringified in decimal.
    #[test]
    fn expression_sum_matches_integer_sum(
        a in -1_000_000_000i64..1_000_000_000,
        b in -1_000_000_000i64..1_000_000_000,
    ) {
        let env = Environment::new().with("a", a).with("b", b);
        prop_assert_eq!(
            render(&env, &TemplateSpec::expression("a + b")).unwrap(),
            (a + b).to_string()
        );
    }

    /// Comparisons render as lowercase booleans.
    #[test]
    fn expression_comparison_renders_lowercase_bool(a in any::<i32>(), b in any::<i32>()) {
        let env = Environment::new().with("a", a).with("b", b);
        prop_assert_eq!(
            render(&env, &TemplateSpec::expression("a > b")).unwrap(),
            (a > b).to_string()
        );
        prop_assert_eq!(
            render(&env, &TemplateSpec::expression("a == b")).unwrap(),
            (a == b).to_string()
        );
    }

    /// Float results print like Rust floats: integral values lose the fraction.
    #[test]
    fn expression_float_product_matches_rust_display(x in -1.0e6f64..1.0e6) {
        let env = Environment::new().with("x", x);
        prop_assert_eq!(
            render(&env, &TemplateSpec::expression("x * 2")).unwrap(),
            Value::Float(x * 2.0).to_string()
        );
    }
}
