// Integration tests for end-to-end search predicate compilation
use relplan::{
    compile_json, compile_predicate,
    predicate_parser::ast::{ComparisonOperator, Literal, PredicateNode},
    relation_compiler::errors::RelationCompileError,
    AliasMap, CompileError, CompileOptions,
};
use serde_json::json;

fn salary_aliases() -> AliasMap {
    [
        ("salary", "salaries.salary"),
        ("salary_start_date", "salaries.from_date"),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_simple_search_root_field() {
    let compiled = compile_predicate(
        r#"
          match_all: {
            eq: ["first_name", "Jerry"]
          }
        "#,
        None,
        &CompileOptions::default(),
    )
    .unwrap();

    assert_eq!(compiled.expression(), "");
    assert!(compiled.relation.is_empty());
}

#[test]
fn test_simple_search_shared_relation() {
    let compiled = compile_predicate(
        r#"
          match_all: {
            geq: ["salaries.salary", 60000],
            geq: ["salaries.from_date", "1986-06-26"]
          }
        "#,
        None,
        &CompileOptions::default(),
    )
    .unwrap();

    assert_eq!(compiled.expression(), "salaries");
    assert_ne!(compiled.expression(), "[salaries,salaries]");
}

#[test]
fn test_aliased_search_matches_canonical_search() {
    let aliased = compile_predicate(
        r#"
          match_all: {
            geq: ["salary", 60000],
            geq: ["salary_start_date", "1986-06-26"]
          }
        "#,
        Some(&salary_aliases()),
        &CompileOptions::default(),
    )
    .unwrap();

    let canonical = compile_predicate(
        r#"
          match_all: {
            geq: ["salaries.salary", 60000],
            geq: ["salaries.from_date", "1986-06-26"]
          }
        "#,
        None,
        &CompileOptions::default(),
    )
    .unwrap();

    assert_eq!(aliased, canonical);
    assert_eq!(aliased.expression(), "salaries");
}

#[test]
fn test_normalized_predicate_keeps_values_and_operators() {
    let compiled = compile_predicate(
        r#"match_any: { lt: ["salary", 40000.5], eq: ["titles.title", "Engineer"] }"#,
        Some(&salary_aliases()),
        &CompileOptions::default(),
    )
    .unwrap();

    match &compiled.predicate {
        PredicateNode::Logical(logical) => {
            assert_eq!(
                logical.constraints[0],
                PredicateNode::comparison(
                    ComparisonOperator::Lt,
                    "salaries.salary",
                    Literal::Float(40000.5)
                )
            );
        }
        other => panic!("expected logical root, got {:?}", other),
    }
    assert_eq!(compiled.expression(), "[salaries,titles]");
}

#[test]
fn test_json_and_text_inputs_agree() {
    let text = compile_predicate(
        r#"match_all: { geq: ["dept_emp.departments.dept_name", "d001"], eq: ["gender", "F"] }"#,
        None,
        &CompileOptions::default(),
    )
    .unwrap();

    let ast = json!({
        "type": "logical",
        "operator": "match_all",
        "constraints": [
            { "type": "comparison", "operator": "geq",
              "args": { "identifier": "dept_emp.departments.dept_name", "value": "d001" } },
            { "type": "comparison", "operator": "eq",
              "args": { "identifier": "gender", "value": "F" } }
        ]
    });
    let from_json = compile_json(&ast, None, &CompileOptions::default()).unwrap();

    assert_eq!(text, from_json);
    assert_eq!(from_json.expression(), "dept_emp.departments");
}

#[test]
fn test_full_output_shape() {
    let compiled = compile_predicate(
        r#"geq: ["salary", 60000]"#,
        Some(&salary_aliases()),
        &CompileOptions::default(),
    )
    .unwrap();

    assert_eq!(
        serde_json::to_value(&compiled).unwrap(),
        json!({
            "predicate": {
                "type": "comparison",
                "operator": "geq",
                "args": { "identifier": "salaries.salary", "value": 60000 }
            },
            "relation": {
                "expression": "salaries",
                "tree": {
                    "name": "",
                    "children": [{ "name": "salaries", "children": [] }]
                }
            }
        })
    );
}

#[test]
fn test_invalid_node_type_in_json_ast() {
    let ast = json!({
        "type": "logical",
        "operator": "match_all",
        "constraints": [{ "type": "subquery" }]
    });
    let err = compile_json(&ast, None, &CompileOptions::default()).unwrap_err();
    assert_eq!(
        err,
        CompileError::Relation(RelationCompileError::InvalidPredicateNode {
            path: "$.constraints[0]".to_string(),
            reason: "unrecognized node type `subquery`".to_string(),
        })
    );
}

#[test]
fn test_strict_mode_end_to_end() {
    let predicate = r#"match_all: { eq: [".salary", 1] }"#;

    let permissive = compile_predicate(predicate, None, &CompileOptions::default()).unwrap();
    assert_eq!(permissive.expression(), "");
    assert_eq!(permissive.relation.tree().children.len(), 1);

    let strict = compile_predicate(predicate, None, &CompileOptions::strict()).unwrap_err();
    assert!(matches!(
        strict,
        CompileError::Relation(RelationCompileError::EmptyPathSegment { .. })
    ));
}
