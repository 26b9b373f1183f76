use morph_expr::cli::{
    CliError, EvalOptions, EvalOutcome, execute_eval, get_doc_category, get_docs_overview,
    list_identifiers,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn options(expression: &str, input: Option<&str>) -> EvalOptions {
    EvalOptions {
        expression: expression.to_string(),
        input: input.map(str::to_string),
        ..Default::default()
    }
}

#[test]
fn test_eval_against_input() {
    let opts = options(
        "order.total >= 100 && upper(order.country) == 'DE'",
        Some(r#"{"order": {"total": 120, "country": "de"}}"#),
    );
    assert_eq!(execute_eval(&opts).unwrap(), EvalOutcome::Success(json!(true)));
}

#[test]
fn test_eval_without_input_uses_empty_scope() {
    assert_eq!(
        execute_eval(&options("missing || 'fallback'", None)).unwrap(),
        EvalOutcome::Success(json!("fallback"))
    );
    assert_eq!(
        execute_eval(&options("1 + 2", Some("  \n"))).unwrap(),
        EvalOutcome::Success(json!(3))
    );
}

#[test]
fn test_non_json_results_become_null() {
    assert_eq!(
        execute_eval(&options("missing", None)).unwrap(),
        EvalOutcome::Success(json!(null))
    );
    assert_eq!(
        execute_eval(&options("1 / 0", None)).unwrap(),
        EvalOutcome::Success(json!(null))
    );
}

#[test]
fn test_syntax_only_lists_identifiers() {
    let mut opts = options("a.b + c * sqr(d)", None);
    opts.syntax_only = true;
    assert_eq!(
        execute_eval(&opts).unwrap(),
        EvalOutcome::SyntaxValid(vec!["a.b".to_string(), "c".to_string(), "d".to_string()])
    );
}

#[test]
fn test_no_stdlib() {
    let mut opts = options("len('abc')", None);
    assert_eq!(execute_eval(&opts).unwrap(), EvalOutcome::Success(json!(3)));

    opts.no_stdlib = true;
    let err = execute_eval(&opts).unwrap_err();
    assert!(matches!(err, CliError::Eval(_)));
    assert_eq!(err.to_string(), "Evaluation error: Function 'len' isn't declared");
}

#[test]
fn test_errors() {
    let err = execute_eval(&options("1 +", None)).unwrap_err();
    assert_eq!(err.to_string(), "Syntax error: Unexpected end of expression");

    let err = execute_eval(&options("x", Some("{not json"))).unwrap_err();
    assert!(matches!(err, CliError::Json(_)));
}

#[test]
fn test_list_identifiers() {
    assert_eq!(list_identifiers("x.y + z").unwrap(), vec!["x.y", "z"]);
    assert!(list_identifiers("(").is_err());
}

#[test]
fn test_docs() {
    assert!(get_docs_overview().contains("operators"));
    assert!(get_doc_category("operators").unwrap().contains("||"));
    assert!(matches!(
        get_doc_category("nonsense"),
        Err(CliError::UnknownCategory(name)) if name == "nonsense"
    ));
}
