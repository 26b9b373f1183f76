use morph_expr::{
    BinOp, Expr, SyntaxError, UnaryOp,
    parser::parse,
};
use pretty_assertions::assert_eq;

fn tree(input: &str) -> Expr {
    parse(input).unwrap().0
}

fn identifiers(input: &str) -> Vec<String> {
    parse(input).unwrap().1
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    assert_eq!(
        tree("1 + 2 * 4"),
        Expr::binary(
            BinOp::Add,
            Expr::constant(1),
            Expr::binary(BinOp::Multiply, Expr::constant(2), Expr::constant(4)),
        )
    );
}

#[test]
fn test_binary_operators_are_left_associative() {
    assert_eq!(
        tree("1 - 1 - 1"),
        Expr::binary(
            BinOp::Subtract,
            Expr::binary(BinOp::Subtract, Expr::constant(1), Expr::constant(1)),
            Expr::constant(1),
        )
    );
    assert_eq!(
        tree("8 / 2 / 2"),
        Expr::binary(
            BinOp::Divide,
            Expr::binary(BinOp::Divide, Expr::constant(8), Expr::constant(2)),
            Expr::constant(2),
        )
    );
}

#[test]
fn test_precedence_ladder() {
    // || < && < equality < comparison < additive
    assert_eq!(
        tree("a || b && c == d > e + f"),
        Expr::binary(
            BinOp::Or,
            Expr::identifier("a"),
            Expr::binary(
                BinOp::And,
                Expr::identifier("b"),
                Expr::binary(
                    BinOp::Equal,
                    Expr::identifier("c"),
                    Expr::binary(
                        BinOp::GreaterThan,
                        Expr::identifier("d"),
                        Expr::binary(BinOp::Add, Expr::identifier("e"), Expr::identifier("f")),
                    ),
                ),
            ),
        )
    );
}

#[test]
fn test_comparison_binds_tighter_than_equality() {
    assert_eq!(
        tree("true == 2 > 1"),
        Expr::binary(
            BinOp::Equal,
            Expr::constant(true),
            Expr::binary(BinOp::GreaterThan, Expr::constant(2), Expr::constant(1)),
        )
    );
}

#[test]
fn test_prefix_operators_nest() {
    assert_eq!(
        tree("!!0"),
        Expr::unary(UnaryOp::Not, Expr::unary(UnaryOp::Not, Expr::constant(0)))
    );
    assert_eq!(
        tree("1 - --2"),
        Expr::binary(
            BinOp::Subtract,
            Expr::constant(1),
            Expr::unary(UnaryOp::Decrement, Expr::constant(2)),
        )
    );
    assert_eq!(
        tree("2 * -x"),
        Expr::binary(
            BinOp::Multiply,
            Expr::constant(2),
            Expr::unary(UnaryOp::Negate, Expr::identifier("x")),
        )
    );
    assert_eq!(tree("+2"), Expr::unary(UnaryOp::Plus, Expr::constant(2)));
}

#[test]
fn test_parentheses_override_precedence() {
    assert_eq!(
        tree("(2 + 1) * 3"),
        Expr::binary(
            BinOp::Multiply,
            Expr::binary(BinOp::Add, Expr::constant(2), Expr::constant(1)),
            Expr::constant(3),
        )
    );
    assert_eq!(tree("((x))"), Expr::identifier("x"));
}

#[test]
fn test_function_calls() {
    assert_eq!(tree("now()"), Expr::call("now", vec![]));
    assert_eq!(
        tree("sum(1, x; 2 + 3)"),
        Expr::call(
            "sum",
            vec![
                Expr::constant(1),
                Expr::identifier("x"),
                Expr::binary(BinOp::Add, Expr::constant(2), Expr::constant(3)),
            ],
        )
    );
    assert_eq!(
        tree("sqr(sqr(2))"),
        Expr::call("sqr", vec![Expr::call("sqr", vec![Expr::constant(2)])])
    );
}

#[test]
fn test_identifiers_in_order_of_appearance() {
    assert_eq!(identifiers("x.y + z"), vec!["x.y", "z"]);
    assert_eq!(identifiers("a + a * b"), vec!["a", "a", "b"]);
    // function names are not lookups, their arguments are
    assert_eq!(identifiers("max(price, limit) > 0"), vec!["price", "limit"]);
    assert!(identifiers("1 + 2").is_empty());
}

#[test]
fn test_structural_errors() {
    let inputs = [
        "",
        "   ",
        "sqr(2",
        "unRegistered(",
        "f(1,",
        "f(1 2)",
        "3 * (1 + 2",
        "1 + 2)",
        "(1 + 2)) - 2",
        ")",
        "1 +",
        "* 2",
        "1 2",
        "()",
        ",",
    ];
    for input in inputs {
        assert_eq!(parse(input), Err(SyntaxError::UnexpectedEnd), "input: {:?}", input);
    }
    assert_eq!(
        SyntaxError::UnexpectedEnd.to_string(),
        "Unexpected end of expression"
    );
}

#[test]
fn test_lexical_errors_surface_from_parse() {
    assert_eq!(parse("1 + 3.2.1"), Err(SyntaxError::InvalidNumber("3.2.1".to_string())));
    assert_eq!(parse("f('x)"), Err(SyntaxError::UnterminatedQuote('\'')));
    assert_eq!(parse("a @ b"), Err(SyntaxError::UnknownCharacter('@')));
}

#[test]
fn test_trailing_whitespace_is_ignored() {
    assert_eq!(tree(" 1 + 2 \n"), tree("1+2"));
}
