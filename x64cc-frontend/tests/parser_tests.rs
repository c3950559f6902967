//! Parser behaviour on whole programs

use pretty_assertions::assert_eq;
use x64cc_common::{CompilerError, SourceLocation};
use x64cc_frontend::{Expr, Frontend, Stmt, Type, VarId};

#[test]
fn test_scopes_and_shadowing() {
    let program = Frontend::parse_source(
        r#"
int main() {
    int x;
    x = 1;
    {
        int x;
        x = 2;
    }
    return x;
}
"#,
    )
    .unwrap();

    let main = &program.functions[0];
    assert_eq!(main.locals.len(), 2);

    // The inner assignment binds the inner `x`, the return the outer one
    match &main.body[2] {
        Stmt::Block(items) => match &items[1] {
            Stmt::Expression(Expr::Binary { left, .. }) => {
                assert_eq!(left.variable(), Some(VarId(1)))
            }
            other => panic!("Expected assignment, got {other:?}"),
        },
        other => panic!("Expected block, got {other:?}"),
    }
    match &main.body[3] {
        Stmt::Return(expr) => assert_eq!(expr.variable(), Some(VarId(0))),
        other => panic!("Expected return, got {other:?}"),
    }
}

#[test]
fn test_out_of_scope_use_is_rejected() {
    let err = Frontend::parse_source("int main() { { int y; } return y; }").unwrap_err();
    assert!(matches!(err, CompilerError::Semantic { .. }), "{err:?}");
}

#[test]
fn test_missing_closing_paren() {
    let err = Frontend::parse_source("int main() { return add(1, 2; }").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Parse error at 1:28: Expected ')' in function call, found ';'"
    );
    assert_eq!(err.location(), Some(SourceLocation::new(1, 28)));
}

#[test]
fn test_locals_collect_every_nested_declaration() {
    let program = Frontend::parse_source(
        "int f(int n) { int a; if (n) { int b; } else { int c[2]; } for (int i = 0; i < n; i++) { int d; } return a; }",
    )
    .unwrap();

    let names: Vec<&str> = program.functions[0]
        .locals
        .iter()
        .map(|v| v.name.as_str())
        .collect();
    assert_eq!(names, vec!["n", "a", "b", "c", "i", "d"]);
    assert_eq!(
        program.functions[0].locals[3].ty,
        Type::array_of(Type::Int, Some(2))
    );
}

#[test]
fn test_every_function_gets_its_own_arena() {
    let program =
        Frontend::parse_source("int f() { int a; return 0; } int g() { int b; return 0; }").unwrap();
    assert_eq!(program.functions[0].locals[0].name, "a");
    assert_eq!(program.functions[1].locals[0].name, "b");
    assert_eq!(program.functions[1].locals.len(), 1);
}

#[test]
fn test_lexical_error_propagates() {
    let err = Frontend::parse_source("{ return 'ab'; }").unwrap_err();
    assert!(matches!(err, CompilerError::LexError { .. }), "{err:?}");
}
