// Integration tests for the minic front end: source text through the full
// tokenize → parse → analyze pipeline.

use minic::parser::lexer::{Lexer, TokenKind};
use minic::parser::parser::Parser;
use minic::semantic::analyzer::{Analysis, Analyzer};
use minic::semantic::errors::SemanticError;

fn analyze(source: &str) -> Result<Analysis, SemanticError> {
    let mut parser = Parser::new(source);
    let program = parser.parse_program().expect("Parsing failed");
    Analyzer::new().analyze(&program)
}

#[test]
fn test_multi_function_program() {
    let source = r#"
        func int add(int a, int b) {
            return a + b;
        }

        func float average(int a, float b) {
            float result = (a + b) / 2;
            return result;
        }

        func bool isPositive(float x) {
            if (x > 0) {
                return true;
            } else {
                return false;
            }
        }

        func int main() {
            int x = 10;
            float y = 3.5;

            int sum = add(x, 5);
            float avg = average(sum, y);
            bool pos = isPositive(avg);

            print(x);
            print(sum);
            print(avg);
            print(pos);
            return 0;
        }
    "#;

    let analysis = analyze(source).expect("Analysis failed");

    assert_eq!(analysis.globals.len(), 4);
    for name in ["add", "average", "isPositive", "main"] {
        assert!(analysis.globals.get(name).is_some(), "missing global {}", name);
    }
    assert_eq!(analysis.functions.len(), 4);
}

#[test]
fn test_mutual_forward_reference() {
    let source = r#"
        func int even(int n) {
            if (n == 0) { return 1; }
            return odd(n - 1);
        }

        func int odd(int n) {
            if (n == 0) { return 0; }
            return even(n - 1);
        }

        func int main() {
            return even(4);
        }
    "#;

    analyze(source).expect("Analysis failed");
}

#[test]
fn test_block_scope_expires() {
    let source = r#"
        func int main() {
            if (1) {
                int z = 100;
                print(z);
            }
            print(z);
            return 0;
        }
    "#;

    match analyze(source) {
        Err(SemanticError::UndeclaredUse { name, .. }) => assert_eq!(name, "z"),
        other => panic!("Expected undeclared use of 'z', got {:?}", other),
    }
}

#[test]
fn test_mixed_arithmetic_widens() {
    // int + float flows through arithmetic as float.
    let source = r#"
        func float mix(int a, float b) {
            return a + b;
        }

        func int main() {
            float r = mix(1, 2.5);
            return 0;
        }
    "#;

    analyze(source).expect("Analysis failed");
}

#[test]
fn test_each_semantic_error_kind() {
    let duplicate = "func int main() { int x = 1; int x = 2; return 0; }";
    assert!(matches!(
        analyze(duplicate),
        Err(SemanticError::DuplicateDeclaration { .. })
    ));

    let undeclared = "func int main() { z = 3; return 0; }";
    assert!(matches!(
        analyze(undeclared),
        Err(SemanticError::UndeclaredUse { .. })
    ));

    let mismatch = "func int main() { int x = 5; float y = 0.0; y = x + true; return 0; }";
    assert!(matches!(
        analyze(mismatch),
        Err(SemanticError::TypeMismatch { .. })
    ));

    let arity = r#"
        func int add(int a, int b) { return a + b; }
        func int main() { return add(2); }
    "#;
    assert!(matches!(
        analyze(arity),
        Err(SemanticError::ArityMismatch { .. })
    ));

    let undefined = "func int main() { return nothing(); }";
    assert!(matches!(
        analyze(undefined),
        Err(SemanticError::UndefinedFunctionCall { .. })
    ));
}

#[test]
fn test_first_error_wins() {
    // Several problems on successive lines; analysis stops at the first.
    let source = r#"
        func int main() {
            int x = true;
            y = 1;
            return nothing();
        }
    "#;

    match analyze(source) {
        Err(SemanticError::TypeMismatch { line, .. }) => assert_eq!(line, 3),
        other => panic!("Expected the initializer mismatch first, got {:?}", other),
    }
}

#[test]
fn test_parse_error_carries_line() {
    let source = "func int main() {\n    int x = 1;\n    int y = ;\n}";
    let err = Parser::new(source).parse_program().unwrap_err();
    assert_eq!(err.line, 3);
}

#[test]
fn test_token_stream_matches_source_order() {
    let source = "func int main() { return 0; }";
    let tokens = Lexer::new(source).tokenize();

    let lexemes: Vec<&str> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
    assert_eq!(
        lexemes,
        vec!["func", "int", "main", "(", ")", "{", "return", "0", ";", "}"]
    );
    assert_eq!(tokens[0].kind, TokenKind::Func);
    assert!(tokens.iter().all(|t| t.line == 1));
}

#[test]
fn test_reports_render() {
    let source = r#"
        func int double(int n) {
            return n * 2;
        }

        func int main() {
            int total = 0;
            for (int i = 0; i < 5; i = i + 1) {
                total = total + double(i);
            }
            print(total);
            return total;
        }
    "#;

    let tokens = Lexer::new(source).tokenize();
    let mut parser = Parser::from_tokens(tokens.clone());
    let program = parser.parse_program().expect("Parsing failed");
    let analysis = Analyzer::new().analyze(&program).expect("Analysis failed");

    let token_listing = minic::report::render_tokens(&tokens);
    assert!(token_listing.contains("double"));

    let tree = minic::report::render_ast(&program);
    assert!(tree.contains("For"));
    assert!(tree.contains("FuncCall: double"));

    let tables = minic::report::render_symbol_tables(&analysis);
    assert!(tables.contains("Function: main"));
    assert!(tables.contains("for(local)"));
}
