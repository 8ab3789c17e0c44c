//! End-to-end compilation tests: source text in, assembly text out

use mcc_common::CompilerError;
use mcc_frontend::{compile, CompileOptions, Frontend, TopLevelItem, MAX_NESTING_DEPTH};
use pretty_assertions::assert_eq;

fn compile_lines(source: &str) -> Vec<String> {
    compile(source)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

fn count(lines: &[String], prefix: &str) -> usize {
    lines.iter().filter(|l| l.starts_with(prefix)).count()
}

#[test]
fn test_assignment_of_sum() {
    let lines = compile_lines("x = 3 + 4;");
    assert_eq!(
        lines,
        vec![
            ".text",
            ".globl main",
            "main:",
            "addi $sp, $sp, -4",
            "li $t0, 3",
            "li $t1, 4",
            "add $t2, $t0, $t1",
            "sw $t2, 0($sp)",
            "li $v0, 10",
            "syscall",
        ]
    );
}

#[test]
fn test_if_compares_swapped_and_branches_past_block() {
    let lines = compile_lines("if (a > b) { x = 1; }");

    assert_eq!(count(&lines, "slt "), 1);
    assert!(lines.contains(&"slt $t2, $t1, $t0".to_string()));
    assert!(lines.contains(&"beq $t2, $zero, L0".to_string()));
    assert_eq!(count(&lines, "L"), 1);
}

#[test]
fn test_while_loops_back_to_start() {
    let lines = compile_lines("while (a > b) { a = a - 1; }");

    assert_eq!(count(&lines, "L"), 2);
    assert!(lines.contains(&"j L0".to_string()));
    assert!(lines.contains(&"beq $t2, $zero, L1".to_string()));
    let start = lines.iter().position(|l| l == "L0:").unwrap();
    let jump = lines.iter().position(|l| l == "j L0").unwrap();
    assert!(start < jump);
}

#[test]
fn test_function_definition_and_call() {
    let lines = compile_lines("function add(x, y) { return x + y; } r = add(2, 3);");
    assert_eq!(
        lines,
        vec![
            ".text",
            ".globl main",
            "add:",
            "addi $sp, $sp, -4",
            "sw $ra, 0($sp)",
            "sw $a0, 0($sp)",
            "sw $a1, 4($sp)",
            "lw $t0, 0($sp)",
            "lw $t1, 4($sp)",
            "add $t2, $t0, $t1",
            "move $v0, $t2",
            "lw $ra, 0($sp)",
            "addi $sp, $sp, 4",
            "jr $ra",
            "main:",
            "addi $sp, $sp, -4",
            "li $t0, 2",
            "li $t1, 3",
            "move $a0, $t0",
            "move $a1, $t1",
            "jal add",
            "move $t2, $v0",
            "sw $t2, 0($sp)",
            "li $v0, 10",
            "syscall",
        ]
    );
}

#[test]
fn test_illegal_character_is_skipped() {
    let source = "x = 1 @ + 2;";
    let compilation = Frontend::compile_with_options(source, &CompileOptions::default()).unwrap();

    assert_eq!(compilation.diagnostics.len(), 1);
    assert_eq!(compilation.assembly, compile("x = 1 + 2;").unwrap());
}

#[test]
fn test_call_with_five_arguments() {
    let lines = compile_lines("r = f(1, 2, 3, 4, 5);");

    assert_eq!(count(&lines, "move $a"), 4);
    assert!(lines.contains(&"li $t0, 5".to_string()));
    assert_eq!(count(&lines, "jal f"), 1);
}

#[test]
fn test_single_entry_point() {
    let sources = [
        "",
        "x = 1;",
        "function f() { return 1; }",
        "function f(a) { return a; } function g(b) { return f(b); } y = g(2);",
        "while (i > 0) { if (i > 2) { i = i - 2; } else { i = i - 1; } }",
    ];

    for source in sources {
        if source.is_empty() {
            assert!(compile(source).is_err());
            continue;
        }
        let lines = compile_lines(source);
        assert_eq!(count(&lines, "main:"), 1, "source: {source}");
        assert_eq!(count(&lines, ".globl main"), 1, "source: {source}");
        assert_eq!(lines[lines.len() - 2..], ["li $v0, 10", "syscall"]);
    }
}

#[test]
fn test_compilation_is_deterministic() {
    let source = "function sq(n) { return n * n; } a = 3; while (a > 0) { b = sq(a); a = a - 1; }";
    assert_eq!(compile(source).unwrap(), compile(source).unwrap());
}

#[test]
fn test_functions_precede_main_in_source_order() {
    let lines = compile_lines("x = 1; function b() { return 2; } y = 2; function a() { return 1; }");
    let b = lines.iter().position(|l| l == "b:").unwrap();
    let a = lines.iter().position(|l| l == "a:").unwrap();
    let main = lines.iter().position(|l| l == "main:").unwrap();

    assert!(b < a && a < main);
    assert_eq!(count(&lines, "addi $sp, $sp, -4"), 4);
}

#[test]
fn test_main_scope_starts_empty() {
    let lines = compile_lines("function f(p) { q = p; return q; } z = 7;");
    let main = lines.iter().position(|l| l == "main:").unwrap();

    assert_eq!(lines[main + 1..main + 4], ["addi $sp, $sp, -4", "li $t0, 7", "sw $t0, 0($sp)"]);
}

#[test]
fn test_parse_errors_name_the_token() {
    let err = compile("x = 1 + ;").unwrap_err();
    match err {
        CompilerError::ParseError { message, location } => {
            assert!(message.starts_with("Syntax error at ';'"), "{message}");
            assert_eq!((location.line, location.column), (1, 9));
        }
        other => panic!("Expected parse error, got {:?}", other),
    }

    let err = compile("while (a > b) { a = 1;").unwrap_err();
    assert!(err.to_string().contains("Syntax error at EOF"), "{err}");
}

#[test]
fn test_comparison_other_than_greater_is_rejected() {
    assert!(compile("if (a < b) { x = 1; }").is_err());
    assert!(compile("if (a) { x = 1; }").is_err());
}

#[test]
fn test_ast_serializes_to_json() {
    let (program, _) =
        Frontend::parse_source("function add(x, y) { return x + y; }", &CompileOptions::default())
            .unwrap();
    let json = serde_json::to_value(&program).unwrap();

    assert_eq!(json["items"][0]["Function"]["name"], "add");
    assert_eq!(json["items"][0]["Function"]["params"], serde_json::json!(["x", "y"]));

    let back: mcc_frontend::Program = serde_json::from_value(json).unwrap();
    assert!(matches!(back.items[0], TopLevelItem::Function(_)));
}

#[test]
fn test_deeply_parenthesized_value_compiles() {
    let source = format!("x = {}1{};", "(".repeat(10_000), ")".repeat(10_000));
    assert_eq!(compile(&source).unwrap(), compile("x = 1;").unwrap());
}

#[test]
fn test_excessive_block_nesting_is_a_located_error() {
    let depth = 10_000;
    let source = "if (a > 0) { ".repeat(depth) + "a = 0;" + &" }".repeat(depth);

    match compile(&source).unwrap_err() {
        CompilerError::ParseError { message, location } => {
            assert_eq!(
                message,
                format!("Nesting too deep in block: more than {} levels", MAX_NESTING_DEPTH)
            );
            assert_eq!(location.line, 1);
        }
        other => panic!("Expected parse error, got {:?}", other),
    }
}

#[test]
fn test_nesting_at_limit_compiles() {
    let depth = MAX_NESTING_DEPTH;
    let source = "while (a > 0) { ".repeat(depth) + "a = a - 1;" + &" }".repeat(depth);
    let lines = compile_lines(&source);

    assert_eq!(count(&lines, "j L"), depth);
}

#[test]
fn test_unassigned_self_read_loads_own_slot() {
    let source = "a = 1; n = n + 1;";
    let lines = compile_lines(source);
    assert!(lines.contains(&"lw $t1, 4($sp)".to_string()));

    let options = CompileOptions {
        run_checks: true,
        ..CompileOptions::default()
    };
    let compilation = Frontend::compile_with_options(source, &options).unwrap();
    assert_eq!(
        compilation.diagnostics[0].notes,
        vec!["it is loaded from stack offset 4".to_string()]
    );
}
