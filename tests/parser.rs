//! End-to-end tests over the full pipeline: source text through sprig,
//! the espalier engine with the ECMAScript grammars, and assertions on
//! the resulting concrete syntax trees.

use std::{env, thread};

use espalier::grammar::{Es2015Grammar, Es5Grammar};
use espalier::{module, script, CstNode, Parser};

fn parse_module(src: &str) -> CstNode {
    module(src).expect("module should parse")
}

fn parse_entry(src: &str, entry: &'static str) -> CstNode {
    let tokens = sprig::lex(src).expect("source should lex");
    Parser::parse(&Es2015Grammar, &tokens, entry).expect("entry rule should parse")
}

/// Descend along a path of rule names, taking the first child with each
/// name in turn.
fn descend<'a>(mut node: &'a CstNode, path: &[&str]) -> &'a CstNode {
    for name in path {
        node = node
            .find(name)
            .unwrap_or_else(|| panic!("no {} inside {}:\n{}", name, node.name, node.to_tree_string()));
    }
    node
}

#[test]
fn empty_module() {
    let cst = parse_module("");
    assert_eq!(cst.name, "Program");
    assert_eq!(cst.loc, None);
    assert_eq!(cst.children.len(), 1);
    let list = &cst.children[0];
    assert_eq!(list.name, "ModuleItemList");
    assert!(list.children.is_empty());
    assert_eq!(list.loc, None);
}

#[test]
fn single_let_declaration() {
    let cst = parse_module("let x = 1;");
    let decl = descend(&cst, &[
        "ModuleItemList",
        "StatementListItem",
        "Statement",
        "VariableDeclaration"
    ]);

    let keyword = descend(decl, &["VariableLetOrConst", "Let"]);
    assert_eq!(keyword.value.as_deref(), Some("let"));

    let dtor = descend(decl, &["VariableDeclarationList", "VariableDeclarator"]);
    let binding = descend(dtor, &["BindingIdentifier", "Identifier"]);
    assert_eq!(binding.value.as_deref(), Some("x"));

    let init = descend(dtor, &["Initializer"]);
    assert_eq!(init.children[0].name, "Eq");
    let value = descend(init, &["AssignmentExpression"]);
    // The precedence ladder bottoms out at the literal leaf.
    let mut node = value;
    while node.value.is_none() {
        assert_eq!(node.children.len(), 1, "ladder nodes here are unary chains");
        node = &node.children[0];
    }
    assert_eq!(node.name, "NumericLiteral");
    assert_eq!(node.value.as_deref(), Some("1"));

    assert!(decl.find("Semicolon").is_some());
}

#[test]
fn method_definition_wins_over_identifier_reference() {
    let cst = parse_module("({ m() {} });");
    let object = descend(&cst, &[
        "ModuleItemList",
        "StatementListItem",
        "Statement",
        "ExpressionStatement"
    ]);
    let definition = first_descendant(object, "PropertyDefinition")
        .expect("object literal should hold a property definition");
    assert_eq!(definition.children.len(), 1);
    assert_eq!(definition.children[0].name, "MethodDefinition");
}

#[test]
fn postfix_option_backtracks_cleanly() {
    let cst = parse_entry("a", "PostfixExpression");
    assert_eq!(cst.name, "PostfixExpression");
    assert_eq!(cst.children.len(), 1);
    assert_eq!(cst.children[0].name, "LeftHandSideExpression");
}

#[test]
fn fault_tolerance_skips_bad_item_and_recovers() {
    let cst = parse_module("let ; let y = 2;");
    let list = descend(&cst, &["ModuleItemList"]);

    assert!(
        list.children.iter().any(|c| c.name == "ErrorNode"),
        "the broken declaration should leave an ErrorNode:\n{}",
        list.to_tree_string()
    );

    let last = list.children.last().expect("recovered item expected");
    let decl = descend(last, &["Statement", "VariableDeclaration"]);
    let binding = descend(decl, &[
        "VariableDeclarationList",
        "VariableDeclarator",
        "BindingIdentifier",
        "Identifier"
    ]);
    assert_eq!(binding.value.as_deref(), Some("y"));
}

#[test]
fn member_call_chain_is_flat_suffixes() {
    let cst = parse_entry("a.b.c()[0]", "LeftHandSideExpression");
    assert_eq!(cst.children.len(), 1);
    let call = &cst.children[0];
    assert_eq!(call.name, "CallExpression");

    let names: Vec<&str> = call.children.iter().map(|c| c.name).collect();
    assert_eq!(names, ["MemberExpression", "Arguments", "BracketExpression"]);

    let member = &call.children[0];
    let dots: Vec<&CstNode> = member.find_all("DotExpression").collect();
    assert_eq!(dots.len(), 2);
    assert_eq!(descend(dots[0], &["Identifier"]).value.as_deref(), Some("b"));
    assert_eq!(descend(dots[1], &["Identifier"]).value.as_deref(), Some("c"));
}

#[test]
fn es5_dialect_has_no_method_shorthand() {
    // Colon properties parse in both dialects.
    assert!(script("({ m: 1 });").is_ok());

    // Shorthand methods only exist in the es2015 dialect; under es5 the
    // object literal fails to match and fault tolerance records the
    // pieces as error nodes instead of failing the parse.
    let cst = script("({ m() {} });").expect("es5 parse still returns a tree");
    let list = descend(&cst, &["ModuleItemList"]);
    assert!(list.children.iter().any(|c| c.name == "ErrorNode"));

    let cst = module("({ m() {} });").expect("es2015 parse");
    let list = descend(&cst, &["ModuleItemList"]);
    assert!(list.children.iter().all(|c| c.name != "ErrorNode"));
}

#[test]
fn es5_variable_declarations_use_var_only() {
    let cst = script("var x = 1;").expect("var should parse under es5");
    let decl = descend(&cst, &[
        "ModuleItemList",
        "StatementListItem",
        "Statement",
        "VariableDeclaration",
        "VariableLetOrConst"
    ]);
    assert_eq!(decl.children[0].name, "Var");

    let tokens = sprig::lex("const x = 1;").unwrap();
    let cst = Parser::parse(&Es5Grammar, &tokens, "Program").expect("tree with error nodes");
    assert!(descend(&cst, &["ModuleItemList"])
        .children
        .iter()
        .any(|c| c.name == "ErrorNode"));
}

#[test]
fn statements_cover_control_flow() {
    let src = "\
        if (a) { b(); } else ;\n\
        while (a < 10) { a += 1; }\n\
        do { a--; } while (a);\n\
        for (let i = 0; i < n; i++) { f(i); }\n\
        for (;;) { break; }\n\
        function g(x, y) { return x + y; }\n\
        throw err;\n\
        continue;\n";
    let cst = parse_module(src);
    let list = descend(&cst, &["ModuleItemList"]);
    assert!(list.children.iter().all(|c| c.name != "ErrorNode"), "{}", list.to_tree_string());
    assert_eq!(list.children.len(), 8);
}

#[test]
fn module_items_import_and_export() {
    let src = "\
        import 'polyfill';\n\
        import { a, b as c } from 'mod';\n\
        import * as ns from 'mod';\n\
        import d from 'mod';\n\
        export * from 'mod';\n\
        export { a, b as c };\n\
        export let answer = 42;\n\
        export default a + 1;\n";
    let cst = parse_module(src);
    let list = descend(&cst, &["ModuleItemList"]);
    assert!(list.children.iter().all(|c| c.name != "ErrorNode"), "{}", list.to_tree_string());

    let imports: Vec<&CstNode> = list.find_all("ImportDeclaration").collect();
    assert_eq!(imports.len(), 4);
    assert!(imports[1].find("ImportClause").is_some());

    let exports: Vec<&CstNode> = list.find_all("ExportDeclaration").collect();
    assert_eq!(exports.len(), 4);
    assert!(exports[3].find("Default").is_some());
}

#[test]
fn expression_ladder_keeps_every_level() {
    let cst = parse_entry("1 + 2 * 3", "Expression");
    let additive = first_descendant(&cst, "AdditiveExpression").unwrap();
    // One multiplicative operand on each side of the plus.
    let operands: Vec<&CstNode> = additive.find_all("MultiplicativeExpression").collect();
    assert_eq!(operands.len(), 2);
    assert!(additive.find("Plus").is_some());
    assert!(operands[1].find("Star").is_some());
}

#[test]
fn furthest_reach_error_position() {
    // Entry rules without the fault-tolerant loop surface real errors.
    let tokens = sprig::lex("(a +").unwrap();
    let err = Parser::parse(&Es2015Grammar, &tokens, "Expression").unwrap_err();
    // The deepest attempt consumed "(a +" and failed needing an operand.
    assert_eq!(err.index, 3);
}

#[test]
fn spans_are_line_and_column_accurate() {
    let cst = parse_module("let x = 1;\nlet y = 2;");
    let list = descend(&cst, &["ModuleItemList"]);
    let second = &list.children[1];
    let loc = second.loc.expect("second item spans tokens");
    assert_eq!(loc.start.line, 1);
    assert_eq!(loc.start.column, 0);
    assert_eq!(loc.index, 5);

    let program_loc = cst.loc.expect("program spans everything");
    assert_eq!(program_loc.index, 0);
    assert_eq!(program_loc.end.line, 1);
}

#[test]
fn determinism_structural_equality() {
    let src = "let x = f(a, b)[0] + --c; ({ m() { return 1; } });";
    assert_eq!(parse_module(src), parse_module(src));
}

#[test]
fn cst_serializes_to_json() {
    let cst = parse_module("let x = 1;");
    let json = serde_json::to_value(&cst).expect("tree should serialize");
    assert_eq!(json["name"], "Program");
    assert_eq!(json["children"][0]["name"], "ModuleItemList");
    assert_eq!(json["loc"]["index"], 0);
}

const DEFAULT_MB: usize = 16;

fn stack_size() -> usize {
    let mb = env::var("ESPALIER_STACK_SIZE_MB")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_MB);
    mb * 1024 * 1024
}

#[test]
fn deeply_nested_expressions_parse_on_a_big_stack() {
    let child = thread::Builder::new()
        .stack_size(stack_size())
        .spawn(|| {
            let depth = 150;
            let src = format!("{}1{};", "(".repeat(depth), ")".repeat(depth));
            parse_module(&src)
        })
        .expect("spawn parser thread");
    let cst = child.join().expect("deep parse should not overflow");
    assert!(first_descendant(&cst, "NumericLiteral").is_some());
}

/// First node with the given name anywhere below `node`, depth first.
fn first_descendant<'a>(node: &'a CstNode, name: &str) -> Option<&'a CstNode> {
    if node.name == name {
        return Some(node);
    }
    node.children.iter().find_map(|c| first_descendant(c, name))
}
