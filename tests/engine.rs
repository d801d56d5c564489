//! Engine semantics exercised through a small grammar built just for
//! these tests. The ECMAScript dialects get their own coverage; here the
//! point is the combinator contracts themselves: rollback hygiene,
//! ordered choice, progress enforcement, and recovery.

use espalier::{CstNode, Grammar, Kind, Match, Parser, ParseErrorKind, RuleFn};

struct Toy;

impl Grammar for Toy {
    fn name(&self) -> &'static str {
        "Toy"
    }

    fn resolve(&self, rule: &str) -> Option<RuleFn<Self>> {
        let body: RuleFn<Self> = match rule {
            "Entry" => entry,
            "HalfOpen" => half_open,
            "Parens" => parens,
            "Choice" => choice,
            "First" => first,
            "Second" => second,
            "Idents" => idents,
            "Stuck" => stuck,
            "Nothing" => nothing,
            "Items" => items,
            "Item" => item,
            "Group" => group,
            "Introspect" => introspect,
            _ => return None
        };
        Some(body)
    }
}

// Entry : HalfOpen | Parens — the first alternative consumes a token
// and then dies, to prove rollback leaves no trace of it.
fn entry(g: &Toy, p: &mut Parser<'_>) -> Match<()> {
    p.or(&[
        ("HalfOpen", &|p| p.rule(g, "HalfOpen")),
        ("Parens", &|p| p.rule(g, "Parens"))
    ])
}

fn half_open(_: &Toy, p: &mut Parser<'_>) -> Match<()> {
    p.terminal(Kind::LParen)?;
    p.terminal(Kind::LParen)
}

fn parens(_: &Toy, p: &mut Parser<'_>) -> Match<()> {
    p.terminal(Kind::LParen)?;
    p.terminal(Kind::RParen)
}

fn choice(g: &Toy, p: &mut Parser<'_>) -> Match<()> {
    p.or(&[
        ("First", &|p| p.rule(g, "First")),
        ("Second", &|p| p.rule(g, "Second"))
    ])
}

fn first(_: &Toy, p: &mut Parser<'_>) -> Match<()> {
    p.terminal(Kind::Identifier)
}

fn second(_: &Toy, p: &mut Parser<'_>) -> Match<()> {
    p.terminal(Kind::Identifier)
}

fn idents(_: &Toy, p: &mut Parser<'_>) -> Match<()> {
    p.many(|p| p.terminal(Kind::Identifier))
}

fn stuck(g: &Toy, p: &mut Parser<'_>) -> Match<()> {
    p.many(|p| p.rule(g, "Nothing"))
}

fn nothing(_: &Toy, _: &mut Parser<'_>) -> Match<()> {
    Ok(())
}

fn items(g: &Toy, p: &mut Parser<'_>) -> Match<()> {
    p.fault_tolerant_many(|p| p.rule(g, "Item"))
}

fn item(g: &Toy, p: &mut Parser<'_>) -> Match<()> {
    p.or(&[
        ("Identifier", &|p| p.terminal(Kind::Identifier)),
        ("Group", &|p| p.rule(g, "Group"))
    ])
}

fn group(_: &Toy, p: &mut Parser<'_>) -> Match<()> {
    p.terminal(Kind::LParen)?;
    p.terminal(Kind::Identifier)?;
    p.terminal(Kind::RParen)
}

fn introspect(_: &Toy, p: &mut Parser<'_>) -> Match<()> {
    assert_eq!(p.cst().name, "Introspect");
    assert!(p.cst().children.is_empty());
    p.terminal(Kind::Identifier)?;
    assert_eq!(p.cst().children.len(), 1);
    Ok(())
}

fn parse(src: &str, entry: &'static str) -> Result<CstNode, espalier::ParseError> {
    let tokens = sprig::lex(src).expect("test source should lex");
    Parser::parse(&Toy, &tokens, entry)
}

#[test]
fn failed_alternative_leaves_no_trace() {
    let cst = parse("()", "Entry").unwrap();
    assert_eq!(cst.name, "Entry");
    assert_eq!(cst.children.len(), 1, "only the winning alternative:\n{}", cst.to_tree_string());
    let parens = &cst.children[0];
    assert_eq!(parens.name, "Parens");
    let names: Vec<&str> = parens.children.iter().map(|c| c.name).collect();
    assert_eq!(names, ["LParen", "RParen"]);
}

#[test]
fn ordered_choice_first_success_wins() {
    let cst = parse("x", "Choice").unwrap();
    assert_eq!(cst.children[0].name, "First");
}

#[test]
fn no_alternative_reports_the_labels_tried() {
    let err = parse("42", "Choice").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::NoAlternative);
    assert!(err.expected.contains(&"First"));
    assert!(err.expected.contains(&"Second"));
}

#[test]
fn many_matches_zero_or_more() {
    let cst = parse("a b c", "Idents").unwrap();
    assert_eq!(cst.children.len(), 3);

    let cst = parse("", "Idents").unwrap();
    assert!(cst.children.is_empty());
    assert_eq!(cst.loc, None);
}

#[test]
fn non_progressing_repetition_is_fatal() {
    let err = parse("", "Stuck").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::NonProgressingRepetition);
}

#[test]
fn fault_tolerant_many_skips_and_resumes() {
    let cst = parse("a ; ( b ) ; c", "Items").unwrap();
    let names: Vec<&str> = cst.children.iter().map(|c| c.name).collect();
    assert_eq!(names, ["Item", "ErrorNode", "Item", "ErrorNode", "Item"]);
    assert_eq!(cst.children[1].value.as_deref(), Some(";"));
    assert_eq!(cst.children[2].children[0].name, "Group");
}

#[test]
fn fault_tolerant_many_consumes_pure_garbage() {
    let cst = parse("; ; ;", "Items").unwrap();
    assert!(cst.children.iter().all(|c| c.name == "ErrorNode"));
    assert_eq!(cst.children.len(), 3);
}

#[test]
fn terminal_leaves_carry_token_values_and_spans() {
    let cst = parse("( hello )", "Group").unwrap();
    let ident = cst.find("Identifier").unwrap();
    assert!(ident.is_terminal());
    assert_eq!(ident.value.as_deref(), Some("hello"));
    let loc = ident.loc.unwrap();
    assert_eq!(loc.index, 1);
    assert_eq!(loc.start.column, 2);
}

#[test]
fn unknown_rule_is_fatal() {
    let err = parse("x", "NoSuchRule").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnknownRule);
}

#[test]
fn trailing_input_is_rejected() {
    let err = parse("( x ) y", "Group").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::TokenMismatch);
    assert_eq!(err.expected, vec!["end of input"]);
    assert_eq!(err.got.as_ref().unwrap().value, "y");
}

#[test]
fn furthest_reach_beats_shallow_failures() {
    // Group gets past "(" and "x" before missing its ")"; the report
    // points at the deepest token, not at the start of the choice.
    let err = parse("( x (", "Item").unwrap_err();
    assert_eq!(err.index, 2);
    assert!(err.expected.contains(&"RParen"));
}

#[test]
fn open_node_is_visible_to_rule_bodies() {
    parse("x", "Introspect").unwrap();
}

#[test]
fn end_of_input_diagnostics_have_no_got_token() {
    let err = parse("(", "Group").unwrap_err();
    assert!(err.got.is_none());
    assert_eq!(err.index, 1);
    assert!(err.message.contains("end of input"));
}
