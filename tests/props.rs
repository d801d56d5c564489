//! Property tests for the engine invariants: determinism, span
//! monotonicity and containment, terminal identity, and the guarantee
//! that the fault-tolerant top level always returns a tree.

use proptest::prelude::*;

use espalier::grammar::Es2015Grammar;
use espalier::{CstNode, MatchToken, Parser};

// A soup of fragments that covers keywords, literals, operators, and
// brackets. Any join of these lexes cleanly, but most sequences are not
// grammatical, which is exactly what recovery has to survive.
const FRAGMENTS: &[&str] = &[
    "let", "var", "const", "x", "y", "f", "=", "1", "2.5", "'s'", ";", ",", "(", ")", "{", "}",
    "[", "]", "+", "-", "*", ".", "if", "else", "while", "return", "function", "==", "++",
    "import", "from", "new", "!", "?", ":"
];

fn soup() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(FRAGMENTS), 0..24)
        .prop_map(|parts| parts.join(" "))
}

fn walk(node: &CstNode, tokens: &[MatchToken]) {
    if let Some(loc) = node.loc {
        let mut last_index = None;
        for child in &node.children {
            if let Some(child_loc) = child.loc {
                // Children appear in token order and inside the parent.
                if let Some(last) = last_index {
                    assert!(child_loc.index >= last, "siblings out of order");
                }
                last_index = Some(child_loc.index);
                assert!(child_loc.index >= loc.index, "child starts before parent");
                assert!(child_loc.end.line <= loc.end.line, "child ends after parent");
            }
        }
    } else {
        assert!(
            node.children.iter().all(|c| c.loc.is_none()),
            "a located child under an unlocated parent"
        );
    }
    if node.is_terminal() {
        assert!(node.children.is_empty(), "terminal with children");
        let loc = node.loc.expect("terminals always span their token");
        let token = &tokens[loc.index as usize];
        assert_eq!(node.value.as_deref(), Some(token.value.as_str()), "terminal identity");
        assert_eq!(loc, token.span, "terminal location identity");
    }
    for child in &node.children {
        walk(child, tokens);
    }
}

proptest! {
    // The fault-tolerant top level turns arbitrary token soup into a
    // tree rather than an error, and parsing is deterministic.
    #[test]
    fn program_parse_is_total_and_deterministic(src in soup()) {
        let tokens = sprig::lex(&src).expect("fragments always lex");
        let one = Parser::parse(&Es2015Grammar, &tokens, "Program").expect("recovery yields a tree");
        let two = Parser::parse(&Es2015Grammar, &tokens, "Program").expect("recovery yields a tree");
        prop_assert_eq!(&one, &two);
    }

    #[test]
    fn spans_are_monotone_and_terminals_faithful(src in soup()) {
        let tokens = sprig::lex(&src).expect("fragments always lex");
        let cst = Parser::parse(&Es2015Grammar, &tokens, "Program").expect("recovery yields a tree");
        walk(&cst, &tokens);
    }

    // Every input token lands in the tree exactly once: matched into a
    // leaf or recorded as an ErrorNode.
    #[test]
    fn no_token_is_dropped_or_duplicated(src in soup()) {
        let tokens = sprig::lex(&src).expect("fragments always lex");
        let cst = Parser::parse(&Es2015Grammar, &tokens, "Program").expect("recovery yields a tree");
        let mut seen = Vec::new();
        collect_leaf_indices(&cst, &mut seen);
        let expected: Vec<u32> = (0..tokens.len() as u32).collect();
        prop_assert_eq!(seen, expected);
    }
}

fn collect_leaf_indices(node: &CstNode, out: &mut Vec<u32>) {
    if node.is_terminal() {
        if let Some(loc) = node.loc {
            out.push(loc.index);
        }
        return;
    }
    for child in &node.children {
        collect_leaf_indices(child, out);
    }
}
