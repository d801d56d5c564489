//! The module dialect. Overrides a handful of es5 rules by name
//! (lexical declarations, shorthand methods, the top-level item list)
//! and adds the import/export productions. Everything it does not
//! override falls through to the shared es5 table, and because rule
//! dispatch goes by name through the active grammar, es5 rule bodies
//! pick these overrides up transparently.

use crate::engine::{Grammar, Parser, RuleFn};
use crate::grammar::es5;
use crate::result::Match;
use crate::terminals::{BaseTerminals, ModuleTerminals};

pub struct Es2015Grammar;

impl Grammar for Es2015Grammar {
    fn name(&self) -> &'static str {
        "Es2015"
    }

    fn resolve(&self, rule: &str) -> Option<RuleFn<Self>> {
        resolve(rule).or_else(|| es5::resolve(rule))
    }
}

fn resolve<G: Grammar>(rule: &str) -> Option<RuleFn<G>> {
    let body: RuleFn<G> = match rule {
        "ModuleItemList" => module_item_list,
        "VariableLetOrConst" => variable_let_or_const,
        "PropertyDefinition" => property_definition,
        "MethodDefinition" => method_definition,
        "ImportDeclaration" => import_declaration,
        "ImportClause" => import_clause,
        "NamedImports" => named_imports,
        "ImportsList" => imports_list,
        "ImportSpecifier" => import_specifier,
        "NameSpaceImport" => name_space_import,
        "FromClause" => from_clause,
        "ExportDeclaration" => export_declaration,
        "NamedExports" => named_exports,
        "ExportsList" => exports_list,
        "ExportSpecifier" => export_specifier,
        "ArrowParameters" => arrow_parameters,
        _ => return None
    };
    Some(body)
}

// ModuleItemList : (ImportDeclaration | ExportDeclaration | StatementListItem)*
fn module_item_list<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.fault_tolerant_many(|p| {
        p.or(&[
            ("ImportDeclaration", &|p| p.rule(g, "ImportDeclaration")),
            ("ExportDeclaration", &|p| p.rule(g, "ExportDeclaration")),
            ("StatementListItem", &|p| p.rule(g, "StatementListItem"))
        ])
    })
}

fn variable_let_or_const<G: Grammar>(_: &G, p: &mut Parser<'_>) -> Match<()> {
    p.or(&[
        ("Let", &|p| p.let_kw()),
        ("Const", &|p| p.const_kw()),
        ("Var", &|p| p.var_kw())
    ])
}

// MethodDefinition must come before IdentifierReference: both start
// with an identifier, and first success wins.
fn property_definition<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.or(&[
        ("MethodDefinition", &|p| p.rule(g, "MethodDefinition")),
        ("PropertyAssignment", &|p| p.rule(g, "PropertyAssignment")),
        ("IdentifierReference", &|p| p.rule(g, "IdentifierReference"))
    ])
}

// MethodDefinition : PropertyName "(" FormalParameters? ")" "{" FunctionBody "}"
fn method_definition<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.rule(g, "PropertyName")?;
    p.l_paren()?;
    p.option(|p| p.rule(g, "FormalParameters"))?;
    p.r_paren()?;
    p.l_brace()?;
    p.rule(g, "FunctionBody")?;
    p.r_brace()
}

// ImportDeclaration : "import" (ImportClause FromClause | ModuleSpecifier) ";"
fn import_declaration<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.import_kw()?;
    p.or(&[
        ("ImportClause", &|p| {
            p.rule(g, "ImportClause")?;
            p.rule(g, "FromClause")
        }),
        ("ModuleSpecifier", &|p| p.string_literal())
    ])?;
    p.semicolon()
}

fn import_clause<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.or(&[
        ("NamedImports", &|p| p.rule(g, "NamedImports")),
        ("NameSpaceImport", &|p| p.rule(g, "NameSpaceImport")),
        ("BindingIdentifier", &|p| p.rule(g, "BindingIdentifier"))
    ])
}

fn named_imports<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.l_brace()?;
    p.option(|p| {
        p.rule(g, "ImportsList")?;
        p.option(|p| p.comma())
    })?;
    p.r_brace()
}

fn imports_list<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.rule(g, "ImportSpecifier")?;
    p.many(|p| {
        p.comma()?;
        p.rule(g, "ImportSpecifier")
    })
}

// ImportSpecifier : Identifier ("as" Identifier)?
fn import_specifier<G: Grammar>(_: &G, p: &mut Parser<'_>) -> Match<()> {
    p.identifier()?;
    p.option(|p| {
        p.as_kw()?;
        p.identifier()
    })
}

// NameSpaceImport : "*" "as" BindingIdentifier
fn name_space_import<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.star()?;
    p.as_kw()?;
    p.rule(g, "BindingIdentifier")
}

fn from_clause<G: Grammar>(_: &G, p: &mut Parser<'_>) -> Match<()> {
    p.from_kw()?;
    p.string_literal()
}

fn export_declaration<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.export_kw()?;
    p.or(&[
        ("ExportFrom", &|p| {
            p.star()?;
            p.rule(g, "FromClause")?;
            p.semicolon()
        }),
        ("NamedExports", &|p| {
            p.rule(g, "NamedExports")?;
            p.option(|p| p.rule(g, "FromClause"))?;
            p.semicolon()
        }),
        ("VariableDeclaration", &|p| p.rule(g, "VariableDeclaration")),
        ("FunctionDeclaration", &|p| p.rule(g, "FunctionDeclaration")),
        ("ExportDefault", &|p| {
            p.default_kw()?;
            p.rule(g, "AssignmentExpression")?;
            p.semicolon()
        })
    ])
}

fn named_exports<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.l_brace()?;
    p.option(|p| {
        p.rule(g, "ExportsList")?;
        p.option(|p| p.comma())
    })?;
    p.r_brace()
}

fn exports_list<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.rule(g, "ExportSpecifier")?;
    p.many(|p| {
        p.comma()?;
        p.rule(g, "ExportSpecifier")
    })
}

fn export_specifier<G: Grammar>(_: &G, p: &mut Parser<'_>) -> Match<()> {
    p.identifier()?;
    p.option(|p| {
        p.as_kw()?;
        p.identifier()
    })
}

// TODO: arrow functions need a cover grammar shared with
// ParenthesizedExpression; until that lands this rule matches nothing
// and yields an empty node, and no expression rule reaches it.
fn arrow_parameters<G: Grammar>(_: &G, _: &mut Parser<'_>) -> Match<()> {
    Ok(())
}
