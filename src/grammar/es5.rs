//! The base dialect: ES5 statements and the full expression precedence
//! ladder. Every rule body is generic over the active grammar and calls
//! sub-rules by name, so a richer dialect can override any rule here
//! without touching these bodies.

use crate::engine::{Grammar, Parser, RuleFn};
use crate::result::Match;
use crate::terminals::BaseTerminals;

pub struct Es5Grammar;

impl Grammar for Es5Grammar {
    fn name(&self) -> &'static str {
        "Es5"
    }

    fn resolve(&self, rule: &str) -> Option<RuleFn<Self>> {
        resolve(rule)
    }
}

pub(crate) fn resolve<G: Grammar>(rule: &str) -> Option<RuleFn<G>> {
    let body: RuleFn<G> = match rule {
        "Program" => program,
        "ModuleItemList" => module_item_list,
        "StatementListItem" => statement_list_item,
        "Statement" => statement,
        "BlockStatement" => block_statement,
        "VariableDeclaration" => variable_declaration,
        "VariableLetOrConst" => variable_let_or_const,
        "VariableDeclarationList" => variable_declaration_list,
        "VariableDeclarator" => variable_declarator,
        "BindingIdentifier" => binding_identifier,
        "Initializer" => initializer,
        "EmptyStatement" => empty_statement,
        "ExpressionStatement" => expression_statement,
        "IfStatement" => if_statement,
        "WhileStatement" => while_statement,
        "DoWhileStatement" => do_while_statement,
        "ForStatement" => for_statement,
        "ReturnStatement" => return_statement,
        "BreakStatement" => break_statement,
        "ContinueStatement" => continue_statement,
        "ThrowStatement" => throw_statement,
        "FunctionDeclaration" => function_declaration,
        "FunctionExpression" => function_expression,
        "FormalParameters" => formal_parameters,
        "FunctionBody" => function_body,
        "Expression" => expression,
        "AssignmentExpression" => assignment_expression,
        "ConditionalExpression" => conditional_expression,
        "LogicalOrExpression" => logical_or_expression,
        "LogicalAndExpression" => logical_and_expression,
        "BitwiseOrExpression" => bitwise_or_expression,
        "BitwiseXorExpression" => bitwise_xor_expression,
        "BitwiseAndExpression" => bitwise_and_expression,
        "EqualityExpression" => equality_expression,
        "RelationalExpression" => relational_expression,
        "ShiftExpression" => shift_expression,
        "AdditiveExpression" => additive_expression,
        "MultiplicativeExpression" => multiplicative_expression,
        "UnaryExpression" => unary_expression,
        "PostfixExpression" => postfix_expression,
        "LeftHandSideExpression" => left_hand_side_expression,
        "CallExpression" => call_expression,
        "MemberExpression" => member_expression,
        "NewMemberExpression" => new_member_expression,
        "BracketExpression" => bracket_expression,
        "DotExpression" => dot_expression,
        "Arguments" => arguments,
        "ArgumentList" => argument_list,
        "PrimaryExpression" => primary_expression,
        "ParenthesizedExpression" => parenthesized_expression,
        "IdentifierReference" => identifier_reference,
        "Literal" => literal,
        "ArrayLiteral" => array_literal,
        "ElementList" => element_list,
        "ObjectLiteral" => object_literal,
        "PropertyDefinitionList" => property_definition_list,
        "PropertyDefinition" => property_definition,
        "PropertyAssignment" => property_assignment,
        "PropertyName" => property_name,
        _ => return None
    };
    Some(body)
}

// Program : ModuleItemList
fn program<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.rule(g, "ModuleItemList")
}

// ModuleItemList : StatementListItem*
//
// The fault-tolerant loop records unparsable tokens as ErrorNode leaves
// instead of aborting, so a partial tree always comes back.
fn module_item_list<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.fault_tolerant_many(|p| p.rule(g, "StatementListItem"))
}

fn statement_list_item<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.or(&[
        ("FunctionDeclaration", &|p| p.rule(g, "FunctionDeclaration")),
        ("Statement", &|p| p.rule(g, "Statement"))
    ])
}

fn statement<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.or(&[
        ("BlockStatement", &|p| p.rule(g, "BlockStatement")),
        ("VariableDeclaration", &|p| p.rule(g, "VariableDeclaration")),
        ("EmptyStatement", &|p| p.rule(g, "EmptyStatement")),
        ("IfStatement", &|p| p.rule(g, "IfStatement")),
        ("WhileStatement", &|p| p.rule(g, "WhileStatement")),
        ("DoWhileStatement", &|p| p.rule(g, "DoWhileStatement")),
        ("ForStatement", &|p| p.rule(g, "ForStatement")),
        ("ReturnStatement", &|p| p.rule(g, "ReturnStatement")),
        ("BreakStatement", &|p| p.rule(g, "BreakStatement")),
        ("ContinueStatement", &|p| p.rule(g, "ContinueStatement")),
        ("ThrowStatement", &|p| p.rule(g, "ThrowStatement")),
        ("ExpressionStatement", &|p| p.rule(g, "ExpressionStatement"))
    ])
}

fn block_statement<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.l_brace()?;
    p.many(|p| p.rule(g, "StatementListItem"))?;
    p.r_brace()
}

// VariableDeclaration : VariableLetOrConst VariableDeclarationList ";"
fn variable_declaration<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.rule(g, "VariableLetOrConst")?;
    p.rule(g, "VariableDeclarationList")?;
    p.semicolon()
}

// Only `var` here; the es2015 dialect overrides this rule to admit
// `let` and `const` as well.
fn variable_let_or_const<G: Grammar>(_: &G, p: &mut Parser<'_>) -> Match<()> {
    p.var_kw()
}

fn variable_declaration_list<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.rule(g, "VariableDeclarator")?;
    p.many(|p| {
        p.comma()?;
        p.rule(g, "VariableDeclarator")
    })
}

fn variable_declarator<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.rule(g, "BindingIdentifier")?;
    p.option(|p| p.rule(g, "Initializer"))
}

fn binding_identifier<G: Grammar>(_: &G, p: &mut Parser<'_>) -> Match<()> {
    p.identifier()
}

// Initializer : "=" AssignmentExpression
fn initializer<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.eq()?;
    p.rule(g, "AssignmentExpression")
}

fn empty_statement<G: Grammar>(_: &G, p: &mut Parser<'_>) -> Match<()> {
    p.semicolon()
}

fn expression_statement<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.rule(g, "Expression")?;
    p.semicolon()
}

fn if_statement<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.if_kw()?;
    p.l_paren()?;
    p.rule(g, "Expression")?;
    p.r_paren()?;
    p.rule(g, "Statement")?;
    p.option(|p| {
        p.else_kw()?;
        p.rule(g, "Statement")
    })
}

fn while_statement<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.while_kw()?;
    p.l_paren()?;
    p.rule(g, "Expression")?;
    p.r_paren()?;
    p.rule(g, "Statement")
}

fn do_while_statement<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.do_kw()?;
    p.rule(g, "Statement")?;
    p.while_kw()?;
    p.l_paren()?;
    p.rule(g, "Expression")?;
    p.r_paren()?;
    p.semicolon()
}

// ForStatement : "for" "(" head? ";" Expression? ";" Expression? ")" Statement
//
// C-style heads only; for-in enumeration is not in this dialect.
fn for_statement<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.for_kw()?;
    p.l_paren()?;
    p.option(|p| {
        p.or(&[
            ("VariableDeclarationList", &|p| {
                p.rule(g, "VariableLetOrConst")?;
                p.rule(g, "VariableDeclarationList")
            }),
            ("Expression", &|p| p.rule(g, "Expression"))
        ])
    })?;
    p.semicolon()?;
    p.option(|p| p.rule(g, "Expression"))?;
    p.semicolon()?;
    p.option(|p| p.rule(g, "Expression"))?;
    p.r_paren()?;
    p.rule(g, "Statement")
}

fn return_statement<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.return_kw()?;
    p.option(|p| p.rule(g, "Expression"))?;
    p.semicolon()
}

fn break_statement<G: Grammar>(_: &G, p: &mut Parser<'_>) -> Match<()> {
    p.break_kw()?;
    p.semicolon()
}

fn continue_statement<G: Grammar>(_: &G, p: &mut Parser<'_>) -> Match<()> {
    p.continue_kw()?;
    p.semicolon()
}

fn throw_statement<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.throw_kw()?;
    p.rule(g, "Expression")?;
    p.semicolon()
}

fn function_declaration<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.function_kw()?;
    p.rule(g, "BindingIdentifier")?;
    p.l_paren()?;
    p.option(|p| p.rule(g, "FormalParameters"))?;
    p.r_paren()?;
    p.l_brace()?;
    p.rule(g, "FunctionBody")?;
    p.r_brace()
}

fn function_expression<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.function_kw()?;
    p.option(|p| p.rule(g, "BindingIdentifier"))?;
    p.l_paren()?;
    p.option(|p| p.rule(g, "FormalParameters"))?;
    p.r_paren()?;
    p.l_brace()?;
    p.rule(g, "FunctionBody")?;
    p.r_brace()
}

fn formal_parameters<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.rule(g, "BindingIdentifier")?;
    p.many(|p| {
        p.comma()?;
        p.rule(g, "BindingIdentifier")
    })
}

fn function_body<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.many(|p| p.rule(g, "StatementListItem"))
}

// Expression : AssignmentExpression ("," AssignmentExpression)*
fn expression<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.rule(g, "AssignmentExpression")?;
    p.many(|p| {
        p.comma()?;
        p.rule(g, "AssignmentExpression")
    })
}

// AssignmentExpression : ConditionalExpression
//                        (AssignmentOperator AssignmentExpression)?
//
// Parsed with an optional tail rather than as an ordered choice between
// the assignment and conditional forms, which would re-parse the common
// prefix and go exponential under nesting. Whether the head is a valid
// assignment target is a semantic question left to consumers.
fn assignment_expression<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.rule(g, "ConditionalExpression")?;
    p.option(|p| {
        assignment_operator(p)?;
        p.rule(g, "AssignmentExpression")
    })
}

// Helper, not a rule: the operator leaf lands in the caller's node.
fn assignment_operator(p: &mut Parser<'_>) -> Match<()> {
    p.or(&[
        ("Eq", &|p| p.eq()),
        ("PlusEq", &|p| p.plus_eq()),
        ("MinusEq", &|p| p.minus_eq()),
        ("StarEq", &|p| p.star_eq()),
        ("SlashEq", &|p| p.slash_eq()),
        ("ModEq", &|p| p.mod_eq()),
        ("LShiftEq", &|p| p.l_shift_eq()),
        ("RShiftEq", &|p| p.r_shift_eq()),
        ("URShiftEq", &|p| p.ur_shift_eq()),
        ("BitAndEq", &|p| p.bit_and_eq()),
        ("BitOrEq", &|p| p.bit_or_eq()),
        ("BitXorEq", &|p| p.bit_xor_eq())
    ])
}

fn conditional_expression<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.rule(g, "LogicalOrExpression")?;
    p.option(|p| {
        p.question()?;
        p.rule(g, "AssignmentExpression")?;
        p.colon()?;
        p.rule(g, "AssignmentExpression")
    })
}

fn logical_or_expression<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.rule(g, "LogicalAndExpression")?;
    p.many(|p| {
        p.logical_or()?;
        p.rule(g, "LogicalAndExpression")
    })
}

fn logical_and_expression<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.rule(g, "BitwiseOrExpression")?;
    p.many(|p| {
        p.logical_and()?;
        p.rule(g, "BitwiseOrExpression")
    })
}

fn bitwise_or_expression<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.rule(g, "BitwiseXorExpression")?;
    p.many(|p| {
        p.bit_or()?;
        p.rule(g, "BitwiseXorExpression")
    })
}

fn bitwise_xor_expression<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.rule(g, "BitwiseAndExpression")?;
    p.many(|p| {
        p.bit_xor()?;
        p.rule(g, "BitwiseAndExpression")
    })
}

fn bitwise_and_expression<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.rule(g, "EqualityExpression")?;
    p.many(|p| {
        p.bit_and()?;
        p.rule(g, "EqualityExpression")
    })
}

fn equality_expression<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.rule(g, "RelationalExpression")?;
    p.many(|p| {
        p.or(&[
            ("StrictEq", &|p| p.strict_eq()),
            ("StrictNotEq", &|p| p.strict_not_eq()),
            ("EqEq", &|p| p.eq_eq()),
            ("NotEq", &|p| p.not_eq())
        ])?;
        p.rule(g, "RelationalExpression")
    })
}

fn relational_expression<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.rule(g, "ShiftExpression")?;
    p.many(|p| {
        p.or(&[
            ("LEq", &|p| p.l_eq()),
            ("GEq", &|p| p.g_eq()),
            ("LAngle", &|p| p.l_angle()),
            ("RAngle", &|p| p.r_angle()),
            ("Instanceof", &|p| p.instanceof_kw()),
            ("In", &|p| p.in_kw())
        ])?;
        p.rule(g, "ShiftExpression")
    })
}

fn shift_expression<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.rule(g, "AdditiveExpression")?;
    p.many(|p| {
        p.or(&[
            ("LShift", &|p| p.l_shift()),
            ("URShift", &|p| p.ur_shift()),
            ("RShift", &|p| p.r_shift())
        ])?;
        p.rule(g, "AdditiveExpression")
    })
}

fn additive_expression<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.rule(g, "MultiplicativeExpression")?;
    p.many(|p| {
        p.or(&[("Plus", &|p| p.plus()), ("Minus", &|p| p.minus())])?;
        p.rule(g, "MultiplicativeExpression")
    })
}

fn multiplicative_expression<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.rule(g, "UnaryExpression")?;
    p.many(|p| {
        p.or(&[
            ("Star", &|p| p.star()),
            ("Slash", &|p| p.slash()),
            ("Mod", &|p| p.mod_op())
        ])?;
        p.rule(g, "UnaryExpression")
    })
}

fn unary_expression<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.or(&[
        ("UnaryOperation", &|p| {
            unary_operator(p)?;
            p.rule(g, "UnaryExpression")
        }),
        ("PostfixExpression", &|p| p.rule(g, "PostfixExpression"))
    ])
}

fn unary_operator(p: &mut Parser<'_>) -> Match<()> {
    p.or(&[
        ("Delete", &|p| p.delete_kw()),
        ("Void", &|p| p.void_kw()),
        ("Typeof", &|p| p.typeof_kw()),
        ("Inc", &|p| p.inc()),
        ("Dec", &|p| p.dec()),
        ("Plus", &|p| p.plus()),
        ("Minus", &|p| p.minus()),
        ("Tilde", &|p| p.tilde()),
        ("Bang", &|p| p.bang())
    ])
}

// PostfixExpression : LeftHandSideExpression ("++" | "--")?
fn postfix_expression<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.rule(g, "LeftHandSideExpression")?;
    p.option(|p| p.or(&[("Inc", &|p| p.inc()), ("Dec", &|p| p.dec())]))
}

fn left_hand_side_expression<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.rule(g, "CallExpression")
}

// CallExpression : MemberExpression
//                  (Arguments | BracketExpression | DotExpression)*
//
// The member/call chain is left-recursive in the language grammar; here
// it is a head followed by a suffix loop so matching stays LL and the
// head is parsed exactly once.
fn call_expression<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.rule(g, "MemberExpression")?;
    p.many(|p| {
        p.or(&[
            ("Arguments", &|p| p.rule(g, "Arguments")),
            ("BracketExpression", &|p| p.rule(g, "BracketExpression")),
            ("DotExpression", &|p| p.rule(g, "DotExpression"))
        ])
    })
}

fn member_expression<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.or(&[
        ("NewMemberExpression", &|p| p.rule(g, "NewMemberExpression")),
        ("PrimaryExpression", &|p| p.rule(g, "PrimaryExpression"))
    ])?;
    p.many(|p| {
        p.or(&[
            ("BracketExpression", &|p| p.rule(g, "BracketExpression")),
            ("DotExpression", &|p| p.rule(g, "DotExpression"))
        ])
    })
}

// NewMemberExpression : "new" MemberExpression Arguments?
fn new_member_expression<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.new_kw()?;
    p.rule(g, "MemberExpression")?;
    p.option(|p| p.rule(g, "Arguments"))
}

fn bracket_expression<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.l_brack()?;
    p.rule(g, "Expression")?;
    p.r_brack()
}

fn dot_expression<G: Grammar>(_: &G, p: &mut Parser<'_>) -> Match<()> {
    p.dot()?;
    p.identifier()
}

fn arguments<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.l_paren()?;
    p.option(|p| p.rule(g, "ArgumentList"))?;
    p.r_paren()
}

fn argument_list<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.rule(g, "AssignmentExpression")?;
    p.many(|p| {
        p.comma()?;
        p.rule(g, "AssignmentExpression")
    })
}

fn primary_expression<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.or(&[
        ("FunctionExpression", &|p| p.rule(g, "FunctionExpression")),
        ("This", &|p| p.this_kw()),
        ("Literal", &|p| p.rule(g, "Literal")),
        ("IdentifierReference", &|p| p.rule(g, "IdentifierReference")),
        ("ArrayLiteral", &|p| p.rule(g, "ArrayLiteral")),
        ("ObjectLiteral", &|p| p.rule(g, "ObjectLiteral")),
        ("ParenthesizedExpression", &|p| p.rule(g, "ParenthesizedExpression"))
    ])
}

fn parenthesized_expression<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.l_paren()?;
    p.rule(g, "Expression")?;
    p.r_paren()
}

fn identifier_reference<G: Grammar>(_: &G, p: &mut Parser<'_>) -> Match<()> {
    p.identifier()
}

fn literal<G: Grammar>(_: &G, p: &mut Parser<'_>) -> Match<()> {
    p.or(&[
        ("NumericLiteral", &|p| p.numeric_literal()),
        ("StringLiteral", &|p| p.string_literal()),
        ("True", &|p| p.true_kw()),
        ("False", &|p| p.false_kw()),
        ("Null", &|p| p.null_kw())
    ])
}

fn array_literal<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.l_brack()?;
    p.option(|p| {
        p.rule(g, "ElementList")?;
        p.option(|p| p.comma())
    })?;
    p.r_brack()
}

fn element_list<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.rule(g, "AssignmentExpression")?;
    p.many(|p| {
        p.comma()?;
        p.rule(g, "AssignmentExpression")
    })
}

fn object_literal<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.l_brace()?;
    p.option(|p| {
        p.rule(g, "PropertyDefinitionList")?;
        p.option(|p| p.comma())
    })?;
    p.r_brace()
}

fn property_definition_list<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.rule(g, "PropertyDefinition")?;
    p.many(|p| {
        p.comma()?;
        p.rule(g, "PropertyDefinition")
    })
}

// The es2015 dialect overrides this to try MethodDefinition first.
fn property_definition<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.or(&[
        ("PropertyAssignment", &|p| p.rule(g, "PropertyAssignment")),
        ("IdentifierReference", &|p| p.rule(g, "IdentifierReference"))
    ])
}

// PropertyAssignment : PropertyName ":" AssignmentExpression
fn property_assignment<G: Grammar>(g: &G, p: &mut Parser<'_>) -> Match<()> {
    p.rule(g, "PropertyName")?;
    p.colon()?;
    p.rule(g, "AssignmentExpression")
}

fn property_name<G: Grammar>(_: &G, p: &mut Parser<'_>) -> Match<()> {
    p.or(&[
        ("Identifier", &|p| p.identifier()),
        ("StringLiteral", &|p| p.string_literal()),
        ("NumericLiteral", &|p| p.numeric_literal())
    ])
}
