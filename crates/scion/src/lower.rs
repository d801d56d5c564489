//! CST to AST lowering. The walk goes by node name and child order;
//! precedence-ladder nodes with a single operand collapse transparently,
//! operator-interleaved children fold left-associatively, and spans come
//! straight from the CST. Anything shaped wrong is a `LowerError`,
//! including empty nodes in positions the grammar never leaves empty —
//! but nodes the grammar legitimately leaves empty lower to nothing.

use std::iter::Peekable;
use std::slice::Iter;

use trellis::track::{Span, Track};
use trellis::CstNode;

use crate::ast::*;
use crate::error::LowerError;

type Lower<T> = Result<T, LowerError>;

pub fn lower_program(cst: &CstNode) -> Lower<Program> {
    if cst.name != "Program" {
        return Err(LowerError::UnexpectedNode { parent: "Program", found: cst.name });
    }
    let list = cst
        .find("ModuleItemList")
        .ok_or(LowerError::MissingChild { parent: "Program", wanted: "ModuleItemList" })?;
    let mut body = Vec::new();
    for item in &list.children {
        body.push(module_item(item)?);
    }
    Ok(Program { location: cst.loc, body })
}

fn module_item(node: &CstNode) -> Lower<ModuleItem> {
    match node.name {
        "ErrorNode" => Ok(ModuleItem::Skipped(node.loc, node.value.clone().unwrap_or_default())),
        "ImportDeclaration" => Ok(ModuleItem::Import(import(node)?)),
        "ExportDeclaration" => Ok(ModuleItem::Export(export(node)?)),
        "StatementListItem" => Ok(ModuleItem::Item(stmt_item(node)?)),
        found => Err(LowerError::UnexpectedNode { parent: "ModuleItemList", found })
    }
}

fn stmt_item(node: &CstNode) -> Lower<StmtItem> {
    let inner = first_child(node)?;
    match inner.name {
        "FunctionDeclaration" => Ok(StmtItem::Fun(function(inner)?)),
        "Statement" => Ok(StmtItem::Stmt(statement(inner)?)),
        found => Err(LowerError::UnexpectedNode { parent: node.name, found })
    }
}

fn statement(node: &CstNode) -> Lower<Stmt> {
    match node.name {
        "Statement" => statement(first_child(node)?),
        "BlockStatement" => {
            let mut items = Vec::new();
            for item in node.find_all("StatementListItem") {
                items.push(stmt_item(item)?);
            }
            Ok(Stmt::Block(node.loc, items))
        }
        "VariableDeclaration" => {
            let kind = decl_kind(node)?;
            let list = node.find("VariableDeclarationList").ok_or(LowerError::MissingChild {
                parent: node.name,
                wanted: "VariableDeclarationList"
            })?;
            Ok(Stmt::Var(node.loc, kind, declarators(list)?))
        }
        "EmptyStatement" => Ok(Stmt::Empty(node.loc)),
        "ExpressionStatement" => {
            let inner = child(node, "Expression")?;
            Ok(Stmt::Expr(node.loc, expr(inner)?))
        }
        "IfStatement" => {
            let mut kids = Kids::of(node);
            kids.expect("If")?;
            kids.expect("LParen")?;
            let test = expr(kids.expect("Expression")?)?;
            kids.expect("RParen")?;
            let cons = statement(kids.expect("Statement")?)?;
            let alt = match kids.eat("Else") {
                Some(_) => Some(Box::new(statement(kids.expect("Statement")?)?)),
                None => None
            };
            Ok(Stmt::If(node.loc, test, Box::new(cons), alt))
        }
        "WhileStatement" => {
            let test = expr(child(node, "Expression")?)?;
            let body = statement(child(node, "Statement")?)?;
            Ok(Stmt::While(node.loc, test, Box::new(body)))
        }
        "DoWhileStatement" => {
            let body = statement(child(node, "Statement")?)?;
            let test = expr(child(node, "Expression")?)?;
            Ok(Stmt::DoWhile(node.loc, Box::new(body), test))
        }
        "ForStatement" => for_statement(node),
        "ReturnStatement" => {
            let arg = match node.find("Expression") {
                Some(inner) => Some(expr(inner)?),
                None => None
            };
            Ok(Stmt::Return(node.loc, arg))
        }
        "BreakStatement" => Ok(Stmt::Break(node.loc)),
        "ContinueStatement" => Ok(Stmt::Cont(node.loc)),
        "ThrowStatement" => Ok(Stmt::Throw(node.loc, expr(child(node, "Expression")?)?)),
        found => Err(LowerError::UnexpectedNode { parent: "Statement", found })
    }
}

fn for_statement(node: &CstNode) -> Lower<Stmt> {
    let mut kids = Kids::of(node);
    kids.expect("For")?;
    kids.expect("LParen")?;
    let init = if let Some(vc) = kids.eat("VariableLetOrConst") {
        let kind = leaf_decl_kind(vc)?;
        let list = kids.expect("VariableDeclarationList")?;
        Some(ForInit::Var(kind, declarators(list)?))
    } else {
        kids.eat("Expression").map(expr).transpose()?.map(ForInit::Expr)
    };
    kids.expect("Semicolon")?;
    let test = kids.eat("Expression").map(expr).transpose()?;
    kids.expect("Semicolon")?;
    let update = kids.eat("Expression").map(expr).transpose()?;
    kids.expect("RParen")?;
    let body = statement(kids.expect("Statement")?)?;
    Ok(Stmt::For(node.loc, init, test, update, Box::new(body)))
}

fn decl_kind(node: &CstNode) -> Lower<DeclKind> {
    let vc = node.find("VariableLetOrConst").ok_or(LowerError::MissingChild {
        parent: node.name,
        wanted: "VariableLetOrConst"
    })?;
    leaf_decl_kind(vc)
}

fn leaf_decl_kind(vc: &CstNode) -> Lower<DeclKind> {
    let leaf = first_child(vc)?;
    match leaf.name {
        "Var" => Ok(DeclKind::Var),
        "Let" => Ok(DeclKind::Let),
        "Const" => Ok(DeclKind::Const),
        found => Err(LowerError::UnexpectedNode { parent: vc.name, found })
    }
}

fn declarators(list: &CstNode) -> Lower<Vec<Dtor>> {
    let mut dtors = Vec::new();
    for dtor in list.find_all("VariableDeclarator") {
        let id = identifier(child(dtor, "BindingIdentifier")?)?;
        let init = match dtor.find("Initializer") {
            Some(init) => Some(expr(child(init, "AssignmentExpression")?)?),
            None => None
        };
        dtors.push(Dtor { location: dtor.loc, id, init });
    }
    Ok(dtors)
}

fn function(node: &CstNode) -> Lower<Fun> {
    let id = match node.find("BindingIdentifier") {
        Some(binding) => Some(identifier(binding)?),
        None => None
    };
    let params = match node.find("FormalParameters") {
        Some(list) => parameters(list)?,
        None => Vec::new()
    };
    let body = function_body(child(node, "FunctionBody")?)?;
    Ok(Fun { location: node.loc, id, params, body })
}

fn parameters(list: &CstNode) -> Lower<Vec<Id>> {
    let mut params = Vec::new();
    for binding in list.find_all("BindingIdentifier") {
        params.push(identifier(binding)?);
    }
    Ok(params)
}

fn function_body(node: &CstNode) -> Lower<Vec<StmtItem>> {
    let mut items = Vec::new();
    for item in node.find_all("StatementListItem") {
        items.push(stmt_item(item)?);
    }
    Ok(items)
}

/// An identifier-wrapping rule node (`BindingIdentifier`,
/// `IdentifierReference`): one Identifier leaf inside.
fn identifier(node: &CstNode) -> Lower<Id> {
    let leaf = child(node, "Identifier")?;
    Ok(leaf_id(leaf))
}

fn leaf_id(leaf: &CstNode) -> Id {
    Id { location: leaf.loc, name: leaf.value.clone().unwrap_or_default() }
}

fn expr(node: &CstNode) -> Lower<Expr> {
    match node.name {
        "Expression" => comma_sequence(node),
        "AssignmentExpression" => assignment(node),
        "ConditionalExpression" => conditional(node),
        "LogicalOrExpression"
        | "LogicalAndExpression"
        | "BitwiseOrExpression"
        | "BitwiseXorExpression"
        | "BitwiseAndExpression"
        | "EqualityExpression"
        | "RelationalExpression"
        | "ShiftExpression"
        | "AdditiveExpression"
        | "MultiplicativeExpression" => fold_infix(node),
        "UnaryExpression" => unary(node),
        "PostfixExpression" => postfix(node),
        "LeftHandSideExpression" => expr(first_child(node)?),
        "CallExpression" | "MemberExpression" => fold_suffixes(node),
        "NewMemberExpression" => new_expression(node),
        "PrimaryExpression" => primary(node),
        "ParenthesizedExpression" => expr(child(node, "Expression")?),
        "IdentifierReference" | "BindingIdentifier" => Ok(Expr::Id(identifier(node)?)),
        "Literal" => literal(node),
        "ArrayLiteral" => array(node),
        "ObjectLiteral" => object(node),
        "FunctionExpression" => Ok(Expr::Fun(function(node)?)),
        found => Err(LowerError::UnexpectedNode { parent: "expression", found })
    }
}

fn comma_sequence(node: &CstNode) -> Lower<Expr> {
    let mut exprs = Vec::new();
    for item in node.find_all("AssignmentExpression") {
        exprs.push(expr(item)?);
    }
    match exprs.len() {
        0 => Err(LowerError::MissingChild { parent: node.name, wanted: "AssignmentExpression" }),
        1 => Ok(exprs.pop().expect("length checked")),
        _ => Ok(Expr::Seq(node.loc, exprs))
    }
}

fn assignment(node: &CstNode) -> Lower<Expr> {
    let mut kids = Kids::of(node);
    let target = expr(kids.any()?)?;
    match kids.next() {
        None => Ok(target),
        Some(op) => {
            let value = expr(kids.any()?)?;
            Ok(Expr::Assign(node.loc, assop(op.name)?, Box::new(target), Box::new(value)))
        }
    }
}

fn conditional(node: &CstNode) -> Lower<Expr> {
    let mut kids = Kids::of(node);
    let test = expr(kids.any()?)?;
    if kids.eat("Question").is_none() {
        return Ok(test);
    }
    let cons = expr(kids.expect("AssignmentExpression")?)?;
    kids.expect("Colon")?;
    let alt = expr(kids.expect("AssignmentExpression")?)?;
    Ok(Expr::Cond(node.loc, Box::new(test), Box::new(cons), Box::new(alt)))
}

// operand (op operand)* — terminal children are the operators.
fn fold_infix(node: &CstNode) -> Lower<Expr> {
    let mut kids = Kids::of(node);
    let mut left = expr(kids.any()?)?;
    while let Some(op) = kids.next() {
        let right = expr(kids.any()?)?;
        let location = join(left.location(), right.location());
        left = match op.name {
            "LogicalOr" => Expr::Logop(location, Logop::Or, Box::new(left), Box::new(right)),
            "LogicalAnd" => Expr::Logop(location, Logop::And, Box::new(left), Box::new(right)),
            name => Expr::Binop(location, binop(name)?, Box::new(left), Box::new(right))
        };
    }
    Ok(left)
}

fn unary(node: &CstNode) -> Lower<Expr> {
    let mut kids = Kids::of(node);
    let first = kids.any()?;
    if !first.is_terminal() {
        return expr(first);
    }
    let operand = expr(kids.any()?)?;
    let location = node.loc;
    Ok(match first.name {
        "Inc" => Expr::PreInc(location, Box::new(operand)),
        "Dec" => Expr::PreDec(location, Box::new(operand)),
        name => Expr::Unop(location, unop(name)?, Box::new(operand))
    })
}

fn postfix(node: &CstNode) -> Lower<Expr> {
    let mut kids = Kids::of(node);
    let operand = expr(kids.any()?)?;
    match kids.next() {
        None => Ok(operand),
        Some(op) if op.name == "Inc" => Ok(Expr::PostInc(node.loc, Box::new(operand))),
        Some(op) if op.name == "Dec" => Ok(Expr::PostDec(node.loc, Box::new(operand))),
        Some(op) => Err(LowerError::UnknownOperator { found: op.name })
    }
}

fn fold_suffixes(node: &CstNode) -> Lower<Expr> {
    let mut kids = Kids::of(node);
    let mut acc = expr(kids.any()?)?;
    while let Some(suffix) = kids.next() {
        acc = apply_suffix(acc, suffix)?;
    }
    Ok(acc)
}

fn apply_suffix(callee: Expr, suffix: &CstNode) -> Lower<Expr> {
    let location = join(callee.location(), suffix.loc);
    match suffix.name {
        "Arguments" => Ok(Expr::Call(location, Box::new(callee), arguments(suffix)?)),
        "BracketExpression" => {
            let inner = expr(child(suffix, "Expression")?)?;
            Ok(Expr::Brack(location, Box::new(callee), Box::new(inner)))
        }
        "DotExpression" => {
            let name = child(suffix, "Identifier")?.value.clone().unwrap_or_default();
            Ok(Expr::Dot(location, Box::new(callee), name))
        }
        found => Err(LowerError::UnexpectedNode { parent: "member suffix", found })
    }
}

fn new_expression(node: &CstNode) -> Lower<Expr> {
    let callee = expr(child(node, "MemberExpression")?)?;
    let args = match node.find("Arguments") {
        Some(list) => arguments(list)?,
        None => Vec::new()
    };
    Ok(Expr::New(node.loc, Box::new(callee), args))
}

fn arguments(node: &CstNode) -> Lower<Vec<Expr>> {
    let mut args = Vec::new();
    if let Some(list) = node.find("ArgumentList") {
        for arg in list.find_all("AssignmentExpression") {
            args.push(expr(arg)?);
        }
    }
    Ok(args)
}

fn primary(node: &CstNode) -> Lower<Expr> {
    let inner = first_child(node)?;
    match inner.name {
        "This" => Ok(Expr::This(inner.loc)),
        _ => expr(inner)
    }
}

fn literal(node: &CstNode) -> Lower<Expr> {
    let leaf = first_child(node)?;
    let value = leaf.value.as_deref().unwrap_or_default();
    match leaf.name {
        "NumericLiteral" => Ok(Expr::Number(node.loc, number(value)?)),
        "StringLiteral" => Ok(Expr::String(node.loc, value.to_string())),
        "True" => Ok(Expr::True(node.loc)),
        "False" => Ok(Expr::False(node.loc)),
        "Null" => Ok(Expr::Null(node.loc)),
        found => Err(LowerError::UnexpectedNode { parent: node.name, found })
    }
}

fn array(node: &CstNode) -> Lower<Expr> {
    let mut elements = Vec::new();
    if let Some(list) = node.find("ElementList") {
        for element in list.find_all("AssignmentExpression") {
            elements.push(expr(element)?);
        }
    }
    Ok(Expr::Arr(node.loc, elements))
}

fn object(node: &CstNode) -> Lower<Expr> {
    let mut props = Vec::new();
    if let Some(list) = node.find("PropertyDefinitionList") {
        for def in list.find_all("PropertyDefinition") {
            props.push(prop(def)?);
        }
    }
    Ok(Expr::Obj(node.loc, props))
}

fn prop(node: &CstNode) -> Lower<Prop> {
    let inner = first_child(node)?;
    match inner.name {
        "MethodDefinition" => {
            let key = prop_key(child(inner, "PropertyName")?)?;
            let params = match inner.find("FormalParameters") {
                Some(list) => parameters(list)?,
                None => Vec::new()
            };
            let body = function_body(child(inner, "FunctionBody")?)?;
            let fun = Fun { location: inner.loc, id: None, params, body };
            Ok(Prop::Method(inner.loc, key, fun))
        }
        "PropertyAssignment" => {
            let key = prop_key(child(inner, "PropertyName")?)?;
            let value = expr(child(inner, "AssignmentExpression")?)?;
            Ok(Prop::Init(inner.loc, key, value))
        }
        "IdentifierReference" => Ok(Prop::Shorthand(identifier(inner)?)),
        found => Err(LowerError::UnexpectedNode { parent: node.name, found })
    }
}

fn prop_key(node: &CstNode) -> Lower<PropKey> {
    let leaf = first_child(node)?;
    let value = leaf.value.as_deref().unwrap_or_default();
    match leaf.name {
        "Identifier" => Ok(PropKey::Id(node.loc, value.to_string())),
        "StringLiteral" => Ok(PropKey::String(node.loc, value.to_string())),
        "NumericLiteral" => Ok(PropKey::Number(node.loc, number(value)?)),
        found => Err(LowerError::UnexpectedNode { parent: node.name, found })
    }
}

fn import(node: &CstNode) -> Lower<ImportDecl> {
    let clause = match node.find("ImportClause") {
        Some(inner) => Some(import_clause(inner)?),
        None => None
    };
    let source = match node.find("FromClause") {
        Some(from) => child(from, "StringLiteral")?.value.clone().unwrap_or_default(),
        None => child(node, "StringLiteral")?.value.clone().unwrap_or_default()
    };
    Ok(ImportDecl { location: node.loc, clause, source })
}

fn import_clause(node: &CstNode) -> Lower<ImportClause> {
    let inner = first_child(node)?;
    match inner.name {
        "NamedImports" => {
            let mut specs = Vec::new();
            if let Some(list) = inner.find("ImportsList") {
                for spec in list.find_all("ImportSpecifier") {
                    specs.push(import_spec(spec)?);
                }
            }
            Ok(ImportClause::Named(specs))
        }
        "NameSpaceImport" => Ok(ImportClause::Namespace(identifier(child(inner, "BindingIdentifier")?)?)),
        "BindingIdentifier" => Ok(ImportClause::Default(identifier(inner)?)),
        found => Err(LowerError::UnexpectedNode { parent: node.name, found })
    }
}

fn import_spec(node: &CstNode) -> Lower<ImportSpec> {
    let mut names = node.find_all("Identifier");
    let imported = names
        .next()
        .map(leaf_id)
        .ok_or(LowerError::MissingChild { parent: node.name, wanted: "Identifier" })?;
    let local = names.next().map(leaf_id);
    Ok(ImportSpec { location: node.loc, imported, local })
}

fn export(node: &CstNode) -> Lower<ExportDecl> {
    if node.find("Star").is_some() {
        let from = child(node, "FromClause")?;
        let source = child(from, "StringLiteral")?.value.clone().unwrap_or_default();
        return Ok(ExportDecl::All(node.loc, source));
    }
    if let Some(named) = node.find("NamedExports") {
        let mut specs = Vec::new();
        if let Some(list) = named.find("ExportsList") {
            for spec in list.find_all("ExportSpecifier") {
                specs.push(export_spec(spec)?);
            }
        }
        let source = match node.find("FromClause") {
            Some(from) => Some(child(from, "StringLiteral")?.value.clone().unwrap_or_default()),
            None => None
        };
        return Ok(ExportDecl::Named(node.loc, specs, source));
    }
    if let Some(decl) = node.find("VariableDeclaration") {
        return Ok(ExportDecl::Decl(node.loc, Box::new(StmtItem::Stmt(statement(decl)?))));
    }
    if let Some(decl) = node.find("FunctionDeclaration") {
        return Ok(ExportDecl::Decl(node.loc, Box::new(StmtItem::Fun(function(decl)?))));
    }
    if node.find("Default").is_some() {
        let value = expr(child(node, "AssignmentExpression")?)?;
        return Ok(ExportDecl::Default(node.loc, value));
    }
    Err(LowerError::MissingChild { parent: node.name, wanted: "export form" })
}

fn export_spec(node: &CstNode) -> Lower<ExportSpec> {
    let mut names = node.find_all("Identifier");
    let local = names
        .next()
        .map(leaf_id)
        .ok_or(LowerError::MissingChild { parent: node.name, wanted: "Identifier" })?;
    let exported = names.next().map(leaf_id);
    Ok(ExportSpec { location: node.loc, local, exported })
}

fn unop(name: &'static str) -> Lower<Unop> {
    Ok(match name {
        "Plus" => Unop::Plus,
        "Minus" => Unop::Minus,
        "Bang" => Unop::Not,
        "Tilde" => Unop::BitNot,
        "Typeof" => Unop::Typeof,
        "Void" => Unop::Void,
        "Delete" => Unop::Delete,
        found => return Err(LowerError::UnknownOperator { found })
    })
}

fn binop(name: &'static str) -> Lower<Binop> {
    Ok(match name {
        "Plus" => Binop::Add,
        "Minus" => Binop::Sub,
        "Star" => Binop::Mul,
        "Slash" => Binop::Div,
        "Mod" => Binop::Mod,
        "EqEq" => Binop::EqEq,
        "NotEq" => Binop::NotEq,
        "StrictEq" => Binop::StrictEq,
        "StrictNotEq" => Binop::StrictNotEq,
        "LAngle" => Binop::Lt,
        "RAngle" => Binop::Gt,
        "LEq" => Binop::LtEq,
        "GEq" => Binop::GtEq,
        "LShift" => Binop::LShift,
        "RShift" => Binop::RShift,
        "URShift" => Binop::URShift,
        "BitAnd" => Binop::BitAnd,
        "BitOr" => Binop::BitOr,
        "BitXor" => Binop::BitXor,
        "Instanceof" => Binop::Instanceof,
        "In" => Binop::In,
        found => return Err(LowerError::UnknownOperator { found })
    })
}

fn assop(name: &'static str) -> Lower<Assop> {
    Ok(match name {
        "Eq" => Assop::Eq,
        "PlusEq" => Assop::AddEq,
        "MinusEq" => Assop::SubEq,
        "StarEq" => Assop::MulEq,
        "SlashEq" => Assop::DivEq,
        "ModEq" => Assop::ModEq,
        "LShiftEq" => Assop::LShiftEq,
        "RShiftEq" => Assop::RShiftEq,
        "URShiftEq" => Assop::URShiftEq,
        "BitAndEq" => Assop::BitAndEq,
        "BitOrEq" => Assop::BitOrEq,
        "BitXorEq" => Assop::BitXorEq,
        found => return Err(LowerError::UnknownOperator { found })
    })
}

fn number(text: &str) -> Lower<f64> {
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        return u64::from_str_radix(hex, 16)
            .map(|v| v as f64)
            .map_err(|_| LowerError::BadNumber { text: text.to_string() });
    }
    text.parse().map_err(|_| LowerError::BadNumber { text: text.to_string() })
}

fn join(left: Option<Span>, right: Option<Span>) -> Option<Span> {
    match (left, right) {
        (Some(l), Some(r)) => Some(Span { start: l.start, end: r.end, index: l.index }),
        (l, r) => l.or(r)
    }
}

fn first_child(node: &CstNode) -> Lower<&CstNode> {
    node.children
        .first()
        .ok_or(LowerError::MissingChild { parent: node.name, wanted: "any child" })
}

fn child<'a>(node: &'a CstNode, wanted: &'static str) -> Lower<&'a CstNode> {
    node.find(wanted)
        .ok_or(LowerError::MissingChild { parent: node.name, wanted })
}

/// Positional walk over a node's children.
struct Kids<'a> {
    parent: &'static str,
    iter: Peekable<Iter<'a, CstNode>>
}

impl<'a> Kids<'a> {
    fn of(node: &'a CstNode) -> Kids<'a> {
        Kids { parent: node.name, iter: node.children.iter().peekable() }
    }

    fn next(&mut self) -> Option<&'a CstNode> {
        self.iter.next()
    }

    fn eat(&mut self, name: &str) -> Option<&'a CstNode> {
        if self.iter.peek().is_some_and(|n| n.name == name) {
            self.iter.next()
        } else {
            None
        }
    }

    fn expect(&mut self, wanted: &'static str) -> Lower<&'a CstNode> {
        match self.iter.next() {
            Some(node) if node.name == wanted => Ok(node),
            Some(node) => Err(LowerError::UnexpectedNode { parent: self.parent, found: node.name }),
            None => Err(LowerError::MissingChild { parent: self.parent, wanted })
        }
    }

    fn any(&mut self) -> Lower<&'a CstNode> {
        self.iter
            .next()
            .ok_or(LowerError::MissingChild { parent: self.parent, wanted: "any child" })
    }
}
