//! AST shapes for the parsed subset. Variants carry their source span
//! first so consumers can strip or inspect locations uniformly through
//! the `Track` impls.

use serde::Serialize;
use trellis::track::{Span, Track};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub location: Option<Span>,
    pub body: Vec<ModuleItem>
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ModuleItem {
    Import(ImportDecl),
    Export(ExportDecl),
    Item(StmtItem),
    /// A token the parser skipped while recovering from a syntax error.
    Skipped(Option<Span>, String)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StmtItem {
    Fun(Fun),
    Stmt(Stmt)
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub enum DeclKind {
    Var,
    Let,
    Const
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Id {
    pub location: Option<Span>,
    pub name: String
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dtor {
    pub location: Option<Span>,
    pub id: Id,
    pub init: Option<Expr>
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fun {
    pub location: Option<Span>,
    pub id: Option<Id>,
    pub params: Vec<Id>,
    pub body: Vec<StmtItem>
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    Empty(Option<Span>),
    Block(Option<Span>, Vec<StmtItem>),
    Var(Option<Span>, DeclKind, Vec<Dtor>),
    Expr(Option<Span>, Expr),
    If(Option<Span>, Expr, Box<Stmt>, Option<Box<Stmt>>),
    While(Option<Span>, Expr, Box<Stmt>),
    DoWhile(Option<Span>, Box<Stmt>, Expr),
    For(Option<Span>, Option<ForInit>, Option<Expr>, Option<Expr>, Box<Stmt>),
    Return(Option<Span>, Option<Expr>),
    Break(Option<Span>),
    Cont(Option<Span>),
    Throw(Option<Span>, Expr)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ForInit {
    Var(DeclKind, Vec<Dtor>),
    Expr(Expr)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    This(Option<Span>),
    Id(Id),
    Number(Option<Span>, f64),
    String(Option<Span>, String),
    True(Option<Span>),
    False(Option<Span>),
    Null(Option<Span>),
    Arr(Option<Span>, Vec<Expr>),
    Obj(Option<Span>, Vec<Prop>),
    Fun(Fun),
    Seq(Option<Span>, Vec<Expr>),
    Unop(Option<Span>, Unop, Box<Expr>),
    Binop(Option<Span>, Binop, Box<Expr>, Box<Expr>),
    Logop(Option<Span>, Logop, Box<Expr>, Box<Expr>),
    PreInc(Option<Span>, Box<Expr>),
    PreDec(Option<Span>, Box<Expr>),
    PostInc(Option<Span>, Box<Expr>),
    PostDec(Option<Span>, Box<Expr>),
    Assign(Option<Span>, Assop, Box<Expr>, Box<Expr>),
    Cond(Option<Span>, Box<Expr>, Box<Expr>, Box<Expr>),
    Call(Option<Span>, Box<Expr>, Vec<Expr>),
    New(Option<Span>, Box<Expr>, Vec<Expr>),
    Dot(Option<Span>, Box<Expr>, String),
    Brack(Option<Span>, Box<Expr>, Box<Expr>)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Prop {
    Init(Option<Span>, PropKey, Expr),
    Shorthand(Id),
    Method(Option<Span>, PropKey, Fun)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PropKey {
    Id(Option<Span>, String),
    String(Option<Span>, String),
    Number(Option<Span>, f64)
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub enum Unop {
    Plus,
    Minus,
    Not,
    BitNot,
    Typeof,
    Void,
    Delete
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub enum Binop {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    EqEq,
    NotEq,
    StrictEq,
    StrictNotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    LShift,
    RShift,
    URShift,
    BitAnd,
    BitOr,
    BitXor,
    Instanceof,
    In
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub enum Logop {
    And,
    Or
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub enum Assop {
    Eq,
    AddEq,
    SubEq,
    MulEq,
    DivEq,
    ModEq,
    LShiftEq,
    RShiftEq,
    URShiftEq,
    BitAndEq,
    BitOrEq,
    BitXorEq
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportDecl {
    pub location: Option<Span>,
    pub clause: Option<ImportClause>,
    pub source: String
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ImportClause {
    Default(Id),
    Namespace(Id),
    Named(Vec<ImportSpec>)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportSpec {
    pub location: Option<Span>,
    pub imported: Id,
    pub local: Option<Id>
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExportDecl {
    All(Option<Span>, String),
    Named(Option<Span>, Vec<ExportSpec>, Option<String>),
    Decl(Option<Span>, Box<StmtItem>),
    Default(Option<Span>, Expr)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportSpec {
    pub location: Option<Span>,
    pub local: Id,
    pub exported: Option<Id>
}

impl Track for Id {
    fn location(&self) -> Option<Span> {
        self.location
    }
}

impl Track for Fun {
    fn location(&self) -> Option<Span> {
        self.location
    }
}

impl Track for Expr {
    fn location(&self) -> Option<Span> {
        match *self {
            Expr::This(location)
          | Expr::Number(location, _)
          | Expr::String(location, _)
          | Expr::True(location)
          | Expr::False(location)
          | Expr::Null(location)
          | Expr::Arr(location, _)
          | Expr::Obj(location, _)
          | Expr::Seq(location, _)
          | Expr::Unop(location, _, _)
          | Expr::Binop(location, _, _, _)
          | Expr::Logop(location, _, _, _)
          | Expr::PreInc(location, _)
          | Expr::PreDec(location, _)
          | Expr::PostInc(location, _)
          | Expr::PostDec(location, _)
          | Expr::Assign(location, _, _, _)
          | Expr::Cond(location, _, _, _)
          | Expr::Call(location, _, _)
          | Expr::New(location, _, _)
          | Expr::Dot(location, _, _)
          | Expr::Brack(location, _, _) => location,
            Expr::Id(ref id) => id.location,
            Expr::Fun(ref fun) => fun.location
        }
    }
}

impl Track for Stmt {
    fn location(&self) -> Option<Span> {
        match *self {
            Stmt::Empty(location)
          | Stmt::Block(location, _)
          | Stmt::Var(location, _, _)
          | Stmt::Expr(location, _)
          | Stmt::If(location, _, _, _)
          | Stmt::While(location, _, _)
          | Stmt::DoWhile(location, _, _)
          | Stmt::For(location, _, _, _, _)
          | Stmt::Return(location, _)
          | Stmt::Break(location)
          | Stmt::Cont(location)
          | Stmt::Throw(location, _) => location
        }
    }
}
