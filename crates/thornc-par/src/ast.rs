//! AST node definitions.
//!
//! Every node is a tagged `enum` with per-variant payload, not a common
//! struct with a type tag: each expression or statement shape implies its
//! own field set, which a sum type captures directly rather than through
//! inheritance. Children are owned uniquely by their parent via `Box`;
//! there is no sharing and no cycles, so traversal is plain recursion and
//! destruction is post-order for free.

use thornc_lex::{FloatValue, IntValue, Operator};
use thornc_util::{Span, Symbol};

/// A parsed source file: a flat sequence of top-level statements.
pub type Ast = Vec<Stmt>;

/// A top-level or block-level statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Import(Import),
    Include(Include),
    Function(Function),
    Class(ClassLike),
    Struct(ClassLike),
    Enum(Enum),
    Alias(Alias),
    IfBranch(IfBranch),
    While(While),
    DoWhile(DoWhile),
    For(For),
    ForEach(ForEach),
    Break(Span),
    Continue(Span),
    Return(Return),
    Expression(Expr),
    /// A statement substituted after a parse error; the parser has
    /// already recorded a diagnostic and guaranteed forward progress.
    Invalid(Span),
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Import(n) => n.span,
            Stmt::Include(n) => n.span,
            Stmt::Function(n) => n.span,
            Stmt::Class(n) | Stmt::Struct(n) => n.span,
            Stmt::Enum(n) => n.span,
            Stmt::Alias(n) => n.span,
            Stmt::IfBranch(n) => n.span,
            Stmt::While(n) => n.span,
            Stmt::DoWhile(n) => n.span,
            Stmt::For(n) => n.span,
            Stmt::ForEach(n) => n.span,
            Stmt::Break(span) | Stmt::Continue(span) | Stmt::Invalid(span) => *span,
            Stmt::Return(n) => n.span,
            Stmt::Expression(e) => e.span(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    pub relative: bool,
    pub path: Vec<Symbol>,
    pub alias: Option<Symbol>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Include {
    pub relative: bool,
    pub path: Vec<Symbol>,
    pub span: Span,
}

/// `[incase] [static] def head(params, ...) [-> [ref] type] { body }`.
/// `head` is a general expression (not just an identifier) so scoped or
/// templated method names (`Foo.bar`, `Foo!T.bar`) parse the same way a
/// plain function name does.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub is_incase: bool,
    pub is_static: bool,
    pub head: Box<Expr>,
    pub params: Vec<Expr>,
    pub variadic: bool,
    pub is_return_ref: bool,
    pub return_type: Option<Box<Expr>>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// Shared shape for `class` and `struct` items; [`Stmt::Class`] and
/// [`Stmt::Struct`] both carry this, distinguished only by which variant
/// wraps it.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassLike {
    pub is_incase: bool,
    pub name: Symbol,
    pub template_args: Vec<Symbol>,
    pub base: Option<Box<Expr>>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enum {
    pub is_incase: bool,
    pub name: Symbol,
    pub members: Vec<Symbol>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alias {
    pub is_incase: bool,
    pub name: Symbol,
    pub value: Box<Expr>,
    pub span: Span,
}

/// `if C { .. } (elif C { .. })* (else { .. })?`, stored as parallel
/// condition/body sequences rather than a linked chain of nested ifs.
#[derive(Debug, Clone, PartialEq)]
pub struct IfBranch {
    pub conditions: Vec<Expr>,
    pub bodies: Vec<Vec<Stmt>>,
    pub else_body: Option<Vec<Stmt>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct While {
    pub condition: Box<Expr>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoWhile {
    pub body: Vec<Stmt>,
    pub condition: Box<Expr>,
    pub span: Span,
}

/// Classical `for init, condition, step { body }` — always exactly three
/// control expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct For {
    pub init: Box<Expr>,
    pub condition: Box<Expr>,
    pub step: Box<Expr>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// `for a, b, .. in iteratee { body }` — one or more iterator expressions,
/// exactly one iteratee.
#[derive(Debug, Clone, PartialEq)]
pub struct ForEach {
    pub iterators: Vec<Expr>,
    pub iteratee: Box<Expr>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Return {
    pub value: Option<Box<Expr>>,
    pub span: Span,
}

/// A literal value, tagged by the numeric tower's full width/signedness
/// rather than collapsed to a handful of representative kinds — see
/// `DESIGN.md` for the reasoning.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Char(u32),
    Str(Vec<u32>),
    Buffer(Vec<u8>),
    Int(IntValue),
    Float(FloatValue),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier(Symbol, Span),
    Literal(Literal, Span),

    Tuple(Vec<Expr>, Span),
    Array(Vec<Expr>, Span),
    /// `keys.len() == values.len()`.
    Dict(Vec<Expr>, Vec<Expr>, Span),

    Unary(UnaryExpr),
    Binary(BinaryExpr),
    Ternary(TernaryExpr),
    /// `|ops| == |operands| - 1 >= 1`.
    Comparison(ComparisonExpr),

    Call(CallExpr),
    Index(IndexExpr),
    Scope(ScopeExpr),
    Templatize(TemplatizeExpr),

    VariableDeclaration(VariableDeclarationExpr),

    Lambda(LambdaExpr),
    FunctionType(FunctionTypeExpr),

    /// Substituted after a parse error within an expression position.
    Invalid(Span),
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Identifier(_, span) | Expr::Literal(_, span) => *span,
            Expr::Tuple(_, span) | Expr::Array(_, span) | Expr::Dict(_, _, span) => *span,
            Expr::Unary(n) => n.span,
            Expr::Binary(n) => n.span,
            Expr::Ternary(n) => n.span,
            Expr::Comparison(n) => n.span,
            Expr::Call(n) => n.span,
            Expr::Index(n) => n.span,
            Expr::Scope(n) => n.span,
            Expr::Templatize(n) => n.span,
            Expr::VariableDeclaration(n) => n.span,
            Expr::Lambda(n) => n.span,
            Expr::FunctionType(n) => n.span,
            Expr::Invalid(span) => *span,
        }
    }
}

/// `prefix` distinguishes `++x`/`--x` (prefix, level 15) from `x++`/`x--`
/// (postfix, level 16); both lex to the same [`Operator::Inc`]/
/// [`Operator::Dec`] token, so the parser is the only place that
/// distinguishes them.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op: Operator,
    pub prefix: bool,
    pub operand: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub op: Operator,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub span: Span,
}

/// `value if condition else otherwise`.
#[derive(Debug, Clone, PartialEq)]
pub struct TernaryExpr {
    pub value: Box<Expr>,
    pub condition: Box<Expr>,
    pub otherwise: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonExpr {
    pub ops: Vec<Operator>,
    pub operands: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub args: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpr {
    pub indexee: Box<Expr>,
    pub args: Vec<Expr>,
    pub span: Span,
}

/// `value.name(.name)*` collapsed into one node carrying the whole
/// dotted chain, rather than nested scope nodes one per segment.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeExpr {
    pub value: Box<Expr>,
    pub names: Vec<Symbol>,
    pub span: Span,
}

/// `value!T` or `value!(T1, T2, ..)`. Each type argument must pass the
/// type filter.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplatizeExpr {
    pub value: Box<Expr>,
    pub type_args: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarationExpr {
    pub is_static: bool,
    pub is_wild: bool,
    pub is_ref: bool,
    pub name: Symbol,
    pub ty: Option<Box<Expr>>,
    pub initializer: Option<Box<Expr>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LambdaExpr {
    pub params: Vec<Expr>,
    pub variadic: bool,
    pub is_return_ref: bool,
    pub return_type: Option<Box<Expr>>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// `def!(ref? type, ..) -> ref? type`. `arg_ref_flags.len() ==
/// arg_types.len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionTypeExpr {
    pub arg_ref_flags: Vec<bool>,
    pub arg_types: Vec<Expr>,
    pub is_return_ref: bool,
    pub return_type: Option<Box<Expr>>,
    pub span: Span,
}
