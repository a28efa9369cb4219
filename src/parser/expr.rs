//! The parsed intermediate tree.

use crate::value::TypeTag;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinopKind {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl BinopKind {
    pub fn symbol(self) -> &'static str {
        match self {
            BinopKind::Add => "+",
            BinopKind::Sub => "-",
            BinopKind::Mul => "*",
            BinopKind::Div => "/",
            BinopKind::Rem => "%",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareKind {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

impl CompareKind {
    pub fn symbol(self) -> &'static str {
        match self {
            CompareKind::Eq => "==",
            CompareKind::Ne => "!=",
            CompareKind::Lt => "<",
            CompareKind::Gt => ">",
            CompareKind::Le => "<=",
            CompareKind::Ge => ">=",
        }
    }
}

/// A single parsed expression node. A program is an ordered `Vec<Expr>`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    PushInt(i64),
    PushStr(String),
    PushBool(bool),
    PushType(TypeTag),
    /// A list literal. Holds sub-expressions, not values, so identifiers
    /// (and nested literals) inside a list literal are re-evaluated each
    /// time it is pushed.
    PushList(Vec<Expr>),
    /// An identifier with zero or more bracketed subscripts. Also how a
    /// bare identifier reaches the stack: a variable read with no indices.
    VarRead { name: String, indices: Vec<Expr> },

    Print,
    PrintS,
    PrintC,
    Puts,
    Input,
    Dup,
    Drop,
    Swap,
    Over,
    Rot,
    Inc,
    Dec,
    Len,
    TypeOf,
    Exit,
    Break,

    Binop(BinopKind),
    Compare(CompareKind),

    If {
        cond: Vec<Expr>,
        then: Vec<Expr>,
        else_: Option<Vec<Expr>>,
    },
    For {
        cond: Vec<Expr>,
        body: Vec<Expr>,
    },

    BlockDef { name: String, body: Vec<Expr> },
    BlockCall { name: String },

    VarDef { name: String },

    Append { indices: Vec<Expr> },

    Import { path: String },
}
