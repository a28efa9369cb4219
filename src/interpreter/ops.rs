//! Primitive, arity-checked stack operations and the arithmetic/comparison
//! operators. Split out from `mod.rs`'s control-flow and environment logic,
//! keeping stack-intrinsic handling separate from declarations and calls.

use std::io::{BufRead, Read, Write};

use log::error;

use crate::error::EvalError;
use crate::parser::{BinopKind, CompareKind};
use crate::value::Value;

use super::Interpreter;

impl<W: Write, R: BufRead> Interpreter<W, R> {
    fn pop1(&mut self, op: &'static str) -> Result<Value, EvalError> {
        self.stack.pop().ok_or(EvalError::Arity { op, need: 1 })
    }

    /// Pops right-then-left, returning `(left, right)` in source order:
    /// `left` was pushed first and sits below `right`.
    fn pop2(&mut self, op: &'static str) -> Result<(Value, Value), EvalError> {
        if self.stack.len() < 2 {
            return Err(EvalError::Arity { op, need: 2 });
        }
        let right = self.stack.pop().unwrap();
        let left = self.stack.pop().unwrap();
        Ok((left, right))
    }

    pub(super) fn op_dup(&mut self) -> Result<(), EvalError> {
        let top = self.pop1("dup")?;
        self.stack.push(top.clone());
        self.stack.push(top);
        Ok(())
    }

    pub(super) fn op_drop(&mut self) -> Result<(), EvalError> {
        self.pop1("drop")?;
        Ok(())
    }

    pub(super) fn op_swap(&mut self) -> Result<(), EvalError> {
        let (a, b) = self.pop2("swap")?;
        self.stack.push(b);
        self.stack.push(a);
        Ok(())
    }

    pub(super) fn op_over(&mut self) -> Result<(), EvalError> {
        let (a, b) = self.pop2("over")?;
        self.stack.push(a.clone());
        self.stack.push(b);
        self.stack.push(a);
        Ok(())
    }

    /// `(a b c) -> (b c a)`: the bottom of the trio moves to the top.
    pub(super) fn op_rot(&mut self) -> Result<(), EvalError> {
        if self.stack.len() < 3 {
            return Err(EvalError::Arity { op: "rot", need: 3 });
        }
        let c = self.stack.pop().unwrap();
        let b = self.stack.pop().unwrap();
        let a = self.stack.pop().unwrap();
        self.stack.push(b);
        self.stack.push(c);
        self.stack.push(a);
        Ok(())
    }

    pub(super) fn op_inc(&mut self) -> Result<(), EvalError> {
        match self.pop1("inc")? {
            Value::Int(n) => {
                self.stack.push(Value::Int(n + 1));
                Ok(())
            }
            _ => Err(EvalError::Type { op: "inc", expected: "int" }),
        }
    }

    pub(super) fn op_dec(&mut self) -> Result<(), EvalError> {
        match self.pop1("dec")? {
            Value::Int(n) => {
                self.stack.push(Value::Int(n - 1));
                Ok(())
            }
            _ => Err(EvalError::Type { op: "dec", expected: "int" }),
        }
    }

    pub(super) fn op_len(&mut self) -> Result<(), EvalError> {
        match self.pop1("len")? {
            Value::List(items) => {
                self.stack.push(Value::Int(items.len() as i64));
                Ok(())
            }
            _ => Err(EvalError::Type { op: "len", expected: "list" }),
        }
    }

    pub(super) fn op_typeof(&mut self) -> Result<(), EvalError> {
        let top = self.pop1("typeof")?;
        self.stack.push(Value::TypeTag(top.type_tag()));
        Ok(())
    }

    /// Reads one whitespace-delimited token, skipping leading whitespace
    /// and stopping at the next one, byte at a time so it works over any
    /// `BufRead`.
    pub(super) fn op_input(&mut self) -> Result<(), EvalError> {
        let mut token = Vec::new();
        loop {
            let mut byte = [0u8; 1];
            let read = self.input.read(&mut byte).map_err(|e| {
                error!("stdin read failed: {e}");
                EvalError::Io(e.to_string())
            })?;
            if read == 0 {
                break;
            }
            if byte[0].is_ascii_whitespace() {
                if token.is_empty() {
                    continue;
                }
                break;
            }
            token.push(byte[0]);
        }
        self.stack
            .push(Value::Str(String::from_utf8_lossy(&token).into_owned()));
        Ok(())
    }

    pub(super) fn op_puts(&mut self) -> Result<(), EvalError> {
        let top = self.pop1("puts")?;
        write!(self.out, "{}", top.to_puts_string()).map_err(|e| EvalError::Io(e.to_string()))
    }

    pub(super) fn op_print(&mut self) -> Result<(), EvalError> {
        self.op_puts()?;
        writeln!(self.out).map_err(|e| EvalError::Io(e.to_string()))
    }

    /// Non-destructive full dump, bottom to top, prefixed `PrintS <N> ` and
    /// suffixed with a literal `← top` arrow.
    pub(super) fn op_prints(&mut self) -> Result<(), EvalError> {
        write!(self.out, "PrintS <{}> ", self.stack.len())
            .map_err(|e| EvalError::Io(e.to_string()))?;
        for value in &self.stack {
            write!(self.out, "{} ", value.to_puts_string())
                .map_err(|e| EvalError::Io(e.to_string()))?;
        }
        writeln!(self.out, "\u{2190} top").map_err(|e| EvalError::Io(e.to_string()))
    }

    pub(super) fn op_printc(&mut self) -> Result<(), EvalError> {
        for value in &self.stack {
            write!(self.out, "{} ", value.to_puts_string())
                .map_err(|e| EvalError::Io(e.to_string()))?;
        }
        writeln!(self.out, " ").map_err(|e| EvalError::Io(e.to_string()))
    }

    pub(super) fn op_binop(&mut self, kind: BinopKind) -> Result<(), EvalError> {
        let op = kind.symbol();
        let (left, right) = self.pop2(op)?;
        let result = match (kind, left, right) {
            (BinopKind::Add, Value::Str(l), Value::Str(r)) => Value::Str(l + &r),
            (BinopKind::Add, Value::Int(l), Value::Int(r)) => Value::Int(l + r),
            (BinopKind::Add, _, _) => {
                return Err(EvalError::Type {
                    op,
                    expected: "int or string",
                })
            }
            (BinopKind::Sub, Value::Int(l), Value::Int(r)) => Value::Int(l - r),
            (BinopKind::Mul, Value::Int(l), Value::Int(r)) => Value::Int(l * r),
            (BinopKind::Div, Value::Int(l), Value::Int(r)) => {
                if r == 0 {
                    return Err(EvalError::DivisionByZero);
                }
                Value::Int(l / r)
            }
            (BinopKind::Rem, Value::Int(l), Value::Int(r)) => {
                if r == 0 {
                    return Err(EvalError::DivisionByZero);
                }
                Value::Int(l % r)
            }
            (_, _, _) => return Err(EvalError::Type { op, expected: "int" }),
        };
        self.stack.push(result);
        Ok(())
    }

    pub(super) fn op_compare(&mut self, kind: CompareKind) -> Result<(), EvalError> {
        let op = kind.symbol();
        let (left, right) = self.pop2(op)?;
        let result = match kind {
            CompareKind::Eq => left == right,
            CompareKind::Ne => left != right,
            CompareKind::Lt | CompareKind::Gt | CompareKind::Le | CompareKind::Ge => {
                let (Value::Int(l), Value::Int(r)) = (&left, &right) else {
                    return Err(EvalError::Type { op, expected: "int" });
                };
                match kind {
                    CompareKind::Lt => l < r,
                    CompareKind::Gt => l > r,
                    CompareKind::Le => l <= r,
                    CompareKind::Ge => l >= r,
                    CompareKind::Eq | CompareKind::Ne => unreachable!(),
                }
            }
        };
        self.stack.push(Value::Bool(result));
        Ok(())
    }
}
