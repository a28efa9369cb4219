//! Evaluator: walks an expression sequence against an operand stack, a flat
//! variable environment and a flat block environment.
//!
//! One struct owns all mutable runtime state and a family of
//! `run_*`/`eval_*` methods walks the tree, generic over `impl Write`/
//! `impl BufRead` so tests can capture output and feed input without
//! touching real stdio.

mod ops;

use std::collections::HashMap;
use std::io::{BufRead, Write};

use log::debug;

use crate::error::EvalError;
use crate::loader;
use crate::parser::Expr;
use crate::value::Value;

/// What happened after evaluating a sequence: ran to completion, hit
/// `break` (consumed by the nearest `for`, otherwise propagated outward),
/// or hit `exit` (propagates all the way out, unlike `break`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Normal,
    Break,
    Exit,
}

pub struct Interpreter<W: Write, R: BufRead> {
    stack: Vec<Value>,
    variables: HashMap<String, Value>,
    blocks: HashMap<String, Vec<Expr>>,
    out: W,
    input: R,
}

impl<W: Write, R: BufRead> Interpreter<W, R> {
    pub fn new(out: W, input: R) -> Self {
        Self {
            stack: Vec::new(),
            variables: HashMap::new(),
            blocks: HashMap::new(),
            out,
            input,
        }
    }

    /// Run a full program. The only visible outcome of `exit` or falling
    /// off the end is the same: evaluation stops and the process exits
    /// with status 0.
    pub fn run(&mut self, program: &[Expr]) -> Result<(), EvalError> {
        self.eval_sequence(program)?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn stack_for_test(&self) -> &[Value] {
        &self.stack
    }

    fn eval_sequence(&mut self, exprs: &[Expr]) -> Result<Flow, EvalError> {
        for expr in exprs {
            let flow = self.eval_one(expr)?;
            if flow != Flow::Normal {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    fn eval_one(&mut self, expr: &Expr) -> Result<Flow, EvalError> {
        match expr {
            Expr::PushInt(n) => self.push(Value::Int(*n)),
            Expr::PushStr(s) => self.push(Value::Str(s.clone())),
            Expr::PushBool(b) => self.push(Value::Bool(*b)),
            Expr::PushType(t) => self.push(Value::TypeTag(*t)),
            Expr::PushList(items) => {
                let value = self.materialize_list(items)?;
                self.push(value);
            }
            Expr::VarRead { name, indices } => {
                let value = self.read_variable(name, indices)?;
                self.push(value);
            }

            Expr::Print => self.op_print()?,
            Expr::PrintS => self.op_prints()?,
            Expr::PrintC => self.op_printc()?,
            Expr::Puts => self.op_puts()?,
            Expr::Input => self.op_input()?,
            Expr::Dup => self.op_dup()?,
            Expr::Drop => self.op_drop()?,
            Expr::Swap => self.op_swap()?,
            Expr::Over => self.op_over()?,
            Expr::Rot => self.op_rot()?,
            Expr::Inc => self.op_inc()?,
            Expr::Dec => self.op_dec()?,
            Expr::Len => self.op_len()?,
            Expr::TypeOf => self.op_typeof()?,

            Expr::Binop(kind) => self.op_binop(*kind)?,
            Expr::Compare(kind) => self.op_compare(*kind)?,

            Expr::VarDef { name } => self.eval_vardef(name)?,
            Expr::Append { indices } => self.eval_append(indices)?,

            Expr::BlockDef { name, body } => self.eval_block_def(name, body)?,
            Expr::BlockCall { name } => return self.eval_call(name),

            Expr::If { cond, then, else_ } => {
                return self.eval_if(cond, then, else_.as_deref())
            }
            Expr::For { cond, body } => return self.eval_for(cond, body),

            Expr::Import { path } => {
                let program = loader::load(path)?;
                return self.eval_sequence(&program);
            }

            Expr::Exit => return Ok(Flow::Exit),
            Expr::Break => return Ok(Flow::Break),
        }
        Ok(Flow::Normal)
    }

    fn push(&mut self, value: Value) {
        self.stack.push(value);
    }

    /// Deep-snapshots a list literal: identifiers become their current
    /// value, nested literals recurse, everything else is already a value.
    fn materialize_list(&mut self, items: &[Expr]) -> Result<Value, EvalError> {
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            out.push(self.materialize_atom(item)?);
        }
        Ok(Value::List(out))
    }

    fn materialize_atom(&mut self, expr: &Expr) -> Result<Value, EvalError> {
        match expr {
            Expr::PushInt(n) => Ok(Value::Int(*n)),
            Expr::PushStr(s) => Ok(Value::Str(s.clone())),
            Expr::PushBool(b) => Ok(Value::Bool(*b)),
            Expr::PushType(t) => Ok(Value::TypeTag(*t)),
            Expr::PushList(items) => self.materialize_list(items),
            Expr::VarRead { name, indices } => self.read_variable(name, indices),
            other => unreachable!("list elements and subscripts are atoms only: {other:?}"),
        }
    }

    /// Looks up `name`, then walks `indices` left to right.
    fn read_variable(&mut self, name: &str, indices: &[Expr]) -> Result<Value, EvalError> {
        let mut current = self
            .variables
            .get(name)
            .cloned()
            .ok_or_else(|| EvalError::UndefinedVariable(name.to_string()))?;
        for index_expr in indices {
            let index = self.eval_index(index_expr, "list index")?;
            current = Self::index_into(&current, index)?;
        }
        Ok(current)
    }

    fn index_into(value: &Value, index: i64) -> Result<Value, EvalError> {
        match value {
            Value::List(items) => {
                let index = usize::try_from(index).map_err(|_| EvalError::IndexOutOfRange)?;
                items.get(index).cloned().ok_or(EvalError::IndexOutOfRange)
            }
            _ => Err(EvalError::IndexOutOfRange),
        }
    }

    /// An index expression is itself an atom: a literal int, or an
    /// identifier that is recursively resolved through its own subscripts.
    fn eval_index(&mut self, expr: &Expr, op: &'static str) -> Result<i64, EvalError> {
        match expr {
            Expr::PushInt(n) => Ok(*n),
            Expr::VarRead { name, indices } => match self.read_variable(name, indices)? {
                Value::Int(n) => Ok(n),
                _ => Err(EvalError::Type { op, expected: "int" }),
            },
            _ => Err(EvalError::Type { op, expected: "int" }),
        }
    }

    fn eval_vardef(&mut self, name: &str) -> Result<(), EvalError> {
        let value = self
            .stack
            .last()
            .cloned()
            .ok_or(EvalError::Arity { op: "->", need: 1 })?;
        self.variables.insert(name.to_string(), value);
        Ok(())
    }

    /// `append[i1][i2]…`: pop value and list, walk the path, push the
    /// (possibly mutated) list back. Every path element, including the
    /// last, must itself be a list (spec §9's resolution of the source's
    /// ambiguous final-element rule).
    fn eval_append(&mut self, indices: &[Expr]) -> Result<(), EvalError> {
        if self.stack.len() < 2 {
            return Err(EvalError::Arity { op: "append", need: 2 });
        }
        let value = self.stack.pop().unwrap();
        let list = self.stack.pop().unwrap();
        let Value::List(mut items) = list else {
            return Err(EvalError::Type {
                op: "append",
                expected: "list",
            });
        };
        if indices.is_empty() {
            items.push(value);
        } else {
            self.append_at_path(&mut items, indices, value)?;
        }
        self.stack.push(Value::List(items));
        Ok(())
    }

    fn append_at_path(
        &mut self,
        items: &mut Vec<Value>,
        indices: &[Expr],
        value: Value,
    ) -> Result<(), EvalError> {
        let index = self.eval_index(&indices[0], "append")?;
        let index = usize::try_from(index).map_err(|_| EvalError::IndexOutOfRange)?;
        let slot = items.get_mut(index).ok_or(EvalError::IndexOutOfRange)?;
        match slot {
            Value::List(inner) => {
                if indices.len() == 1 {
                    inner.push(value);
                    Ok(())
                } else {
                    self.append_at_path(inner, &indices[1..], value)
                }
            }
            _ => Err(EvalError::Type {
                op: "append",
                expected: "list",
            }),
        }
    }

    fn eval_block_def(&mut self, name: &str, body: &[Expr]) -> Result<(), EvalError> {
        if self.blocks.contains_key(name) {
            return Err(EvalError::BlockRedefined(name.to_string()));
        }
        debug!("defining block '{name}' ({} expr(s))", body.len());
        self.blocks.insert(name.to_string(), body.to_vec());
        Ok(())
    }

    fn eval_call(&mut self, name: &str) -> Result<Flow, EvalError> {
        let body = self
            .blocks
            .get(name)
            .cloned()
            .ok_or_else(|| EvalError::UndefinedBlock(name.to_string()))?;
        self.eval_sequence(&body)
    }

    fn eval_if(
        &mut self,
        cond: &[Expr],
        then: &[Expr],
        else_: Option<&[Expr]>,
    ) -> Result<Flow, EvalError> {
        if self.eval_sequence(cond)? == Flow::Exit {
            return Ok(Flow::Exit);
        }
        if self.pop_bool("if")? {
            self.eval_sequence(then)
        } else if let Some(else_body) = else_ {
            self.eval_sequence(else_body)
        } else {
            Ok(Flow::Normal)
        }
    }

    fn eval_for(&mut self, cond: &[Expr], body: &[Expr]) -> Result<Flow, EvalError> {
        loop {
            if self.eval_sequence(cond)? == Flow::Exit {
                return Ok(Flow::Exit);
            }
            if !self.pop_bool("for")? {
                return Ok(Flow::Normal);
            }
            match self.eval_sequence(body)? {
                Flow::Exit => return Ok(Flow::Exit),
                Flow::Break => return Ok(Flow::Normal),
                Flow::Normal => {}
            }
        }
    }

    fn pop_bool(&mut self, op: &'static str) -> Result<bool, EvalError> {
        match self.stack.pop() {
            Some(Value::Bool(b)) => Ok(b),
            Some(_) => Err(EvalError::Type { op, expected: "bool" }),
            None => Err(EvalError::Arity { op, need: 1 }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    fn run_capturing(src: &str) -> (String, Vec<Value>) {
        let program = Parser::new(src).parse_program().expect("parses");
        let mut out = Vec::new();
        let mut interp = Interpreter::new(&mut out, std::io::empty());
        interp.run(&program).expect("runs");
        (String::from_utf8(out).unwrap(), interp.stack_for_test().to_vec())
    }

    #[test]
    fn arithmetic_and_print() {
        let (out, _) = run_capturing("1 2 + print");
        assert_eq!(out, "3\n");
    }

    #[test]
    fn string_concatenation() {
        let (out, _) = run_capturing(r#""foo" "bar" + print"#);
        assert_eq!(out, "foobar\n");
    }

    #[test]
    fn list_len() {
        let (out, _) = run_capturing("[1,2,3] len print");
        assert_eq!(out, "3\n");
    }

    #[test]
    fn nested_indexing() {
        let (out, _) = run_capturing("[[1,2],[3,4]] -> g g[1][0] print");
        assert_eq!(out, "3\n");
    }

    #[test]
    fn for_loop_counts_up() {
        let (out, _) = run_capturing("0 -> i for i 3 < do i print i inc -> i end");
        assert_eq!(out, "0\n1\n2\n");
    }

    #[test]
    fn if_else_branches() {
        let (out, _) = run_capturing(
            r#"5 -> x if x 3 > do "big" print else "small" print end"#,
        );
        assert_eq!(out, "big\n");
    }

    #[test]
    fn block_call_twice() {
        let (out, _) = run_capturing("block g do \"hi\" print end call g call g");
        assert_eq!(out, "hi\nhi\n");
    }

    #[test]
    fn append_without_index() {
        let (out, _) = run_capturing("[1,2] 3 append -> l l print");
        assert_eq!(out, "[1, 2, 3]\n");
    }

    #[test]
    fn equality_across_kinds_and_within() {
        let (out, _) = run_capturing(r#"1 "a" == print 1 1 == print 1 "a" != print"#);
        assert_eq!(out, "false\ntrue\ntrue\n");
    }

    #[test]
    fn division_by_zero_is_fatal() {
        let program = Parser::new("1 0 /").parse_program().unwrap();
        let mut out = Vec::new();
        let mut interp = Interpreter::new(&mut out, std::io::empty());
        assert_eq!(interp.run(&program), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn break_inside_for_stops_only_that_loop() {
        let (out, _) = run_capturing(
            "0 -> i for true do i print i inc -> i i 2 == if true do break end end end",
        );
        assert_eq!(out, "0\n1\n2\n");
    }

    #[test]
    fn for_with_false_condition_runs_zero_times() {
        let (out, _) = run_capturing("false for do \"never\" print end");
        assert_eq!(out, "");
    }

    #[test]
    fn variable_snapshot_is_not_retroactively_mutated() {
        let (out, _) = run_capturing(
            "[1,2,3] -> a a print a 4 append -> a a print",
        );
        assert_eq!(out, "[1, 2, 3][1, 2, 3, 4]");
    }

    #[test]
    fn deep_equality_ignores_sharing() {
        let (out, _) = run_capturing("[1,[2,3]] [1,[2,3]] == print");
        assert_eq!(out, "true\n");
    }

    #[test]
    fn undefined_variable_is_fatal() {
        let program = Parser::new("x print").parse_program().unwrap();
        let mut out = Vec::new();
        let mut interp = Interpreter::new(&mut out, std::io::empty());
        assert_eq!(
            interp.run(&program),
            Err(EvalError::UndefinedVariable("x".into()))
        );
    }

    #[test]
    fn block_redefinition_is_fatal() {
        let program = Parser::new("block g do 1 print end block g do 2 print end")
            .parse_program()
            .unwrap();
        let mut out = Vec::new();
        let mut interp = Interpreter::new(&mut out, std::io::empty());
        assert_eq!(
            interp.run(&program),
            Err(EvalError::BlockRedefined("g".into()))
        );
    }

    #[test]
    fn exit_stops_the_program_immediately() {
        let (out, _) = run_capturing("\"a\" print exit \"b\" print");
        assert_eq!(out, "a\n");
    }
}
