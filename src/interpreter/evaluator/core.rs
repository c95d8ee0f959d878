use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::{
    ast::{Block, Expression, Program, Statement},
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::{builtin, number},
        object::{BuiltinFn, Object},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// A mapping from builtin names to their native implementations.
pub type BuiltinRegistry = HashMap<String, BuiltinFn>;

/// The recursive tree-walking evaluator.
///
/// The evaluator owns no mutable state of its own; all bindings live in the
/// environment chain passed to each call. The builtin registry is explicit
/// construction-time state rather than a module-level table, so independent
/// evaluation contexts cannot interfere with each other.
///
/// Evaluation is fully synchronous ordinary recursion; call depth is
/// bounded only by the host stack, so an unboundedly recursive user program
/// exhausts it.
pub struct Evaluator {
    builtins: BuiltinRegistry,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// Creates an evaluator with the default builtin registry.
    #[must_use]
    pub fn new() -> Self {
        Self { builtins: builtin::default_registry() }
    }

    /// Creates an evaluator with a caller-supplied builtin registry.
    #[must_use]
    pub fn with_builtins(builtins: BuiltinRegistry) -> Self {
        Self { builtins }
    }

    /// Evaluates a whole program in the given root environment.
    ///
    /// Statements run in order. A `ReturnValue` surfacing at the top level
    /// ends the program early and is unwrapped into its inner value, so
    /// the sentinel never escapes to the caller.
    pub fn eval_program(
        &self,
        program: &Program,
        env: &Rc<RefCell<Environment>>,
    ) -> EvalResult<Option<Object>> {
        let mut result = None;
        for statement in &program.statements {
            match self.eval_statement(statement, env)? {
                Some(Object::ReturnValue(inner)) => return Ok(Some(*inner)),
                value => result = value,
            }
        }
        Ok(result)
    }

    /// Evaluates a block's statements in order. A `ReturnValue` stops the
    /// block and travels outward unchanged; unwrapping happens only at the
    /// program or call boundary.
    fn eval_block(&self, block: &Block, env: &Rc<RefCell<Environment>>) -> EvalResult<Option<Object>> {
        let mut result = None;
        for statement in &block.statements {
            match self.eval_statement(statement, env)? {
                Some(Object::ReturnValue(inner)) => {
                    return Ok(Some(Object::ReturnValue(inner)));
                },
                value => result = value,
            }
        }
        Ok(result)
    }

    fn eval_statement(
        &self,
        statement: &Statement,
        env: &Rc<RefCell<Environment>>,
    ) -> EvalResult<Option<Object>> {
        match statement {
            Statement::Let { token, name, value } => {
                let object = self
                    .eval_expression(value, env)?
                    .ok_or(RuntimeError::MissingValue { line: token.line })?;
                env.borrow_mut().set(name, object);
                Ok(None)
            },
            Statement::FunctionDefine { name, parameters, body, .. } => {
                // The environment captured here is the defining scope; a
                // later call chains onto this, not onto its caller.
                let function = Object::Function {
                    parameters: parameters.clone(),
                    body: body.clone(),
                    env: Rc::clone(env),
                };
                Ok(Some(env.borrow_mut().set(name, function)))
            },
            // The parser currently builds blocks only as function bodies,
            // which `eval_call` runs through `eval_block` directly; this arm
            // keeps the match exhaustive for standalone block statements.
            Statement::Block(block) => self.eval_block(block, env),
            Statement::Return { token, value } => {
                let object = self
                    .eval_expression(value, env)?
                    .ok_or(RuntimeError::MissingValue { line: token.line })?;
                Ok(Some(Object::ReturnValue(Box::new(object))))
            },
            Statement::Expression { expression, .. } => self.eval_expression(expression, env),
        }
    }

    fn eval_expression(
        &self,
        expression: &Expression,
        env: &Rc<RefCell<Environment>>,
    ) -> EvalResult<Option<Object>> {
        match expression {
            Expression::Identifier { token, value } => {
                self.eval_identifier(value, env, token.line).map(Some)
            },
            Expression::Number { value, .. } => Ok(Some(Object::Number(value.clone()))),
            Expression::StringLit { value, .. } => Ok(Some(Object::String(value.clone()))),
            Expression::Null { .. } => Ok(Some(Object::Null)),
            Expression::Infix { token, lhs, op, rhs } => {
                let left = self
                    .eval_expression(lhs, env)?
                    .ok_or(RuntimeError::MissingValue { line: lhs.line() })?;
                let right = self
                    .eval_expression(rhs, env)?
                    .ok_or(RuntimeError::MissingValue { line: rhs.line() })?;
                Self::eval_infix(op, &left, &right, token.line).map(Some)
            },
            Expression::Call { token, callee, arguments } => {
                self.eval_call(callee, arguments, token.line, env)
            },
            Expression::Prefix { token, .. } => Err(RuntimeError::UnsupportedNode {
                node: expression.to_string(),
                line: token.line,
            }),
        }
    }

    /// Resolves a name: environment chain first, then the builtin
    /// registry. A `let` binding therefore shadows a builtin of the same
    /// name.
    fn eval_identifier(
        &self,
        name: &str,
        env: &Rc<RefCell<Environment>>,
        line: usize,
    ) -> EvalResult<Object> {
        if let Some(object) = env.borrow().get(name) {
            return Ok(object);
        }
        if let Some(function) = self.builtins.get(name) {
            return Ok(Object::Builtin { name: name.to_string(), function: *function });
        }
        Err(RuntimeError::UndefinedIdentifier { name: name.to_string(), line })
    }

    /// Only number-on-number operations exist today; every other operand
    /// combination is rejected wholesale.
    fn eval_infix(op: &str, lhs: &Object, rhs: &Object, line: usize) -> EvalResult<Object> {
        match (lhs, rhs) {
            (Object::Number(left), Object::Number(right)) => {
                number::eval_infix_number(op, left, right, line)
            },
            _ => Err(RuntimeError::IllegalOperands {
                op: op.to_string(),
                lhs: lhs.to_string(),
                rhs: rhs.to_string(),
                line,
            }),
        }
    }

    /// Evaluates the callee, then the arguments left to right (aborting on
    /// the first argument failure, reporting its position), and finally
    /// dispatches on what the callee turned out to be.
    fn eval_call(
        &self,
        callee: &Expression,
        arguments: &[Expression],
        line: usize,
        env: &Rc<RefCell<Environment>>,
    ) -> EvalResult<Option<Object>> {
        let function = self
            .eval_expression(callee, env)?
            .ok_or(RuntimeError::MissingValue { line })?;

        let mut args = Vec::with_capacity(arguments.len());
        for (index, argument) in arguments.iter().enumerate() {
            let value = self
                .eval_expression(argument, env)
                .map_err(|error| RuntimeError::Argument {
                    index,
                    details: error.to_string(),
                    line,
                })?
                .ok_or(RuntimeError::MissingValue { line: argument.line() })?;
            args.push(value);
        }

        match function {
            Object::Function { parameters, body, env: captured } => {
                if parameters.len() != args.len() {
                    return Err(RuntimeError::ArityMismatch {
                        expected: parameters.len(),
                        found: args.len(),
                        line,
                    });
                }
                // New frame on the *captured* environment, not the
                // caller's: this is what makes closures lexical.
                let call_env = Rc::new(RefCell::new(Environment::with_parent(captured)));
                for (parameter, value) in parameters.iter().zip(args) {
                    call_env.borrow_mut().set(parameter, value);
                }
                match self.eval_block(&body, &call_env)? {
                    Some(Object::ReturnValue(inner)) => Ok(Some(*inner)),
                    value => Ok(value),
                }
            },
            Object::Builtin { function, .. } => function(&args, line),
            other => Err(RuntimeError::NotCallable { callee: other.to_string(), line }),
        }
    }
}
