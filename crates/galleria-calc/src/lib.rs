//! Galleria arithmetic library.
//!
//! Stateless numeric helpers over `f64` plus an evaluator for expressions of the
//! exact shape `"<left> <op> <right>"`. Every function is pure and safe to call
//! from any number of threads.
//!
//! Division comes in two flavours: [`divide`] fails with [`DivisionByZero`] for
//! callers that want to handle (or propagate) the failure, while [`try_divide`]
//! and [`try_evaluate`] return `None` for callers that only need to know whether
//! a value was produced. [`evaluate`] reports the reason via [`EvalError`].

mod arithmetic;
mod expression;

pub use arithmetic::{add, divide, multiply, subtract, try_divide, DivisionByZero};
pub use expression::{evaluate, try_evaluate, EvalError, Operator};
