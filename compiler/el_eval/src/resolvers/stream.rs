//! Stream-style methods on lists, sets and arrays.
//!
//! `items.filter(x -> x > 1).map(x -> x * 2).toList()` works on the
//! collection directly: intermediate operations return a new list, so
//! `stream()` and `toList()` are both just copies. Terminal operations that
//! would return an empty optional return `null`.

use std::cmp::Ordering;

use el_ir::BinaryOp;
use el_value::errors::{wrong_arg_count, wrong_arg_type};
use el_value::{EvalError, EvalResult, LambdaValue, Value, ValueType};

use super::{PropertyResolver, Resolution, ResolveResult};
use crate::coerce::{to_boolean, to_f64, to_i64};
use crate::context::EvalContext;
use crate::operators::{compare, evaluate_binary};

/// Handles method calls on `Value::List`, `Value::Set` and `Value::Array`.
#[derive(Debug)]
pub struct StreamResolver;

impl PropertyResolver for StreamResolver {
    fn name(&self) -> &'static str {
        "stream"
    }

    fn get_value(
        &self,
        _ctx: &mut EvalContext,
        _base: &Value,
        _property: &Value,
    ) -> ResolveResult<Value> {
        Ok(Resolution::Unresolved)
    }

    fn get_type(
        &self,
        _ctx: &mut EvalContext,
        _base: &Value,
        _property: &Value,
    ) -> ResolveResult<ValueType> {
        Ok(Resolution::Unresolved)
    }

    fn set_value(
        &self,
        _ctx: &mut EvalContext,
        _base: &Value,
        _property: &Value,
        _value: &Value,
    ) -> ResolveResult<()> {
        Ok(Resolution::Unresolved)
    }

    fn is_read_only(
        &self,
        _ctx: &mut EvalContext,
        _base: &Value,
        _property: &Value,
    ) -> ResolveResult<bool> {
        Ok(Resolution::Unresolved)
    }

    fn invoke(
        &self,
        ctx: &mut EvalContext,
        base: &Value,
        method: &str,
        args: &[Value],
    ) -> ResolveResult<Value> {
        let Some(items) = base.collection_items() else {
            return Ok(Resolution::Unresolved);
        };
        let Some(op) = StreamOp::from_name(method) else {
            return Ok(Resolution::Unresolved);
        };
        let (min, max) = op.arity();
        if args.len() < min || args.len() > max {
            return Err(wrong_arg_count(method, min, args.len()));
        }
        run(ctx, op, method, items, args).map(Resolution::Resolved)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum StreamOp {
    Stream,
    ToList,
    Filter,
    Map,
    ForEach,
    Reduce,
    Count,
    Sum,
    Average,
    Min,
    Max,
    AnyMatch,
    AllMatch,
    NoneMatch,
    Distinct,
    Sorted,
    Limit,
    Skip,
    FindFirst,
    Size,
    IsEmpty,
    Contains,
}

impl StreamOp {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "stream" => StreamOp::Stream,
            "toList" => StreamOp::ToList,
            "filter" => StreamOp::Filter,
            "map" => StreamOp::Map,
            "forEach" => StreamOp::ForEach,
            "reduce" => StreamOp::Reduce,
            "count" => StreamOp::Count,
            "sum" => StreamOp::Sum,
            "average" => StreamOp::Average,
            "min" => StreamOp::Min,
            "max" => StreamOp::Max,
            "anyMatch" => StreamOp::AnyMatch,
            "allMatch" => StreamOp::AllMatch,
            "noneMatch" => StreamOp::NoneMatch,
            "distinct" => StreamOp::Distinct,
            "sorted" => StreamOp::Sorted,
            "limit" => StreamOp::Limit,
            "skip" => StreamOp::Skip,
            "findFirst" => StreamOp::FindFirst,
            "size" => StreamOp::Size,
            "isEmpty" => StreamOp::IsEmpty,
            "contains" => StreamOp::Contains,
            _ => return None,
        })
    }

    /// Accepted argument counts, inclusive.
    fn arity(self) -> (usize, usize) {
        match self {
            StreamOp::Stream
            | StreamOp::ToList
            | StreamOp::Count
            | StreamOp::Sum
            | StreamOp::Average
            | StreamOp::Distinct
            | StreamOp::FindFirst
            | StreamOp::Size
            | StreamOp::IsEmpty => (0, 0),
            StreamOp::Filter
            | StreamOp::Map
            | StreamOp::ForEach
            | StreamOp::AnyMatch
            | StreamOp::AllMatch
            | StreamOp::NoneMatch
            | StreamOp::Limit
            | StreamOp::Skip
            | StreamOp::Contains => (1, 1),
            StreamOp::Min | StreamOp::Max | StreamOp::Sorted => (0, 1),
            StreamOp::Reduce => (1, 2),
        }
    }
}

fn lambda_arg<'a>(method: &str, arg: &'a Value) -> Result<&'a LambdaValue, EvalError> {
    match arg {
        Value::Lambda(lambda) => Ok(lambda),
        _ => Err(wrong_arg_type(method, "lambda")),
    }
}

fn test(ctx: &mut EvalContext, predicate: &LambdaValue, item: &Value) -> Result<bool, EvalError> {
    let result = ctx.invoke_lambda(predicate, std::slice::from_ref(item))?;
    to_boolean(&result)
}

fn count_arg(arg: &Value) -> Result<usize, EvalError> {
    Ok(usize::try_from(to_i64(arg)?).unwrap_or(0))
}

#[expect(
    clippy::cast_precision_loss,
    reason = "the element count of an average is exact well past any real list"
)]
fn run(
    ctx: &mut EvalContext,
    op: StreamOp,
    method: &str,
    items: Vec<Value>,
    args: &[Value],
) -> EvalResult {
    Ok(match op {
        StreamOp::Stream | StreamOp::ToList => Value::list(items),
        StreamOp::Filter => {
            let predicate = lambda_arg(method, &args[0])?;
            let mut kept = Vec::with_capacity(items.len());
            for item in items {
                if test(ctx, predicate, &item)? {
                    kept.push(item);
                }
            }
            Value::list(kept)
        }
        StreamOp::Map => {
            let transform = lambda_arg(method, &args[0])?;
            let mapped = items
                .iter()
                .map(|item| ctx.invoke_lambda(transform, std::slice::from_ref(item)))
                .collect::<Result<Vec<_>, _>>()?;
            Value::list(mapped)
        }
        StreamOp::ForEach => {
            let action = lambda_arg(method, &args[0])?;
            for item in &items {
                ctx.invoke_lambda(action, std::slice::from_ref(item))?;
            }
            Value::Null
        }
        StreamOp::Reduce => {
            let (mut acc, combine, rest) = match args {
                [identity, combine] => (identity.clone(), combine, &items[..]),
                [combine] => match items.split_first() {
                    Some((first, rest)) => (first.clone(), combine, rest),
                    None => return Ok(Value::Null),
                },
                _ => return Err(wrong_arg_count(method, 1, args.len())),
            };
            let combine = lambda_arg(method, combine)?;
            for item in rest {
                acc = ctx.invoke_lambda(combine, &[acc, item.clone()])?;
            }
            acc
        }
        StreamOp::Count => Value::Long(i64::try_from(items.len()).unwrap_or(i64::MAX)),
        StreamOp::Sum => sum(&items)?,
        StreamOp::Average => {
            if items.is_empty() {
                Value::Null
            } else {
                Value::Double(to_f64(&sum(&items)?)? / items.len() as f64)
            }
        }
        StreamOp::Min | StreamOp::Max => {
            let comparator = args.first().map(|c| lambda_arg(method, c)).transpose()?;
            let mut best: Option<Value> = None;
            for item in items {
                let replace = match &best {
                    None => true,
                    Some(current) => {
                        let ordering = order(ctx, comparator, &item, current)?;
                        if op == StreamOp::Min {
                            ordering == Ordering::Less
                        } else {
                            ordering == Ordering::Greater
                        }
                    }
                };
                if replace {
                    best = Some(item);
                }
            }
            best.unwrap_or(Value::Null)
        }
        StreamOp::AnyMatch | StreamOp::AllMatch | StreamOp::NoneMatch => {
            let predicate = lambda_arg(method, &args[0])?;
            let mut any = false;
            let mut all = true;
            for item in &items {
                if test(ctx, predicate, item)? {
                    any = true;
                    if op == StreamOp::AnyMatch {
                        break;
                    }
                } else {
                    all = false;
                    if op == StreamOp::AllMatch {
                        break;
                    }
                }
            }
            Value::Bool(match op {
                StreamOp::AnyMatch => any,
                StreamOp::AllMatch => all,
                _ => !any,
            })
        }
        StreamOp::Distinct => {
            let mut unique: Vec<Value> = Vec::with_capacity(items.len());
            for item in items {
                if !unique.contains(&item) {
                    unique.push(item);
                }
            }
            Value::list(unique)
        }
        StreamOp::Sorted => {
            let comparator = args.first().map(|c| lambda_arg(method, c)).transpose()?;
            let mut sorted = items;
            let mut failure = None;
            sorted.sort_by(|a, b| match order(ctx, comparator, a, b) {
                Ok(ordering) => ordering,
                Err(err) => {
                    failure.get_or_insert(err);
                    Ordering::Equal
                }
            });
            if let Some(err) = failure {
                return Err(err);
            }
            Value::list(sorted)
        }
        StreamOp::Limit => Value::list(items.into_iter().take(count_arg(&args[0])?).collect()),
        StreamOp::Skip => Value::list(items.into_iter().skip(count_arg(&args[0])?).collect()),
        StreamOp::FindFirst => items.into_iter().next().unwrap_or(Value::Null),
        StreamOp::Size => Value::Int(i32::try_from(items.len()).unwrap_or(i32::MAX)),
        StreamOp::IsEmpty => Value::Bool(items.is_empty()),
        StreamOp::Contains => Value::Bool(items.contains(&args[0])),
    })
}

fn sum(items: &[Value]) -> EvalResult {
    items.iter().try_fold(Value::Long(0), |acc, item| {
        evaluate_binary(BinaryOp::Add, &acc, item)
    })
}

/// Natural order, or the sign of `comparator(a, b)` when one is given.
fn order(
    ctx: &mut EvalContext,
    comparator: Option<&LambdaValue>,
    a: &Value,
    b: &Value,
) -> Result<Ordering, EvalError> {
    match comparator {
        Some(comparator) => {
            let result = ctx.invoke_lambda(comparator, &[a.clone(), b.clone()])?;
            Ok(compare(BinaryOp::Gt, &result, &Value::Long(0))?.unwrap_or(Ordering::Equal))
        }
        None => Ok(compare(BinaryOp::Lt, a, b)?.unwrap_or(Ordering::Equal)),
    }
}
