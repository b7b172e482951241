//! Closure compilation of expression trees.

use crate::expr::Expr;
use crate::value::{self, Value};
use clipstack_types::Item;

/// A compiled filter: a pure function of the item and the variable table.
pub(crate) type Predicate = Box<dyn Fn(&Item, &[Value]) -> bool>;

/// Turns `expr` into nested closures so that repeated evaluation skips the
/// tree walk's dispatch on node kinds.
pub(crate) fn compile(expr: &Expr) -> Predicate {
    match expr {
        Expr::Atom(atom) => {
            let atom = *atom;
            Box::new(move |item: &Item, vars: &[Value]| atom.evaluate(item, vars))
        }
        Expr::And(children) => match children.as_slice() {
            [] => Box::new(|_: &Item, _: &[Value]| true),
            [only] => compile(only),
            _ => {
                let children: Vec<Predicate> = children.iter().map(compile).collect();
                Box::new(move |item: &Item, vars: &[Value]| {
                    children.iter().all(|child| child(item, vars))
                })
            }
        },
        Expr::Or(children) => match children.as_slice() {
            [] => Box::new(|_: &Item, _: &[Value]| false),
            [only] => compile(only),
            _ => {
                let children: Vec<Predicate> = children.iter().map(compile).collect();
                Box::new(move |item: &Item, vars: &[Value]| {
                    children.iter().any(|child| child(item, vars))
                })
            }
        },
        Expr::Scoped { slot, expr } => {
            let slot = *slot;
            let inner = compile(expr);
            Box::new(move |item: &Item, vars: &[Value]| {
                value::table(vars, slot).is_some_and(|nested| inner(item, nested))
            })
        }
    }
}
