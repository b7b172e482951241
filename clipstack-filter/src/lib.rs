//! Composable predicates over clipboard items.
//!
//! A [`Filter`] is built from fluent `and_*` / `or_*` calls, each appending one
//! operand to a left-associative chain:
//!
//! ```text
//! Filter::new()
//!     .and_action_is(Action::Cut)
//!     .or_action_is(Action::Copy)      // (action == cut or action == copy)
//!     .and_parent_is_in(&parents)      //   and (parent == $2 or parent == $3 ...)
//! ```
//!
//! Values compared against are bound into a flat variable table and
//! referenced by slot. An embedded sub-filter contributes exactly one slot
//! holding its entire table, so slot numbers of independently built filters
//! never collide.
//!
//! Evaluation walks an explicit expression tree ([`Expr`]) or, once the
//! filter has been used, a cached closure compiled from that tree. There is
//! no string evaluation anywhere.

mod compile;
mod expr;
mod filter;
mod value;

pub use expr::{Atom, Conjunction, Expr, Fragment};
pub use filter::Filter;
pub use value::{Slot, Value};
