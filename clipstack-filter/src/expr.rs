//! Authored fragments and the expression tree they fold into.
//!
//! A filter is recorded as the flat list of fragments the caller wrote:
//! operands separated by `and`/`or` tokens. Folding that list produces an
//! [`Expr`] tree that evaluates strictly left to right, without operator
//! precedence: `a or b and c` means `(a or b) and c`.

use crate::value::{self, Slot, Value};
use clipstack_types::Item;
use std::fmt;

/// Joins two operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conjunction {
    And,
    Or,
}

impl Conjunction {
    fn keyword(self) -> &'static str {
        match self {
            Conjunction::And => "and",
            Conjunction::Or => "or",
        }
    }
}

/// A single comparison against an item. The slot points at the value the
/// item is compared to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Atom {
    ModelFromProvider(Slot),
    ModelNotFromProvider(Slot),
    ModelIs(Slot),
    ModelIsNot(Slot),
    ParentFromProvider(Slot),
    ParentNotFromProvider(Slot),
    HasNoParent,
    ParentIs(Slot),
    ParentIsNot(Slot),
    ActionIs(Slot),
    ActionIsNot(Slot),
}

impl Atom {
    /// Tests `item` against this atom.
    ///
    /// A slot that is missing or holds a value of the wrong kind makes the
    /// atom false.
    #[must_use]
    pub fn evaluate(&self, item: &Item, vars: &[Value]) -> bool {
        match *self {
            Atom::ModelFromProvider(slot) => {
                value::provider(vars, slot).is_some_and(|p| item.data_provider() == Some(p))
            }
            Atom::ModelNotFromProvider(slot) => {
                value::provider(vars, slot).is_some_and(|p| item.data_provider() != Some(p))
            }
            Atom::ModelIs(slot) => {
                value::identity(vars, slot).is_some_and(|id| item.model_id() == Some(id))
            }
            Atom::ModelIsNot(slot) => {
                value::identity(vars, slot).is_some_and(|id| item.model_id() != Some(id))
            }
            Atom::ParentFromProvider(slot) => value::provider(vars, slot)
                .is_some_and(|p| item.parent_id().is_some_and(|parent| parent.is_from(p))),
            Atom::ParentNotFromProvider(slot) => value::provider(vars, slot)
                .is_some_and(|p| !item.parent_id().is_some_and(|parent| parent.is_from(p))),
            Atom::HasNoParent => item.parent_id().is_none(),
            Atom::ParentIs(slot) => {
                value::identity(vars, slot).is_some_and(|id| item.parent_id() == Some(id))
            }
            Atom::ParentIsNot(slot) => {
                value::identity(vars, slot).is_some_and(|id| item.parent_id() != Some(id))
            }
            Atom::ActionIs(slot) => value::action(vars, slot).is_some_and(|a| item.action() == a),
            Atom::ActionIsNot(slot) => {
                value::action(vars, slot).is_some_and(|a| item.action() != a)
            }
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::ModelFromProvider(slot) => write!(f, "model.provider == ${slot}"),
            Atom::ModelNotFromProvider(slot) => write!(f, "model.provider != ${slot}"),
            Atom::ModelIs(slot) => write!(f, "model == ${slot}"),
            Atom::ModelIsNot(slot) => write!(f, "model != ${slot}"),
            Atom::ParentFromProvider(slot) => write!(f, "parent.provider == ${slot}"),
            Atom::ParentNotFromProvider(slot) => write!(f, "parent.provider != ${slot}"),
            Atom::HasNoParent => f.write_str("parent == null"),
            Atom::ParentIs(slot) => write!(f, "parent == ${slot}"),
            Atom::ParentIsNot(slot) => write!(f, "parent != ${slot}"),
            Atom::ActionIs(slot) => write!(f, "action == ${slot}"),
            Atom::ActionIsNot(slot) => write!(f, "action != ${slot}"),
        }
    }
}

/// One piece of an authored expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Joins the operand before it with the operand after it.
    Conjunction(Conjunction),
    Atom(Atom),
    /// A parenthesized run of fragments sharing the parent's variable table.
    /// `joiner` decides the value of an empty group: `Or` is false, `And` is true.
    Group {
        joiner: Conjunction,
        fragments: Vec<Fragment>,
    },
    /// An embedded filter; its fragments resolve slots against the table
    /// nested at `slot`.
    Sub { slot: Slot, fragments: Vec<Fragment> },
}

/// Expression tree compiled from a fragment list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    And(Vec<Expr>),
    Or(Vec<Expr>),
    Atom(Atom),
    /// Evaluates `expr` against the variable table stored at `slot`.
    Scoped { slot: Slot, expr: Box<Expr> },
}

impl Expr {
    /// Folds authored fragments left to right.
    ///
    /// An empty list becomes the identity element of `empty`: `And([])`
    /// (true) or `Or([])` (false).
    #[must_use]
    pub fn fold(fragments: &[Fragment], empty: Conjunction) -> Expr {
        let mut acc: Option<Expr> = None;
        let mut pending = Conjunction::And;

        for fragment in fragments {
            let operand = match fragment {
                Fragment::Conjunction(conjunction) => {
                    pending = *conjunction;
                    continue;
                }
                Fragment::Atom(atom) => Expr::Atom(*atom),
                Fragment::Group { joiner, fragments } => Expr::fold(fragments, *joiner),
                Fragment::Sub { slot, fragments } => Expr::Scoped {
                    slot: *slot,
                    expr: Box::new(Expr::fold(fragments, Conjunction::And)),
                },
            };
            acc = Some(match acc {
                None => operand,
                Some(lhs) => Expr::join(pending, lhs, operand),
            });
            pending = Conjunction::And;
        }

        acc.unwrap_or(match empty {
            Conjunction::And => Expr::And(Vec::new()),
            Conjunction::Or => Expr::Or(Vec::new()),
        })
    }

    // Extending a node of the same kind keeps the tree shallow; AND and OR
    // are associative so the result is unchanged.
    fn join(conjunction: Conjunction, lhs: Expr, rhs: Expr) -> Expr {
        match (conjunction, lhs) {
            (Conjunction::And, Expr::And(mut children)) if !children.is_empty() => {
                children.push(rhs);
                Expr::And(children)
            }
            (Conjunction::Or, Expr::Or(mut children)) if !children.is_empty() => {
                children.push(rhs);
                Expr::Or(children)
            }
            (Conjunction::And, lhs) => Expr::And(vec![lhs, rhs]),
            (Conjunction::Or, lhs) => Expr::Or(vec![lhs, rhs]),
        }
    }

    /// Interprets the tree directly against `item`.
    #[must_use]
    pub fn evaluate(&self, item: &Item, vars: &[Value]) -> bool {
        match self {
            Expr::And(children) => children.iter().all(|child| child.evaluate(item, vars)),
            Expr::Or(children) => children.iter().any(|child| child.evaluate(item, vars)),
            Expr::Atom(atom) => atom.evaluate(item, vars),
            Expr::Scoped { slot, expr } => {
                value::table(vars, *slot).is_some_and(|nested| expr.evaluate(item, nested))
            }
        }
    }
}

/// Displays fragments the way they were authored.
pub(crate) struct Rendered<'a> {
    pub(crate) fragments: &'a [Fragment],
    pub(crate) empty: Conjunction,
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fragments.is_empty() {
            return f.write_str(match self.empty {
                Conjunction::And => "true",
                Conjunction::Or => "false",
            });
        }

        for fragment in self.fragments {
            match fragment {
                Fragment::Conjunction(conjunction) => write!(f, " {} ", conjunction.keyword())?,
                Fragment::Atom(atom) => write!(f, "{atom}")?,
                Fragment::Group { joiner, fragments } => {
                    let group = Rendered {
                        fragments,
                        empty: *joiner,
                    };
                    write!(f, "({group})")?;
                }
                Fragment::Sub { slot, fragments } => {
                    let sub = Rendered {
                        fragments,
                        empty: Conjunction::And,
                    };
                    write!(f, "${slot}{{{sub}}}")?;
                }
            }
        }
        Ok(())
    }
}
