use crate::runtime::value::Value;
use std::fmt;

/// One node of a parsed program. The evaluator only reads these.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Atom(Value),
    Symbol(String),
    /// `(head args...)`. The head is mandatory, so an empty call cannot be built.
    Sequence { head: Box<Expr>, args: Vec<Expr> },
    Definition { name: String, value: Box<Expr> },
    Conditional {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
}

impl Expr {
    pub fn atom(value: impl Into<Value>) -> Self {
        Expr::Atom(value.into())
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Expr::Symbol(name.into())
    }

    pub fn call(head: Expr, args: Vec<Expr>) -> Self {
        Expr::Sequence {
            head: Box::new(head),
            args,
        }
    }

    /// Calls the operator bound to `name`.
    pub fn apply(name: &str, args: Vec<Expr>) -> Self {
        Expr::call(Expr::symbol(name), args)
    }

    pub fn def(name: impl Into<String>, value: Expr) -> Self {
        Expr::Definition {
            name: name.into(),
            value: Box::new(value),
        }
    }

    pub fn if_(condition: Expr, then_branch: Expr, else_branch: Expr) -> Self {
        Expr::Conditional {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Expr::Atom(_) => "atom",
            Expr::Symbol(_) => "symbol",
            Expr::Sequence { .. } => "sequence",
            Expr::Definition { .. } => "definition",
            Expr::Conditional { .. } => "conditional",
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Atom(value) => write!(f, "{value}"),
            Expr::Symbol(name) => write!(f, "{name}"),
            Expr::Sequence { head, args } => {
                write!(f, "({head}")?;
                for arg in args {
                    write!(f, " {arg}")?;
                }
                write!(f, ")")
            }
            Expr::Definition { name, value } => write!(f, "(def {name} {value})"),
            Expr::Conditional {
                condition,
                then_branch,
                else_branch,
            } => write!(f, "(if {condition} {then_branch} {else_branch})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Expr;

    #[test]
    fn renders_as_s_expression() {
        let expr = Expr::if_(
            Expr::apply("=", vec![Expr::symbol("x"), Expr::atom(1.0)]),
            Expr::def("y", Expr::atom(true)),
            Expr::atom(2.5),
        );
        assert_eq!(expr.to_string(), "(if (= x 1) (def y true) 2.5)");
        assert_eq!(expr.kind(), "conditional");
    }
}
