//! Operator members and their fixed boundary suffix table.
//!
//! Each overloadable operator the generator supports maps to exactly one
//! identifier suffix; the table is closed and bit-exact so a rebound
//! library keeps a stable symbol surface. Conversion operators carry their
//! target type, which contributes a `to_<tag>` suffix.
//!
//! Move assignment is represented so the input tree can carry it, but it is
//! dropped at resolution time and never reaches the boundary.

use std::fmt;

use crate::TypeRef;

/// Operator members the generator can bind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    /// `+`
    Add,
    /// `+=`
    AddAssign,
    /// `-` (binary)
    Sub,
    /// `-=`
    SubAssign,
    /// `*`
    Mul,
    /// `*=`
    MulAssign,
    /// `/`
    Div,
    /// `/=`
    DivAssign,
    /// `-` (unary)
    Neg,
    /// `==`
    Eq,
    /// Copy assignment `=`.
    CopyAssign,
    /// Move assignment. Never emitted; the boundary has no move semantics.
    MoveAssign,
    /// Conversion operator to the given target type.
    Convert(TypeRef),
}

impl OperatorKind {
    /// The identifier suffix for this operator, or `None` when the
    /// operator is dropped from the boundary surface.
    pub fn suffix(&self) -> Option<String> {
        let fixed = match self {
            OperatorKind::Add => "add",
            OperatorKind::AddAssign => "add_assign",
            OperatorKind::Sub => "sub",
            OperatorKind::SubAssign => "sub_assign",
            OperatorKind::Mul => "mul",
            OperatorKind::MulAssign => "mul_assign",
            OperatorKind::Div => "div",
            OperatorKind::DivAssign => "div_assign",
            OperatorKind::Neg => "neg",
            OperatorKind::Eq => "eq",
            OperatorKind::CopyAssign => "assign",
            OperatorKind::MoveAssign => return None,
            OperatorKind::Convert(target) => return Some(format!("to_{}", target.suffix_tag())),
        };
        Some(fixed.to_string())
    }

    /// Whether this operator mutates the receiver.
    pub fn is_compound_assign(&self) -> bool {
        matches!(
            self,
            OperatorKind::AddAssign
                | OperatorKind::SubAssign
                | OperatorKind::MulAssign
                | OperatorKind::DivAssign
                | OperatorKind::CopyAssign
                | OperatorKind::MoveAssign
        )
    }

    /// Whether this operator takes no operand besides the receiver.
    pub fn is_unary(&self) -> bool {
        matches!(self, OperatorKind::Neg | OperatorKind::Convert(_))
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatorKind::Add => write!(f, "operator+"),
            OperatorKind::AddAssign => write!(f, "operator+="),
            OperatorKind::Sub => write!(f, "operator-"),
            OperatorKind::SubAssign => write!(f, "operator-="),
            OperatorKind::Mul => write!(f, "operator*"),
            OperatorKind::MulAssign => write!(f, "operator*="),
            OperatorKind::Div => write!(f, "operator/"),
            OperatorKind::DivAssign => write!(f, "operator/="),
            OperatorKind::Neg => write!(f, "operator- (unary)"),
            OperatorKind::Eq => write!(f, "operator=="),
            OperatorKind::CopyAssign => write!(f, "operator="),
            OperatorKind::MoveAssign => write!(f, "operator= (move)"),
            OperatorKind::Convert(target) => write!(f, "operator {target}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PrimitiveKind;

    #[test]
    fn test_fixed_suffix_table() {
        assert_eq!(OperatorKind::Add.suffix().as_deref(), Some("add"));
        assert_eq!(OperatorKind::AddAssign.suffix().as_deref(), Some("add_assign"));
        assert_eq!(OperatorKind::Mul.suffix().as_deref(), Some("mul"));
        assert_eq!(OperatorKind::MulAssign.suffix().as_deref(), Some("mul_assign"));
        assert_eq!(OperatorKind::Neg.suffix().as_deref(), Some("neg"));
        assert_eq!(OperatorKind::CopyAssign.suffix().as_deref(), Some("assign"));
    }

    #[test]
    fn test_conversion_suffix() {
        let conv = OperatorKind::Convert(TypeRef::Primitive(PrimitiveKind::Float32));
        assert_eq!(conv.suffix().as_deref(), Some("to_float"));
    }

    #[test]
    fn test_move_assign_dropped() {
        assert_eq!(OperatorKind::MoveAssign.suffix(), None);
    }

    #[test]
    fn test_shape_predicates() {
        assert!(OperatorKind::AddAssign.is_compound_assign());
        assert!(!OperatorKind::Add.is_compound_assign());
        assert!(OperatorKind::Neg.is_unary());
        assert!(!OperatorKind::Mul.is_unary());
    }
}
