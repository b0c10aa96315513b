use std::fmt::Display;

use crate::types::lattice::Type;

/// One possible shape of a result: a type and its parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeResult {
    pub ty: Type,
    pub parameters: Vec<TypeSet>,
}

/// The union of shapes a node may produce. Entries are unique by
/// structural equality and keep the order they were first added in.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TypeSet(Vec<TypeResult>);

impl TypeSet {
    pub fn new() -> Self {
        TypeSet(vec![])
    }

    pub fn of(ty: Type, parameters: Vec<TypeSet>) -> Self {
        TypeSet(vec![TypeResult { ty, parameters }])
    }

    /// The uninhabited result.
    pub fn none() -> Self {
        TypeSet::of(Type::None, vec![])
    }

    pub fn from_types(types: impl IntoIterator<Item = Type>) -> Self {
        let mut set = TypeSet::new();
        for ty in types {
            set.push(TypeResult { ty, parameters: vec![] });
        }
        set
    }

    pub fn push(&mut self, result: TypeResult) {
        if !self.0.contains(&result) {
            self.0.push(result);
        }
    }

    pub fn union(&mut self, other: TypeSet) {
        for result in other.0 {
            self.push(result);
        }
    }

    /// True when the only possible result is the uninhabited type.
    pub fn is_none(&self) -> bool {
        matches!(self.0.as_slice(), [only] if only.ty == Type::None)
    }
}

impl FromIterator<TypeSet> for TypeSet {
    fn from_iter<I: IntoIterator<Item = TypeSet>>(iter: I) -> Self {
        let mut set = TypeSet::new();
        for other in iter {
            set.union(other);
        }
        set
    }
}

impl Display for TypeResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.ty)?;
        if !self.parameters.is_empty() {
            write!(f, "<")?;
            for (i, parameter) in self.parameters.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", parameter)?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

impl Display for TypeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, result) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", result)?;
        }
        write!(f, "}}")
    }
}
