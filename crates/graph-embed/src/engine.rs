use crate::{Error, Graph};

/// A layout algorithm placing the nodes of a graph in the unit square
///
/// Implementations only move nodes: they never add or remove nodes or edges,
/// and an empty graph is left untouched. A single graph must not be embedded
/// by two algorithms at the same time.
pub trait Embedding {
    /// Update the position of every node of `graph` in place
    fn embed(&self, graph: &mut Graph);
}

/// Number of dimensions an embedding works in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dimension {
    #[default]
    Two,
    Three,
}

impl Dimension {
    pub fn count(self) -> usize {
        match self {
            Dimension::Two => 2,
            Dimension::Three => 3,
        }
    }
}

impl TryFrom<usize> for Dimension {
    type Error = Error;

    fn try_from(count: usize) -> Result<Self, Error> {
        match count {
            2 => Ok(Dimension::Two),
            3 => Ok(Dimension::Three),
            n => Err(Error::UnsupportedDimension(n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_dimension_from_count() {
        assert_eq!(Dimension::try_from(2).unwrap(), Dimension::Two);
        assert_eq!(Dimension::try_from(3).unwrap().count(), 3);
        assert!(matches!(
            Dimension::try_from(4),
            Err(Error::UnsupportedDimension(4))
        ));
    }
}
