//! Traits modelling tree-structure.

/// A trait generalising tree-structure.
pub trait Tree {
    /// The type of the nodes in this tree.
    type Node;

    /// Returns a reference to the root of `self`.
    fn root(&self) -> &Self::Node;

    /// Consumes `self` and maps `op` over its root.
    fn map<U, F>(self, op: F) -> U
    where
        F: FnOnce(Self::Node) -> U;
}

/// A trait for trees with countable nodes.
pub trait NodeCount {
    /// Returns the number of nodes in `self`.
    fn count_nodes(&self) -> usize;
}

/// A SAM trait for evaluating trees.
pub trait Evaluator<T> {
    /// The return type of the [`Evaluator::eval`] method.
    type Output;

    /// Returns an evaluation of the given `tree` based on `self`.
    fn eval(&mut self, tree: T) -> Self::Output;
}
