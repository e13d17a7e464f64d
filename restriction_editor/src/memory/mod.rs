//! A complete editor host backed by an in-memory graph, loadable from JSON.

mod actions;
mod analyze;
mod context;
mod graph;
mod infer;

pub use self::actions::MemoryAction;
pub use self::analyze::analyze;
pub use self::context::MemoryContext;
pub use self::graph::{Member, MemoryGraph, Node, Relation, Way};
pub use self::infer::infer_restriction;
