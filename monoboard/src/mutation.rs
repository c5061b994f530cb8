//! The `Mutation` trait shared by every board command.
//!
//! A mutation is a struct whose fields are its parameters. Applying it to a
//! project never touches the input: it returns a new project with the changed
//! fields replaced and `updated_at` advanced, an unchanged clone when the
//! command turns out to be a no-op, or an error with nothing changed.

use crate::error::Result;
use crate::types::Project;

/// A pure transformation of one project
pub trait Mutation: std::fmt::Debug {
    /// Verb of the canonical op string (e.g. "move")
    const VERB: &'static str;
    /// Noun of the canonical op string (e.g. "task")
    const NOUN: &'static str;

    /// Canonical op string, e.g. "move task"
    fn op_string(&self) -> String {
        format!("{} {}", Self::VERB, Self::NOUN)
    }

    /// Compute the new project state
    fn apply(&self, project: &Project) -> Result<Project>;
}

/// Clone `project`, let `change` edit the clone, and stamp `updated_at`.
pub(crate) fn changed<F>(project: &Project, change: F) -> Project
where
    F: FnOnce(&mut Project),
{
    let mut next = project.clone();
    change(&mut next);
    next.touch();
    next
}
