use std::collections::VecDeque;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Task id -> ids of the tasks it depends on.
///
/// `IndexMap` keeps insertion order so traversal results are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyGraph {
    dependencies: IndexMap<String, Vec<String>>,
}

impl DependencyGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the dependency list of `task_id`. Duplicates are dropped.
    pub fn set_dependencies<I, S>(&mut self, task_id: impl Into<String>, dependencies: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let unique: IndexSet<String> = dependencies.into_iter().map(Into::into).collect();
        self.dependencies
            .insert(task_id.into(), unique.into_iter().collect());
    }

    /// Removes `task_id` and every edge pointing at it.
    pub fn remove_task(&mut self, task_id: &str) {
        self.dependencies.shift_remove(task_id);
        for deps in self.dependencies.values_mut() {
            deps.retain(|dep| dep != task_id);
        }
    }

    #[must_use]
    pub fn dependencies_of(&self, task_id: &str) -> &[String] {
        self.dependencies
            .get(task_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Tasks that list `task_id` as a dependency.
    #[must_use]
    pub fn dependents_of(&self, task_id: &str) -> Vec<&str> {
        self.dependencies
            .iter()
            .filter(|(_, deps)| deps.iter().any(|dep| dep == task_id))
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Every task transitively depending on `task_id`, breadth-first.
    ///
    /// Each node is visited once, so cycles terminate. `task_id` itself is
    /// never part of the result.
    #[must_use]
    pub fn transitive_dependents(&self, task_id: &str) -> IndexSet<String> {
        let mut inverse: IndexMap<&str, Vec<&str>> = IndexMap::new();
        for (id, deps) in &self.dependencies {
            for dep in deps {
                inverse.entry(dep.as_str()).or_default().push(id.as_str());
            }
        }

        let mut visited: IndexSet<&str> = IndexSet::new();
        visited.insert(task_id);
        let mut queue: VecDeque<&str> = VecDeque::from([task_id]);

        while let Some(current) = queue.pop_front() {
            for dependent in inverse.get(current).into_iter().flatten() {
                if visited.insert(*dependent) {
                    queue.push_back(*dependent);
                }
            }
        }

        visited
            .into_iter()
            .skip(1)
            .map(str::to_owned)
            .collect()
    }

    /// Tasks that move together with `task_id`: only itself when cascading is
    /// off, itself followed by its transitive dependents otherwise.
    #[must_use]
    pub fn affected_task_ids(&self, task_id: &str, cascade: bool) -> IndexSet<String> {
        let mut affected = IndexSet::new();
        affected.insert(task_id.to_owned());
        if cascade {
            affected.extend(self.transitive_dependents(task_id));
        }
        affected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_terminate() {
        let mut graph = DependencyGraph::new();
        graph.set_dependencies("a", ["c"]);
        graph.set_dependencies("b", ["a"]);
        graph.set_dependencies("c", ["b"]);

        let affected = graph.affected_task_ids("a", true);
        let ids: Vec<&str> = affected.iter().map(String::as_str).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn remove_task_drops_incoming_edges() {
        let mut graph = DependencyGraph::new();
        graph.set_dependencies("b", ["a", "a"]);
        assert_eq!(graph.dependencies_of("b"), ["a".to_owned()]);
        graph.remove_task("a");
        assert!(graph.dependencies_of("b").is_empty());
    }
}
