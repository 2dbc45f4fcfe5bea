// File: crates/chart-core/src/reconcile.rs
// Summary: Keyed enter/update/exit join between a data array and the children of a scene node.

use std::collections::HashMap;

use tracing::trace;

use crate::config::Transition;
use crate::scene::{NodeId, Scene};

/// Outcome of one keyed join. Indices refer to positions in the joined key slice.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Join {
    /// Nodes created for keys that had no node yet.
    pub enter: Vec<(usize, NodeId)>,
    /// Existing nodes whose key is still present.
    pub update: Vec<(usize, NodeId)>,
    /// Existing nodes whose key disappeared; still attached until exited.
    pub exit: Vec<NodeId>,
}

impl Join {
    /// Entered and updated nodes, in data order.
    pub fn merged(&self) -> Vec<(usize, NodeId)> {
        let mut all: Vec<_> = self.enter.iter().chain(self.update.iter()).copied().collect();
        all.sort_by_key(|(i, _)| *i);
        all
    }

    /// Exit every stale node with `transition`.
    pub fn exit_with(&self, scene: &mut Scene, transition: Transition) {
        for id in &self.exit {
            scene.exit(*id, transition);
        }
    }
}

/// Bind `keys` to the `class` children of `parent`.
///
/// Children already bound to a key are kept (update), missing keys get a new
/// `tag` child (enter), and children whose key is gone are reported as exit.
/// Exiting nodes from an earlier join are ignored.
pub fn join_keyed(scene: &mut Scene, parent: NodeId, class: &str, tag: &str, keys: &[String]) -> Join {
    let mut existing: HashMap<String, NodeId> = HashMap::new();
    let mut join = Join::default();
    for &child in scene.children(parent) {
        if !scene.has_class(child, class) || scene.is_exiting(child) {
            continue;
        }
        match scene.key(child) {
            Some(k) if !existing.contains_key(k) => {
                existing.insert(k.to_string(), child);
            }
            // unkeyed or duplicate nodes cannot be matched
            _ => join.exit.push(child),
        }
    }

    for (i, key) in keys.iter().enumerate() {
        match existing.remove(key) {
            Some(node) => join.update.push((i, node)),
            None => {
                let node = scene.append(parent, tag);
                scene.add_class(node, class);
                scene.set_key(node, key.clone());
                join.enter.push((i, node));
            }
        }
    }
    let mut stale: Vec<NodeId> = existing.into_values().collect();
    stale.sort();
    join.exit.extend(stale);
    trace!(enter = join.enter.len(), update = join.update.len(), exit = join.exit.len(), class, "keyed join");
    join
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn second_join_updates_in_place() {
        let mut scene = Scene::new();
        let root = scene.root();
        let first = join_keyed(&mut scene, root, "p", "g", &keys(&["0", "1", "2"]));
        assert_eq!(first.enter.len(), 3);

        let second = join_keyed(&mut scene, root, "p", "g", &keys(&["1", "2", "3"]));
        assert_eq!(second.update, vec![(0, first.enter[1].1), (1, first.enter[2].1)]);
        assert_eq!(second.enter.len(), 1);
        assert_eq!(second.exit, vec![first.enter[0].1]);
    }

    #[test]
    fn other_classes_are_left_alone() {
        let mut scene = Scene::new();
        let root = scene.root();
        let other = scene.append(root, "rect");
        scene.add_class(other, "background");
        let join = join_keyed(&mut scene, root, "p", "g", &keys(&["a"]));
        assert!(join.exit.is_empty());
        assert!(scene.contains(other));
    }
}
