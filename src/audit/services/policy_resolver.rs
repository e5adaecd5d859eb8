use crate::audit::domain::{
    NotificationRules, PolicyDocument, PolicyRules, PolicySet, ResolvedPolicy,
};
use crate::shared::error::AuditError;
use crate::shared::Result;
use dashmap::DashMap;
use std::collections::{BTreeMap, HashMap};

/// DFS visit state for cycle detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    InProgress,
    Done,
}

/// The extends relation as an explicit graph over a policy set.
///
/// Nodes are the documents; edges point from a policy to its parents in
/// declared order. Built once per resolution so missing parents surface
/// before any traversal starts.
struct PolicyGraph<'a> {
    nodes: Vec<&'a PolicyDocument>,
    index: HashMap<&'a str, usize>,
    parents: Vec<Vec<usize>>,
}

impl<'a> PolicyGraph<'a> {
    fn build(set: &'a PolicySet) -> Result<Self> {
        let nodes: Vec<&PolicyDocument> = set.documents().collect();
        let index: HashMap<&str, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, doc)| (doc.name.as_str(), i))
            .collect();

        let mut parents = vec![Vec::new(); nodes.len()];
        for (i, doc) in nodes.iter().enumerate() {
            for parent in &doc.extends {
                match index.get(parent.as_str()) {
                    Some(&p) => parents[i].push(p),
                    None => {
                        return Err(AuditError::PolicyMissingParent {
                            policy: doc.name.clone(),
                            parent: parent.clone(),
                        }
                        .into())
                    }
                }
            }
        }

        Ok(Self {
            nodes,
            index,
            parents,
        })
    }

    /// Iterative depth-first traversal over the whole graph. A parent
    /// that is still in progress when reached again is a back edge, which
    /// means circular inheritance.
    ///
    /// Returns the finish order: every node appears after all of its
    /// parents, so merging in this order needs no recursion.
    fn finish_order(&self) -> Result<Vec<usize>> {
        let n = self.nodes.len();
        let mut state = vec![VisitState::Unvisited; n];
        let mut order = Vec::with_capacity(n);

        for start in 0..n {
            if state[start] != VisitState::Unvisited {
                continue;
            }
            state[start] = VisitState::InProgress;
            // Frames hold the node and the next parent edge to follow.
            let mut stack: Vec<(usize, usize)> = vec![(start, 0)];

            while let Some(frame) = stack.last_mut() {
                let (node, edge) = *frame;
                if edge < self.parents[node].len() {
                    frame.1 += 1;
                    let parent = self.parents[node][edge];
                    match state[parent] {
                        VisitState::Unvisited => {
                            state[parent] = VisitState::InProgress;
                            stack.push((parent, 0));
                        }
                        VisitState::InProgress => {
                            return Err(AuditError::PolicyCycle {
                                cycle: self.cycle_path(&stack, parent),
                            }
                            .into());
                        }
                        VisitState::Done => {}
                    }
                } else {
                    state[node] = VisitState::Done;
                    order.push(node);
                    stack.pop();
                }
            }
        }

        Ok(order)
    }

    /// Spells out the cycle from the DFS stack, e.g. "base -> strict -> base".
    fn cycle_path(&self, stack: &[(usize, usize)], back_to: usize) -> String {
        let pos = stack
            .iter()
            .position(|(node, _)| *node == back_to)
            .unwrap_or(0);
        let mut names: Vec<&str> = stack[pos..]
            .iter()
            .map(|(node, _)| self.nodes[*node].name.as_str())
            .collect();
        names.push(self.nodes[back_to].name.as_str());
        names.join(" -> ")
    }
}

/// PolicyResolver service for flattening policy inheritance
///
/// Resolution validates the whole extends graph (missing parents,
/// cycles), then merges each policy's ancestor chain into a flat rule
/// set. Parents listed earlier are overridden by later ones; the policy
/// itself overrides all of its parents.
///
/// A resolver memoizes resolved policies by name, so a policy referenced
/// as a parent many times is merged exactly once. Use one resolver per
/// loaded policy set.
pub struct PolicyResolver {
    memo: DashMap<String, ResolvedPolicy>,
}

impl PolicyResolver {
    pub fn new() -> Self {
        Self {
            memo: DashMap::new(),
        }
    }

    /// Resolves every policy in the set.
    pub fn resolve_all(&self, set: &PolicySet) -> Result<BTreeMap<String, ResolvedPolicy>> {
        let graph = PolicyGraph::build(set)?;
        let order = graph.finish_order()?;
        self.merge_in_order(&graph, &order);

        let mut resolved = BTreeMap::new();
        for doc in set.documents() {
            if let Some(policy) = self.memo.get(&doc.name) {
                resolved.insert(doc.name.clone(), policy.clone());
            }
        }
        Ok(resolved)
    }

    /// Resolves a single policy by name.
    pub fn resolve(&self, set: &PolicySet, name: &str) -> Result<ResolvedPolicy> {
        let graph = PolicyGraph::build(set)?;
        if !graph.index.contains_key(name) {
            let available: Vec<&str> = set.names().collect();
            anyhow::bail!(
                "Policy '{}' is not defined. Available policies: {}",
                name,
                if available.is_empty() {
                    "(none)".to_string()
                } else {
                    available.join(", ")
                }
            );
        }
        let order = graph.finish_order()?;
        self.merge_in_order(&graph, &order);

        self.memo
            .get(name)
            .map(|policy| policy.clone())
            .ok_or_else(|| anyhow::anyhow!("Policy '{}' was not resolved", name))
    }

    /// Merges rule sets bottom-up. `order` guarantees parents are already
    /// in the memo when their dependents are processed.
    fn merge_in_order(&self, graph: &PolicyGraph<'_>, order: &[usize]) {
        for &idx in order {
            let doc = graph.nodes[idx];
            if self.memo.contains_key(&doc.name) {
                continue;
            }

            let mut rules = PolicyRules::default();
            let mut notifications = NotificationRules::default();
            let mut ancestry: Vec<String> = Vec::new();

            for &parent_idx in &graph.parents[idx] {
                let parent_name = &graph.nodes[parent_idx].name;
                if let Some(parent) = self.memo.get(parent_name) {
                    rules = rules.merged_with(&parent.rules);
                    notifications = notifications.merged_with(&parent.notifications);
                    for ancestor in &parent.ancestry {
                        if !ancestry.contains(ancestor) {
                            ancestry.push(ancestor.clone());
                        }
                    }
                }
            }

            rules = rules.merged_with(&doc.rules);
            notifications = notifications.merged_with(&doc.notifications);
            ancestry.push(doc.name.clone());

            self.memo.insert(
                doc.name.clone(),
                ResolvedPolicy {
                    name: doc.name.clone(),
                    ancestry,
                    rules,
                    notifications,
                },
            );
        }
    }
}

impl Default for PolicyResolver {
    fn default() -> Self {
        Self::new()
    }
}
