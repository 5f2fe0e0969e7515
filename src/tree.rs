//! WBS tree building and roll-up.
//!
//! Converts a flat task snapshot into a forest of nodes with dotted WBS
//! numbers, descendant cost sums, and subtotal-weighted progress. The build
//! is pure and total: dangling parent references become roots, and reference
//! cycles are broken at the first repeat with a warning instead of an error,
//! so bad data can never take down a rendering caller.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::task::Task;

/// A task with its derived tree position and aggregates.
///
/// Rebuilt from the flat snapshot on every query; nothing here is persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskNode {
    #[serde(flatten)]
    pub task: Task,
    /// Dotted 1-based position, e.g. "1.2.3".
    pub wbs_no: String,
    /// Sum of subtotals over all descendants, excluding this node's own.
    pub descendant_sum: f64,
    /// 0-100 completion, rolled up subtotal-weighted from the children.
    pub progress: u32,
    pub children: Vec<TaskNode>,
}

/// A parent cycle broken during the walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleWarning {
    /// The task whose expansion was skipped.
    pub task_id: String,
    /// Ancestor ids on the path when the repeat was hit, root first.
    pub ancestors: Vec<String>,
}

/// Outcome summary for a tree build.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TreeReport {
    pub roots: usize,
    pub nodes: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cycles: Vec<CycleWarning>,
}

/// Build the WBS forest for a flat task snapshot.
///
/// Roots are tasks whose `parent_id` is absent or does not resolve to a
/// known task id (dangling references are reinterpreted as roots, not
/// dropped). Sibling order follows input order. Empty input yields an empty
/// forest.
pub fn build_task_tree(tasks: &[Task]) -> Vec<TaskNode> {
    build_task_tree_with_report(tasks).0
}

/// Like [`build_task_tree`], but also returns the build report so callers
/// can surface cycle diagnostics instead of only finding them in the logs.
pub fn build_task_tree_with_report(tasks: &[Task]) -> (Vec<TaskNode>, TreeReport) {
    let mut index: HashMap<&str, usize> = HashMap::new();
    for (pos, task) in tasks.iter().enumerate() {
        index.entry(task.id.as_str()).or_insert(pos);
    }

    // Children grouped by parent position, preserving input order.
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); tasks.len()];
    let mut root_positions: Vec<usize> = Vec::new();
    for (pos, task) in tasks.iter().enumerate() {
        match task.parent_id.as_deref().and_then(|id| index.get(id)) {
            Some(&parent_pos) => children[parent_pos].push(pos),
            None => root_positions.push(pos),
        }
    }

    let mut walker = Walker {
        tasks,
        children,
        visited: vec![false; tasks.len()],
        path: Vec::new(),
        on_path: HashSet::new(),
        cycles: Vec::new(),
        nodes: 0,
    };

    let mut roots: Vec<TaskNode> = Vec::new();
    for &pos in &root_positions {
        let wbs_no = (roots.len() + 1).to_string();
        roots.push(walker.build(pos, wbs_no));
    }

    // Tasks in a cycle with no external entry have a resolvable parent and
    // are reachable from no root. Promote them in input order so every task
    // still appears exactly once; the cycle guard bounds the walk.
    for pos in 0..tasks.len() {
        if !walker.visited[pos] {
            let wbs_no = (roots.len() + 1).to_string();
            roots.push(walker.build(pos, wbs_no));
        }
    }

    let report = TreeReport {
        roots: roots.len(),
        nodes: walker.nodes,
        cycles: walker.cycles,
    };
    (roots, report)
}

/// One row of a depth-first outline over a built forest.
#[derive(Debug, Clone, Copy)]
pub struct OutlineRow<'a> {
    pub depth: usize,
    pub node: &'a TaskNode,
}

/// Flatten a forest into WBS order for table or outline rendering.
pub fn flatten(roots: &[TaskNode]) -> Vec<OutlineRow<'_>> {
    let mut rows = Vec::new();
    for root in roots {
        push_rows(root, 0, &mut rows);
    }
    rows
}

fn push_rows<'a>(node: &'a TaskNode, depth: usize, rows: &mut Vec<OutlineRow<'a>>) {
    rows.push(OutlineRow { depth, node });
    for child in &node.children {
        push_rows(child, depth + 1, rows);
    }
}

struct Walker<'a> {
    tasks: &'a [Task],
    children: Vec<Vec<usize>>,
    visited: Vec<bool>,
    path: Vec<&'a str>,
    on_path: HashSet<&'a str>,
    cycles: Vec<CycleWarning>,
    nodes: usize,
}

impl<'a> Walker<'a> {
    fn build(&mut self, pos: usize, wbs_no: String) -> TaskNode {
        let tasks = self.tasks;
        let task = &tasks[pos];
        self.visited[pos] = true;
        self.nodes += 1;
        self.path.push(task.id.as_str());
        self.on_path.insert(task.id.as_str());

        let mut built: Vec<TaskNode> = Vec::new();
        for i in 0..self.children[pos].len() {
            let child_pos = self.children[pos][i];
            let child = &tasks[child_pos];
            if self.on_path.contains(child.id.as_str()) {
                tracing::warn!(
                    task_id = %child.id,
                    path = ?self.path,
                    "parent cycle detected; skipping subtree"
                );
                self.cycles.push(CycleWarning {
                    task_id: child.id.clone(),
                    ancestors: self.path.iter().map(|id| id.to_string()).collect(),
                });
                continue;
            }
            let child_wbs = format!("{}.{}", wbs_no, built.len() + 1);
            built.push(self.build(child_pos, child_wbs));
        }

        self.on_path.remove(task.id.as_str());
        self.path.pop();

        let descendant_sum = built
            .iter()
            .map(|child| child.task.subtotal + child.descendant_sum)
            .sum();
        let progress = if built.is_empty() {
            leaf_progress(task)
        } else {
            rollup_progress(&built)
        };

        TaskNode {
            task: task.clone(),
            wbs_no,
            descendant_sum,
            progress,
            children: built,
        }
    }
}

/// Progress for a node with no children.
///
/// Quantity-tracked tasks (`quantity > 1`) report the completed ratio;
/// everything else is binary on the progress state.
fn leaf_progress(task: &Task) -> u32 {
    match task.quantity {
        Some(quantity) if quantity > 1.0 => {
            let completed = task.completed_quantity.unwrap_or(0.0);
            round_pct(100.0 * completed / quantity)
        }
        _ => {
            if task.progress_state.is_done() {
                100
            } else {
                0
            }
        }
    }
}

/// Subtotal-weighted average of the direct children's progress.
///
/// Weights are each child's own subtotal, not its descendant sum. When every
/// child weighs zero, the parent is complete only if every child is.
fn rollup_progress(children: &[TaskNode]) -> u32 {
    let total: f64 = children.iter().map(|child| child.task.subtotal).sum();
    if total > 0.0 {
        let weighted: f64 = children
            .iter()
            .map(|child| child.progress as f64 * child.task.subtotal)
            .sum();
        round_pct(weighted / total)
    } else if children.iter().all(|child| child.progress == 100) {
        100
    } else {
        0
    }
}

// Round half-up; non-finite or negative ratios clamp to zero.
fn round_pct(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    value.round() as u32
}
