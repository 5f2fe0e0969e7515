use std::collections::HashSet;

use workplan::task::Task;
use workplan::tree::{build_task_tree, build_task_tree_with_report, flatten, TaskNode};

const PROJECT_FIXTURE: &str = r#"[
    {"id":"foundation","subtotal":0,"progressState":"todo"},
    {"id":"excavation","parentId":"foundation","subtotal":1200,"quantity":60,"completedQuantity":60},
    {"id":"rebar","parentId":"foundation","subtotal":800,"quantity":40,"completedQuantity":10},
    {"id":"pour","parentId":"foundation","subtotal":2000,"progressState":"doing"},
    {"id":"frame","subtotal":0},
    {"id":"walls","parentId":"frame","subtotal":1500,"progressState":"verified"},
    {"id":"roof","parentId":"frame","subtotal":0,"progressState":"todo"},
    {"id":"trusses","parentId":"roof","subtotal":900,"quantity":30,"completedQuantity":15},
    {"id":"punch-list","parentId":"ghost-task","subtotal":50,"progressState":"accepted"}
]"#;

fn decode_fixture() -> Vec<Task> {
    serde_json::from_str(PROJECT_FIXTURE).expect("decode fixture")
}

fn collect_ids(nodes: &[TaskNode], into: &mut Vec<String>) {
    for node in nodes {
        into.push(node.task.id.clone());
        collect_ids(&node.children, into);
    }
}

fn check_descendant_sums(node: &TaskNode) {
    let expected: f64 = node
        .children
        .iter()
        .map(|child| child.task.subtotal + child.descendant_sum)
        .sum();
    assert_eq!(node.descendant_sum, expected, "node {}", node.task.id);
    for child in &node.children {
        check_descendant_sums(child);
    }
}

#[test]
fn every_task_appears_exactly_once() {
    let tasks = decode_fixture();
    let roots = build_task_tree(&tasks);

    let mut seen = Vec::new();
    collect_ids(&roots, &mut seen);
    assert_eq!(seen.len(), tasks.len());
    let unique: HashSet<&String> = seen.iter().collect();
    assert_eq!(unique.len(), tasks.len());
}

#[test]
fn dangling_parent_is_promoted_to_root() {
    let tasks = decode_fixture();
    let roots = build_task_tree(&tasks);
    // "punch-list" references a parent id that resolves to nothing.
    assert_eq!(roots.len(), 3);
    assert_eq!(roots[2].task.id, "punch-list");
    assert_eq!(roots[2].wbs_no, "3");
}

#[test]
fn wbs_numbers_are_unique_and_ordered() {
    let tasks = decode_fixture();
    let roots = build_task_tree(&tasks);
    let rows = flatten(&roots);

    let numbers: Vec<&str> = rows.iter().map(|row| row.node.wbs_no.as_str()).collect();
    let unique: HashSet<&&str> = numbers.iter().collect();
    assert_eq!(unique.len(), numbers.len());

    // Siblings keep input order under "foundation".
    let foundation = &roots[0];
    let child_ids: Vec<&str> = foundation
        .children
        .iter()
        .map(|child| child.task.id.as_str())
        .collect();
    assert_eq!(child_ids, vec!["excavation", "rebar", "pour"]);
    assert_eq!(foundation.children[2].wbs_no, "1.3");
}

#[test]
fn aggregates_roll_up_bottom_up() {
    let tasks = decode_fixture();
    let roots = build_task_tree(&tasks);
    for root in &roots {
        check_descendant_sums(root);
    }

    let foundation = &roots[0];
    assert_eq!(foundation.descendant_sum, 4000.0);
    // Weighted: (100*1200 + 25*800 + 0*2000) / 4000 = 35.
    assert_eq!(foundation.progress, 35);

    let frame = &roots[1];
    // "roof" carries zero subtotal, so "walls" alone decides the average.
    assert_eq!(frame.children[1].progress, 50);
    assert_eq!(frame.progress, 100);
}

#[test]
fn two_node_cycle_stays_bounded() {
    let cycle = r#"[
        {"id":"a","parentId":"b","subtotal":10},
        {"id":"b","parentId":"a","subtotal":20}
    ]"#;
    let tasks: Vec<Task> = serde_json::from_str(cycle).expect("decode cycle");
    let (roots, report) = build_task_tree_with_report(&tasks);

    let mut seen = Vec::new();
    collect_ids(&roots, &mut seen);
    assert_eq!(seen, vec!["a", "b"]);
    assert_eq!(report.cycles.len(), 1);
    assert_eq!(report.roots, 1);
    assert_eq!(report.nodes, 2);
}

#[test]
fn nodes_serialize_with_derived_fields_inline() {
    let tasks: Vec<Task> =
        serde_json::from_str(r#"[{"id":"a"},{"id":"b","parentId":"a","subtotal":40}]"#)
            .expect("decode");
    let roots = build_task_tree(&tasks);
    let value = serde_json::to_value(&roots[0]).expect("encode node");

    assert_eq!(value["id"], "a");
    assert_eq!(value["wbsNo"], "1");
    assert_eq!(value["descendantSum"], 40.0);
    assert_eq!(value["children"][0]["wbsNo"], "1.1");
    assert_eq!(value["children"][0]["parentId"], "a");
}
