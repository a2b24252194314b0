//! Reconciler scenario tests.
//!
//! These tests drive full passes against a recording host and assert on the exact
//! mutations it receives: identity stability, idempotence, reordering, removal,
//! event rebinding and the failure modes of a malformed element tree.

use std::{cell::Cell, collections::HashMap};

use crate::{
    AnyCallback, Callback, DestroyMode, Element, EventName, Key, NodeAdapter, NodeHandle,
    NodeType, ReconcileError, Reconciler, ReconcilerConfig, RenderCtx,
};

// ============================================================================
// Test Infrastructure
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Op {
    Create(NodeHandle, NodeType),
    Destroy(NodeHandle, bool),
    Attach(NodeHandle, NodeHandle),
    Detach(NodeHandle, NodeHandle),
    Move(NodeHandle, NodeHandle, usize),
    Connect(NodeHandle, EventName),
    Disconnect(NodeHandle, EventName),
    Label(NodeHandle, String),
    SetText(NodeHandle, String),
}

/// A host that keeps sibling order and records every request it receives.
#[derive(Debug, Default)]
struct RecordingHost {
    next: u64,
    children: HashMap<NodeHandle, Vec<NodeHandle>>,
    texts: HashMap<NodeHandle, String>,
    ops: Vec<Op>,
}

const CONTAINER: NodeHandle = NodeHandle::new(0);

impl RecordingHost {
    fn children_of(&self, parent: NodeHandle) -> Vec<NodeHandle> {
        self.children.get(&parent).cloned().unwrap_or_default()
    }

    fn texts_under(&self, parent: NodeHandle) -> Vec<&str> {
        self.children_of(parent)
            .iter()
            .map(|node| self.texts.get(node).map_or("", String::as_str))
            .collect()
    }

    fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }

    fn creates(&self) -> usize {
        self.count(|op| matches!(op, Op::Create(..)))
    }

    fn destroys(&self) -> usize {
        self.count(|op| matches!(op, Op::Destroy(..)))
    }

    fn moves(&self) -> usize {
        self.count(|op| matches!(op, Op::Move(..)))
    }

    fn connects(&self) -> usize {
        self.count(|op| matches!(op, Op::Connect(..)))
    }

    fn disconnects(&self) -> usize {
        self.count(|op| matches!(op, Op::Disconnect(..)))
    }

    fn position(&self, pred: impl Fn(&Op) -> bool) -> Option<usize> {
        self.ops.iter().position(pred)
    }

    fn set_text(&mut self, node: NodeHandle, text: &str) {
        self.texts.insert(node, text.to_string());
        self.ops.push(Op::SetText(node, text.to_string()));
    }
}

impl NodeAdapter for RecordingHost {
    fn create_node(&mut self, node_type: NodeType) -> NodeHandle {
        self.next += 1;
        let node = NodeHandle::new(self.next);
        self.ops.push(Op::Create(node, node_type));
        node
    }

    fn destroy_node(&mut self, node: NodeHandle, deferred: bool) {
        self.ops.push(Op::Destroy(node, deferred));
    }

    fn attach_child(&mut self, parent: NodeHandle, child: NodeHandle) {
        self.children.entry(parent).or_default().push(child);
        self.ops.push(Op::Attach(parent, child));
    }

    fn detach_child(&mut self, parent: NodeHandle, child: NodeHandle) {
        if let Some(siblings) = self.children.get_mut(&parent) {
            siblings.retain(|sibling| *sibling != child);
        }
        self.ops.push(Op::Detach(parent, child));
    }

    fn child_index(&self, parent: NodeHandle, child: NodeHandle) -> Option<usize> {
        self.children.get(&parent)?.iter().position(|sibling| *sibling == child)
    }

    fn move_child_to_index(&mut self, parent: NodeHandle, child: NodeHandle, index: usize) {
        let siblings = self.children.entry(parent).or_default();
        siblings.retain(|sibling| *sibling != child);
        siblings.insert(index.min(siblings.len()), child);
        self.ops.push(Op::Move(parent, child, index));
    }

    fn connect_event(&mut self, node: NodeHandle, event: EventName, _callback: &AnyCallback) {
        self.ops.push(Op::Connect(node, event));
    }

    fn disconnect_event(&mut self, node: NodeHandle, event: EventName, _callback: &AnyCallback) {
        self.ops.push(Op::Disconnect(node, event));
    }

    fn set_debug_label(&mut self, node: NodeHandle, label: &str) {
        self.ops.push(Op::Label(node, label.to_string()));
    }
}

const PANEL: NodeType = NodeType::new("Panel");
const ITEM: NodeType = NodeType::new("Item");

#[derive(Debug, Clone, PartialEq)]
struct ItemProps {
    text: String,
    on_press: Option<Callback>,
}

fn create_item(ctx: &mut RenderCtx<'_, RecordingHost>, props: &ItemProps) -> NodeHandle {
    let node = ctx.create_node(ITEM);
    ctx.adapter().set_text(node, &props.text);
    ctx.bind(node, "pressed", props.on_press.as_ref());
    node
}

fn update_item(
    ctx: &mut RenderCtx<'_, RecordingHost>,
    node: NodeHandle,
    old: &ItemProps,
    new: &ItemProps,
) {
    if old == new {
        return;
    }
    if old.text != new.text {
        ctx.adapter().set_text(node, &new.text);
    }
    ctx.bind(node, "pressed", new.on_press.as_ref());
}

fn create_panel(ctx: &mut RenderCtx<'_, RecordingHost>, _props: &()) -> NodeHandle {
    ctx.create_node(PANEL)
}

fn update_panel(_ctx: &mut RenderCtx<'_, RecordingHost>, _node: NodeHandle, _old: &(), _new: &()) {}

fn item(text: &str) -> Element<RecordingHost> {
    Element::new(
        ITEM,
        ItemProps {
            text: text.to_string(),
            on_press: None,
        },
        create_item,
        update_item,
    )
}

fn pressable(text: &str, on_press: Option<Callback>) -> Element<RecordingHost> {
    Element::new(
        ITEM,
        ItemProps {
            text: text.to_string(),
            on_press,
        },
        create_item,
        update_item,
    )
}

fn panel() -> Element<RecordingHost> {
    Element::new(PANEL, (), create_panel, update_panel)
}

fn keyed(texts: &[(&str, i64)]) -> Element<RecordingHost> {
    panel().children(texts.iter().map(|&(text, id)| item(text).id(id)))
}

fn reconciler() -> Reconciler<RecordingHost> {
    Reconciler::with_config(ReconcilerConfig::default().with_collect_churn(true))
}

fn render(
    reconciler: &mut Reconciler<RecordingHost>,
    host: &mut RecordingHost,
    tree: Element<RecordingHost>,
) {
    host.ops.clear();
    reconciler
        .render(host, CONTAINER, tree)
        .expect("render should succeed");
}

fn root_node(reconciler: &Reconciler<RecordingHost>) -> NodeHandle {
    reconciler.root_node().expect("a tree should be mounted")
}

thread_local! {
    static PRESSED: Cell<i64> = const { Cell::new(0) };
}

fn add_pressed(_node: NodeHandle, amount: &i64, _arg: &()) {
    PRESSED.with(|pressed| pressed.set(pressed.get() + amount));
}

// ============================================================================
// Basic lifecycle
// ============================================================================

#[test]
fn first_pass_creates_and_attaches_everything() {
    let mut host = RecordingHost::default();
    let mut reconciler = reconciler();
    render(&mut reconciler, &mut host, panel().child(item("a")).child(item("b")));

    assert_eq!(host.creates(), 3);
    assert_eq!(reconciler.nodes_created(), 3);
    assert_eq!(reconciler.nodes_destroyed(), 0);
    let root = root_node(&reconciler);
    assert_eq!(host.children_of(CONTAINER), vec![root]);
    assert_eq!(host.texts_under(root), vec!["a", "b"]);
}

#[test]
fn bare_root_counts_one_create() {
    let mut host = RecordingHost::default();
    let mut reconciler = reconciler();
    render(&mut reconciler, &mut host, item("A").id(0));
    assert_eq!(reconciler.nodes_created(), 1);
    assert_eq!(host.creates(), 1);
}

#[test]
fn text_change_then_removal() {
    let mut host = RecordingHost::default();
    let mut reconciler = reconciler();
    render(&mut reconciler, &mut host, panel());

    render(&mut reconciler, &mut host, panel().child(item("A").id(0)));
    assert_eq!(reconciler.churn().created, 1);
    assert_eq!(reconciler.churn().destroyed, 0);
    let button = host.children_of(root_node(&reconciler))[0];

    render(&mut reconciler, &mut host, panel().child(item("B").id(0)));
    assert_eq!(reconciler.churn().created, 0);
    assert_eq!(reconciler.churn().destroyed, 0);
    assert_eq!(host.ops, vec![Op::SetText(button, "B".to_string())]);

    render(&mut reconciler, &mut host, panel());
    assert_eq!(reconciler.churn().created, 0);
    assert_eq!(reconciler.churn().destroyed, 1);
    assert_eq!(host.destroys(), 1);
    assert!(host.ops.contains(&Op::Destroy(button, true)));
}

#[test]
fn fresh_subtree_is_built_before_it_is_attached() {
    let mut host = RecordingHost::default();
    let mut reconciler = reconciler();
    render(&mut reconciler, &mut host, panel().child(item("a")));

    let root = root_node(&reconciler);
    let child = host.children_of(root)[0];
    let child_attached = host.position(|op| *op == Op::Attach(root, child));
    let root_attached = host.position(|op| *op == Op::Attach(CONTAINER, root));
    assert!(child_attached < root_attached);
}

#[test]
fn fresh_nodes_are_labelled() {
    let mut host = RecordingHost::default();
    let mut reconciler = reconciler();
    render(&mut reconciler, &mut host, panel().child(item("a").id(4)));
    let root = root_node(&reconciler);
    let child = host.children_of(root)[0];
    assert!(host.ops.contains(&Op::Label(root, "Panel#0".to_string())));
    assert!(host.ops.contains(&Op::Label(child, "Item#4".to_string())));
}

#[test]
fn labels_can_be_disabled() {
    let mut host = RecordingHost::default();
    let mut reconciler =
        Reconciler::with_config(ReconcilerConfig::default().with_label_nodes(false));
    render(&mut reconciler, &mut host, panel().child(item("a")));
    assert_eq!(host.count(|op| matches!(op, Op::Label(..))), 0);
}

#[test]
fn churn_is_zero_when_collection_is_off() {
    let mut host = RecordingHost::default();
    let mut reconciler = Reconciler::new();
    render(&mut reconciler, &mut host, panel().child(item("a")));
    assert!(reconciler.churn().is_quiet());

    reconciler.set_collect_churn(true);
    render(&mut reconciler, &mut host, panel());
    assert_eq!(reconciler.nodes_destroyed(), 1);
}

// ============================================================================
// Identity
// ============================================================================

#[test]
fn unchanged_tree_is_idempotent() {
    let mut host = RecordingHost::default();
    let mut reconciler = reconciler();
    let tree = || {
        panel()
            .child(item("a"))
            .child(panel().child(item("b").id(3)).child(item("c")))
    };
    render(&mut reconciler, &mut host, tree());
    render(&mut reconciler, &mut host, tree());

    assert!(host.ops.is_empty(), "unexpected ops: {:?}", host.ops);
    assert!(reconciler.churn().is_quiet());
}

#[test]
fn explicit_ids_survive_insertion_at_front() {
    let mut host = RecordingHost::default();
    let mut reconciler = reconciler();
    render(&mut reconciler, &mut host, keyed(&[("a", 1), ("b", 2)]));
    let root = root_node(&reconciler);
    let before = host.children_of(root);

    render(&mut reconciler, &mut host, keyed(&[("new", 9), ("a", 1), ("b", 2)]));
    let after = host.children_of(root);
    assert_eq!(reconciler.churn().created, 1);
    assert_eq!(&after[1..], &before[..]);
    assert_eq!(host.texts_under(root), vec!["new", "a", "b"]);
}

#[test]
fn derived_ids_follow_position() {
    let mut host = RecordingHost::default();
    let mut reconciler = reconciler();
    render(&mut reconciler, &mut host, panel().child(item("a")).child(item("b")));
    let root = root_node(&reconciler);
    let before = host.children_of(root);

    render(
        &mut reconciler,
        &mut host,
        panel().child(item("new")).child(item("a")).child(item("b")),
    );
    let after = host.children_of(root);

    // Positions 0 and 1 keep their nodes and take the new texts; position 2 is new.
    assert_eq!(&after[..2], &before[..]);
    assert_eq!(reconciler.churn().created, 1);
    assert_eq!(host.texts_under(root), vec!["new", "a", "b"]);
}

#[test]
fn derived_ids_are_counted_per_type() {
    let mut host = RecordingHost::default();
    let mut reconciler = reconciler();
    render(&mut reconciler, &mut host, panel().child(item("a")).child(item("b")));
    let root = root_node(&reconciler);
    let items = host.children_of(root);

    // A panel sibling inserted in front does not shift the items' keys.
    render(
        &mut reconciler,
        &mut host,
        panel().child(panel()).child(item("a")).child(item("b")),
    );
    assert_eq!(reconciler.churn().created, 1);
    assert_eq!(reconciler.churn().destroyed, 0);
    assert_eq!(&host.children_of(root)[1..], &items[..]);
    // The fresh panel is appended; settling from the back shifts both items past it.
    assert_eq!(host.moves(), 2);
    assert_eq!(host.children_of(root).len(), 3);
}

#[test]
fn explicit_id_raises_ceiling_for_later_siblings() {
    let mut host = RecordingHost::default();
    let mut reconciler = reconciler();
    render(
        &mut reconciler,
        &mut host,
        panel().child(item("x").id(5)).child(item("y")),
    );
    let root = reconciler.root().expect("mounted");
    let ids: Vec<_> = root.children().map(|child| child.key().id()).collect();
    assert_eq!(ids, vec![5, 6]);
}

#[test]
fn changed_ancestor_key_recreates_descendants() {
    let mut host = RecordingHost::default();
    let mut reconciler = reconciler();
    render(&mut reconciler, &mut host, panel().child(panel().id(1).child(item("a"))));
    let root = root_node(&reconciler);
    let old_inner = host.children_of(root)[0];
    let old_leaf = host.children_of(old_inner)[0];

    render(&mut reconciler, &mut host, panel().child(panel().id(2).child(item("a"))));
    let new_inner = host.children_of(root)[0];
    let new_leaf = host.children_of(new_inner)[0];
    assert_ne!(old_inner, new_inner);
    assert_ne!(old_leaf, new_leaf);
    assert_eq!(reconciler.churn().created, 2);
    assert_eq!(reconciler.churn().destroyed, 2);
    assert_eq!(host.destroys(), 1);
}

// ============================================================================
// Reordering and removal
// ============================================================================

#[test]
fn rotation_takes_two_moves() {
    let mut host = RecordingHost::default();
    let mut reconciler = reconciler();
    render(&mut reconciler, &mut host, keyed(&[("A", 1), ("B", 2), ("C", 3)]));
    let root = root_node(&reconciler);
    let before = host.children_of(root);

    render(&mut reconciler, &mut host, keyed(&[("C", 3), ("A", 1), ("B", 2)]));
    assert_eq!(host.moves(), 2);
    assert_eq!(host.creates(), 0);
    assert_eq!(host.destroys(), 0);
    assert_eq!(host.children_of(root), vec![before[2], before[0], before[1]]);
}

#[test]
fn sending_the_head_to_the_back_takes_one_move() {
    let mut host = RecordingHost::default();
    let mut reconciler = reconciler();
    render(&mut reconciler, &mut host, keyed(&[("A", 1), ("B", 2), ("C", 3)]));
    let root = root_node(&reconciler);

    render(&mut reconciler, &mut host, keyed(&[("B", 2), ("C", 3), ("A", 1)]));
    assert_eq!(host.moves(), 1);
    assert_eq!(host.texts_under(root), vec!["B", "C", "A"]);
}

#[test]
fn shuffle_with_insertion_and_removal_lands_in_declared_order() {
    let mut host = RecordingHost::default();
    let mut reconciler = reconciler();
    render(
        &mut reconciler,
        &mut host,
        keyed(&[("A", 1), ("B", 2), ("C", 3), ("D", 4), ("E", 5)]),
    );
    let root = root_node(&reconciler);

    render(
        &mut reconciler,
        &mut host,
        keyed(&[("E", 5), ("F", 6), ("C", 3), ("A", 1), ("B", 2)]),
    );
    assert_eq!(host.creates(), 1);
    assert_eq!(host.destroys(), 1);
    assert_eq!(host.texts_under(root), vec!["E", "F", "C", "A", "B"]);
}

#[test]
fn reversal_takes_two_moves() {
    let mut host = RecordingHost::default();
    let mut reconciler = reconciler();
    render(&mut reconciler, &mut host, keyed(&[("A", 1), ("B", 2), ("C", 3)]));
    let root = root_node(&reconciler);

    render(&mut reconciler, &mut host, keyed(&[("C", 3), ("B", 2), ("A", 1)]));
    assert_eq!(host.moves(), 2);
    assert_eq!(host.creates(), 0);
    assert_eq!(host.destroys(), 0);
    assert_eq!(host.texts_under(root), vec!["C", "B", "A"]);
}

#[test]
fn removing_a_subtree_destroys_it_once() {
    let mut host = RecordingHost::default();
    let mut reconciler = reconciler();
    let subtree = || panel().id(2).child(item("b1")).child(item("b2"));
    render(
        &mut reconciler,
        &mut host,
        panel().child(item("a").id(1)).child(subtree()).child(item("c").id(3)),
    );
    let root = root_node(&reconciler);
    let removed = host.children_of(root)[1];

    render(
        &mut reconciler,
        &mut host,
        panel().child(item("a").id(1)).child(item("c").id(3)),
    );
    let destroyed: Vec<_> = host
        .ops
        .iter()
        .filter(|op| matches!(op, Op::Destroy(..)))
        .collect();
    assert_eq!(destroyed, vec![&Op::Destroy(removed, true)]);
    assert_eq!(host.creates(), 0);
    assert_eq!(host.moves(), 0);
    assert_eq!(reconciler.churn().destroyed, 3);
    assert_eq!(host.texts_under(root), vec!["a", "c"]);
}

#[test]
fn destruction_comes_after_moves() {
    let mut host = RecordingHost::default();
    let mut reconciler = reconciler();
    render(&mut reconciler, &mut host, keyed(&[("A", 1), ("B", 2), ("C", 3)]));

    render(&mut reconciler, &mut host, keyed(&[("C", 3), ("A", 1)]));
    let last_move = host
        .ops
        .iter()
        .rposition(|op| matches!(op, Op::Move(..)))
        .expect("A should move");
    let destroy = host
        .position(|op| matches!(op, Op::Destroy(..)))
        .expect("B should be destroyed");
    assert!(last_move < destroy);
    assert_eq!(host.ops.last(), Some(&host.ops[destroy]));
}

#[test]
fn immediate_mode_destroys_removed_children_immediately() {
    let mut host = RecordingHost::default();
    let mut reconciler = Reconciler::with_config(
        ReconcilerConfig::default().with_destroy_mode(DestroyMode::Immediate),
    );
    render(&mut reconciler, &mut host, keyed(&[("A", 1), ("B", 2)]));
    let removed = host.children_of(root_node(&reconciler))[1];

    render(&mut reconciler, &mut host, keyed(&[("A", 1)]));
    assert!(host.ops.contains(&Op::Destroy(removed, false)));
}

// ============================================================================
// Root handling
// ============================================================================

#[test]
fn root_type_change_replaces_the_whole_tree() {
    let mut host = RecordingHost::default();
    let mut reconciler = reconciler();
    render(&mut reconciler, &mut host, panel().child(item("a")));
    let old_root = root_node(&reconciler);

    render(&mut reconciler, &mut host, item("solo"));
    let new_root = root_node(&reconciler);
    assert_ne!(old_root, new_root);
    assert_eq!(host.children_of(CONTAINER), vec![new_root]);
    assert_eq!(reconciler.churn().created, 1);
    assert_eq!(reconciler.churn().destroyed, 2);

    let attached = host.position(|op| *op == Op::Attach(CONTAINER, new_root));
    let destroyed = host.position(|op| *op == Op::Destroy(old_root, true));
    assert!(attached.is_some() && attached < destroyed);
}

#[test]
fn new_container_remounts() {
    let mut host = RecordingHost::default();
    let mut reconciler = reconciler();
    render(&mut reconciler, &mut host, panel());
    let old_root = root_node(&reconciler);

    host.ops.clear();
    let other = NodeHandle::new(1000);
    reconciler
        .render(&mut host, other, panel())
        .expect("render should succeed");
    assert_eq!(reconciler.container(), Some(other));
    assert!(host.children_of(CONTAINER).is_empty());
    assert_eq!(host.children_of(other), vec![root_node(&reconciler)]);
    assert!(host.ops.contains(&Op::Destroy(old_root, true)));
}

#[test]
fn teardown_destroys_deferred_and_unmounts() {
    let mut host = RecordingHost::default();
    let mut reconciler = reconciler();
    render(&mut reconciler, &mut host, panel().child(item("a")).child(item("b")));
    let root = root_node(&reconciler);

    host.ops.clear();
    reconciler.teardown(&mut host);
    assert!(!reconciler.is_mounted());
    assert_eq!(host.ops, vec![Op::Detach(CONTAINER, root), Op::Destroy(root, true)]);
    assert_eq!(reconciler.nodes_destroyed(), 3);

    host.ops.clear();
    reconciler.teardown(&mut host);
    assert!(host.ops.is_empty());
}

// ============================================================================
// Events
// ============================================================================

#[test]
fn unchanged_callback_connects_once_across_passes() {
    let mut host = RecordingHost::default();
    let mut reconciler = reconciler();
    let mut connects = 0;
    for _ in 0..5 {
        render(
            &mut reconciler,
            &mut host,
            panel().child(pressable("go", Some(Callback::new(add_pressed, 1)))),
        );
        connects += host.connects();
    }
    assert_eq!(connects, 1);

    render(&mut reconciler, &mut host, panel().child(pressable("go", None)));
    assert_eq!(host.disconnects(), 1);
    assert_eq!(host.connects(), 0);
}

#[test]
fn changed_context_rebinds_once() {
    let mut host = RecordingHost::default();
    let mut reconciler = reconciler();
    render(
        &mut reconciler,
        &mut host,
        panel().child(pressable("go", Some(Callback::new(add_pressed, 1)))),
    );
    render(
        &mut reconciler,
        &mut host,
        panel().child(pressable("go", Some(Callback::new(add_pressed, 2)))),
    );
    assert_eq!(host.disconnects(), 1);
    assert_eq!(host.connects(), 1);
}

#[test]
fn dispatch_reaches_the_bound_context() {
    let mut host = RecordingHost::default();
    let mut reconciler = reconciler();
    render(
        &mut reconciler,
        &mut host,
        panel().child(pressable("go", Some(Callback::new(add_pressed, 5)))),
    );
    let button = host.children_of(root_node(&reconciler))[0];

    PRESSED.with(|pressed| pressed.set(0));
    reconciler
        .dispatch(button, "pressed", &())
        .expect("button is bound");
    assert_eq!(PRESSED.with(Cell::get), 5);
}

#[test]
fn dispatch_to_removed_node_is_rejected() {
    let mut host = RecordingHost::default();
    let mut reconciler = reconciler();
    render(
        &mut reconciler,
        &mut host,
        panel().child(pressable("go", Some(Callback::new(add_pressed, 1)))),
    );
    let button = host.children_of(root_node(&reconciler))[0];

    render(&mut reconciler, &mut host, panel());
    assert_eq!(
        reconciler.dispatch(button, "pressed", &()),
        Err(ReconcileError::UnboundCallback {
            node: button,
            event: "pressed"
        })
    );
}

// ============================================================================
// Failure modes
// ============================================================================

#[test]
fn duplicate_explicit_ids_are_rejected_without_mutation() {
    let mut host = RecordingHost::default();
    let mut reconciler = reconciler();
    render(&mut reconciler, &mut host, keyed(&[("a", 1)]));
    let root = root_node(&reconciler);

    host.ops.clear();
    let error = reconciler
        .render(&mut host, CONTAINER, keyed(&[("x", 1), ("b", 2), ("y", 1)]))
        .unwrap_err();
    assert_eq!(
        error,
        ReconcileError::DuplicateKey {
            parent: "Panel#0".to_string(),
            key: Key::new(ITEM, 1),
            first: "Item (id 1) at position 0".to_string(),
            second: "Item (id 1) at position 2".to_string(),
        }
    );
    assert!(host.ops.is_empty());
    assert_eq!(host.texts_under(root), vec!["a"]);

    // The retained tree is still the last good one.
    render(&mut reconciler, &mut host, keyed(&[("a", 1)]));
    assert!(host.ops.is_empty());
}

#[test]
fn deep_duplicate_blocks_the_whole_pass() {
    let mut host = RecordingHost::default();
    let mut reconciler = reconciler();
    render(&mut reconciler, &mut host, panel().child(item("a")));

    host.ops.clear();
    let tree = panel()
        .child(item("changed"))
        .child(panel().child(item("b").id(0)).child(item("c")).child(item("d").id(1)));
    let error = reconciler.render(&mut host, CONTAINER, tree).unwrap_err();
    assert!(matches!(error, ReconcileError::DuplicateKey { .. }));
    assert!(host.ops.is_empty());
}

#[test]
fn explicit_id_shadowing_a_derived_one_is_a_duplicate() {
    let mut host = RecordingHost::default();
    let mut reconciler = reconciler();
    let result = reconciler.render(
        &mut host,
        CONTAINER,
        panel().child(item("auto")).child(item("explicit").id(0)),
    );
    assert!(matches!(result, Err(ReconcileError::DuplicateKey { .. })));
    assert!(!reconciler.is_mounted());
    assert!(host.ops.is_empty());
}

#[derive(Debug)]
struct OtherProps;

fn create_other(ctx: &mut RenderCtx<'_, RecordingHost>, _props: &OtherProps) -> NodeHandle {
    ctx.create_node(ITEM)
}

fn update_other(
    _ctx: &mut RenderCtx<'_, RecordingHost>,
    _node: NodeHandle,
    _old: &OtherProps,
    _new: &OtherProps,
) {
}

#[test]
fn same_type_name_with_other_props_is_a_mismatch() {
    let mut host = RecordingHost::default();
    let mut reconciler = reconciler();
    render(&mut reconciler, &mut host, panel().child(item("a")));

    host.ops.clear();
    let impostor = Element::new(ITEM, OtherProps, create_other, update_other);
    let error = reconciler
        .render(&mut host, CONTAINER, panel().child(impostor))
        .unwrap_err();
    assert!(matches!(error, ReconcileError::TypeMismatch { .. }));
    assert!(host.ops.is_empty());
}
