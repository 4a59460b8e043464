use skilltree_core::{
    build_scene, build_tree, reduce, DisclosureAction, DisclosureState, SkillTree, TaxonomyEntry,
    Transition,
};
use std::collections::BTreeSet;

fn data_science() -> TaxonomyEntry {
    TaxonomyEntry::new("ds", "Data Science").with_children(vec![
        TaxonomyEntry::new("a1", "Programming").with_children(vec![
            TaxonomyEntry::new("s1", "Python"),
            TaxonomyEntry::new("s2", "Statistics").with_children(vec![
                TaxonomyEntry::new("k1", "Testing"),
                TaxonomyEntry::new("k2", "Intervals"),
                TaxonomyEntry::new("k3", "Bootstrap"),
                TaxonomyEntry::new("k4", "Power"),
            ]),
            TaxonomyEntry::new("s3", "SQL"),
        ]),
        TaxonomyEntry::new("a2", "Machine Learning"),
    ])
}

struct Session {
    tree: SkillTree,
    state: DisclosureState,
}

impl Session {
    fn open() -> Self {
        let tree = build_tree(&data_science());
        let state = DisclosureState::initial(&tree);
        Self { tree, state }
    }

    fn click(&mut self, id: &str) {
        let Transition { tree, state } = reduce(
            &self.tree,
            &self.state,
            &DisclosureAction::Select(id.to_string()),
        )
        .expect("select should succeed");
        self.tree = tree;
        self.state = state;
        self.assert_edges_within_visible_set();
    }

    fn visible(&self) -> BTreeSet<&str> {
        self.state.visible().iter().map(String::as_str).collect()
    }

    fn position(&self, id: &str) -> (f64, f64) {
        self.tree.node(id).expect("node").position()
    }

    fn assert_edges_within_visible_set(&self) {
        let scene = build_scene(&self.tree, &self.state, None);
        for edge in &scene.edges {
            assert!(self.state.is_visible(&edge.source), "{}", edge.source);
            assert!(self.state.is_visible(&edge.target), "{}", edge.target);
        }
        assert_eq!(scene.nodes.len(), self.state.visible().len());
    }
}

fn assert_close(actual: (f64, f64), expected: (f64, f64)) {
    assert!(
        (actual.0 - expected.0).abs() < 1e-9 && (actual.1 - expected.1).abs() < 1e-9,
        "expected {expected:?}, got {actual:?}"
    );
}

#[test]
fn opened_tree_shows_root_only() {
    let session = Session::open();
    assert_eq!(session.visible(), BTreeSet::from(["ds"]));
    assert_eq!(session.state.selected(), None);
    assert_eq!(session.position("ds"), (50.0, 85.0));
}

#[test]
fn first_root_click_selects_and_second_expands() {
    let mut session = Session::open();

    session.click("ds");
    assert_eq!(session.visible(), BTreeSet::from(["ds"]));
    assert_eq!(session.state.selected(), Some("ds"));

    session.click("ds");
    assert_eq!(session.visible(), BTreeSet::from(["ds", "a1", "a2"]));
    assert_eq!(session.position("ds"), (50.0, 85.0));
    assert_eq!(session.position("a1"), (40.0, 70.0));
    assert_eq!(session.position("a2"), (60.0, 70.0));
}

#[test]
fn clicking_revealed_ability_expands_immediately_and_hides_siblings() {
    let mut session = Session::open();
    session.click("ds");
    session.click("ds");
    session.click("a1");

    assert_eq!(
        session.visible(),
        BTreeSet::from(["ds", "a1", "s1", "s2", "s3"])
    );
    assert_eq!(session.state.selected(), Some("a1"));
    assert_eq!(session.position("ds"), (50.0, 85.0));
    assert_eq!(session.position("a1"), (50.0, 70.0));
    assert_eq!(session.position("s1"), (30.0, 55.0));
    assert_eq!(session.position("s2"), (50.0, 55.0));
    assert_eq!(session.position("s3"), (70.0, 55.0));

    // Hidden sibling keeps its previous (stale) position.
    assert_eq!(session.position("a2"), (60.0, 70.0));
}

#[test]
fn skill_children_use_compact_knowledge_row() {
    let mut session = Session::open();
    for id in ["ds", "ds", "a1", "s2"] {
        session.click(id);
    }

    assert_eq!(
        session.visible(),
        BTreeSet::from(["ds", "a1", "s2", "k1", "k2", "k3", "k4"])
    );
    assert_eq!(session.position("s2"), (50.0, 55.0));
    // Four knowledge items, 14 apart, centered on the spine, one tier past
    // the regular child row.
    assert_close(session.position("k1"), (29.0, 25.0));
    assert_close(session.position("k2"), (43.0, 25.0));
    assert_close(session.position("k3"), (57.0, 25.0));
    assert_close(session.position("k4"), (71.0, 25.0));
}

#[test]
fn leaf_click_recenters_spine_without_revealing_anything() {
    let mut session = Session::open();
    for id in ["ds", "ds", "a1", "s2", "k3"] {
        session.click(id);
    }

    assert_eq!(session.visible(), BTreeSet::from(["ds", "a1", "s2", "k3"]));
    assert_eq!(session.position("k3"), (50.0, 40.0));
    assert_eq!(session.state.selected(), Some("k3"));
}

#[test]
fn reselecting_expanded_node_is_idempotent() {
    let mut session = Session::open();
    for id in ["ds", "ds", "a1"] {
        session.click(id);
    }
    let visible_before = session.state.clone();
    let tree_before = session.tree.clone();

    session.click("a1");
    assert_eq!(session.state, visible_before);
    assert_eq!(session.tree, tree_before);
}

#[test]
fn walking_back_up_restores_upper_rows() {
    let mut session = Session::open();
    for id in ["ds", "ds", "a1", "s2", "ds"] {
        session.click(id);
    }

    assert_eq!(session.visible(), BTreeSet::from(["ds", "a1", "a2"]));
    assert_eq!(session.position("a1"), (40.0, 70.0));
    assert_eq!(session.position("a2"), (60.0, 70.0));
}

#[test]
fn reducer_leaves_its_inputs_untouched() {
    let session = Session::open();
    let tree = session.tree.clone();
    let state = session.state.clone();

    let step = reduce(&tree, &state, &DisclosureAction::Select("ds".to_string()))
        .expect("select root");
    let _ = reduce(&step.tree, &step.state, &DisclosureAction::Select("ds".to_string()))
        .expect("expand root");

    assert_eq!(tree, session.tree);
    assert_eq!(state, session.state);
}

#[test]
fn build_positions_survive_until_disclosure_moves_them() {
    let mut session = Session::open();
    let built_k1 = session.position("k1");
    session.click("ds");
    session.click("ds");
    assert_eq!(session.position("k1"), built_k1);
}
