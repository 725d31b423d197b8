use super::{id, ids};
use crate::*;

fn seeded() -> Session {
    Session::new(SessionConfig {
        seed: Some(7),
        ..SessionConfig::default()
    })
}

fn with_vertices(n: usize) -> Session {
    let mut s = seeded();
    for _ in 0..n {
        s.add_vertex().unwrap();
    }
    s
}

fn select(s: &mut Session, letters: &str) {
    for v in ids(letters) {
        assert!(s.toggle_vertex_selection(v).unwrap());
    }
}

fn play_all(s: &mut Session, token: &PlaybackToken) -> Vec<VertexId> {
    let mut highlighted = Vec::new();
    while let Tick::Frame(f) = s.tick(token) {
        assert_eq!(s.highlighted(), Some(f.highlighted));
        highlighted.push(f.highlighted);
    }
    highlighted
}

#[test]
fn vertices_get_sequential_letters_until_the_alphabet_runs_out() {
    let mut s = with_vertices(ALPHABET_LEN);
    let ids: String = s.store().vertex_ids().map(|v| v.as_char()).collect();
    assert_eq!(ids, "ABCDEFGHIJKLMNOPQRSTUVWXYZ");

    let err = s.add_vertex().unwrap_err();
    assert!(matches!(
        err,
        Error::Graph(GraphError::IdentifierSpaceExhausted)
    ));
    assert_eq!(s.store().vertex_count(), ALPHABET_LEN);
}

#[test]
fn placement_stays_inside_the_margin() {
    let s = with_vertices(20);
    let canvas = &s.config().canvas;
    for v in s.store().vertices() {
        assert!(v.position.x >= canvas.margin && v.position.x < canvas.width - canvas.margin);
        assert!(v.position.y >= canvas.margin && v.position.y < canvas.height - canvas.margin);
        assert!(v.color.rgb() <= 0x00ff_ffff);
    }
}

#[test]
fn seeded_sessions_are_reproducible() {
    let a = with_vertices(5);
    let b = with_vertices(5);
    for (va, vb) in a.store().vertices().iter().zip(b.store().vertices()) {
        assert_eq!(va.position, vb.position);
        assert_eq!(va.color, vb.color);
    }
}

#[test]
fn freed_letters_are_reused() {
    let mut s = with_vertices(3);
    select(&mut s, "B");
    s.delete_selected().unwrap();
    assert_eq!(s.add_vertex().unwrap().id(), id('B'));
}

#[test]
fn selection_toggles_and_rejects_unknown_vertices() {
    let mut s = with_vertices(2);
    assert!(s.toggle_vertex_selection(id('B')).unwrap());
    assert!(s.toggle_vertex_selection(id('A')).unwrap());
    assert_eq!(s.selection().vertices(), ids("BA").as_slice());
    assert!(!s.toggle_vertex_selection(id('B')).unwrap());
    assert_eq!(s.selection().vertices(), ids("A").as_slice());

    let err = s.toggle_vertex_selection(id('Z')).unwrap_err();
    assert!(matches!(err, Error::Graph(GraphError::UnknownVertex(v)) if v == id('Z')));

    s.clear_selection();
    assert!(s.selection().is_empty());
}

#[test]
fn edge_selection_requires_an_existing_edge() {
    let mut s = with_vertices(3);
    select(&mut s, "AB");
    s.connect_selected().unwrap();

    assert!(s.toggle_edge_selection(id('B'), id('A')).unwrap());
    assert_eq!(s.selection().edges(), &[EdgeKey::new(id('A'), id('B'))]);

    let err = s.toggle_edge_selection(id('A'), id('C')).unwrap_err();
    assert!(matches!(err, Error::Graph(GraphError::UnknownEdge(_))));
    assert!(err.to_string().contains("A-C"), "{err}");
}

#[test]
fn connect_uses_the_current_mode_and_clears_the_selection() {
    let mut s = with_vertices(4);
    assert_eq!(s.connect_mode(), ConnectMode::Complete);
    assert_eq!(s.toggle_connect_mode(), ConnectMode::Chain);

    select(&mut s, "ABCD");
    assert_eq!(s.connect_selected().unwrap(), 3);
    assert!(s.selection().is_empty());
    assert_eq!(s.store().edge_count(), 3);

    s.set_connect_mode(ConnectMode::Complete);
    select(&mut s, "ABCD");
    assert_eq!(s.connect_selected().unwrap(), 3);
    assert_eq!(s.store().edge_count(), 6);
}

#[test]
fn failed_connect_keeps_the_selection() {
    let mut s = with_vertices(2);
    select(&mut s, "A");
    let err = s.connect_selected().unwrap_err();
    assert!(matches!(
        err,
        Error::InsufficientSelection {
            required: 2,
            selected: 1
        }
    ));
    assert_eq!(s.selection().vertices(), ids("A").as_slice());
}

#[test]
fn start_vertex_comes_from_the_first_selected_vertex() {
    let mut s = with_vertices(3);
    assert!(matches!(
        s.set_start_from_selection(),
        Err(Error::NothingSelected)
    ));

    select(&mut s, "CA");
    assert_eq!(s.set_start_from_selection().unwrap(), id('C'));
    assert_eq!(s.store().start_vertex(), Some(id('C')));
}

#[test]
fn deleting_the_start_vertex_clears_it() {
    let mut s = with_vertices(3);
    s.set_start_vertex(Some(id('B'))).unwrap();
    select(&mut s, "B");
    s.delete_selected().unwrap();
    assert_eq!(s.store().start_vertex(), None);
    assert_eq!(s.traversal_start(), Some(id('A')));
}

#[test]
fn delete_removes_selected_edges_then_vertices() {
    let mut s = with_vertices(4);
    select(&mut s, "ABCD");
    s.connect_selected().unwrap();
    assert_eq!(s.store().edge_count(), 6);

    s.toggle_edge_selection(id('C'), id('D')).unwrap();
    select(&mut s, "A");
    let deletion = s.delete_selected().unwrap();
    // C-D explicitly, then A-B, A-C, A-D with A.
    assert_eq!(
        deletion,
        Deletion {
            vertices: 1,
            edges: 4
        }
    );
    assert!(s.selection().is_empty());
    assert_eq!(s.store().vertex_ids().collect::<Vec<_>>(), ids("BCD"));
    assert!(s.store().has_edge(id('B'), id('C')));
    assert!(s.store().has_edge(id('B'), id('D')));
    assert_eq!(s.store().edge_count(), 2);
}

#[test]
fn delete_needs_a_graph_and_a_selection() {
    let mut s = seeded();
    assert!(matches!(s.delete_selected(), Err(Error::EmptyGraph)));

    s.add_vertex().unwrap();
    assert!(matches!(s.delete_selected(), Err(Error::NothingSelected)));
    assert_eq!(s.store().vertex_count(), 1);
}

#[test]
fn traversal_of_an_empty_graph_fails() {
    let mut s = seeded();
    assert!(matches!(s.run_traversal(), Err(Error::EmptyGraph)));
    assert!(s.last_order().is_none());
}

#[test]
fn traversal_start_priority() {
    let mut s = with_vertices(3);
    assert_eq!(s.traversal_start(), Some(id('A')));

    select(&mut s, "B");
    assert_eq!(s.traversal_start(), Some(id('B')));

    s.set_start_vertex(Some(id('C'))).unwrap();
    assert_eq!(s.traversal_start(), Some(id('C')));

    s.set_start_vertex(None).unwrap();
    assert_eq!(s.traversal_start(), Some(id('B')));
}

#[test]
fn run_traversal_plays_the_trace() {
    let mut s = with_vertices(4);
    select(&mut s, "ABC");
    s.connect_selected().unwrap();
    s.set_start_vertex(Some(id('B'))).unwrap();

    let run = s.run_traversal().unwrap();
    assert_eq!(run.traversal.order, ids("BACD"));
    assert_eq!(run.traversal.sequence_text(), "B -> A -> C -> D");
    assert_eq!(s.last_order(), Some(ids("BACD").as_slice()));

    let highlighted = play_all(&mut s, &run.token);
    assert_eq!(highlighted.len(), run.traversal.trace.len());
    assert_eq!(highlighted.first(), Some(&id('B')));
    assert_eq!(highlighted.last(), Some(&id('D')));
    assert_eq!(s.highlighted(), None);
}

#[test]
fn a_new_run_supersedes_the_running_playback() {
    let mut s = with_vertices(2);
    let first = s.run_traversal().unwrap().token;
    assert!(matches!(s.tick(&first), Tick::Frame(_)));

    let second = s.run_traversal().unwrap().token;
    assert_eq!(s.tick(&first), Tick::Superseded);
    assert!(matches!(s.tick(&second), Tick::Frame(f) if f.index == 0));

    s.cancel_playback();
    assert_eq!(s.tick(&second), Tick::Superseded);
    assert_eq!(s.highlighted(), None);
}

#[test]
fn repeat_replays_the_last_traversal() {
    let mut s = with_vertices(3);
    assert!(matches!(s.repeat(), Err(Error::NoTraversalToRepeat)));

    let run = s.run_traversal().unwrap();
    let first = play_all(&mut s, &run.token);

    let token = s.repeat().unwrap();
    assert_eq!(play_all(&mut s, &token), first);
}

#[test]
fn clear_all_resets_the_session() {
    let mut s = with_vertices(3);
    select(&mut s, "AB");
    s.connect_selected().unwrap();
    s.set_start_vertex(Some(id('C'))).unwrap();
    select(&mut s, "A");
    let token = s.run_traversal().unwrap().token;
    s.tick(&token);

    s.clear_all();
    assert!(s.store().is_empty());
    assert!(s.selection().is_empty());
    assert_eq!(s.store().start_vertex(), None);
    assert!(s.last_order().is_none());
    assert_eq!(s.highlighted(), None);
    assert_eq!(s.tick(&token), Tick::Superseded);
    assert!(matches!(s.repeat(), Err(Error::NoTraversalToRepeat)));
    assert_eq!(s.add_vertex().unwrap().id(), id('A'));
}

#[test]
fn load_matrix_replaces_the_graph() {
    let mut s = with_vertices(5);
    select(&mut s, "E");
    s.run_traversal().unwrap();

    s.load_matrix("0 1 0\n1 0 1\n0 1 0").unwrap();
    assert_eq!(s.store().vertex_ids().collect::<Vec<_>>(), ids("ABC"));
    assert_eq!(s.store().edge_count(), 2);
    assert!(s.selection().is_empty());
    assert!(s.last_order().is_none());
    assert!(matches!(s.repeat(), Err(Error::NoTraversalToRepeat)));

    let canvas = s.config().canvas.clone();
    for v in s.store().vertices() {
        assert!(v.position.x >= canvas.margin && v.position.y >= canvas.margin);
    }
    assert_eq!(s.matrix().to_string(), "0 1 0\n1 0 1\n0 1 0");
}

#[test]
fn failed_load_leaves_the_session_unchanged() {
    let mut s = with_vertices(2);
    select(&mut s, "AB");
    s.connect_selected().unwrap();
    select(&mut s, "B");
    let before = s.matrix();

    let err = s.load_matrix("0 1\n1").unwrap_err();
    assert!(matches!(err, Error::MalformedMatrix { .. }));
    assert_eq!(s.matrix(), before);
    assert_eq!(s.selection().vertices(), ids("B").as_slice());
}

#[test]
fn colour_display_toggles() {
    let mut s = seeded();
    assert!(s.show_colors());
    assert!(!s.toggle_colors());
    assert!(s.toggle_colors());
}

#[test]
fn matrix_of_an_edited_mixed_graph_decodes_to_the_same_graph() {
    let mut s = seeded();
    s.load_matrix("0 1\n0 0").unwrap();
    assert_eq!(s.add_vertex().unwrap().id(), id('C'));
    select(&mut s, "AC");
    s.connect_selected().unwrap();

    let text = s.matrix().to_string();
    assert_eq!(text, "0 1 1\n0 0 0\n1 0 0");

    let decoded = decode(&text).unwrap();
    let before = AdjacencyMap::from_store(s.store());
    let after = AdjacencyMap::from_store(&decoded);
    assert_eq!(after, before);
    assert_eq!(after.neighbors(id('C')), ids("A").as_slice());
    assert!(!decoded.edge(id('A'), id('C')).unwrap().directed);
    assert!(decoded.edge(id('A'), id('B')).unwrap().directed);
}
