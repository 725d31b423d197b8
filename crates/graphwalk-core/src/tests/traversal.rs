use super::{id, ids};
use crate::*;
use serde_json::json;

fn visit(c: char) -> TraceStep {
    TraceStep::Visit { node: id(c) }
}

fn back(from: char, to: char) -> TraceStep {
    TraceStep::Backtrack {
        from: id(from),
        to: id(to),
    }
}

fn jump(to: char) -> TraceStep {
    TraceStep::Jump { to: id(to) }
}

fn adjacency(lists: &[(char, &str)]) -> AdjacencyMap {
    lists.iter().map(|&(k, n)| (id(k), ids(n))).collect()
}

fn store(vertices: &str, edges: &[(char, char, bool)]) -> GraphStore {
    let mut g = GraphStore::new();
    for v in ids(vertices) {
        g.insert_vertex(Vertex::new(v)).unwrap();
    }
    for &(a, b, directed) in edges {
        g.add_edge(id(a), id(b), directed).unwrap();
    }
    g
}

#[test]
fn star_backtracks_after_each_child() {
    let adj = adjacency(&[('A', "BC"), ('B', "A"), ('C', "A")]);
    let t = traverse(&adj, Some(id('A')));
    assert_eq!(
        t.trace.steps(),
        &[visit('A'), visit('B'), back('B', 'A'), visit('C'), back('C', 'A')]
    );
    assert_eq!(t.order, ids("ABC"));
    assert_eq!(t.tree_count(), 1);
}

#[test]
fn isolated_vertices_are_reached_by_jumps() {
    let adj = adjacency(&[('A', ""), ('B', "")]);
    let t = traverse(&adj, Some(id('A')));
    assert_eq!(t.trace.steps(), &[visit('A'), jump('B'), visit('B')]);
    assert_eq!(t.order, ids("AB"));
    assert_eq!(t.tree_count(), 2);
}

#[test]
fn chain_started_in_the_middle() {
    let g = store("ABCD", &[('A', 'B', false), ('B', 'C', false), ('C', 'D', false)]);
    let t = traverse(&AdjacencyMap::from_store(&g), Some(id('B')));
    assert_eq!(
        t.trace.steps(),
        &[
            visit('B'),
            visit('A'),
            back('A', 'B'),
            visit('C'),
            visit('D'),
            back('D', 'C'),
            back('C', 'B'),
        ]
    );
    assert_eq!(t.order, ids("BACD"));
}

#[test]
fn unknown_start_is_ignored_and_coverage_begins_with_a_jump() {
    let g = store("AB", &[('A', 'B', false)]);
    let adj = AdjacencyMap::from_store(&g);
    let expected = [jump('A'), visit('A'), visit('B'), back('B', 'A')];

    let t = traverse(&adj, Some(id('Z')));
    assert_eq!(t.trace.steps(), &expected);
    assert_eq!(t.tree_count(), 1);

    let t = traverse(&adj, None);
    assert_eq!(t.trace.steps(), &expected);
}

#[test]
fn directed_edges_are_followed_one_way_only() {
    let g = store("ABC", &[('A', 'B', true), ('C', 'A', true)]);
    let t = traverse(&AdjacencyMap::from_store(&g), Some(id('A')));
    assert_eq!(
        t.trace.steps(),
        &[visit('A'), visit('B'), back('B', 'A'), jump('C'), visit('C')]
    );
}

#[test]
fn coverage_follows_vertex_creation_order() {
    // Created as C, A, B; nothing connected.
    let g = store("CAB", &[]);
    let t = traverse(&AdjacencyMap::from_store(&g), Some(id('B')));
    assert_eq!(
        t.trace.steps(),
        &[visit('B'), jump('C'), visit('C'), jump('A'), visit('A')]
    );
}

#[test]
fn already_visited_neighbours_produce_no_backtrack() {
    // Triangle: C is reached through B, so A never descends into C itself.
    let g = store("ABC", &[('A', 'B', false), ('B', 'C', false), ('A', 'C', false)]);
    let t = traverse(&AdjacencyMap::from_store(&g), Some(id('A')));
    assert_eq!(
        t.trace.steps(),
        &[visit('A'), visit('B'), visit('C'), back('C', 'B'), back('B', 'A')]
    );
}

#[test]
fn every_vertex_is_visited_exactly_once() {
    let mut g = GraphStore::new();
    for v in VertexId::all() {
        g.insert_vertex(Vertex::new(v)).unwrap();
    }
    for i in 0..ALPHABET_LEN {
        let a = VertexId::from_index(i).unwrap();
        let b = VertexId::from_index((i * 7 + 3) % ALPHABET_LEN).unwrap();
        if i % 4 != 0 {
            g.add_edge(a, b, i % 3 == 0).unwrap();
        }
    }
    let adj = AdjacencyMap::from_store(&g);

    for start in [None, Some(id('A')), Some(id('M')), Some(id('Z'))] {
        let t = traverse(&adj, start);
        let mut seen = t.order.clone();
        seen.sort();
        assert_eq!(seen, VertexId::all().collect::<Vec<_>>());
        assert_eq!(t.trace.visit_order(), t.order);
        assert_eq!(traverse(&adj, start), t, "traversal must be deterministic");
    }
}

#[test]
fn one_backtrack_per_tree_edge() {
    let g = store(
        "ABCDEF",
        &[('A', 'B', false), ('A', 'C', false), ('C', 'D', false), ('E', 'F', true)],
    );
    let t = traverse(&AdjacencyMap::from_store(&g), Some(id('A')));
    let backtracks = t
        .trace
        .steps()
        .iter()
        .filter(|s| matches!(s, TraceStep::Backtrack { .. }))
        .count();
    let jumps = t
        .trace
        .steps()
        .iter()
        .filter(|s| matches!(s, TraceStep::Jump { .. }))
        .count();
    // Tree edges = vertices - trees.
    assert_eq!(backtracks, t.order.len() - t.tree_count());
    assert_eq!(jumps, 1);
}

#[test]
fn empty_mapping_gives_an_empty_traversal() {
    let t = traverse(&AdjacencyMap::default(), Some(id('A')));
    assert!(t.is_empty());
    assert!(t.trace.is_empty());
    assert_eq!(t.tree_count(), 0);
}

#[test]
fn sequence_text_joins_with_arrows() {
    let adj = adjacency(&[('A', "BC"), ('B', "A"), ('C', "A")]);
    assert_eq!(traverse(&adj, Some(id('A'))).sequence_text(), "A -> B -> C");
    assert_eq!(format_sequence(&[]), "");
}

#[test]
fn legacy_order_becomes_visit_steps() {
    let trace = Trace::from_order(&ids("CA"));
    assert_eq!(trace.steps(), &[visit('C'), visit('A')]);
}

#[test]
fn trace_serializes_as_tagged_steps() {
    let adj = adjacency(&[('A', "B"), ('B', "A"), ('C', "")]);
    let t = traverse(&adj, Some(id('A')));
    assert_eq!(
        serde_json::to_value(&t).unwrap(),
        json!({
            "order": ["A", "B", "C"],
            "trace": [
                { "type": "visit", "node": "A" },
                { "type": "visit", "node": "B" },
                { "type": "backtrack", "from": "B", "to": "A" },
                { "type": "jump", "to": "C" },
                { "type": "visit", "node": "C" }
            ]
        })
    );

    let parsed: Trace = serde_json::from_value(json!([{ "type": "jump", "to": "Q" }])).unwrap();
    assert_eq!(parsed.steps(), &[jump('Q')]);
}
