use graph_lease::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn v(i: usize) -> VertexId {
    VertexId::new(i)
}

fn e(i: usize) -> EdgeId {
    EdgeId::new(i)
}

/// Star around vertex 0: edges 0-1, 0-2, ..., 0-(n-1).
fn star_graph(n: usize) -> GraphHandle {
    GraphHandle::from_edges(n, false, (1..n).map(|i| (v(0), v(i)))).unwrap()
}

#[test]
fn filter_selects_by_degree() {
    let g = star_graph(5);
    let hubs = g
        .vertices()
        .unwrap()
        .filter(|probe| probe.degree(Direction::All) > 2);
    assert_eq!(hubs.resolve().unwrap(), vec![v(0)]);
    let leaves = g
        .vertices()
        .unwrap()
        .filter(|probe| probe.degree(Direction::All) == 1);
    assert_eq!(leaves.count().unwrap(), 4);
}

#[test]
fn filters_compose() {
    let g = star_graph(6);
    let selected = g
        .vertices()
        .unwrap()
        .filter(|probe| probe.degree(Direction::All) == 1)
        .filter(|probe| probe.id().index() % 2 == 0);
    assert_eq!(selected.resolve().unwrap(), vec![v(2), v(4)]);
}

#[test]
fn predicates_rerun_on_every_resolve() {
    let g = star_graph(4);
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let view = g.vertices().unwrap().filter(move |probe| {
        counter.fetch_add(1, Ordering::Relaxed);
        probe.degree(Direction::All) >= 1
    });

    view.resolve().unwrap();
    let after_first = calls.load(Ordering::Relaxed);
    assert_eq!(after_first, 4);
    view.resolve().unwrap();
    // Criteria are stored, not a resolved subset: the predicate ran again.
    assert_eq!(calls.load(Ordering::Relaxed), 2 * after_first);
}

#[test]
fn filtered_resolve_reflects_state_at_resolve_time() {
    let g = star_graph(4);
    let fresh = g
        .vertices()
        .unwrap()
        .filter(|probe| probe.degree(Direction::All) > 2);
    assert_eq!(fresh.resolve().unwrap(), vec![v(0)]);

    // After mutation the old view is stale; a re-created view with the same
    // criteria sees the new topology, not the one from definition time.
    g.add_edges([(v(1), v(2)), (v(1), v(3))]).unwrap();
    assert!(fresh.resolve().is_err());
    let recreated = g
        .vertices()
        .unwrap()
        .filter(|probe| probe.degree(Direction::All) > 2);
    assert_eq!(recreated.resolve().unwrap(), vec![v(0), v(1)]);
}

#[test]
fn filter_on_a_stale_view_stays_stale() {
    let g = star_graph(3);
    let vs = g.vertices().unwrap();
    g.add_vertices(1).unwrap();
    let child = vs.filter(|_| true);
    assert!(matches!(
        child.resolve(),
        Err(GraphLeaseError::StaleReference { .. })
    ));
}

#[test]
fn filter_on_a_dropped_graph_is_safe() {
    let g = star_graph(3);
    let vs = g.vertices().unwrap();
    drop(g);
    let child = vs.filter(|_| true);
    assert!(matches!(
        child.resolve(),
        Err(GraphLeaseError::StaleReference { .. })
    ));
}

#[test]
fn iteration_yields_working_element_views() {
    let g = GraphHandle::from_edges(3, true, [(v(0), v(1)), (v(1), v(2))]).unwrap();
    let es = g.edges().unwrap();
    let endpoints: Vec<(VertexId, VertexId)> = es
        .iter()
        .unwrap()
        .map(|edge| edge.endpoints().unwrap())
        .collect();
    assert_eq!(endpoints, vec![(v(0), v(1)), (v(1), v(2))]);
}

#[test]
fn iteration_is_restartable() {
    let g = star_graph(4);
    let vs = g.vertices().unwrap();
    let first: Vec<VertexId> = vs.iter().unwrap().map(|w| w.resolve().unwrap()).collect();
    let second: Vec<VertexId> = vs.iter().unwrap().map(|w| w.resolve().unwrap()).collect();
    assert_eq!(first, second);
    assert_eq!(vs.iter().unwrap().len(), 4);
}

#[test]
fn iterated_element_views_go_stale_with_the_graph() {
    let g = star_graph(3);
    let elements: Vec<VertexView> = g.vertices().unwrap().iter().unwrap().collect();
    g.add_vertices(1).unwrap();
    for view in &elements {
        assert!(matches!(
            view.resolve(),
            Err(GraphLeaseError::StaleReference { .. })
        ));
    }
}

#[test]
fn iterating_a_stale_sequence_fails_up_front() {
    let g = star_graph(3);
    let vs = g.vertices().unwrap();
    g.add_vertices(1).unwrap();
    assert!(vs.iter().is_err());
}

#[test]
fn edge_filters_see_endpoints() {
    let g = GraphHandle::from_edges(4, true, [(v(0), v(1)), (v(2), v(1)), (v(2), v(3))]).unwrap();
    let into_one = g.edges().unwrap().filter(|probe| probe.target() == v(1));
    assert_eq!(into_one.resolve().unwrap(), vec![e(0), e(1)]);
    let from_two = g.edges().unwrap().filter(|probe| probe.source() == v(2));
    assert_eq!(from_two.resolve().unwrap(), vec![e(1), e(2)]);
}

#[test]
fn direction_modes_on_element_views() {
    let g = GraphHandle::from_edges(3, true, [(v(0), v(1)), (v(2), v(0))]).unwrap();
    let vertex = g.vertex(v(0)).unwrap();
    assert_eq!(vertex.degree(Direction::Out).unwrap(), 1);
    assert_eq!(vertex.degree(Direction::In).unwrap(), 1);
    assert_eq!(vertex.degree(Direction::All).unwrap(), 2);
    assert_eq!(vertex.neighbors(Direction::Out).unwrap(), vec![v(1)]);
    assert_eq!(vertex.neighbors(Direction::In).unwrap(), vec![v(2)]);

    let undirected = GraphHandle::from_edges(3, false, [(v(0), v(1)), (v(2), v(0))]).unwrap();
    let vertex = undirected.vertex(v(0)).unwrap();
    for dir in [Direction::Out, Direction::In, Direction::All] {
        assert_eq!(vertex.degree(dir).unwrap(), 2);
    }
}

#[test]
fn edge_view_source_and_target() {
    let g = GraphHandle::from_edges(2, true, [(v(1), v(0))]).unwrap();
    let edge = g.edge(e(0)).unwrap();
    assert_eq!(edge.source().unwrap(), v(1));
    assert_eq!(edge.target().unwrap(), v(0));
}
