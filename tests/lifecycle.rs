use graph_lease::prelude::*;

fn v(i: usize) -> VertexId {
    VertexId::new(i)
}

#[test]
fn finalize_invalidates_all_views_and_is_idempotent() {
    let g = GraphHandle::from_edges(3, false, [(v(0), v(1))]).unwrap();
    let vertex = g.vertex(v(1)).unwrap();
    let vs = g.vertices().unwrap();
    let es = g.edges().unwrap();

    g.finalize();
    assert_eq!(g.lifecycle(), LifecycleState::Finalized);

    for result in [
        vertex.resolve().map(|_| ()),
        vs.resolve().map(|_| ()),
        es.resolve().map(|_| ()),
    ] {
        let err = result.unwrap_err();
        match err {
            GraphLeaseError::StaleReference { observed, current } => {
                assert!(observed.is_sentinel());
                assert!(current.is_sentinel());
            }
            other => panic!("expected StaleReference, got {other}"),
        }
    }

    // Second finalize is a no-op.
    g.finalize();
    assert_eq!(g.lifecycle(), LifecycleState::Finalized);
}

#[test]
fn operations_after_finalize_fail_with_use_after_finalize() {
    let g = GraphHandle::new(2, true);
    g.finalize();

    assert_eq!(
        g.add_vertices(1).unwrap_err(),
        GraphLeaseError::UseAfterFinalize
    );
    assert_eq!(
        g.add_edge(v(0), v(1)).unwrap_err(),
        GraphLeaseError::UseAfterFinalize
    );
    assert_eq!(g.counts().unwrap_err(), GraphLeaseError::UseAfterFinalize);
    assert_eq!(
        g.vertex(v(0)).unwrap_err(),
        GraphLeaseError::UseAfterFinalize
    );
    assert_eq!(
        g.vertices().unwrap_err(),
        GraphLeaseError::UseAfterFinalize
    );
    assert_eq!(g.edges().unwrap_err(), GraphLeaseError::UseAfterFinalize);
}

#[test]
fn dropping_the_handle_behaves_like_finalize() {
    let g = GraphHandle::from_edges(2, false, [(v(0), v(1))]).unwrap();
    let es = g.edges().unwrap();
    drop(g);
    match es.resolve().unwrap_err() {
        GraphLeaseError::StaleReference { observed, current } => {
            assert!(observed.is_sentinel());
            assert!(current.is_sentinel());
        }
        other => panic!("expected StaleReference, got {other}"),
    }
}

#[test]
fn view_drop_unregisters() {
    let g = GraphHandle::new(3, false);
    assert_eq!(g.outstanding_views(), 0);
    let a = g.vertex(v(0)).unwrap();
    let b = g.vertex(v(1)).unwrap();
    assert_eq!(g.outstanding_views(), 2);
    drop(a);
    assert_eq!(g.outstanding_views(), 1);
    drop(b);
    assert_eq!(g.outstanding_views(), 0);
}

#[test]
fn registry_empties_after_finalize_even_with_views_alive() {
    let g = GraphHandle::new(3, false);
    let held = g.vertex(v(0)).unwrap();
    assert_eq!(g.outstanding_views(), 1);
    g.finalize();
    assert_eq!(g.outstanding_views(), 0);
    // The held view is invalid but still safe to use.
    assert!(held.resolve().is_err());
}

#[test]
fn element_views_from_iteration_share_registration() {
    let g = GraphHandle::new(3, false);
    let vs = g.vertices().unwrap();
    let elements: Vec<VertexView> = vs.iter().unwrap().collect();
    assert_eq!(elements.len(), 3);
    // One anchor backs the sequence and its element views.
    assert_eq!(g.outstanding_views(), 1);
    drop(vs);
    assert_eq!(g.outstanding_views(), 1);
    drop(elements);
    assert_eq!(g.outstanding_views(), 0);
}

#[test]
fn clients_are_the_only_strong_owners() {
    // A graph that cached canonical views is still reclaimed when the last
    // client-held view is gone, and views never resurrect a dropped graph.
    let g = GraphHandle::new(2, false);
    let vs = g.vertices().unwrap();
    let vs_again = g.vertices().unwrap();
    drop(vs);
    drop(vs_again);
    assert_eq!(g.outstanding_views(), 0);
    let fresh = g.vertices().unwrap();
    drop(g);
    assert!(matches!(
        fresh.resolve(),
        Err(GraphLeaseError::StaleReference { .. })
    ));
}
