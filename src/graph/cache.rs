//! Invalidation hook for caches derived from adjacency storage.

/// Anything that lazily caches quantities derived from the edge list (the
/// degree table, …) implements this; mutators call it after every
/// structural change so stale derived state never outlives the storage it
/// was computed from.
pub trait InvalidateCache {
    /// Drop *all* cached derived state so future queries recompute it.
    fn invalidate_cache(&mut self);
}
