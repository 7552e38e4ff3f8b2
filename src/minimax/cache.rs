use ahash::HashMap;

#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

/// One transposition-table entry: a position value that is valid for
/// searches of at most `levels` remaining depth.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub struct Transposition {
    pub(super) value: i32,
    pub(super) levels: u8,
    pub(super) bound: Bound,
}

pub trait Cache<S> {
    fn store(&mut self, state: &S, entry: Transposition);
    fn probe(&mut self, state: &S) -> Option<Transposition>;
}

#[derive(Debug, Clone)]
pub struct TableCache<S>(HashMap<S, Transposition>);

impl<S> TableCache<S> {
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<S> Default for TableCache<S> {
    fn default() -> Self {
        Self(HashMap::default())
    }
}

impl<S> Cache<S> for TableCache<S>
where
    S: Eq + std::hash::Hash + Clone,
{
    fn store(&mut self, state: &S, entry: Transposition) {
        self.0.insert(state.clone(), entry);
    }

    fn probe(&mut self, state: &S) -> Option<Transposition> {
        self.0.get(state).copied()
    }
}

/// Disables transposition lookups, every node is searched from scratch.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Default)]
pub struct NullCache;

impl<S> Cache<S> for NullCache {
    fn store(&mut self, _state: &S, _entry: Transposition) {}

    fn probe(&mut self, _state: &S) -> Option<Transposition> {
        None
    }
}
