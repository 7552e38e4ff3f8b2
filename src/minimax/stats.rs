pub trait SearchStats {
    fn on_leaf(&mut self);
    fn on_cache_hit(&mut self);
    fn on_cache_miss(&mut self);
    fn on_prune(&mut self);
}

#[derive(Debug, Default)]
pub struct NullStats;

impl SearchStats for NullStats {
    fn on_leaf(&mut self) {}
    fn on_cache_hit(&mut self) {}
    fn on_cache_miss(&mut self) {}
    fn on_prune(&mut self) {}
}

#[derive(Debug, Default, Clone)]
pub struct SearchCounters {
    pub leaves: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub prunes: u64,
}

impl SearchStats for SearchCounters {
    fn on_leaf(&mut self) {
        self.leaves += 1;
    }

    fn on_cache_hit(&mut self) {
        self.cache_hits += 1;
    }

    fn on_cache_miss(&mut self) {
        self.cache_misses += 1;
    }

    fn on_prune(&mut self) {
        self.prunes += 1;
    }
}
