/// How the canonical collection is expanded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Construction {
    /// Breadth-first expansion on the calling thread.
    #[default]
    Sequential,
    /// The goto sets of every state in one frontier round are computed on a
    /// rayon pool, then interned on the calling thread in frontier order.
    /// The automaton and table are identical to the sequential build.
    /// `threads: None` lets rayon pick.
    #[cfg(feature = "parallel")]
    Parallel { threads: Option<usize> },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildConfig {
    pub construction: Construction,
}

impl BuildConfig {
    pub fn sequential() -> BuildConfig {
        BuildConfig {
            construction: Construction::Sequential,
        }
    }

    #[cfg(feature = "parallel")]
    pub fn parallel(threads: Option<usize>) -> BuildConfig {
        BuildConfig {
            construction: Construction::Parallel { threads },
        }
    }
}
