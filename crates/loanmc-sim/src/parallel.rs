//! Conditional parallel iteration over path indices.
//!
//! Uses rayon when the `parallel` feature is enabled and the configuration
//! asks for it; otherwise iterates sequentially.

use crate::config::SimulationConfig;

/// Maps `f` over `0..count`, in parallel when the config allows it.
///
/// Output order always matches index order.
#[allow(unused_variables)]
pub fn maybe_parallel_map<U, F>(count: usize, config: &SimulationConfig, f: F) -> Vec<U>
where
    U: Send,
    F: Fn(usize) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if config.should_parallelize(count) {
            return (0..count).into_par_iter().map(f).collect();
        }
    }

    (0..count).map(f).collect()
}
