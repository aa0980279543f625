//! Test helpers: thread-per-party execution over an in-process store.

use std::thread;
use std::time::Duration;

use ark_ff::PrimeField;

use zkvm_mpc_core::protocols::additive::{AdditiveState, ConsumedCounts, RandomnessStore, dealer};
use zkvm_mpc_storage::SharedStorage;
use zkvm_mpc_storage::local::{LocalSession, LocalStore};
use zkvm_mpc_storage::poll::PollConfig;

/// Installs a fmt subscriber honoring `RUST_LOG`. Safe to call repeatedly.
pub fn install_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Supply of correlated randomness to deal to every party.
pub fn supply(
    field_triples: usize,
    bit_triples: usize,
    edabits: usize,
    dabits: usize,
) -> ConsumedCounts {
    ConsumedCounts {
        field_triples,
        bit_triples,
        edabits,
        dabits,
    }
}

/// Polling configuration used by the test parties: fast ticks, deadline
/// after a couple of seconds.
pub fn test_poll() -> PollConfig {
    PollConfig {
        tick: Duration::from_micros(100),
        escalations: 5,
    }
}

/// Runs `f` once per party on its own thread, handing each party its
/// protocol state and its session handle, and returns the per-party
/// results in party order. The storage session is retired once every
/// party has finished.
pub fn run_parties<F, T, W>(num_parties: usize, randomness: ConsumedCounts, f: W) -> Vec<T>
where
    F: PrimeField,
    T: Send,
    W: Fn(AdditiveState<F, RandomnessStore<F>>, LocalSession) -> T + Send + Sync,
{
    install_tracing();
    let registry = LocalStore::new();
    let mut rng = rand::thread_rng();
    let stores = dealer::randomness_stores::<F, _>(num_parties, randomness, &mut rng);

    let owner = registry.session(0, num_parties);
    let results = thread::scope(|scope| {
        let handles: Vec<_> = stores
            .into_iter()
            .enumerate()
            .map(|(id, prep)| {
                let session = registry.session(0, num_parties);
                let state = AdditiveState::new(id, num_parties, test_poll(), prep)
                    .expect("valid party id");
                let f = &f;
                scope.spawn(move || f(state, session))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("party thread panicked"))
            .collect()
    });
    owner.retire();
    results
}
