pub mod rng;
pub mod spawner;

pub use rng::Rng;
pub use spawner::SpawnSequence;
