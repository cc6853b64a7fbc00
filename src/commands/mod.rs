pub mod reconcile;
pub mod state;

pub use reconcile::ReconcileCommand;
pub use state::StateCommand;
