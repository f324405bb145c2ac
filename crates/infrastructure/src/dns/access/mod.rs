pub mod gate;

pub use gate::ClientAccessGate;
