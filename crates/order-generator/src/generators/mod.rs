//! Individual field generators.
//!
//! Each generator draws one field value from the RNG it is handed. None of
//! them hold state, so the synthesizer can call them in a fixed order per
//! record and keep output a pure function of the RNG stream.

pub mod categorical;
pub mod numeric;

pub use categorical::generate_one_of;
pub use numeric::{generate_price, generate_quantity};
