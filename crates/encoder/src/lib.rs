//! DocSearch query encoders
//!
//! Turns query text into a vector comparable with the stored embedding rows.
//! Only a random placeholder ships today; a model-backed encoder plugs in
//! through [`QueryEncoder`] without touching the ranker.

mod encoder_trait;
mod random;

pub use encoder_trait::QueryEncoder;
pub use random::RandomBaselineEncoder;
