//! Mode match runner
//!
//! Plays the `easy` and `hard` modes of a prediction service against each
//! other and records every action with the confidence the service reported:
//! - Games run concurrently, alternating which side `easy` plays
//! - Each game ends on game over, a rejected action, a failed request or a ply cap
//! - Results are kept as JSON and summarized as a text report
//!
//! # Usage
//!
//! ```bash
//! # Ten games against a local service
//! cargo run -p mode_match -- run --server http://127.0.0.1:5000 --games 10
//!
//! # Print the report of a saved run
//! cargo run -p mode_match -- report mode_match.json
//! ```

mod match_runner;
mod results;
mod score;

pub use match_runner::*;
pub use results::*;
pub use score::*;
