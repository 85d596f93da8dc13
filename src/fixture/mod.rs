//! Initial tree data.
//!
//! A fixture is a YAML document where a folder is a mapping with a `name` and an
//! optional `children` sequence, and a file is a plain string.

mod fixture;

pub use fixture::{Fixture, FixtureError};
