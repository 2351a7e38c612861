//! `ct-core`: foundational types for the `rust_ct` contact reporting framework.
//!
//! This crate is a dependency of every other `ct-*` crate.  It has no `ct-*`
//! dependencies and only two external ones (`thiserror` and `toml`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `HostAddress`, `HostPair` (unordered pair key)        |
//! | [`geo`]         | `Coord`                                               |
//! | [`bbox`]        | `BoundingBox` (null / empty / proper envelope)        |
//! | [`triplet`]     | `Triplet<A, B, C>`                                    |
//! | [`settings`]    | `Settings`: namespaced TOML lookup                   |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to the plain value types.   |

pub mod bbox;
pub mod error;
pub mod geo;
pub mod ids;
pub mod settings;
pub mod triplet;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use bbox::BoundingBox;
pub use error::{CoreError, CoreResult};
pub use geo::Coord;
pub use ids::{HostAddress, HostPair};
pub use settings::Settings;
pub use triplet::Triplet;
