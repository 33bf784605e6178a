//! # groundctl core
//!
//! Domain types and pure logic shared by the groundctl crates:
//! - `model`: mission profiles, configs and dataflow endpoint groups
//! - `arn`: decoding of `.../<config-type>/<config-id>` resource paths
//! - `validate`: operator input checks for licensed ranges
//! - `update`: snapshot-based whole-object update builders
//! - `client`: the region-scoped `GroundStation` trait
//! - `memory`: an in-process `GroundStation` backend (`test-util` feature)

#![warn(unsafe_code)]

pub mod arn;
pub mod client;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod model;
pub mod update;
pub mod validate;

pub use arn::{parse_config_ref, ConfigRef, PathError};
pub use client::{ClientError, ClientFactory, GroundStation};
pub use update::{ConfigEdit, ConfigUpdate, EditError, ProfileEdit, ProfileUpdate};
pub use validate::{InputError, InputKind};
