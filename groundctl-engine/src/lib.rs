//! # groundctl engine
//!
//! The interactive half of groundctl: the menu state machine, the profile
//! viewer, the update flows and the prompt abstraction they share.
//!
//! ```text
//! Console::run
//!   ├─ menu     top menu, region and profile selection
//!   ├─ view     profile, edge configs, endpoint group
//!   └─ edit     one validated field, one whole-object update
//! ```

#![warn(unsafe_code)]

pub mod display;
pub mod edit;
pub mod error;
pub mod menu;
pub mod prompt;
mod view;

pub use edit::{find_edge_config, EditChoice};
pub use error::EngineError;
pub use menu::{profile_row, Console, Task};
pub use prompt::{DialoguerPrompter, PromptError, Prompter};
#[cfg(any(test, feature = "test-util"))]
pub use prompt::ScriptedPrompter;
