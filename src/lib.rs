#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::cast_precision_loss,
    clippy::return_self_not_must_use
)]

pub mod choreography;
pub mod cinematic;
pub mod config;
pub mod error;
pub mod gate;
pub mod gift;
pub mod runtime;
pub mod script;
pub mod session;
pub mod ui;

pub use config::{Config, RewardVariant};
pub use error::{HeartlockError, Result};
pub use runtime::ExperienceRuntime;
pub use session::{Screen, Session};
