#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]
pub mod configs;
pub mod downloads;
pub mod instance;
pub mod repository;

pub mod error;

pub mod fs;
pub mod game_paths;
pub mod state;
pub mod store;

pub mod consts;

pub use consts::*;
pub use error::{Error, Result};
pub use instance::{
    launch::{Auth, Credentials, LaunchOptions, LaunchSpec},
    LaunchReport, Launcher,
};

pub use uuid::Uuid;
