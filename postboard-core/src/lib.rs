//! postboard-core: domain types shared by the postboard server and CLI
//!
//! Request input is validated into the types in [`models`] before it reaches
//! the store. Configuration lives in [`config`].

pub mod config;
pub mod display;
pub mod error;
pub mod models;

pub use config::PostboardConfig;
pub use error::{CoreError, Result};
pub use models::{
    Email, ImageFile, NewPost, NewUser, PostChanges, PostContent, PostTitle, UserChanges,
    Username, ValidationError,
};
