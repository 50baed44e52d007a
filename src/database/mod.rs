//! This module acts as a central hub for all database-related logic.
//! It declares the specialized submodules so they can be accessed from
//! elsewhere in the application via their full path, e.g.,
//! `database::profiles::get_profile`.

pub mod init;
pub mod profiles;
pub mod settings;
