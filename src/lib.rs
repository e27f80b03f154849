//! Sidecar core for the campus CRM desktop shell.
//!
//! The binary speaks line-delimited JSON over stdio; everything else in here
//! is the machinery behind that loop. `ipc` routes requests, `api` talks to
//! the campus REST backend, `view` turns domain records into render-ready
//! payloads, and `session` keeps the sign-in state on disk between runs.

pub mod api;
pub mod config;
pub mod error;
pub mod ipc;
pub mod model;
pub mod roles;
pub mod session;
pub mod validate;
pub mod view;
