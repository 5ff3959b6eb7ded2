//! Client core for the Smart Career job-seeker app.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything a front end needs to talk to the Smart Career REST backend:
//! a persisted auth session, the API client with its two interceptors, the
//! route guard, form validation, and the job-board helpers. The terminal
//! shell in `cli/` is one such front end.
//!
//! DESIGN
//! ======
//! Side effects that belong to the host (where the session lives, how a
//! redirect is performed) sit behind the `KeyValueStorage` and `Navigator`
//! traits so the same core runs against a file, memory, or a test recorder.

pub mod api;
pub mod auth;
pub mod config;
pub mod forms;
pub mod jobs;
pub mod navigation;
pub mod routes;
pub mod session;
pub mod storage;
pub mod validation;
