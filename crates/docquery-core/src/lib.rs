//! Client-side coordination core for the docquery document Q&A service.
//!
//! Three coordinators, each a pure owner of one piece of state plus a
//! well-defined remote call through the [`DocumentBackend`] trait:
//!
//! - [`DocumentRegistry`](document::DocumentRegistry) — the set of known
//!   documents and the active selection.
//! - [`UploadCoordinator`](upload::UploadCoordinator) — pending file batch
//!   and drive link, submitted to the backend and absorbed by the registry.
//! - [`ConversationSession`](conversation::ConversationSession) — the
//!   per-document question/answer history and its lifecycle phases.
//!
//! [`Workbench`](workbench::Workbench) wires the three together the way a
//! UI shell consumes them. The HTTP implementation of [`DocumentBackend`]
//! lives in the `docquery-api` crate.

pub mod backend;
pub mod conversation;
pub mod document;
pub mod error;
pub mod upload;
pub mod workbench;

pub use backend::{AskReply, DocumentBackend};
pub use error::{DocqueryError, Result};
pub use workbench::Workbench;
