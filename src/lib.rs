//! devflow: vote and save toggles for a community Q&A site.
//!
//! The crate is layered bottom-up:
//!
//! - [`read_model`]: versioned document storage with an atomic conditional
//!   batch write (`ReadModelStore::apply`).
//! - [`commit_builder`]: chains guarded puts/deletes into one batch.
//! - [`domain`]: targets, vote records, save records and the vote transition table.
//! - [`toggle`]: the toggle service deciding transitions from persisted state.
//! - [`microsvc`] + [`handlers`]: command dispatch and the HTTP surface.
//! - [`client`] + [`view`]: the client side, with optimistic confirm-or-rollback views.

pub mod client;
pub mod commit_builder;
pub mod config;
pub mod domain;
pub mod handlers;
pub mod microsvc;
pub mod read_model;
pub mod toggle;
pub mod view;

pub use commit_builder::{CommitBuilder, CommitBuilderExt};
pub use config::Config;
pub use domain::{
    SaveRecord, Tally, Target, TargetKind, Transition, VoteDirection, VoteRecord, VoteSnapshot,
    VoteState,
};
pub use read_model::{
    Expect, InMemoryReadModelStore, ReadModel, ReadModelError, ReadModelRepository,
    ReadModelStore, ReadModelsExt, Versioned, WriteBatch, WriteOp,
};
pub use toggle::{SaveStatus, ToggleError, ToggleService, VoteStatus};

// Re-export the derive so `#[derive(devflow::ReadModel)]` works downstream.
pub use devflow_macros::ReadModel;
