//! # Cram Architecture
//!
//! Cram is a **UI-agnostic note and flashcard library**. This is not a CLI
//! application that happens to have some library code—it's a library that
//! happens to have a CLI client.
//!
//! Two parallel collections exist, one of notes and one of flashcards. They
//! are instances of the same pipeline, generic over the [`model::Record`]
//! trait, and only differ in their text fields (title/content versus
//! question/answer).
//!
//! ## The Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (args.rs, wired by main.rs)                      │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Collection Store (collection.rs)                           │
//! │  - Owns the canonical in-memory Vec of records              │
//! │  - create / update / delete / toggle_pin / replace_all      │
//! │  - Writes the whole collection back after every mutation    │
//! └─────────────────────────────────────────────────────────────┘
//!          │                                      │
//!          ▼                                      ▼
//! ┌──────────────────────────┐    ┌──────────────────────────────┐
//! │  Storage Layer (store/)  │    │  View Projector (view.rs)    │
//! │  - StorageBackend trait  │    │  - Pure: (records, term) →   │
//! │  - FileBackend (prod)    │    │    sorted, filtered sequence │
//! │  - MemoryBackend (tests) │    │  - Recomputed every render   │
//! └──────────────────────────┘    └──────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From [`collection`] inward, code takes regular Rust arguments, returns
//! regular Rust types, never writes to stdout/stderr, and never assumes a
//! terminal. The same core could serve a TUI, a web service, or tests.
//!
//! Storage is deliberately dumb: a key-value seam holding one JSON array
//! per collection. The display order is never persisted—[`view::project`]
//! derives it from scratch on every render, so the stored order stays
//! insertion order and the projection stays a pure function.
//!
//! ## Module Overview
//!
//! - [`model`]: Core data types (`Note`, `Flashcard`, `Draft`) and the
//!   `Record` trait the pipeline is generic over
//! - [`collection`]: The collection store, including pending-edit state
//! - [`store`]: Storage abstraction and implementations
//! - [`view`]: Sorted/filtered projection for display
//! - [`transfer`]: JSON export and import
//! - [`tags`]: Tag normalization rules
//! - [`ident`]: Unique id generation
//! - [`config`]: Persisted preferences
//! - [`editor`]: External editor integration for the binary
//! - [`error`]: Error types

pub mod collection;
pub mod config;
pub mod editor;
pub mod error;
pub mod ident;
pub mod model;
pub mod store;
pub mod tags;
pub mod transfer;
pub mod view;
