//! # Folio
//!
//! A self-contained content layer for a personal portfolio page. The site's
//! structured content — profile image, biography, career timeline, and a
//! gallery of works — lives in one document, edited through a
//! passphrase-gated session and persisted locally as a single snapshot.
//!
//! # Architecture: Store, Session, Resolvers
//!
//! ```text
//! ContentStore ──(copy on open)──▶ EditSession ──(commit)──▶ ContentStore
//!      │                               ▲                          │
//!      ▼                               │ (generation-checked)     ▼
//! presentation layer            image ingestion             snapshot file
//! ```
//!
//! The [`store`] owns the canonical [`types::SiteData`] and its persisted
//! snapshot. Editing never touches it directly: a [`session`] opens on an
//! independent copy, accumulates mutations, and either commits the final
//! value back or discards it. Thumbnail resolution ([`thumbnail`]) is a pure
//! function the presentation layer calls against committed or in-progress
//! data; it depends on nothing here.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | The content document (`SiteData`, career, works) and starter content |
//! | [`store`] | Canonical data owner — snapshot load/commit/reset lifecycle |
//! | [`session`] | Exclusively-owned working copy with field mutators and gallery operations |
//! | [`auth`] | Passphrase gate state machine for the edit workflow |
//! | [`ingest`] | Uploaded bytes → embedded `data:` encoding, with stale-completion discard |
//! | [`thumbnail`] | Pure display-image resolution for work items |
//! | [`config`] | Optional `folio.toml` (snapshot location) |
//! | [`output`] | CLI rendering of content and diagnostics |
//!
//! # Design Decisions
//!
//! ## Ownership Instead of Copy-on-Write Spreads
//!
//! Every mutation goes through `&mut` methods on a session that exclusively
//! owns its working copy. Nothing else can hold a reference into that data,
//! which gives the same guarantee as rebuilding immutable aggregates on each
//! edit — no other component ever observes a half-edited value — without the
//! rebuild. Closing a session consumes it, so edits after commit or cancel
//! are a compile error, not a runtime check.
//!
//! ## Write-Then-Swap Commits
//!
//! A commit persists the snapshot first (temp file, atomic rename) and only
//! then replaces the in-memory data. Memory and disk can never diverge: a
//! failed write leaves the previous committed state as the visible state,
//! and the session is handed back for retry.
//!
//! ## The Gate Is Cosmetic
//!
//! The edit passphrase is compiled into the binary and compared verbatim.
//! That keeps casual visitors out of edit mode and nothing more — see
//! [`auth`] for the explicit limitation.

pub mod auth;
pub mod config;
pub mod ingest;
pub mod output;
pub mod session;
pub mod store;
pub mod thumbnail;
pub mod types;
