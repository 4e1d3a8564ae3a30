//! An in-memory, incrementally updatable TF-IDF search index.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        SearchServer                         │
//! │  stop_words: StopWords        storage: Vec<String>          │
//! │  index: Index                 config: SearchServerConfig    │
//! └─────────────────────────────────────────────────────────────┘
//!        │                 │                  │
//!        ▼                 ▼                  ▼
//! ┌─────────────┐   ┌─────────────┐   ┌───────────────────┐
//! │ analysis::* │   │  index::*   │   │    query::*        │
//! │ tokenizer   │   │  inverted   │   │  ast, parser        │
//! │ stopwords   │   │  forward    │   └───────────────────┘
//! └─────────────┘   └─────────────┘
//!                           │
//!                           ▼
//!                   ┌───────────────┐       ┌───────────────────┐
//!                   │  scoring::*   │       │    parallel::*     │
//!                   │  idf, rank    │◀──────│  accumulator, batch│
//!                   └───────────────┘       └───────────────────┘
//! ```
//!
//! `SearchServer` (in [`search::server`]) is the entry point: documents go
//! in through `add_document`, queries come out through
//! `find_top_documents` and `match_document`. Everything else in this
//! crate exists to support those three operations.

pub mod analysis;
pub mod core;
pub mod index;
pub mod parallel;
pub mod query;
pub mod scoring;
pub mod search;

pub use core::config::SearchServerConfig;
pub use core::error::{Error, ErrorKind, Result};
pub use core::types::{Document, DocumentStatus};
pub use search::server::{Policy, SearchServer};
