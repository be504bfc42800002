//! **textkit** - Safe batch operations on text files
//!
//! Encoding-aware loading (UTF-8, UTF-8 BOM, UTF-16, legacy code pages),
//! newline normalization, atomic writes with a one-level `.bak` undo, and the
//! analysis/search/replace operations built on top of them.

/// Command-line interface with clap integration
pub mod cli;

/// Shell completion generation
pub mod completion;

/// Domain error taxonomy
pub mod error;

/// Interactive numbered menu
pub mod menu;

/// Text operations - each loads through the smart reader and writes only
/// through the safe writer
pub mod core {
    /// Line/word/character counts and word frequency ranking
    pub mod analyze;

    /// Full read, numbered listing, head and tail
    pub mod display;

    /// Write and append user-typed content
    pub mod edit;

    /// Whole-word find-and-replace with backup
    pub mod replace;

    /// Line reversal into a derived file
    pub mod reverse;

    /// Whole-word and advanced (regex/context) search
    pub mod search;
    pub use search::{Matcher, Query, SearchOptions};

    /// Restore from `.bak`
    pub mod undo;
    pub use undo::undo_last_write;
}

/// Infrastructure - encoding, loading, line views, safe writes, config
pub mod infra {
    /// Configuration management with TOML support
    pub mod config;
    pub use config::{Config, load_config};

    /// BOM sniffing and legacy fallback classification
    pub mod encoding;
    pub use encoding::{DetectedEncoding, detect};

    /// Smart reader producing newline-normalized text
    pub mod io;
    pub use io::{EncodedText, LoadOptions, read_text_smart};

    /// Raw segment and logical line views
    pub mod lines;
    pub use lines::LineSequence;

    /// Staged temp-file writes, atomic rename and backup rotation
    pub mod write;
    pub use write::{StagedWrite, WriteOptions, safe_write, write_atomic};
}

// Strategic re-exports for clean CLI interface
pub use cli::{AppContext, Cli, Commands};
pub use error::TextError;
pub use infra::{EncodedText, LoadOptions, WriteOptions, read_text_smart, safe_write};
