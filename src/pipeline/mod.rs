//! Cleanup stages for converter-generated Markdown.
//!
//! Each submodule implements exactly one transformation step and holds no
//! state beyond a single run, so every stage is independently testable.
//!
//! ## Data Flow
//!
//! ```text
//! lines ──▶ boilerplate ──▶ spacing ──▶ table ──▶ images ──▶ text
//!           (banner drop)   (blanks)    (reflow)  (captions)
//! ```
//!
//! 1. [`classify`]   : blank / heading / table-row predicates shared by all stages
//! 2. [`boilerplate`]: drop converter attribution banners and the blanks after them
//! 3. [`spacing`]    : one blank line around headings, collapse blank runs, tabs
//! 4. [`table`]      : align consecutive pipe-table rows into padded columns
//! 5. [`images`]     : replace image alt text with a fixed caption
//! 6. [`postprocess`]: chain the stages above over a whole document
//!
//! [`input`] sits beside the chain: it decides whether a path needs the
//! external converter at all.

pub mod boilerplate;
pub mod classify;
pub mod images;
pub mod input;
pub mod postprocess;
pub mod spacing;
pub mod table;
