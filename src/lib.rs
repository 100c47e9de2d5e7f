//! Icon fonts generated by services like iconfont.cn come as a pile of files nobody reads:
//! a script with every glyph inlined as an SVG `<symbol>`, and a stylesheet mapping class
//! names to private-use codepoints.
//!
//! This crate, `iconfont-lens`, reads those files back and finds where icons are used in
//! source code, so that an editor can show the actual glyph next to `content: "\e600"`,
//! `&#xe600;` or `<Icon name="icon-home" />`.
//!
//! # Quick start
//!
//! ```no_run
//! use iconfont_lens::{AssetSearch, Config, Session, TextDocument};
//!
//! let mut session = Session::new(Config::default(), AssetSearch::default())?;
//! session.activate();
//!
//! let doc = TextDocument::new("file:///app.html", "html", "<i class=\"iconfont\">&#xe600;</i>");
//!
//! for icon in session.document_switched(&doc) {
//!     println!("{} at {:?}", icon.name, icon.range);
//! }
//! # Ok::<(), regex::Error>(())
//! ```
//!
//! # High level design
//!
//! The crate is layered so that hosts can use as much or as little of it as they want.
//! [Session] wires everything together, but each stage is usable on its own:
//!
//! 1.  *Finding the assets*:
//!
//!     The sprite (`iconfont.js`) and stylesheet (`iconfont.css`) are looked for below the
//!     workspace roots, skipping `node_modules`. [AssetSearch] handles this, and also tells
//!     which file watcher events concern those files.
//!
//! 2.  *Loading the registry*:
//!
//!     [parse::load] clears a [GlyphRegistry] and fills it again, sprite first, then the
//!     stylesheet. A stylesheet class is only accepted when the sprite has its glyph, with or
//!     without a prefix like `icon-`. Missing or unreadable files leave their part of the
//!     registry empty and are reported, never fatal.
//!
//! 3.  *Scanning documents*:
//!
//!     [Scanner] finds icon references in a document's text. Stylesheets are searched for
//!     icon class selectors and their `content:` rule, code for `name="..."` props and
//!     `&#x...;` entities. The result of the latest scan of each document lives in a
//!     [CorrelationStore], which answers "which icon is under the cursor".
//!
//! 4.  *Showing and converting icons*:
//!
//!     [render_glyph] draws a glyph into a small SVG data URI, and the [actions] module
//!     builds what the copy and convert commands need.
//!
//! Edits are debounced by a [RescanScheduler]; switching documents and reloading assets
//! rescan right away.

pub mod actions;
mod asset;
mod config;
pub mod parse;
mod registry;
mod render;
mod scan;
mod schedule;
mod search;
mod session;
mod store;

pub use asset::*;
pub use config::*;
pub use registry::*;
pub use render::*;
pub use scan::*;
pub use schedule::*;
pub use search::*;
pub use session::*;
pub use store::*;
