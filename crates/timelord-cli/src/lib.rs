//! timelord-cli
//! ============
//!
//! Command-line front end for `timelord-core`.
//!
//! This crate primarily provides a binary (`timelord`). The library target
//! only exists so docs.rs renders this overview.
//!
//! Usage
//! -----
//!
//! ```text
//! timelord toronto
//! timelord "new york, london, zurich"
//! timelord --data-dir /opt/timelord --stable-order paris, tokyo
//! ```
//!
//! The output is a single JSON document on stdout:
//!
//! ```text
//! {"items":[{"uid":"6167865","title":"Toronto — 7:00 AM EST",
//!   "subtitle":"Monday, January 15 | Canada | +1 | CAD | YYZ,YTZ,YKZ",
//!   "arg":"Toronto","autocomplete":"Toronto",
//!   "icon":{"path":"./flags/canada.png"}}]}
//! ```
//!
//! Terms that match no city are left out. Logs go to stderr and are
//! controlled by `TIMELORD_LOG` (an `EnvFilter` directive, default `warn`).
//!
#![cfg_attr(docsrs, feature(doc_cfg))]
