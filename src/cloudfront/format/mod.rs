//! CloudFront log layout parsing.
//!
//! ```text
//! ┌──────────────────────┐
//! │  #Version line       │ ← header::extract()
//! │  #Fields line        │
//! ├──────────────────────┤
//! │  data line           │ ← lines::next_record()
//! │  data line           │
//! │  ...                 │
//! └──────────────────────┘
//! ```

pub mod header;
pub mod lines;
