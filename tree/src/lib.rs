//! Family-tree layout core for the genealogy viewer.
//!
//! This crate is compiled to WebAssembly for the browser and linked natively
//! by the `kintree` CLI. It owns everything with algorithmic content: turning
//! the static person dataset into positioned nodes and edges, estimating
//! lifespans, and deriving per-node visual state for a timeline cursor year.
//! The host is responsible only for drawing what it is handed.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`person`] | Dataset and person records with lenient decoding |
//! | [`date`] | Year extraction and date display helpers |
//! | [`lifespan`] | Lifespan estimation and per-person lifeline |
//! | [`layout`] | Generation-banded layout engine and edge routing |
//! | [`timeline`] | Cursor-year visual state and timeline period bars |
//! | [`label`] | Node label text helpers |
//! | [`camera`] | View transform between layout space and the viewport |
//! | [`search`] | Accent-insensitive person search |
//! | [`map`] | Located life events and migration lines at a cursor year |
//! | [`viewer`] | Host-owned viewer context tying the pieces together |
//! | [`wasm`] | `wasm-bindgen` wrapper around [`viewer::ViewerCore`] |
//! | [`consts`] | Shared layout and timeline constants |

pub mod camera;
pub mod consts;
pub mod date;
pub mod label;
pub mod layout;
pub mod lifespan;
pub mod map;
pub mod person;
pub mod search;
pub mod timeline;
pub mod viewer;
pub mod wasm;

pub use date::extract_year;
pub use layout::compute_layout;
pub use lifespan::estimate_lifespan;
pub use timeline::derive_visual_state;
