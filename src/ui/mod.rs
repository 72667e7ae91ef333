//! Terminal user interface.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI frame
//! ```
//!
//! - [`viewmodel`]: Renderable UI state
//! - [`renderer`]: Frame assembly
//! - [`components`]: Header, search bar, list, form, status and footer pieces
//! - [`helpers`]: Cursor positioning and highlighted text
//! - [`theme`]: TOML color schemes and ANSI escape generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_to_string};
pub use theme::Theme;
pub use viewmodel::{DisplayItem, EmptyState, FooterInfo, FormInfo, HeaderInfo, SearchBarInfo, StatusLine, UIViewModel};
