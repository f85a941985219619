//! Catalog presentation logic
//!
//! - `pagination` - page-number parsing and page window arithmetic
//! - `menu` - navigation menu and active-item detection

pub mod menu;
pub mod pagination;

pub use menu::{MENU, MenuItem, active_menu_item};
pub use pagination::{PAGE_LINKS_WIDTH, PageWindow, parse_page_param};
