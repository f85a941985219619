//! Site navigation menu

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub path: &'static str,
    pub name: &'static str,
}

/// Navigation entries, in display order
pub const MENU: [MenuItem; 3] = [
    MenuItem {
        path: "/",
        name: "All Products",
    },
    MenuItem {
        path: "/pages/",
        name: "Pages",
    },
    MenuItem {
        path: "/search/",
        name: "Search",
    },
];

/// Menu path to highlight for a request path
///
/// An item is active when its path equals the request path, or equals it
/// once the item's trailing slash is dropped (`/pages` activates `/pages/`).
pub fn active_menu_item(request_path: &str) -> Option<&'static str> {
    MENU.iter()
        .rev()
        .find(|item| {
            item.path == request_path
                || item
                    .path
                    .strip_suffix('/')
                    .is_some_and(|p| p == request_path)
        })
        .map(|item| item.path)
}
