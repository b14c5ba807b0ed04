//! # Admin shell
//!
//! Frame around every admin screen: a collapsible sidebar with the menu tree, a
//! top bar with the signed-in user, and a mobile drawer. [`ShellState`] holds
//! the transient toggles; which menu entry is highlighted is derived from the
//! current path on every render and never stored.

use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{
    FaAnglesLeft, FaAnglesRight, FaBars, FaBookOpen, FaChalkboardUser, FaFlag, FaFolderOpen,
    FaGaugeHigh, FaHandshake, FaNewspaper, FaXmark,
};
use dioxus_free_icons::Icon;

use crate::auth::{use_auth, LogoutButton};
use crate::guard::LOGIN_ROUTE;

const SHELL_CSS: Asset = asset!("/assets/styling/shell.css");
const VIEWS_CSS: Asset = asset!("/src/views/views.css");

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShellState {
    pub sidebar_collapsed: bool,
    pub mobile_menu_open: bool,
}

impl ShellState {
    pub fn toggle_sidebar(&mut self) {
        self.sidebar_collapsed = !self.sidebar_collapsed;
    }

    pub fn toggle_mobile_menu(&mut self) {
        self.mobile_menu_open = !self.mobile_menu_open;
    }

    pub fn close_mobile_menu(&mut self) {
        self.mobile_menu_open = false;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuIcon {
    Dashboard,
    Content,
    Publications,
    Services,
    Seminars,
    Journal,
    Reports,
}

#[derive(Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    /// Empty for groups that only hold children.
    pub path: &'static str,
    pub icon: MenuIcon,
    pub children: &'static [MenuItem],
}

impl MenuItem {
    const fn link(label: &'static str, path: &'static str, icon: MenuIcon) -> Self {
        Self {
            label,
            path,
            icon,
            children: &[],
        }
    }

    pub fn is_group(&self) -> bool {
        !self.children.is_empty()
    }
}

pub static ADMIN_MENU: &[MenuItem] = &[
    MenuItem::link("Dashboard", "/admin", MenuIcon::Dashboard),
    MenuItem {
        label: "Content",
        path: "",
        icon: MenuIcon::Content,
        children: &[
            MenuItem::link("Publications", "/admin/publications", MenuIcon::Publications),
            MenuItem::link("Services", "/admin/services", MenuIcon::Services),
            MenuItem::link("Seminars", "/admin/seminars", MenuIcon::Seminars),
            MenuItem::link("Journal", "/admin/newspapers", MenuIcon::Journal),
        ],
    },
    MenuItem::link("Reports", "/admin/reports", MenuIcon::Reports),
];

/// Whether `prefix` covers `path` on segment boundaries.
fn covers(prefix: &str, path: &str) -> bool {
    !prefix.is_empty()
        && (path == prefix
            || path
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('/')))
}

fn strip_query(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    path[..end].trim_end_matches('/')
}

/// The menu entries leading to the highlighted item, outermost first.
///
/// The highlighted item is the one with the longest path covering `path`;
/// `/admin/seminars/4/edit` lands on Seminars rather than Dashboard.
pub fn active_trail(path: &str) -> Vec<&'static MenuItem> {
    fn walk(
        items: &'static [MenuItem],
        path: &str,
        trail: &mut Vec<&'static MenuItem>,
        best: &mut Vec<&'static MenuItem>,
    ) {
        for item in items {
            trail.push(item);
            if covers(item.path, path)
                && best.last().map_or(true, |b| item.path.len() > b.path.len())
            {
                *best = trail.clone();
            }
            walk(item.children, path, trail, best);
            trail.pop();
        }
    }

    let path = match strip_query(path) {
        "" => "/",
        p => p,
    };
    let mut best = Vec::new();
    walk(ADMIN_MENU, path, &mut Vec::new(), &mut best);
    best
}

pub fn active_menu(path: &str) -> Option<&'static MenuItem> {
    active_trail(path).last().copied()
}

#[component]
fn MenuGlyph(icon: MenuIcon) -> Element {
    match icon {
        MenuIcon::Dashboard => rsx! { Icon { icon: FaGaugeHigh, width: 16, height: 16 } },
        MenuIcon::Content => rsx! { Icon { icon: FaFolderOpen, width: 16, height: 16 } },
        MenuIcon::Publications => rsx! { Icon { icon: FaBookOpen, width: 16, height: 16 } },
        MenuIcon::Services => rsx! { Icon { icon: FaHandshake, width: 16, height: 16 } },
        MenuIcon::Seminars => rsx! { Icon { icon: FaChalkboardUser, width: 16, height: 16 } },
        MenuIcon::Journal => rsx! { Icon { icon: FaNewspaper, width: 16, height: 16 } },
        MenuIcon::Reports => rsx! { Icon { icon: FaFlag, width: 16, height: 16 } },
    }
}

#[component]
fn MenuEntry(
    item: &'static MenuItem,
    trail: Vec<&'static MenuItem>,
    collapsed: bool,
    on_select: EventHandler<String>,
) -> Element {
    let in_trail = trail.iter().any(|t| std::ptr::eq(*t, item));
    let active = in_trail && trail.last().is_some_and(|t| std::ptr::eq(*t, item));

    if item.is_group() {
        return rsx! {
            div {
                class: if in_trail { "shell-menu-group open" } else { "shell-menu-group" },
                div {
                    class: "shell-menu-label",
                    title: "{item.label}",
                    MenuGlyph { icon: item.icon }
                    if !collapsed {
                        span { "{item.label}" }
                    }
                }
                for child in item.children.iter() {
                    MenuEntry {
                        key: "{child.path}",
                        item: child,
                        trail: trail.clone(),
                        collapsed,
                        on_select,
                    }
                }
            }
        };
    }

    let path = item.path;
    rsx! {
        a {
            class: if active { "shell-menu-item active" } else { "shell-menu-item" },
            href: "{path}",
            title: "{item.label}",
            onclick: move |evt: Event<MouseData>| {
                evt.prevent_default();
                on_select.call(path.to_string());
            },
            MenuGlyph { icon: item.icon }
            if !collapsed {
                span { "{item.label}" }
            }
        }
    }
}

/// Frame for the admin area. `on_navigate` receives the target path of every
/// menu click; the mobile drawer closes before it fires.
#[component]
pub fn AdminShell(
    current_path: String,
    title: String,
    on_navigate: EventHandler<String>,
    children: Element,
) -> Element {
    let mut shell = use_signal(ShellState::default);
    let auth_state = use_auth();
    let trail = active_trail(&current_path);
    let state = shell();
    let section = trail.last().map(|item| item.label).unwrap_or_default();

    let username = auth_state
        .read()
        .user()
        .map(|u| u.username.clone())
        .unwrap_or_default();

    let on_select = move |path: String| {
        shell.write().close_mobile_menu();
        on_navigate.call(path);
    };

    let mut root_class = String::from("shell");
    if state.sidebar_collapsed {
        root_class.push_str(" collapsed");
    }
    if state.mobile_menu_open {
        root_class.push_str(" mobile-open");
    }

    rsx! {
        document::Stylesheet { href: VIEWS_CSS }
        document::Stylesheet { href: SHELL_CSS }

        div {
            class: "{root_class}",

            if state.mobile_menu_open {
                div {
                    class: "shell-backdrop",
                    onclick: move |_| shell.write().close_mobile_menu(),
                }
            }

            nav {
                class: "shell-sidebar",
                div {
                    class: "shell-brand",
                    if !state.sidebar_collapsed {
                        span { "{title}" }
                    }
                    button {
                        class: "shell-collapse",
                        title: if state.sidebar_collapsed { "Expand sidebar" } else { "Collapse sidebar" },
                        onclick: move |_| shell.write().toggle_sidebar(),
                        if state.sidebar_collapsed {
                            Icon { icon: FaAnglesRight, width: 14, height: 14 }
                        } else {
                            Icon { icon: FaAnglesLeft, width: 14, height: 14 }
                        }
                    }
                }
                div {
                    class: "shell-menu",
                    for item in ADMIN_MENU.iter() {
                        MenuEntry {
                            key: "{item.label}",
                            item,
                            trail: trail.clone(),
                            collapsed: state.sidebar_collapsed,
                            on_select,
                        }
                    }
                }
            }

            div {
                class: "shell-main",
                header {
                    class: "shell-topbar",
                    button {
                        class: "shell-mobile-toggle",
                        title: "Menu",
                        onclick: move |_| shell.write().toggle_mobile_menu(),
                        if state.mobile_menu_open {
                            Icon { icon: FaXmark, width: 18, height: 18 }
                        } else {
                            Icon { icon: FaBars, width: 18, height: 18 }
                        }
                    }
                    span {
                        class: "shell-section",
                        "{section}"
                    }
                    div {
                        class: "shell-user",
                        span { "{username}" }
                        LogoutButton {
                            class: "shell-logout".to_string(),
                            on_logged_out: move |_| on_navigate.call(LOGIN_ROUTE.to_string()),
                        }
                    }
                }
                main {
                    class: "shell-content",
                    {children}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(path: &str) -> Vec<&'static str> {
        active_trail(path).iter().map(|item| item.label).collect()
    }

    #[test]
    fn test_toggles() {
        let mut state = ShellState::default();
        state.toggle_sidebar();
        state.toggle_mobile_menu();
        assert!(state.sidebar_collapsed && state.mobile_menu_open);
        state.close_mobile_menu();
        state.close_mobile_menu();
        assert!(!state.mobile_menu_open);
        assert!(state.sidebar_collapsed);
    }

    #[test]
    fn test_dashboard_only_for_exact_or_unmatched_children() {
        assert_eq!(labels("/admin"), ["Dashboard"]);
        assert_eq!(labels("/admin/"), ["Dashboard"]);
        assert_eq!(labels("/admin/settings"), ["Dashboard"]);
    }

    #[test]
    fn test_nested_item_highlights_group() {
        assert_eq!(labels("/admin/seminars/4/edit"), ["Content", "Seminars"]);
        assert_eq!(labels("/admin/newspapers/new"), ["Content", "Journal"]);
        assert_eq!(labels("/admin/reports?status=new"), ["Reports"]);
    }

    #[test]
    fn test_segment_boundaries() {
        // "/admin/publicationsx" must not match "/admin/publications".
        assert_eq!(labels("/admin/publicationsx"), ["Dashboard"]);
        assert!(active_menu("/administrator").is_none());
        assert!(active_menu("/").is_none());
    }

    #[test]
    fn test_every_link_is_its_own_active_item() {
        fn links(items: &'static [MenuItem], out: &mut Vec<&'static MenuItem>) {
            for item in items {
                if item.is_group() {
                    links(item.children, out);
                } else {
                    out.push(item);
                }
            }
        }
        let mut all = Vec::new();
        links(ADMIN_MENU, &mut all);
        assert_eq!(all.len(), 6);
        for item in all {
            assert_eq!(active_menu(item.path), Some(item));
        }
    }
}
