use dioxus::prelude::*;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Top bar of the public site. Links are passed in as children so each
/// platform can use its own router.
#[component]
pub fn Navbar(title: String, children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        header {
            class: "navbar",
            span { class: "navbar-brand", "{title}" }
            nav {
                class: "navbar-links",
                {children}
            }
        }
    }
}
