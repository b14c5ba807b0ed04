use dioxus::prelude::*;

use ui::{track_page_view, use_auth, use_config, Navbar, NewsletterSignup};

use crate::Route;

/// Frame for every public page: top navigation, content, footer.
#[component]
pub fn PublicLayout() -> Element {
    let config = use_config();
    let auth_state = use_auth();
    let route = use_route::<Route>();
    let path = route.to_string();

    let tracking = config.clone();
    use_effect(use_reactive!(|(path,)| track_page_view(&tracking, &path)));

    let signed_in = auth_state.read().is_authenticated();
    let is_admin = auth_state.read().user().is_some_and(|user| user.is_admin());

    rsx! {
        Navbar {
            title: config.app.title.clone(),
            Link { to: Route::Home {}, "Home" }
            Link { to: Route::PublicationList {}, "Publications" }
            Link { to: Route::ServiceList {}, "Services" }
            Link { to: Route::SeminarList {}, "Seminars" }
            Link { to: Route::JournalList {}, "Journal" }
            Link { to: Route::Whistleblower {}, "Report a concern" }
            if is_admin {
                Link { to: Route::AdminDashboard {}, "Admin" }
            } else if !signed_in {
                Link { to: Route::Login { redirect: String::new() }, "Sign in" }
            }
        }
        main {
            class: "page",
            Outlet::<Route> {}
        }
        footer {
            class: "page footer",
            NewsletterSignup {}
            p { "© {config.app.title}" }
        }
    }
}

/// Unknown paths go back to the home page.
#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let nav = use_navigator();
    tracing::debug!("No route for /{}", segments.join("/"));
    nav.replace(Route::Home {});
    rsx! {}
}
