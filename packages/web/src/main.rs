use dioxus::prelude::*;

use store::PortalConfig;
use ui::AuthProvider;
use views::{
    AdminDashboard, AdminLayout, AdminNewspaperEdit, AdminNewspaperNew, AdminNewspapers,
    AdminPublicationEdit, AdminPublicationNew, AdminPublications, AdminReports, AdminSeminarEdit,
    AdminSeminarNew, AdminSeminars, AdminServiceEdit, AdminServiceNew, AdminServices, Home,
    JournalList, JournalPage, Login, NotFound, PublicLayout, PublicationList, PublicationPage,
    SeminarList, SeminarPage, ServiceList, ServicePage, Whistleblower,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(PublicLayout)]
        #[route("/")]
        Home {},
        #[route("/publications")]
        PublicationList {},
        #[route("/publications/:id")]
        PublicationPage { id: i64 },
        #[route("/services")]
        ServiceList {},
        #[route("/services/:id")]
        ServicePage { id: i64 },
        #[route("/seminars")]
        SeminarList {},
        #[route("/seminars/:id")]
        SeminarPage { id: i64 },
        #[route("/journal")]
        JournalList {},
        #[route("/journal/:id")]
        JournalPage { id: i64 },
        #[route("/whistleblower")]
        Whistleblower {},
        #[route("/login?:redirect")]
        Login { redirect: String },
    #[end_layout]
    #[nest("/admin")]
        #[layout(AdminLayout)]
            #[route("/")]
            AdminDashboard {},
            #[route("/publications?:category")]
            AdminPublications { category: String },
            #[route("/publications/new")]
            AdminPublicationNew {},
            #[route("/publications/:id/edit")]
            AdminPublicationEdit { id: i64 },
            #[route("/services?:category")]
            AdminServices { category: String },
            #[route("/services/new")]
            AdminServiceNew {},
            #[route("/services/:id/edit")]
            AdminServiceEdit { id: i64 },
            #[route("/seminars?:category")]
            AdminSeminars { category: String },
            #[route("/seminars/new")]
            AdminSeminarNew {},
            #[route("/seminars/:id/edit")]
            AdminSeminarEdit { id: i64 },
            #[route("/newspapers?:category")]
            AdminNewspapers { category: String },
            #[route("/newspapers/new")]
            AdminNewspaperNew {},
            #[route("/newspapers/:id/edit")]
            AdminNewspaperEdit { id: i64 },
            #[route("/reports?:status")]
            AdminReports { status: String },
        #[end_layout]
    #[end_nest]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

impl Route {
    /// Parse a local path (query string included) into a route.
    pub fn from_path(path: &str) -> Option<Route> {
        match path.parse::<Route>() {
            Ok(route) => Some(route),
            Err(e) => {
                tracing::warn!("Unroutable path {path}: {e}");
                None
            }
        }
    }
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_hook(PortalConfig::from_build_env);

    rsx! {
        document::Title { "{config.app.title}" }
        AuthProvider {
            config: config.clone(),
            Router::<Route> {}
        }
    }
}
