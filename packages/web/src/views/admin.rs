//! Admin area. Everything below [`AdminLayout`] renders only after
//! `requires_role(Admin)` allows it.

use api::{Newspapers, Publications, Seminars, Services};
use dioxus::prelude::*;
use store::Role;
use ui::crud::{filter_param, ManagerTable};
use ui::views::{Dashboard, NewspaperForm, PublicationForm, ReportsTriage, SeminarForm, ServiceForm};
use ui::{requires_role, track_page_view, use_auth, use_config, AdminShell, GuardOutcome};

use crate::Route;

#[component]
pub fn AdminLayout() -> Element {
    let auth_state = use_auth();
    let config = use_config();
    let route = use_route::<Route>();
    let nav = use_navigator();
    let requested = route.to_string();

    let tracking = config.clone();
    let viewed = requested.clone();
    use_effect(use_reactive!(|(viewed,)| track_page_view(&tracking, &viewed)));

    let outcome = requires_role(&auth_state.read(), Role::Admin, &requested);
    match outcome {
        GuardOutcome::Allowed => rsx! {
            AdminShell {
                current_path: requested,
                title: config.app.title.clone(),
                on_navigate: move |path: String| {
                    if let Some(route) = Route::from_path(&path) {
                        nav.push(route);
                    }
                },
                Outlet::<Route> {}
            }
        },
        GuardOutcome::Pending => rsx! {
            div { class: "page-loading", "Loading..." }
        },
        GuardOutcome::RedirectTo(target) => {
            tracing::info!("Admin area requires sign-in; redirecting to {target}");
            let route = Route::from_path(&target).unwrap_or(Route::Login {
                redirect: String::new(),
            });
            nav.replace(route);
            rsx! {}
        }
    }
}

#[component]
pub fn AdminDashboard() -> Element {
    let nav = use_navigator();
    rsx! {
        Dashboard {
            on_navigate: move |path: String| {
                if let Some(route) = Route::from_path(&path) {
                    nav.push(route);
                }
            },
        }
    }
}

#[component]
pub fn AdminPublications(category: String) -> Element {
    let nav = use_navigator();
    rsx! {
        ManagerTable::<Publications> {
            resource: Publications,
            initial_category: filter_param(&category),
            on_create: move |_| {
                nav.push(Route::AdminPublicationNew {});
            },
            on_edit: move |id: i64| {
                nav.push(Route::AdminPublicationEdit { id });
            },
        }
    }
}

#[component]
pub fn AdminPublicationNew() -> Element {
    let nav = use_navigator();
    rsx! {
        PublicationForm {
            id: None,
            on_done: move |_| {
                nav.push(Route::AdminPublications { category: String::new() });
            },
        }
    }
}

#[component]
pub fn AdminPublicationEdit(id: i64) -> Element {
    let nav = use_navigator();
    rsx! {
        PublicationForm {
            id: Some(id),
            on_done: move |_| {
                nav.push(Route::AdminPublications { category: String::new() });
            },
        }
    }
}

#[component]
pub fn AdminServices(category: String) -> Element {
    let nav = use_navigator();
    rsx! {
        ManagerTable::<Services> {
            resource: Services,
            initial_category: filter_param(&category),
            on_create: move |_| {
                nav.push(Route::AdminServiceNew {});
            },
            on_edit: move |id: i64| {
                nav.push(Route::AdminServiceEdit { id });
            },
        }
    }
}

#[component]
pub fn AdminServiceNew() -> Element {
    let nav = use_navigator();
    rsx! {
        ServiceForm {
            id: None,
            on_done: move |_| {
                nav.push(Route::AdminServices { category: String::new() });
            },
        }
    }
}

#[component]
pub fn AdminServiceEdit(id: i64) -> Element {
    let nav = use_navigator();
    rsx! {
        ServiceForm {
            id: Some(id),
            on_done: move |_| {
                nav.push(Route::AdminServices { category: String::new() });
            },
        }
    }
}

#[component]
pub fn AdminSeminars(category: String) -> Element {
    let nav = use_navigator();
    rsx! {
        ManagerTable::<Seminars> {
            resource: Seminars,
            initial_category: filter_param(&category),
            on_create: move |_| {
                nav.push(Route::AdminSeminarNew {});
            },
            on_edit: move |id: i64| {
                nav.push(Route::AdminSeminarEdit { id });
            },
        }
    }
}

#[component]
pub fn AdminSeminarNew() -> Element {
    let nav = use_navigator();
    rsx! {
        SeminarForm {
            id: None,
            on_done: move |_| {
                nav.push(Route::AdminSeminars { category: String::new() });
            },
        }
    }
}

#[component]
pub fn AdminSeminarEdit(id: i64) -> Element {
    let nav = use_navigator();
    rsx! {
        SeminarForm {
            id: Some(id),
            on_done: move |_| {
                nav.push(Route::AdminSeminars { category: String::new() });
            },
        }
    }
}

#[component]
pub fn AdminNewspapers(category: String) -> Element {
    let nav = use_navigator();
    rsx! {
        ManagerTable::<Newspapers> {
            resource: Newspapers,
            initial_category: filter_param(&category),
            on_create: move |_| {
                nav.push(Route::AdminNewspaperNew {});
            },
            on_edit: move |id: i64| {
                nav.push(Route::AdminNewspaperEdit { id });
            },
        }
    }
}

#[component]
pub fn AdminNewspaperNew() -> Element {
    let nav = use_navigator();
    rsx! {
        NewspaperForm {
            id: None,
            on_done: move |_| {
                nav.push(Route::AdminNewspapers { category: String::new() });
            },
        }
    }
}

#[component]
pub fn AdminNewspaperEdit(id: i64) -> Element {
    let nav = use_navigator();
    rsx! {
        NewspaperForm {
            id: Some(id),
            on_done: move |_| {
                nav.push(Route::AdminNewspapers { category: String::new() });
            },
        }
    }
}

#[component]
pub fn AdminReports(status: String) -> Element {
    rsx! {
        ReportsTriage { initial_status: filter_param(&status) }
    }
}
