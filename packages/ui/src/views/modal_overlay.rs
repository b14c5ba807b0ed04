use dioxus::prelude::*;

/// A full-screen overlay that centers a titled dialog card.
/// Clicking the backdrop or pressing Escape triggers `on_close`.
#[component]
pub fn ModalOverlay(title: String, on_close: EventHandler<()>, children: Element) -> Element {
    rsx! {
        div {
            class: "modal-backdrop",
            tabindex: "-1",
            onclick: move |_| on_close.call(()),
            onkeydown: move |evt: Event<KeyboardData>| {
                if evt.key() == Key::Escape {
                    on_close.call(());
                }
            },
            div {
                class: "modal-card",
                role: "dialog",
                aria_modal: "true",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                h2 { class: "modal-title", "{title}" }
                {children}
            }
        }
    }
}
