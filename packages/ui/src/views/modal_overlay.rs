use dioxus::prelude::*;

/// A full-screen overlay that centers its children in a modal card.
/// Clicking the backdrop or pressing Escape triggers `on_close`.
#[component]
pub fn ModalOverlay(
    on_close: EventHandler<()>,
    #[props(default = "max-w-md".to_string())] width: String,
    children: Element,
) -> Element {
    rsx! {
        div {
            class: "modal-backdrop fixed inset-0 flex items-center justify-center bg-black/40",
            style: "z-index: 2000",
            tabindex: "-1",
            onmounted: move |evt: MountedEvent| async move {
                // Focus the backdrop so Escape reaches it.
                let _ = evt.data().set_focus(true).await;
            },
            onkeydown: move |evt: KeyboardEvent| {
                if evt.key() == Key::Escape {
                    on_close.call(());
                }
            },
            onclick: move |_| on_close.call(()),
            div {
                class: "modal-card bg-white rounded-lg shadow-lg {width} w-full mx-4",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                {children}
            }
        }
    }
}
