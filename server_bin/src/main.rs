use dioxus::prelude::*;

// The `api` crate must be linked so its server functions register with the
// router that `launch` builds.
use api as _;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    ui::App()
}
