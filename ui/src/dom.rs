//! Small DOM lookups with native stubs so shared component code compiles on
//! the server build, where there is no page to inspect.

#[cfg(target_arch = "wasm32")]
pub use self::wasm32::*;

#[cfg(not(target_arch = "wasm32"))]
pub use self::non_wasm32::*;

#[cfg(target_arch = "wasm32")]
mod wasm32 {
    /// A DOM element by id, already cast to its concrete type.
    pub fn get_element_by_id<T: wasm_bindgen::JsCast>(id: &str) -> Option<T> {
        web_sys::window()?
            .document()?
            .get_element_by_id(id)
            .and_then(|element| element.dyn_into::<T>().ok())
    }

    pub fn page_origin() -> Option<String> {
        web_sys::window()?.location().origin().ok()
    }

    pub fn page_hostname() -> Option<String> {
        web_sys::window()?.location().hostname().ok()
    }

    /// Whether the page was opened through the shared gallery link.
    pub fn initial_view_is_gallery() -> bool {
        web_sys::window()
            .and_then(|window| window.location().search().ok())
            .is_some_and(|search| search.contains("view=gallery"))
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod non_wasm32 {
    pub fn page_origin() -> Option<String> {
        None
    }

    pub fn page_hostname() -> Option<String> {
        None
    }

    pub fn initial_view_is_gallery() -> bool {
        false
    }
}
