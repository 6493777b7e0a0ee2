pub mod empty_state;
pub mod gallery_grid;
pub mod pico;
pub mod share_panel;
