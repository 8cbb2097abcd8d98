// Event handlers split into submodules, one per input mode

mod confirm;
mod form;
mod normal;
mod search;

pub use confirm::handle_confirm_delete_key;
pub use form::handle_form_key;
pub use normal::handle_normal_mode_key;
pub use search::handle_search_mode_key;
