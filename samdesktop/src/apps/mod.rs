//! Built-in window contents

pub mod finder;
pub mod trash;

pub use finder::FinderView;
pub use trash::show_trash;
