pub mod events;
pub mod health;
pub mod oauth;
pub mod users;

pub use events::*;
pub use health::*;
pub use oauth::*;
pub use users::*;
