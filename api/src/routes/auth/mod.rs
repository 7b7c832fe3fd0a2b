//! Account lifecycle endpoints: registration, login, logout.

pub mod login;
pub mod logout;
pub mod register;

pub use login::login;
pub use logout::logout;
pub use register::register;
