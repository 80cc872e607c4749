pub mod dto;
pub mod login;

pub use login::login;
