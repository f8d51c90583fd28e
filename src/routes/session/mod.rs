mod handler;
mod model;

pub use handler::{home, login, logout, refresh};
pub use model::{LoginRequest, session_cookie};
