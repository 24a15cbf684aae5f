pub mod get_session;
pub mod login_user;
pub mod logout_user;

pub use get_session::{get_session_handler, SessionInfo};
pub use login_user::{login_user_handler, LoginRequestDto, LoginResponse, LoginUserInfo};
pub use logout_user::{logout_user_handler, LogoutResponseBody};
