// handlers/public/auth/mod.rs - Public account handlers
//
// Session acquisition and release, and self-registration. None of these
// require a session.

pub mod login; // POST /user/sign-in
pub mod register; // POST /user/register
pub mod session; // POST /user/sign-out
pub mod user; // GET /user/list-teacher

pub use login::sign_in;
pub use register::register;
pub use session::sign_out;
pub use user::list_teacher;
