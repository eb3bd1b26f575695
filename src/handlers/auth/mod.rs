mod login;
mod register;
mod whoami;

pub use login::login_post;
pub use register::register_post;
pub use whoami::whoami_get;
