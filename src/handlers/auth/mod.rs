mod signin;
mod signup;
pub mod types;

pub use signin::signin_post;
pub use signup::signup_post;
