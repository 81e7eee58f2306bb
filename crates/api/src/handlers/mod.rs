pub mod fwip;
pub mod moderation;
pub mod services;
pub mod submissions;
pub mod titles;
pub mod users;
