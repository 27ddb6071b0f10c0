pub mod auth;
pub mod kelas;
pub mod shared;
