pub mod auth;
pub mod kelas;
