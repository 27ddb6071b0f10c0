mod common;

mod auth;
mod kelas;
