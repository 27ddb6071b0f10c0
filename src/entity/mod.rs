pub mod kategori;
pub mod kelas;
pub mod tutor;
pub mod user;
