pub mod csv_export;
pub mod digest;
pub mod mail;

pub use csv_export::export_csv;
pub use digest::render_digest;
pub use mail::send_digest;
