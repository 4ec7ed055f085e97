pub mod ppm;

pub use ppm::{read_ppm, read_ppm_header, PpmHeader};
