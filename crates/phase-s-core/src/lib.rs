pub mod classify;
pub mod consts;
pub mod error;
pub mod frame;
pub mod io;
pub mod pipeline;
pub mod quality;
pub mod report;
pub mod sampling;
pub mod summary;
