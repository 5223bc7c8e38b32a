pub mod logging;
pub mod recovery;
