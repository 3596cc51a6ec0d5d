mod connection;
mod decoder;
mod encoder;
mod options;

pub mod commands;

pub use commands::{UciInput, UciOutput, NULL_MOVE};
pub use connection::UciConnection;
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use options::SpinOption;
