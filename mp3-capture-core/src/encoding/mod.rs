pub mod codec;
pub mod lame;
pub mod stream_encoder;
