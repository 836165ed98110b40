mod seal;

pub use seal::{AnswerSealer, CryptoError, SealKey};
