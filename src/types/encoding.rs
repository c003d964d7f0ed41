//! The closed registry of sample encodings the decoder dispatch understands.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::FissuresError;

/// A supported compression format, keyed by its Fissures `EncodingFormat` code.
///
/// Adding a codec means adding a variant here and a handler in
/// `pipeline::decoder`; unknown codes never fall through silently.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    Steim1,
    Steim2,
}

impl Encoding {
    pub const STEIM1_CODE: i32 = 10;
    pub const STEIM2_CODE: i32 = 11;

    pub fn code(&self) -> i32 {
        match self {
            Encoding::Steim1 => Self::STEIM1_CODE,
            Encoding::Steim2 => Self::STEIM2_CODE,
        }
    }
}

impl TryFrom<i32> for Encoding {
    type Error = FissuresError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            Self::STEIM1_CODE => Ok(Encoding::Steim1),
            Self::STEIM2_CODE => Ok(Encoding::Steim2),
            other => Err(FissuresError::UnsupportedCodec(other)),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Steim1 => write!(f, "STEIM1"),
            Encoding::Steim2 => write!(f, "STEIM2"),
        }
    }
}
