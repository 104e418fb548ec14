use serde::{Deserialize, Serialize};
use std::string::FromUtf8Error;

/// Тело POST-запроса: хост присылает буфер как `{"data": [byte, ...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IngestBody {
    #[serde(default)]
    pub data: Vec<u8>,
}

impl IngestBody {
    /// Так хост передает запрос без тела.
    pub const EMPTY_MARKER: &'static str = "{}";

    pub fn into_sdp(self) -> Result<String, FromUtf8Error> {
        String::from_utf8(self.data)
    }
}
