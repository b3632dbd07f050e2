use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// `{"message": "..."}` body for operations that have nothing else to return.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GenericMessage {
    pub message: String,
}

impl GenericMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
