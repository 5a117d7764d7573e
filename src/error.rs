use thiserror::Error;

#[derive(Error, Debug)]
pub enum RerollError {
    #[error("LCU transport error: {0}")]
    Transport(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Loot entry not found in ledger: {0}")]
    LootRetrieve(String),

    #[error("Invalid lockfile: {0}")]
    Lockfile(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RerollError {
    /// Network or HTTP-layer failure reaching the client
    pub fn is_transport(&self) -> bool {
        matches!(self, RerollError::Transport(_) | RerollError::Http(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, RerollError::Decode(_))
    }
}

pub type Result<T> = std::result::Result<T, RerollError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_transport_and_decode() {
        assert!(RerollError::Transport("refused".into()).is_transport());
        assert!(!RerollError::LootRetrieve("CHAMPION_SKIN_1".into()).is_transport());

        let decode = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err = RerollError::from(decode);
        assert!(err.is_decode());
        assert!(!err.is_transport());
    }
}
