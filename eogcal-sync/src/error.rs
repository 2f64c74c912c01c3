use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("cannot resolve {channel} address `{address}`: {source}")]
    Resolve {
        channel: &'static str,
        address: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{channel} address `{address}` resolved to nothing")]
    NoAddress {
        channel: &'static str,
        address: String,
    },
    #[error("{channel} send failed: {source}")]
    Io {
        channel: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("{channel} sent {sent} of {len} bytes")]
    Truncated {
        channel: &'static str,
        sent: usize,
        len: usize,
    },
}
