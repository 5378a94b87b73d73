use thiserror::Error;

pub type VspResult<T> = Result<T, VspException>;

#[derive(Error, Debug)]
pub enum VspException {
    #[error("Illegal manifest: volume {file_name} is followed by a non env file.")]
    IllegalManifest { file_name: String },

    #[error("File: {file_name} of type: {file_type} is not legal as a module dependency.")]
    FileTypeNotLegal {
        file_name: String,
        file_type: String,
    },

    #[error("Manifest is not valid: {reason}")]
    InvalidManifest { reason: String },

    #[error("Failed to create manifest from zip.")]
    CreateManifestFromZip,

    #[error("Zip entry: {entry_name} escapes the archive root.")]
    ZipSlip { entry_name: String },

    #[error("Zip entry: {entry_name} cannot be read: {reason}")]
    InvalidZipEntry { entry_name: String, reason: String },

    #[error("Vsp internal error: {source}")]
    InternalError {
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for VspException {
    fn from(e: anyhow::Error) -> Self {
        VspException::InternalError { source: e }
    }
}

impl From<zip::result::ZipError> for VspException {
    fn from(e: zip::result::ZipError) -> Self {
        VspException::InternalError { source: e.into() }
    }
}

impl From<std::io::Error> for VspException {
    fn from(e: std::io::Error) -> Self {
        VspException::InternalError { source: e.into() }
    }
}
