use std::{
    collections::BTreeMap,
    io::{Cursor, Read, Write},
};

use zip::{write::FileOptions, ZipArchive, ZipWriter};

use crate::exception::{VspException, VspResult};

/// Files of an uploaded archive by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileContentHandler {
    files: BTreeMap<String, Vec<u8>>,
}

impl FileContentHandler {
    /// Reads every file entry of a zip, rejecting entries that escape the archive root.
    pub fn from_zip(content: &[u8]) -> VspResult<Self> {
        let mut archive = ZipArchive::new(Cursor::new(content))?;
        let mut files = BTreeMap::new();
        for i in 0..archive.len() {
            let mut entry = archive.by_index(i)?;
            check_for_zip_slip(entry.name(), entry.enclosed_name().is_some())?;
            if entry.is_dir() {
                continue;
            }
            let mut data = Vec::new();
            entry
                .read_to_end(&mut data)
                .map_err(|e| VspException::InvalidZipEntry {
                    entry_name: entry.name().to_owned(),
                    reason: e.to_string(),
                })?;
            files.insert(entry.name().to_owned(), data);
        }
        Ok(Self { files })
    }

    /// Packs the files into a new zip, in name order.
    pub fn to_zip(&self) -> VspResult<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, data) in self.files.iter() {
            zip.start_file::<_, ()>(name.as_str(), FileOptions::default())?;
            zip.write_all(data)?;
        }
        Ok(zip.finish()?.into_inner())
    }

    pub fn add_file(&mut self, file_name: &str, content: Vec<u8>) {
        self.files.insert(file_name.to_owned(), content);
    }

    pub fn file_content(&self, file_name: &str) -> Option<&[u8]> {
        self.files.get(file_name).map(Vec::as_slice)
    }

    pub fn contains_file(&self, file_name: &str) -> bool {
        self.files.contains_key(file_name)
    }

    pub fn file_list(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FromIterator<(String, Vec<u8>)> for FileContentHandler {
    fn from_iter<T: IntoIterator<Item = (String, Vec<u8>)>>(iter: T) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

/// An entry is safe when it resolves to a path inside the archive root.
pub fn check_for_zip_slip(entry_name: &str, enclosed: bool) -> VspResult<()> {
    if enclosed {
        return Ok(());
    }
    tracing::error!("Zip entry {entry_name} escapes the archive root");
    Err(VspException::ZipSlip {
        entry_name: entry_name.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zip_of(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in entries {
            zip.start_file::<_, ()>(*name, FileOptions::default()).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn test_read_zip() {
        let content = zip_of(&[("base.yaml", "heat_template_version: 2013-05-23"), ("base.env", "")]);
        let handler = FileContentHandler::from_zip(&content).unwrap();
        assert_eq!(handler.file_list().collect::<Vec<_>>(), vec!["base.env", "base.yaml"]);
        assert_eq!(
            handler.file_content("base.yaml"),
            Some("heat_template_version: 2013-05-23".as_bytes())
        );
        let repacked = FileContentHandler::from_zip(&handler.to_zip().unwrap()).unwrap();
        assert_eq!(repacked, handler);
    }

    #[test]
    fn test_zip_slip_rejected() {
        let content = zip_of(&[("../../etc/passwd", "root")]);
        let err = FileContentHandler::from_zip(&content).unwrap_err();
        assert!(matches!(err, VspException::ZipSlip { .. }));
    }

    #[test]
    fn test_declared_size_is_not_trusted() {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default().compression_method(zip::CompressionMethod::Stored);
        zip.start_file::<_, ()>("base.yaml", options).unwrap();
        zip.write_all(b"resources: {}").unwrap();
        let mut content = zip.finish().unwrap().into_inner();
        // uncompressed size field of the central directory header
        let header = content
            .windows(4)
            .position(|w| w == [0x50, 0x4b, 0x01, 0x02])
            .unwrap();
        content[header + 24..header + 28].copy_from_slice(&0xfff0_0000u32.to_le_bytes());

        match FileContentHandler::from_zip(&content) {
            Ok(handler) => {
                assert_eq!(handler.file_content("base.yaml"), Some("resources: {}".as_bytes()))
            }
            Err(e) => assert!(matches!(
                e,
                VspException::InvalidZipEntry { .. } | VspException::InternalError { .. }
            )),
        }
    }

    #[test]
    fn test_garbage_is_not_a_zip() {
        assert!(FileContentHandler::from_zip(b"not a zip").is_err());
    }
}
