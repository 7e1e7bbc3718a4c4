use crate::parser::parse_exif;
use crate::structs::exif_info::ExifInfo;
use log::debug;
use std::path::Path;

/// Something that can produce raw `name=value` tag lines for an image file.
///
/// [`Identify`](crate::Identify) is the implementation backed by ImageMagick.
/// Closures of the shape `Fn(&Path) -> Result<String, E>` implement this too,
/// which is convenient for tests and for callers that already hold the text.
pub trait TagSource {
    type Error;

    fn read_tags(&self, path: &Path) -> Result<String, Self::Error>;
}

impl<F, E> TagSource for F
where
    F: Fn(&Path) -> Result<String, E>,
{
    type Error = E;

    fn read_tags(&self, path: &Path) -> Result<String, E> {
        self(path)
    }
}

/// Reads the tags of `path` from `source` and normalizes them.
///
/// Errors from the source are returned unchanged. Once text is available this
/// cannot fail: missing or malformed tags just leave fields empty.
pub fn extract_exif<S>(source: &S, path: &Path) -> Result<ExifInfo, S::Error>
where
    S: TagSource + ?Sized,
{
    debug!("Extracting EXIF from {}", path.display());
    let raw = source.read_tags(path)?;
    let exif = parse_exif(&raw);
    debug!("Exif information for {}: {:?}", path.display(), exif);
    Ok(exif)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::cell::RefCell;
    use std::path::PathBuf;

    #[derive(Debug, PartialEq)]
    enum FakeError {
        Missing(PathBuf),
    }

    struct RecordingSource {
        output: &'static str,
        requested: RefCell<Vec<PathBuf>>,
    }

    impl TagSource for RecordingSource {
        type Error = FakeError;

        fn read_tags(&self, path: &Path) -> Result<String, FakeError> {
            self.requested.borrow_mut().push(path.to_path_buf());
            Ok(self.output.to_string())
        }
    }

    #[test]
    fn test_extract_exif_parses_source_output() {
        let source = RecordingSource {
            output: "exif:make=Apple\nexif:customrendered=3\nwidth=4032\n",
            requested: RefCell::new(Vec::new()),
        };

        let exif = extract_exif(&source, Path::new("photos/IMG_0001.HEIC")).unwrap();

        assert_eq!(exif.make.as_deref(), Some("Apple"));
        assert_eq!(exif.hdr, Some(true));
        assert_eq!(exif.width, Some(4032));
        assert_eq!(
            source.requested.borrow().as_slice(),
            [PathBuf::from("photos/IMG_0001.HEIC")]
        );
    }

    #[test]
    fn test_extract_exif_propagates_source_error() {
        let source = |path: &Path| -> Result<String, FakeError> {
            Err(FakeError::Missing(path.to_path_buf()))
        };

        let result = extract_exif(&source, Path::new("missing.jpg"));

        assert_matches!(result, Err(FakeError::Missing(path)) if path == Path::new("missing.jpg"));
    }

    #[test]
    fn test_extract_exif_through_trait_object() {
        let source: &dyn TagSource<Error = FakeError> =
            &|_: &Path| -> Result<String, FakeError> { Ok("exif:model=iPhone 12\n".to_string()) };

        let exif = extract_exif(source, Path::new("a.jpg")).unwrap();

        assert_eq!(exif.model.as_deref(), Some("iPhone 12"));
    }
}
