//! Tests for error classification, message formatting and source chaining

#[cfg(test)]
mod tests {
    use std::error::Error;

    use marbletrack::io::error::{illegal_state, invalid_argument};
    use marbletrack::{ErrorKind, MarbleError};

    // Tests every variant maps to its kind
    // Verified by classifying NullInput as InvalidArgument
    #[test]
    fn test_kinds() {
        assert_eq!(invalid_argument("op", &"bad").kind(), ErrorKind::InvalidArgument);
        assert_eq!(illegal_state("op", &"busy").kind(), ErrorKind::IllegalState);
        assert_eq!(
            MarbleError::NullInput { parameter: "direction" }.kind(),
            ErrorKind::NullInput
        );
        assert_eq!(
            MarbleError::OutOfBounds { x: 5, y: -1, width: 3, height: 2 }.kind(),
            ErrorKind::OutOfBounds
        );
    }

    // Tests messages carry the operation and reason
    #[test]
    fn test_messages() {
        let message = illegal_state("receptor accept", &"slot facing TOP is occupied").to_string();
        assert!(message.contains("receptor accept"));
        assert!(message.contains("slot facing TOP is occupied"));

        let message = MarbleError::OutOfBounds { x: 5, y: -1, width: 3, height: 2 }.to_string();
        assert!(message.contains("(5, -1)"));
        assert!(message.contains("3x2"));
    }

    // Tests file system errors keep their source
    // Verified by breaking source chain
    #[test]
    fn test_file_system_source_chain() {
        let error = MarbleError::FileSystem {
            path: "/tmp/board.png".into(),
            operation: "create directory",
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(error.source().is_some());
        assert_eq!(error.kind(), ErrorKind::Io);
        assert!(error.to_string().contains("/tmp/board.png"));
    }

    // Tests image export errors keep their source
    #[test]
    fn test_image_export_error() {
        let error = MarbleError::ImageExport {
            path: "out.png".into(),
            source: image::ImageError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "missing",
            )),
        };
        assert!(error.source().is_some());
        assert!(error.to_string().contains("out.png"));
    }
}
