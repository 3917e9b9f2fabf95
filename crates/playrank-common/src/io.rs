//! JSON array files shared between pipeline stages.

use serde::Serialize;
use serde_json::Value;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use crate::error::{PlayrankError, Result};

/// Parse `reader` as a JSON array. Anything else is a structural error.
pub fn read_json_array<R: Read>(reader: R) -> Result<Vec<Value>> {
    match serde_json::from_reader(reader)? {
        Value::Array(items) => Ok(items),
        other => Err(PlayrankError::Structure(format!(
            "expected a JSON array at top level, found {}",
            json_kind(&other)
        ))),
    }
}

/// Read a JSON array from `path`.
pub fn read_json_array_file(path: impl AsRef<Path>) -> Result<Vec<Value>> {
    let file = File::open(path.as_ref())?;
    read_json_array(std::io::BufReader::new(file))
}

/// Write `value` as indented JSON. Non-ASCII text is written literally.
pub fn write_json<W: Write, T: Serialize + ?Sized>(writer: W, value: &T) -> Result<()> {
    let mut writer = BufWriter::new(writer);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Write `value` to `path`, creating parent directories as needed.
pub fn write_json_file<T: Serialize + ?Sized>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    write_json(File::create(path)?, value)
}

/// Human name of a JSON value's type, for error messages.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_top_level_object_is_structural_error() {
        let err = read_json_array(r#"{"package_name": "com.a"}"#.as_bytes()).unwrap_err();
        assert!(matches!(err, PlayrankError::Structure(_)), "got {err:?}");
    }

    #[test]
    fn test_invalid_json_is_serialization_error() {
        let err = read_json_array("[{".as_bytes()).unwrap_err();
        assert!(matches!(err, PlayrankError::Serialization(_)));
    }

    #[test]
    fn test_file_roundtrip_keeps_non_ascii_literal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.json");
        write_json_file(&path, &json!([{"title": "쿠키런: 킹덤"}])).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("쿠키런: 킹덤"));
        assert_eq!(read_json_array_file(&path).unwrap().len(), 1);
    }
}
