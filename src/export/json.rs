use crate::error::ExportError;
use crate::status::LotStatus;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes the snapshot as pretty-printed JSON, one trailing newline included.
pub fn export_json<P: AsRef<Path>>(status: &LotStatus, path: P) -> Result<(), ExportError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| ExportError::FileCreate {
        path: path.to_path_buf(),
        source,
    })?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, status)?;
    writeln!(writer)
        .and_then(|()| writer.flush())
        .map_err(|e| ExportError::WriteError {
            message: e.to_string(),
        })
}
