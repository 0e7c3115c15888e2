use crate::error::ExportError;
use crate::status::LotStatus;
use std::fs::File;
use std::path::Path;

pub fn export_csv<P: AsRef<Path>>(status: &LotStatus, path: P) -> Result<(), ExportError> {
    let path_ref = path.as_ref();
    let file = File::create(path_ref).map_err(|source| ExportError::FileCreate {
        path: path_ref.to_path_buf(),
        source,
    })?;

    let mut writer = csv::Writer::from_writer(file);

    writer.write_record(["Floor", "Spot", "Capacity", "Status", "Plate"])?;

    for floor in &status.floors {
        for spot in &floor.spots {
            let state = if spot.occupied { "Occupied" } else { "Free" };
            writer.write_record([
                floor.number.to_string().as_str(),
                spot.id.to_string().as_str(),
                spot.capacity.name(),
                state,
                spot.plate.as_deref().unwrap_or(""),
            ])?;
        }
    }

    writer.flush().map_err(|e| ExportError::WriteError {
        message: e.to_string(),
    })?;

    Ok(())
}
