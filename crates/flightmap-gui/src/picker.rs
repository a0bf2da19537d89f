use flightmap_core::error::Result;
use flightmap_core::picker::{FilePicker, PickRequest, PickedFile};

/// Native file dialog via `rfd`.
#[derive(Default)]
pub struct DialogPicker;

impl FilePicker for DialogPicker {
    fn pick_file(&mut self, request: &PickRequest) -> Result<Option<PickedFile>> {
        let extensions = request.file_type.extensions();
        let picked = rfd::FileDialog::new()
            .set_title(&request.title)
            .add_filter("KML files", &extensions[..])
            .pick_file();
        Ok(picked.map(PickedFile::from_path))
    }
}
