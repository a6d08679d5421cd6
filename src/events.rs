// Completion events sent back to the UI loop
//
// Slow work (clipboard writes, storage requests) runs on spawned tasks so the
// loop keeps ticking. Each task reports exactly one of these when it is done,
// and the loop applies it to `App` on the UI task.

use crate::storage::StorageError;

#[derive(Debug)]
pub enum AppEvent {
    /// A referral-code clipboard write resolved
    CopyFinished(anyhow::Result<()>),

    /// An admin upload resolved; `Ok` carries the public URL
    UploadFinished {
        file: String,
        result: Result<String, StorageError>,
    },

    /// An admin delete resolved
    DeleteFinished {
        url: String,
        result: Result<(), StorageError>,
    },
}
