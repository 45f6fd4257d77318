//! Store writes for every record kind the pipeline produces.

use spritepack_picture::CompressedPicture;
use spritepack_spec::{AnimationRecord, SpritesheetRecord, TextureRecord};
use spritepack_store::{Bucket, WriteTxn};

use crate::error::BuildError;
use crate::tags::TagIndex;

/// Stores a compressed picture under `bucket[key]`.
pub fn write_picture(
    txn: &mut WriteTxn<'_>,
    bucket: Bucket,
    key: &str,
    picture: &CompressedPicture,
) -> Result<(), BuildError> {
    txn.put_record(bucket, key, picture)?;
    tracing::debug!(
        "Stored {}x{} picture {}/{} ({} runs)",
        picture.width,
        picture.height,
        bucket,
        key,
        picture.runs.len()
    );
    Ok(())
}

/// Stores an animation record under `animations[name]`.
pub fn write_animation(
    txn: &mut WriteTxn<'_>,
    name: &str,
    record: &AnimationRecord,
) -> Result<(), BuildError> {
    txn.put_record(Bucket::Animations, name, record)?;
    tracing::debug!(
        "Stored animation '{}' ({} frames, {} ticks)",
        name,
        record.len(),
        record.total_duration()
    );
    Ok(())
}

/// Stores every tag entry, in tag order. Returns the number of tags written.
pub fn write_tags(txn: &mut WriteTxn<'_>, index: &TagIndex) -> Result<usize, BuildError> {
    txn.create_bucket(Bucket::Tags)?;
    for (tag, names) in index {
        txn.put_record(Bucket::Tags, tag, names)?;
        tracing::debug!("Stored tag '{}' ({} animations)", tag, names.len());
    }
    Ok(index.len())
}

/// Stores a spritesheet record under `spritesheets[id]`.
pub fn write_spritesheet(
    txn: &mut WriteTxn<'_>,
    id: &str,
    record: &SpritesheetRecord,
) -> Result<(), BuildError> {
    txn.put_record(Bucket::Spritesheets, id, record)?;
    tracing::debug!(
        "Stored spritesheet '{}' ({}x{} cells)",
        id,
        record.width,
        record.height
    );
    Ok(())
}

/// Stores a texture record under `textures[id]`.
pub fn write_texture(
    txn: &mut WriteTxn<'_>,
    id: &str,
    record: &TextureRecord,
) -> Result<(), BuildError> {
    txn.put_record(Bucket::Textures, id, record)?;
    tracing::debug!("Stored texture '{}' -> picture '{}'", id, record.picture);
    Ok(())
}
