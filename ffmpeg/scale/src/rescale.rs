/*!
    Batch rescaling of frame sequences.
*/

use tracing::{trace, warn};

use ffmpeg_types::{ImageGeometry, Result, VideoFrame};

use crate::ScaleContext;

/**
    Scale every frame in `frames` through `ctx`, in order.

    Each output frame is freshly allocated with the context's destination
    geometry, optionally rotated by 180°, and carries the presentation and
    decode timestamps of its input. The input frames are consumed.

    The batch is all-or-nothing: on the first failure, every output
    produced so far is dropped along with the remaining inputs, and the
    error is returned.
*/
pub fn rescale_all(
    ctx: &mut ScaleContext,
    frames: Vec<VideoFrame>,
    rotate: bool,
) -> Result<Vec<VideoFrame>> {
    rescale_all_with(ctx, frames, rotate, VideoFrame::alloc)
}

/**
    Like [`rescale_all`], but output frames come from `alloc`.

    `alloc` is called once per input frame with the context's destination
    geometry, and may hand out pooled or preallocated frames.
*/
pub fn rescale_all_with<F>(
    ctx: &mut ScaleContext,
    frames: Vec<VideoFrame>,
    rotate: bool,
    mut alloc: F,
) -> Result<Vec<VideoFrame>>
where
    F: FnMut(ImageGeometry) -> Result<VideoFrame>,
{
    let geometry = ctx.destination();
    let mut output = Vec::new();
    output.try_reserve_exact(frames.len())?;

    for (index, frame) in frames.iter().enumerate() {
        let mut scaled = alloc(geometry).inspect_err(|e| {
            warn!(index, error = %e, "output frame allocation failed, aborting batch");
        })?;
        ctx.scale(frame, &mut scaled, rotate)?;
        scaled.copy_timestamps_from(frame);
        output.push(scaled);
    }

    trace!(frames = output.len(), %geometry, "rescaled batch");
    Ok(output)
}
