use crate::SourceError;
use lamp_base::Frame;

/// Async source of RGB frames.
///
/// `recv` yields `Ok(None)` once the stream has ended; live cameras never end.
/// A `SourceError::Decode` only loses the current frame, every other error
/// leaves the source unusable.
#[allow(async_fn_in_trait)]
pub trait FrameSource {
    async fn recv(&mut self) -> Result<Option<Frame>, SourceError>;
}
